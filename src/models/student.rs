use serde::{Deserialize, Serialize};

/// 已登录学生的身份信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentIdentity {
    pub student_id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
}

/// 名册中的学生账号
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAccount {
    pub student_id: String,
    #[serde(default)]
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub created_at: i64,
}

impl StudentAccount {
    pub fn identity(&self) -> StudentIdentity {
        StudentIdentity {
            student_id: self.student_id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
        }
    }

    /// 学号比较不区分大小写
    pub fn has_id(&self, student_id: &str) -> bool {
        self.student_id.eq_ignore_ascii_case(student_id)
    }
}
