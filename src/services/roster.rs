//! 学生名册服务 - 业务能力层
//!
//! 负责学生账号的增删和登录身份的保存

use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::AppResult;
use crate::infrastructure::{keys, DocumentStore};
use crate::models::student::{StudentAccount, StudentIdentity};

/// 名册错误
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RosterError {
    #[error("学号、邮箱和密码都不能为空")]
    MissingField,
    #[error("学号 {0} 含有非法字符")]
    InvalidStudentId(String),
    #[error("学号 {0} 已存在")]
    DuplicateStudent(String),
    #[error("找不到学生 {0}")]
    StudentNotFound(String),
    #[error("密码错误")]
    IncorrectPassword,
}

/// 新增学生的输入
#[derive(Debug, Clone, Default)]
pub struct NewStudent {
    pub student_id: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

/// 学号只允许字母、数字、下划线和连字符
fn is_valid_student_id(student_id: &str) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"^[A-Za-z0-9_-]+$").ok())
        .as_ref()
        .is_some_and(|re| re.is_match(student_id))
}

/// 学生名册服务
pub struct Roster {
    store: DocumentStore,
}

impl Roster {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> AppResult<Vec<StudentAccount>> {
        self.store.load_or_default(keys::STUDENTS)
    }

    /// 新增学生，学号不区分大小写地唯一
    pub fn add(&self, new: NewStudent, created_at: i64) -> AppResult<StudentAccount> {
        let student_id = new.student_id.trim().to_string();
        let email = new.email.trim().to_string();

        if student_id.is_empty() || email.is_empty() || new.password.is_empty() {
            return Err(RosterError::MissingField.into());
        }
        if !is_valid_student_id(&student_id) {
            return Err(RosterError::InvalidStudentId(student_id).into());
        }

        let mut students: Vec<StudentAccount> = self.store.load_for_update(keys::STUDENTS)?;
        if students.iter().any(|s| s.has_id(&student_id)) {
            return Err(RosterError::DuplicateStudent(student_id).into());
        }

        let account = StudentAccount {
            student_id,
            email,
            password: new.password,
            name: new.name.trim().to_string(),
            created_at,
        };
        students.push(account.clone());
        self.store.save(keys::STUDENTS, &students)?;

        info!("✓ 学生已保存: {}", account.student_id);
        Ok(account)
    }

    /// 删除学生，返回是否确实删除了记录
    pub fn remove(&self, student_id: &str) -> AppResult<bool> {
        let mut students: Vec<StudentAccount> = self.store.load_for_update(keys::STUDENTS)?;
        let before = students.len();
        students.retain(|s| !s.has_id(student_id));
        let removed = students.len() != before;
        if removed {
            self.store.save(keys::STUDENTS, &students)?;
            info!("✓ 学生已删除: {}", student_id);
        }
        Ok(removed)
    }

    pub fn clear(&self) -> AppResult<()> {
        self.store.save(keys::STUDENTS, &Vec::<StudentAccount>::new())?;
        info!("✓ 已清空全部学生");
        Ok(())
    }

    /// 校验学号和密码，成功后保存登录身份
    pub fn login(&self, student_id: &str, password: &str) -> AppResult<StudentIdentity> {
        let student_id = student_id.trim();
        let students = self.list()?;
        let account = students
            .iter()
            .find(|s| s.has_id(student_id))
            .ok_or_else(|| RosterError::StudentNotFound(student_id.to_string()))?;

        if account.password != password {
            debug!("学生 {} 密码错误", account.student_id);
            return Err(RosterError::IncorrectPassword.into());
        }

        let identity = account.identity();
        self.store.save(keys::STUDENT_LOGGED_IN, &identity)?;
        info!("✓ 学生已登录: {}", identity.student_id);
        Ok(identity)
    }

    pub fn logged_in(&self) -> AppResult<Option<StudentIdentity>> {
        self.store.load(keys::STUDENT_LOGGED_IN)
    }

    pub fn logout(&self) -> AppResult<()> {
        self.store.remove(keys::STUDENT_LOGGED_IN)
    }
}
