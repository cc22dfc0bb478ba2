//! 命令行命令解析

use anyhow::{bail, Context, Result};

use crate::models::attempt::AttemptKey;

/// 命令行命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// 从目录导入 TOML 试卷，缺省使用配置目录
    Import { folder: Option<String> },
    AddStudent {
        student_id: String,
        email: String,
        password: String,
        name: String,
    },
    RemoveStudent { student_id: String },
    /// 清空名册
    ClearStudents,
    Students,
    Login { student_id: String, password: String },
    Logout,
    /// 作答当前试卷
    Take,
    /// 回顾最近一次作答
    Review,
    /// 结束回顾并丢弃快照
    FinishReview,
    /// 按试卷查看全部成绩
    Results,
    /// 标记成绩为已分享
    Share(AttemptKey),
    /// 查看自己已分享的成绩
    MyResults,
    Help,
}

pub const USAGE: &str = "\
usage: quiz_desk <command>

  import [dir]                              import TOML quizzes
  add-student <id> <email> <password> [name]
  remove-student <id>
  clear-students                            remove every student
  students                                  list the roster
  login <id> <password>
  logout
  take                                      take the current quiz
  review                                    review the last attempt
  finish-review                             discard the last attempt review
  results                                   list results grouped by quiz
  share <quizId> <studentId> <submittedAt>  mark a result as shared
  my-results                                show your shared results";

impl Command {
    /// 解析参数（不含程序名）
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        let Some((name, rest)) = args.split_first() else {
            return Ok(Command::Help);
        };

        let command = match (name.as_str(), rest) {
            ("import", []) => Command::Import { folder: None },
            ("import", [folder]) => Command::Import {
                folder: Some(folder.clone()),
            },
            ("add-student", [id, email, password]) => Command::AddStudent {
                student_id: id.clone(),
                email: email.clone(),
                password: password.clone(),
                name: String::new(),
            },
            ("add-student", [id, email, password, name @ ..]) if !name.is_empty() => {
                Command::AddStudent {
                    student_id: id.clone(),
                    email: email.clone(),
                    password: password.clone(),
                    name: name.join(" "),
                }
            }
            ("remove-student", [id]) => Command::RemoveStudent {
                student_id: id.clone(),
            },
            ("clear-students", []) => Command::ClearStudents,
            ("students", []) => Command::Students,
            ("login", [id, password]) => Command::Login {
                student_id: id.clone(),
                password: password.clone(),
            },
            ("logout", []) => Command::Logout,
            ("take", []) => Command::Take,
            ("review", []) => Command::Review,
            ("finish-review", []) => Command::FinishReview,
            ("results", []) => Command::Results,
            ("share", [quiz_id, student_id, submitted_at]) => Command::Share(AttemptKey {
                quiz_id: quiz_id.clone(),
                student_id: student_id.clone(),
                submitted_at: submitted_at
                    .parse()
                    .with_context(|| format!("提交时间不是整数: {}", submitted_at))?,
            }),
            ("my-results", []) => Command::MyResults,
            ("help" | "-h" | "--help", _) => Command::Help,
            (other, _) => bail!("无法识别的命令或参数: {}\n\n{}", other, USAGE),
        };

        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse(Vec::<String>::new()).unwrap(), Command::Help);
        assert_eq!(Command::parse(["take"]).unwrap(), Command::Take);
        assert_eq!(
            Command::parse(["clear-students"]).unwrap(),
            Command::ClearStudents
        );
        assert_eq!(
            Command::parse(["import", "quizzes"]).unwrap(),
            Command::Import {
                folder: Some("quizzes".into())
            }
        );
        assert_eq!(
            Command::parse(["add-student", "S1", "a@b.c", "pw", "Ann", "Lee"]).unwrap(),
            Command::AddStudent {
                student_id: "S1".into(),
                email: "a@b.c".into(),
                password: "pw".into(),
                name: "Ann Lee".into(),
            }
        );
        assert_eq!(
            Command::parse(["share", "Q001", "S1", "1700000000000"]).unwrap(),
            Command::Share(AttemptKey {
                quiz_id: "Q001".into(),
                student_id: "S1".into(),
                submitted_at: 1_700_000_000_000,
            })
        );
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(Command::parse(["share", "Q001", "S1", "yesterday"]).is_err());
        assert!(Command::parse(["login", "S1"]).is_err());
        assert!(Command::parse(["dance"]).is_err());
    }
}
