use std::fmt;

use crate::models::quiz::ValidationError;
use crate::services::roster::RosterError;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 存储相关错误
    Store(StoreError),
    /// 答题会话错误
    Session(SessionError),
    /// 试卷校验错误
    Quiz(ValidationError),
    /// 学生名册错误
    Roster(RosterError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Store(e) => write!(f, "存储错误: {}", e),
            AppError::Session(e) => write!(f, "会话错误: {}", e),
            AppError::Quiz(e) => write!(f, "试卷错误: {}", e),
            AppError::Roster(e) => write!(f, "名册错误: {}", e),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Store(e) => Some(e),
            AppError::Session(e) => Some(e),
            AppError::Quiz(e) => Some(e),
            AppError::Roster(e) => Some(e),
        }
    }
}

/// 存储相关错误
#[derive(Debug)]
pub enum StoreError {
    /// 读取文档失败
    ReadFailed {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文档失败
    WriteFailed {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 删除文档失败
    DeleteFailed {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 文档序列化失败
    EncodeFailed {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 数据目录不可用
    DirectoryUnavailable {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 文档存在但无法解析，拒绝覆盖
    CorruptDocument {
        key: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::ReadFailed { key, source } => {
                write!(f, "读取文档失败 ({}): {}", key, source)
            }
            StoreError::WriteFailed { key, source } => {
                write!(f, "写入文档失败 ({}): {}", key, source)
            }
            StoreError::DeleteFailed { key, source } => {
                write!(f, "删除文档失败 ({}): {}", key, source)
            }
            StoreError::EncodeFailed { key, source } => {
                write!(f, "序列化文档失败 ({}): {}", key, source)
            }
            StoreError::DirectoryUnavailable { path, source } => {
                write!(f, "数据目录不可用 ({}): {}", path, source)
            }
            StoreError::CorruptDocument { key, source } => {
                write!(f, "文档已损坏，拒绝覆盖 ({}): {}", key, source)
            }
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::ReadFailed { source, .. }
            | StoreError::WriteFailed { source, .. }
            | StoreError::DeleteFailed { source, .. }
            | StoreError::EncodeFailed { source, .. }
            | StoreError::DirectoryUnavailable { source, .. }
            | StoreError::CorruptDocument { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
        }
    }
}

/// 答题会话错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    /// 没有可用的试卷（或当前试卷没有题目）
    NoQuizAvailable,
    /// 没有已登录的学生
    NoStudentLoggedIn,
    /// 选项超出范围
    InvalidChoice { choice: usize, option_count: usize },
    /// 会话不在答题状态
    NotInProgress,
    /// 会话尚未提交
    NotSubmitted,
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::NoQuizAvailable => write!(f, "没有可用的试卷"),
            SessionError::NoStudentLoggedIn => write!(f, "没有已登录的学生"),
            SessionError::InvalidChoice {
                choice,
                option_count,
            } => {
                write!(f, "选项 {} 超出范围 [0, {})", choice, option_count)
            }
            SessionError::NotInProgress => write!(f, "会话不在答题状态"),
            SessionError::NotSubmitted => write!(f, "会话尚未提交"),
        }
    }
}

impl std::error::Error for SessionError {}

// ========== 从常见错误类型转换 ==========

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Store(err)
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        AppError::Session(err)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Quiz(err)
    }
}

impl From<RosterError> for AppError {
    fn from(err: RosterError) -> Self {
        AppError::Roster(err)
    }
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文档读取错误
    pub fn read_failed(
        key: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Store(StoreError::ReadFailed {
            key: key.into(),
            source: Box::new(source),
        })
    }

    /// 创建文档写入错误
    pub fn write_failed(
        key: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Store(StoreError::WriteFailed {
            key: key.into(),
            source: Box::new(source),
        })
    }

    /// 创建文档删除错误
    pub fn delete_failed(
        key: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        AppError::Store(StoreError::DeleteFailed {
            key: key.into(),
            source: Box::new(source),
        })
    }

    /// 是否为"没有可用试卷"
    pub fn is_no_quiz_available(&self) -> bool {
        matches!(self, AppError::Session(SessionError::NoQuizAvailable))
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
