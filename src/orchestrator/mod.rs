//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责命令分派和作答驱动，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `app` - 应用入口
//! - 打开数据目录，建立各项服务
//! - 按命令调用名册、目录、成绩等能力
//! - 输出回顾和成绩列表
//!
//! ### `session_runner` - 会话驱动器
//! - 在同一个任务里轮流处理输入和每秒 tick
//! - 倒计时代号变化时重建计时器
//! - 会话提交后交给 QuizFlow 计分保存
//!
//! ### `command` - 命令行解析
//!
//! ## 层次关系
//!
//! ```text
//! app (处理一条命令)
//!     ↓
//! session_runner (驱动一次作答)
//!     ↓
//! workflow::QuizFlow / QuizSession (一次作答的流程和状态)
//!     ↓
//! services (能力层：catalog / roster / randomizer / scorer / recorder / review)
//!     ↓
//! infrastructure (基础设施：DocumentStore / KvStore)
//! ```

pub mod app;
pub mod command;
pub mod session_runner;

// 重新导出主要类型
pub use app::App;
pub use command::Command;
pub use session_runner::{run_session, SessionInput};
