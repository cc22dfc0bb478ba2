//! # Quiz Desk
//!
//! 一个本地运行的测验管理程序：导入试卷、管理学生、限时作答、回顾和分享成绩
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 键值存储和 JSON 文档读写
//! - `DocumentStore` - 所有持久化状态的唯一入口，读取失败时按"无数据"处理
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"
//! - `randomizer` - 打乱题目和选项，保持正确答案
//! - `scorer` - 计分
//! - `AttemptRecorder` - 保存成绩和回顾快照
//! - `review_renderer` - 生成回顾内容
//! - `QuizCatalog` / `Roster` / `ResultsService` - 试卷、学生、成绩
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一次作答"的完整流程
//! - `QuizSession` - 作答状态机（作答中 → 已提交），每题独立倒计时
//! - `QuizFlow` - 流程编排（选卷 → 打乱 → 作答 → 计分 → 保存）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/app` - 命令分派
//! - `orchestrator/session_runner` - 输入和计时驱动
//!
//! ## 模块结构

pub mod config;
pub mod error;
pub mod infrastructure;
pub mod logger;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AppError, AppResult, SessionError};
pub use infrastructure::{DocumentStore, FileKvStore, KvStore, MemoryKvStore};
pub use models::{AttemptOutcome, AttemptRecord, Question, Quiz, QuizDraft, ReviewSnapshot};
pub use orchestrator::{run_session, App, Command, SessionInput};
pub use workflow::{QuizFlow, QuizSession, SessionPhase, Transition};
