//! 作答流程 - 流程层
//!
//! 核心职责：定义"一次作答"从开始到保存的完整流程
//!
//! 流程顺序：
//! 1. 选出当前试卷 → 建立会话（打乱题目）
//! 2. 会话接收选择 / 下一题 / tick 事件（由调用方驱动）
//! 3. 会话提交 → 计分 → 保存成绩记录和回顾快照

use std::sync::Arc;

use rand::Rng;
use tracing::info;

use crate::error::{AppResult, SessionError};
use crate::infrastructure::DocumentStore;
use crate::models::attempt::AttemptOutcome;
use crate::models::student::StudentIdentity;
use crate::services::{AttemptRecorder, QuizCatalog};
use crate::utils::clock::{Clock, SystemClock};
use crate::utils::logging::log_attempt_summary;
use crate::workflow::quiz_session::QuizSession;

/// 作答流程
///
/// - 决定作答哪份试卷
/// - 不持有会话，会话由调用方驱动
/// - 只依赖业务能力（services）
pub struct QuizFlow {
    catalog: QuizCatalog,
    recorder: AttemptRecorder,
    clock: Arc<dyn Clock>,
}

impl QuizFlow {
    pub fn new(store: DocumentStore) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    pub fn with_clock(store: DocumentStore, clock: Arc<dyn Clock>) -> Self {
        Self {
            catalog: QuizCatalog::new(store.clone()),
            recorder: AttemptRecorder::new(store),
            clock,
        }
    }

    /// 为学生开始作答当前试卷
    ///
    /// 没有试卷或当前试卷没有题目时返回 `NoQuizAvailable`。
    /// 新作答开始时丢弃上一份回顾快照。
    pub fn start<R: Rng + ?Sized>(
        &self,
        student: StudentIdentity,
        rng: &mut R,
    ) -> AppResult<QuizSession> {
        let quiz = self
            .catalog
            .current()?
            .ok_or(SessionError::NoQuizAvailable)?;

        let session = QuizSession::start(&quiz, student, rng)?;
        self.recorder.discard_snapshot()?;
        Ok(session)
    }

    /// 结束已提交的会话：计分并保存
    pub fn finish(&self, session: QuizSession) -> AppResult<AttemptOutcome> {
        let outcome = session.into_outcome(self.clock.now_millis())?;
        self.recorder.record(&outcome)?;
        log_attempt_summary(&outcome);
        info!("✓ [{}] 回顾快照已更新", outcome.quiz_id);
        Ok(outcome)
    }
}
