//! 作答记录服务 - 业务能力层
//!
//! 只负责"保存一次已提交作答"能力，不关心会话流程

use tracing::{debug, info};

use crate::error::AppResult;
use crate::infrastructure::{keys, DocumentStore};
use crate::models::attempt::{AttemptOutcome, AttemptRecord, ReviewSnapshot};

/// 作答记录服务
///
/// 职责：
/// - 向 `results` 追加成绩记录，从不覆盖已有记录
/// - 用最近一次作答覆盖 `lastAttempt` 回顾快照
pub struct AttemptRecorder {
    store: DocumentStore,
}

impl AttemptRecorder {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    /// 保存一次作答：追加成绩记录并覆盖回顾快照
    pub fn record(&self, outcome: &AttemptOutcome) -> AppResult<AttemptRecord> {
        let record = outcome.to_record();

        let mut results: Vec<AttemptRecord> = self.store.load_for_update(keys::RESULTS)?;
        results.push(record.clone());
        self.store.save(keys::RESULTS, &results)?;
        debug!("成绩记录已追加，共 {} 条", results.len());

        self.store.save(keys::LAST_ATTEMPT, &outcome.to_snapshot())?;

        info!(
            "✓ 已保存作答 {}: 得分 {}/{}",
            record.key(),
            record.score,
            record.total
        );
        Ok(record)
    }

    /// 读取最近一次作答的回顾快照
    pub fn last_snapshot(&self) -> AppResult<Option<ReviewSnapshot>> {
        self.store.load(keys::LAST_ATTEMPT)
    }

    /// 丢弃回顾快照（新作答开始或学生结束回顾时）
    pub fn discard_snapshot(&self) -> AppResult<()> {
        debug!("丢弃回顾快照");
        self.store.remove(keys::LAST_ATTEMPT)
    }
}
