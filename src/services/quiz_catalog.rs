//! 试卷目录服务 - 业务能力层
//!
//! 负责试卷的保存、编号和"当前试卷"的选择

use tracing::{info, warn};

use crate::error::AppResult;
use crate::infrastructure::{keys, DocumentStore};
use crate::models::quiz::{Quiz, QuizDraft};

/// 试卷目录服务
pub struct QuizCatalog {
    store: DocumentStore,
}

impl QuizCatalog {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub fn list(&self) -> AppResult<Vec<Quiz>> {
        self.store.load_or_default(keys::QUIZZES)
    }

    pub fn find(&self, quiz_id: &str) -> AppResult<Option<Quiz>> {
        Ok(self.list()?.into_iter().find(|q| q.quiz_id == quiz_id))
    }

    /// 当前试卷：创建时间最新的一份，时间相同时取先保存的
    pub fn current(&self) -> AppResult<Option<Quiz>> {
        let mut quizzes = self.list()?;
        // sort_by 是稳定排序
        quizzes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quizzes.into_iter().next())
    }

    /// 校验草稿并保存为新试卷
    pub fn create(&self, draft: &QuizDraft, created_at: i64) -> AppResult<Quiz> {
        let (title, questions) = draft.validate()?;

        let mut quizzes: Vec<Quiz> = self.store.load_for_update(keys::QUIZZES)?;
        let quiz = Quiz {
            quiz_id: Quiz::id_for_sequence(quizzes.len() + 1),
            title,
            questions,
            created_at,
        };
        quizzes.push(quiz.clone());
        self.store.save(keys::QUIZZES, &quizzes)?;

        info!(
            "✓ 试卷已保存: {} {} ({} 道题)",
            quiz.quiz_id,
            quiz.title,
            quiz.question_count()
        );
        Ok(quiz)
    }

    /// 批量导入草稿，无效草稿跳过并记录警告
    ///
    /// 每份试卷的创建时间依次递增，保证最后导入的成为当前试卷
    pub fn import_drafts(&self, drafts: &[QuizDraft], now: i64) -> AppResult<Vec<Quiz>> {
        let mut created = Vec::new();
        for (offset, draft) in drafts.iter().enumerate() {
            match self.create(draft, now + offset as i64) {
                Ok(quiz) => created.push(quiz),
                Err(crate::error::AppError::Quiz(e)) => {
                    warn!("⚠️ 跳过试卷 \"{}\": {}", draft.title, e);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(created)
    }
}
