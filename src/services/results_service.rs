//! 成绩查看服务 - 业务能力层
//!
//! 成绩集合只追加，唯一的原地修改是"标记为已分享"

use tracing::{info, warn};

use crate::error::AppResult;
use crate::infrastructure::{keys, DocumentStore};
use crate::models::attempt::{AttemptKey, AttemptRecord};
use crate::models::quiz::Quiz;

/// 按试卷分组的成绩
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuizResults {
    pub quiz_id: String,
    /// 目录中的试卷标题，试卷已不存在时为试卷ID
    pub title: String,
    pub records: Vec<AttemptRecord>,
}

/// 成绩查看服务
pub struct ResultsService {
    store: DocumentStore,
}

impl ResultsService {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }

    pub fn all(&self) -> AppResult<Vec<AttemptRecord>> {
        self.store.load_or_default(keys::RESULTS)
    }

    /// 按试卷分组，组的顺序为试卷第一次出现的顺序
    pub fn grouped_by_quiz(&self, quizzes: &[Quiz]) -> AppResult<Vec<QuizResults>> {
        let mut groups: Vec<QuizResults> = Vec::new();

        for record in self.all()? {
            match groups.iter_mut().find(|g| g.quiz_id == record.quiz_id) {
                Some(group) => group.records.push(record),
                None => {
                    let title = quizzes
                        .iter()
                        .find(|q| q.quiz_id == record.quiz_id)
                        .map(|q| q.title.clone())
                        .unwrap_or_else(|| record.quiz_id.clone());
                    groups.push(QuizResults {
                        quiz_id: record.quiz_id.clone(),
                        title,
                        records: vec![record],
                    });
                }
            }
        }

        Ok(groups)
    }

    /// 将匹配复合主键的记录标记为已分享，返回修改的记录数
    pub fn mark_shared(&self, key: &AttemptKey) -> AppResult<usize> {
        let mut results: Vec<AttemptRecord> = self.store.load_for_update(keys::RESULTS)?;
        let mut touched = 0;
        for record in results.iter_mut().filter(|r| r.matches(key)) {
            record.shared = true;
            touched += 1;
        }

        if touched == 0 {
            warn!("⚠️ 未找到成绩记录 {}", key);
            return Ok(0);
        }

        self.store.save(keys::RESULTS, &results)?;
        info!("✓ 已标记分享 {} ({} 条)", key, touched);
        Ok(touched)
    }

    /// 学生可以看到的已分享成绩
    pub fn shared_for(&self, student_id: &str) -> AppResult<Vec<AttemptRecord>> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|r| r.shared && r.student_id == student_id)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::MemoryKvStore;
    use std::sync::Arc;

    fn record(quiz_id: &str, student_id: &str, submitted_at: i64) -> AttemptRecord {
        AttemptRecord {
            quiz_id: quiz_id.into(),
            quiz_title: format!("title of {}", quiz_id),
            student_id: student_id.into(),
            answers: vec![Some(0)].into(),
            score: 1,
            total: 2,
            submitted_at,
            shared: false,
        }
    }

    fn service_with(records: Vec<AttemptRecord>) -> ResultsService {
        let store = DocumentStore::new(Arc::new(MemoryKvStore::new()));
        store.save(keys::RESULTS, &records).unwrap();
        ResultsService::new(store)
    }

    #[test]
    fn test_mark_shared_uses_composite_key() {
        let service = service_with(vec![
            record("Q001", "S1", 10),
            record("Q001", "S1", 20),
            record("Q001", "S2", 10),
        ]);

        let touched = service.mark_shared(&record("Q001", "S1", 20).key()).unwrap();
        assert_eq!(touched, 1);

        let all = service.all().unwrap();
        assert_eq!(
            all.iter().map(|r| r.shared).collect::<Vec<_>>(),
            vec![false, true, false]
        );

        assert_eq!(service.mark_shared(&record("Q009", "S1", 20).key()).unwrap(), 0);
    }

    #[test]
    fn test_shared_for_student() {
        let service = service_with(vec![record("Q001", "S1", 10), record("Q002", "S1", 11)]);
        assert!(service.shared_for("S1").unwrap().is_empty());

        service.mark_shared(&record("Q002", "S1", 11).key()).unwrap();

        let shared = service.shared_for("S1").unwrap();
        assert_eq!(shared.len(), 1);
        assert_eq!(shared[0].quiz_id, "Q002");
        assert!(service.shared_for("S2").unwrap().is_empty());
    }

    #[test]
    fn test_grouped_by_quiz_in_first_seen_order() {
        let service = service_with(vec![
            record("Q002", "S1", 1),
            record("Q001", "S1", 2),
            record("Q002", "S2", 3),
        ]);
        let quizzes = vec![Quiz {
            quiz_id: "Q002".into(),
            title: "History".into(),
            questions: vec![],
            created_at: 0,
        }];

        let groups = service.grouped_by_quiz(&quizzes).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].title, "History");
        assert_eq!(groups[0].records.len(), 2);
        assert_eq!(groups[1].title, "Q001");
    }

    #[test]
    fn test_mark_shared_refuses_unreadable_results() {
        let store = DocumentStore::new(Arc::new(MemoryKvStore::new()));
        let good = serde_json::to_value(record("Q001", "S1", 10)).unwrap();
        store
            .save(keys::RESULTS, &serde_json::json!([good, {"quizId": "Q001"}]))
            .unwrap();
        let service = ResultsService::new(store.clone());

        let key = record("Q001", "S1", 10).key();
        assert!(service.mark_shared(&key).is_err());

        let raw: serde_json::Value = store.load(keys::RESULTS).unwrap().unwrap();
        assert_eq!(raw[0]["shared"], false);
        assert_eq!(raw.as_array().map(Vec::len), Some(2));
    }
}
