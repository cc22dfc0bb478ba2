//! 文档存储 - 基础设施层
//!
//! 在键值存储之上提供类型化的 JSON 文档读写。
//! 只读路径上无法解析的文档按"不存在"处理，只记录警告；
//! 读-改-写路径使用 `load_for_update`，损坏的文档不会被覆盖。

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{error, warn};

use crate::error::{AppResult, StoreError};
use crate::infrastructure::kv_store::KvStore;

/// 固定的文档键
pub mod keys {
    pub const QUIZZES: &str = "quizzes";
    pub const RESULTS: &str = "results";
    pub const LAST_ATTEMPT: &str = "lastAttempt";
    pub const STUDENTS: &str = "students";
    pub const STUDENT_LOGGED_IN: &str = "studentLoggedIn";
}

/// 类型化文档存储
#[derive(Clone)]
pub struct DocumentStore {
    kv: Arc<dyn KvStore>,
}

impl DocumentStore {
    pub fn new(kv: Arc<dyn KvStore>) -> Self {
        Self { kv }
    }

    /// 读取文档
    ///
    /// 文档缺失、为 `null` 或无法解析为 `T` 时返回 None
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> AppResult<Option<T>> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(None);
        };

        match parse(&raw) {
            Ok(doc) => Ok(doc),
            Err(e) => {
                warn!("⚠️ 文档 {} 无法解析，按空处理: {}", key, e);
                Ok(None)
            }
        }
    }

    /// 为修改而读取文档
    ///
    /// 缺失或为 `null` 时返回默认值；文档存在但无法解析时返回
    /// `CorruptDocument`，调用方不能在此基础上写回
    pub fn load_for_update<T: DeserializeOwned + Default>(&self, key: &str) -> AppResult<T> {
        let Some(raw) = self.kv.get(key)? else {
            return Ok(T::default());
        };

        match parse(&raw) {
            Ok(doc) => Ok(doc.unwrap_or_default()),
            Err(e) => {
                error!("❌ 文档 {} 已损坏，停止写入: {}", key, e);
                Err(StoreError::CorruptDocument {
                    key: key.to_string(),
                    source: Box::new(e),
                }
                .into())
            }
        }
    }

    /// 读取文档，缺失或损坏时返回默认值
    pub fn load_or_default<T: DeserializeOwned + Default>(&self, key: &str) -> AppResult<T> {
        Ok(self.load(key)?.unwrap_or_default())
    }

    /// 写入文档
    pub fn save<T: Serialize>(&self, key: &str, value: &T) -> AppResult<()> {
        let raw = serde_json::to_string(value).map_err(|e| StoreError::EncodeFailed {
            key: key.to_string(),
            source: Box::new(e),
        })?;
        self.kv.set(key, &raw)
    }

    pub fn remove(&self, key: &str) -> AppResult<()> {
        self.kv.remove(key)
    }
}

fn parse<T: DeserializeOwned>(raw: &str) -> serde_json::Result<Option<T>> {
    let value: JsonValue = serde_json::from_str(raw)?;
    if value.is_null() {
        return Ok(None);
    }
    serde_json::from_value(value).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::infrastructure::kv_store::MemoryKvStore;
    use crate::models::AttemptRecord;

    fn store_with(key: &str, raw: &str) -> DocumentStore {
        let kv = Arc::new(MemoryKvStore::new());
        kv.set(key, raw).unwrap();
        DocumentStore::new(kv)
    }

    #[test]
    fn test_missing_document_is_none() {
        let store = DocumentStore::new(Arc::new(MemoryKvStore::new()));
        let doc: Option<Vec<AttemptRecord>> = store.load(keys::RESULTS).unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_corrupt_document_fails_open() {
        let store = store_with(keys::RESULTS, "{not json");
        let doc: Vec<AttemptRecord> = store.load_or_default(keys::RESULTS).unwrap();
        assert!(doc.is_empty());

        let store = store_with(keys::RESULTS, r#"{"quizId": 3}"#);
        let doc: Option<Vec<AttemptRecord>> = store.load(keys::RESULTS).unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_null_document_is_none() {
        let store = store_with(keys::LAST_ATTEMPT, "null");
        let doc: Option<crate::models::ReviewSnapshot> = store.load(keys::LAST_ATTEMPT).unwrap();
        assert!(doc.is_none());
    }

    #[test]
    fn test_save_then_load() {
        let store = DocumentStore::new(Arc::new(MemoryKvStore::new()));
        store.save(keys::STUDENTS, &vec!["a", "b"]).unwrap();
        let back: Vec<String> = store.load_or_default(keys::STUDENTS).unwrap();
        assert_eq!(back, vec!["a", "b"]);

        store.remove(keys::STUDENTS).unwrap();
        let gone: Option<Vec<String>> = store.load(keys::STUDENTS).unwrap();
        assert!(gone.is_none());
    }

    #[test]
    fn test_load_for_update_refuses_corrupt_document() {
        let store = store_with(keys::RESULTS, r#"[{"quizId": "Q001"}]"#);
        let err = store.load_for_update::<Vec<AttemptRecord>>(keys::RESULTS).unwrap_err();
        assert!(matches!(
            err,
            AppError::Store(StoreError::CorruptDocument { ref key, .. }) if key == "results"
        ));

        let store = store_with(keys::RESULTS, "null");
        let doc: Vec<AttemptRecord> = store.load_for_update(keys::RESULTS).unwrap();
        assert!(doc.is_empty());
    }
}
