//! 键值存储 - 基础设施层
//!
//! 持有唯一的持久化资源，只暴露"按键读写字符串"的能力

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;

use crate::error::{AppError, AppResult, StoreError};

/// 键值存储
///
/// 职责：
/// - 按固定字符串键保存序列化后的文档
/// - 不认识 Quiz / AttemptRecord
/// - 不处理业务流程
pub trait KvStore: Send + Sync {
    /// 读取键对应的值，不存在时返回 None
    fn get(&self, key: &str) -> AppResult<Option<String>>;

    /// 写入键对应的值，覆盖旧值
    fn set(&self, key: &str, value: &str) -> AppResult<()>;

    /// 删除键，不存在时不报错
    fn remove(&self, key: &str) -> AppResult<()>;
}

/// 基于目录的键值存储，每个键对应一个 `<key>.json` 文件
pub struct FileKvStore {
    dir: PathBuf,
}

impl FileKvStore {
    /// 打开（必要时创建）数据目录
    pub fn open(dir: impl Into<PathBuf>) -> AppResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            AppError::Store(StoreError::DirectoryUnavailable {
                path: dir.display().to_string(),
                source: Box::new(e),
            })
        })?;
        debug!("数据目录已就绪: {}", dir.display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KvStore for FileKvStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::read_failed(key, e)),
        }
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        // 先写临时文件再重命名，避免中途失败留下半个文档
        let path = self.path_for(key);
        let tmp = self.dir.join(format!("{}.json.tmp", key));
        fs::write(&tmp, value).map_err(|e| AppError::write_failed(key, e))?;
        fs::rename(&tmp, &path).map_err(|e| AppError::write_failed(key, e))?;
        debug!("已写入文档 {} ({} 字节)", key, value.len());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::delete_failed(key, e)),
        }
    }
}

/// 内存键值存储（测试和临时会话使用）
#[derive(Default)]
pub struct MemoryKvStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryKvStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl KvStore for MemoryKvStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> AppResult<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> AppResult<()> {
        self.entries().remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_store_roundtrip_and_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKvStore::open(dir.path().join("data")).unwrap();

        assert_eq!(store.get("quizzes").unwrap(), None);

        store.set("quizzes", "[]").unwrap();
        assert_eq!(store.get("quizzes").unwrap().as_deref(), Some("[]"));
        assert!(store.dir().join("quizzes.json").exists());

        store.set("quizzes", "[1]").unwrap();
        assert_eq!(store.get("quizzes").unwrap().as_deref(), Some("[1]"));

        store.remove("quizzes").unwrap();
        store.remove("quizzes").unwrap();
        assert_eq!(store.get("quizzes").unwrap(), None);
    }

    #[test]
    fn test_memory_store() {
        let store = MemoryKvStore::new();
        store.set("lastAttempt", "{}").unwrap();
        assert_eq!(store.get("lastAttempt").unwrap().as_deref(), Some("{}"));
        store.remove("lastAttempt").unwrap();
        assert_eq!(store.get("lastAttempt").unwrap(), None);
    }
}
