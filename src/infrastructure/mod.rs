pub mod documents;
pub mod kv_store;

pub use documents::{keys, DocumentStore};
pub use kv_store::{FileKvStore, KvStore, MemoryKvStore};
