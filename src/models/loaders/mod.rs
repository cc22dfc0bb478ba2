pub mod toml_loader;

pub use toml_loader::{load_all_toml_drafts, load_toml_to_quiz_draft};
