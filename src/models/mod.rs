pub mod attempt;
pub mod loaders;
pub mod quiz;
pub mod student;

pub use attempt::{
    AnswerSheet, AttemptKey, AttemptOutcome, AttemptRecord, ReviewQuestion, ReviewSnapshot,
};
pub use loaders::{load_all_toml_drafts, load_toml_to_quiz_draft};
pub use quiz::{Question, QuestionDraft, Quiz, QuizDraft, ValidationError};
pub use student::{StudentAccount, StudentIdentity};
