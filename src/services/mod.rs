pub mod attempt_recorder;
pub mod quiz_catalog;
pub mod randomizer;
pub mod results_service;
pub mod review_renderer;
pub mod roster;
pub mod scorer;

pub use attempt_recorder::AttemptRecorder;
pub use quiz_catalog::QuizCatalog;
pub use results_service::{QuizResults, ResultsService};
pub use review_renderer::{OptionReview, QuestionReview, Review};
pub use roster::{NewStudent, Roster, RosterError};
pub use scorer::Score;
