pub mod countdown;
pub mod quiz_flow;
pub mod quiz_session;
pub mod session_view;

pub use countdown::{Countdown, CountdownToken, Tick};
pub use quiz_flow::QuizFlow;
pub use quiz_session::{QuizSession, SessionPhase, Transition};
pub use session_view::{OptionView, SessionView};
