pub mod clock;
pub mod logging;

pub use clock::{Clock, SystemClock};
pub use logging::{format_timestamp, truncate_text};
