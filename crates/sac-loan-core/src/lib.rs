pub mod amortization;
pub mod error;
pub mod types;

pub use error::ScheduleError;
pub use types::*;

/// Standard result type for all schedule operations
pub type ScheduleResult<T> = Result<T, ScheduleError>;
