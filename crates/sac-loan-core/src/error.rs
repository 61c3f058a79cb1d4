use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScheduleError {
    #[error("Invalid principal: {0} (principal must be positive)")]
    InvalidPrincipal(Decimal),

    #[error("Invalid term: {0} months (term must be at least one month)")]
    InvalidTerm(i64),

    #[error("Invalid interest rate: {0} (annual rate cannot be negative)")]
    InvalidInterestRate(Decimal),

    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    /// Raised per directive by the validator and always recovered into the
    /// skip list; schedule generation never returns it.
    #[error("Invalid directive #{index}: {reason}")]
    InvalidDirective { index: usize, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl ScheduleError {
    /// Name of the offending input field, when the error is tied to one.
    pub fn field(&self) -> Option<&str> {
        match self {
            ScheduleError::InvalidPrincipal(_) => Some("principal"),
            ScheduleError::InvalidTerm(_) => Some("term_months"),
            ScheduleError::InvalidInterestRate(_) => Some("annual_interest_rate"),
            ScheduleError::InvalidInput { field, .. } => Some(field.as_str()),
            ScheduleError::InvalidDirective { .. } => Some("extra_amortizations"),
            ScheduleError::SerializationError(_) => None,
        }
    }
}

impl From<serde_json::Error> for ScheduleError {
    fn from(e: serde_json::Error) -> Self {
        ScheduleError::SerializationError(e.to_string())
    }
}
