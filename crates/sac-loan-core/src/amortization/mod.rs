//! Constant Amortization System (SAC) loan schedules with extra
//! amortization directives. All math uses `rust_decimal::Decimal`.

pub mod directives;
pub mod sac;
pub mod schedule;
pub mod summary;

pub use directives::{
    parse_directives, validate_directives, Cadence, DirectiveCandidate, DirectiveKind,
    DirectiveValidation, ExtraAmortization, Frequency, SkippedDirective,
};
pub use sac::{
    calculate_sac_schedule, calculate_sac_schedule_with, review_directives, DirectiveDocument,
    DirectiveReport, SacScheduleInput, SacScheduleOutput, SavingsAnalysis,
};
pub use schedule::{generate_schedule, LoanParameters, MonthlyPayment};
pub use summary::{summarize, SummaryTotals};
