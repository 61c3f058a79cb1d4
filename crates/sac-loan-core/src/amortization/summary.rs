use serde::{Deserialize, Serialize};

use crate::amortization::schedule::MonthlyPayment;
use crate::error::ScheduleError;
use crate::types::{Money, Months};
use crate::ScheduleResult;

/// Column totals over a generated schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SummaryTotals {
    pub total_interest: Money,
    pub total_payment: Money,
    pub total_amortization: Money,
    pub total_extra_amortization: Money,
    pub total_insurance: Money,
    pub total_fee: Money,
    /// Number of instalments actually paid.
    pub loan_term_actual: Months,
}

/// Fold a schedule into its totals. Sums the already-rounded record fields.
///
/// Fails instead of panicking when a column total leaves the decimal range.
pub fn summarize(schedule: &[MonthlyPayment]) -> ScheduleResult<SummaryTotals> {
    schedule
        .iter()
        .try_fold(SummaryTotals::default(), |acc, p| {
            Ok(SummaryTotals {
                total_interest: add(acc.total_interest, p.interest, "interest")?,
                total_payment: add(acc.total_payment, p.payment, "payment")?,
                total_amortization: add(acc.total_amortization, p.amortization, "amortization")?,
                total_extra_amortization: add(
                    acc.total_extra_amortization,
                    p.extra_amortization,
                    "extra_amortization",
                )?,
                total_insurance: add(acc.total_insurance, p.insurance, "insurance")?,
                total_fee: add(acc.total_fee, p.operational_fee, "operational_fee")?,
                loan_term_actual: acc.loan_term_actual.saturating_add(1),
            })
        })
}

fn add(total: Money, value: Money, column: &str) -> ScheduleResult<Money> {
    total
        .checked_add(value)
        .ok_or_else(|| ScheduleError::InvalidInput {
            field: column.into(),
            reason: "column total exceeds the representable decimal range".into(),
        })
}
