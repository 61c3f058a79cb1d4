//! End-to-end SAC calculation: directive ingestion, schedule, totals,
//! savings against the no-prepayment baseline, and diagnostics, wrapped in
//! the standard computation envelope.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Instant;

use crate::amortization::directives::{
    parse_directives, validate_directives, DirectiveCandidate, DirectiveValidation,
    SkippedDirective,
};
use crate::amortization::schedule::{generate_schedule, LoanParameters, MonthlyPayment};
use crate::amortization::summary::{summarize, SummaryTotals};
use crate::types::{with_metadata, ComputationOutput, Money, Months};
use crate::ScheduleResult;

// ---------------------------------------------------------------------------
// Input / Output Types
// ---------------------------------------------------------------------------

/// Loan terms plus loosely-typed extra amortization records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SacScheduleInput {
    #[serde(flatten)]
    pub loan: LoanParameters,
    #[serde(default)]
    pub extra_amortizations: Vec<Value>,
}

/// What the prepayments bought compared with paying the plain SAC schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsAnalysis {
    pub baseline_term_months: Months,
    pub months_saved: Months,
    pub baseline_total_interest: Money,
    pub interest_saved: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SacScheduleOutput {
    pub payment_schedule: Vec<MonthlyPayment>,
    pub summary: SummaryTotals,
    pub skipped_directives: Vec<SkippedDirective>,
    /// Present when at least one prepayment was applied.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub savings: Option<SavingsAnalysis>,
}

/// Directive records as they arrive on their own: either a bare list or a
/// whole schedule document carrying `extra_amortizations`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DirectiveDocument {
    Records(Vec<Value>),
    Schedule { extra_amortizations: Vec<Value> },
}

impl DirectiveDocument {
    pub fn into_records(self) -> Vec<Value> {
        match self {
            DirectiveDocument::Records(records) => records,
            DirectiveDocument::Schedule {
                extra_amortizations,
            } => extra_amortizations,
        }
    }
}

/// Outcome of checking a directive batch on its own, without a loan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectiveReport {
    pub valid_count: usize,
    pub skipped_count: usize,
    #[serde(flatten)]
    pub validation: DirectiveValidation,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Build the SAC schedule from loan terms and raw directive records.
pub fn calculate_sac_schedule(
    input: &SacScheduleInput,
) -> ScheduleResult<ComputationOutput<SacScheduleOutput>> {
    let start = Instant::now();
    let validation = parse_directives(&input.extra_amortizations);
    run(&input.loan, validation, start)
}

/// Build the SAC schedule from loan terms and typed directive candidates.
pub fn calculate_sac_schedule_with(
    loan: &LoanParameters,
    candidates: &[DirectiveCandidate],
) -> ScheduleResult<ComputationOutput<SacScheduleOutput>> {
    let start = Instant::now();
    let validation = validate_directives(candidates);
    run(loan, validation, start)
}

/// Validate raw directive records without generating a schedule.
pub fn review_directives(records: &[Value]) -> ComputationOutput<DirectiveReport> {
    let start = Instant::now();
    let validation = parse_directives(records);
    let warnings = validation.warnings();
    let report = DirectiveReport {
        valid_count: validation.valid.len(),
        skipped_count: validation.skipped.len(),
        validation,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    with_metadata(
        "Extra amortization directive validation",
        &serde_json::json!({ "records": records.len() }),
        warnings,
        elapsed,
        report,
    )
}

fn run(
    loan: &LoanParameters,
    validation: DirectiveValidation,
    start: Instant,
) -> ScheduleResult<ComputationOutput<SacScheduleOutput>> {
    let mut warnings = validation.warnings();

    let payment_schedule = generate_schedule(loan, &validation.valid)?;
    let summary = summarize(&payment_schedule)?;

    if let Some(last) = payment_schedule.last() {
        if last.remaining_balance > Decimal::ZERO {
            warnings.push(format!(
                "Residual balance of {} remains after month {} from cumulative rounding",
                last.remaining_balance, last.month
            ));
        }
    }

    let prepaid = summary.total_extra_amortization > Decimal::ZERO;
    let savings = if prepaid {
        let baseline = summarize(&generate_schedule(loan, &[])?)?;
        Some(SavingsAnalysis {
            baseline_term_months: baseline.loan_term_actual,
            months_saved: baseline
                .loan_term_actual
                .saturating_sub(summary.loan_term_actual),
            baseline_total_interest: baseline.total_interest,
            interest_saved: baseline.total_interest - summary.total_interest,
        })
    } else {
        None
    };

    let assumptions = serde_json::json!({
        "principal": loan.principal.to_string(),
        "annual_interest_rate": loan.annual_interest_rate.to_string(),
        "monthly_interest_rate": loan.monthly_interest_rate().to_string(),
        "term_months": loan.term_months,
        "regular_amortization": loan.regular_amortization().round_dp(2).to_string(),
        "directives_applied": validation.valid.len(),
        "directives_skipped": validation.skipped.len(),
    });

    let output = SacScheduleOutput {
        payment_schedule,
        summary,
        skipped_directives: validation.skipped,
        savings,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Constant Amortization System (SAC) with extra amortization directives",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}
