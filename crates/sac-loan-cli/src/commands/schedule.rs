use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info, warn};

use sac_loan_core::amortization::{
    self, DirectiveCandidate, LoanParameters, SacScheduleInput, SacScheduleOutput,
};
use sac_loan_core::ComputationOutput;

use crate::input;
use crate::input::flags::{parse_growing, parse_one_time, parse_recurring};
use crate::input::locale::{parse_amount, parse_percent, parse_rate};

/// Arguments for SAC schedule generation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Loan principal, e.g. 250000 or 250.000,00
    #[arg(long, value_parser = parse_amount)]
    pub principal: Option<Decimal>,

    /// Annual interest rate as a fraction (0.12 = 12%)
    #[arg(long, value_parser = parse_rate, conflicts_with = "annual_interest_rate_pct")]
    pub annual_interest_rate: Option<Decimal>,

    /// Annual interest rate in percent, e.g. 12 or 10,5
    #[arg(long, value_parser = parse_percent)]
    pub annual_interest_rate_pct: Option<Decimal>,

    /// Fixed monthly insurance charge
    #[arg(long, value_parser = parse_amount)]
    pub monthly_insurance: Option<Decimal>,

    /// Fixed monthly operational fee
    #[arg(long, value_parser = parse_amount)]
    pub monthly_operational_fee: Option<Decimal>,

    /// Loan term in months
    #[arg(long)]
    pub term_months: Option<i64>,

    /// One-time prepayment AMOUNT@MONTH (repeatable)
    #[arg(long = "one-time", value_parser = parse_one_time)]
    pub one_time: Vec<DirectiveCandidate>,

    /// Recurring prepayment AMOUNT@START[/monthly|/yearly|/every-N] (repeatable)
    #[arg(long, value_parser = parse_recurring)]
    pub recurring: Vec<DirectiveCandidate>,

    /// Growing prepayment AMOUNT@START:GROWTH_PCT[/cadence] (repeatable)
    #[arg(long, value_parser = parse_growing)]
    pub growing: Vec<DirectiveCandidate>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let output = if let Some(data) = input::load(args.input.as_deref())? {
        let schedule_input: SacScheduleInput = serde_json::from_value(data)?;
        debug!(
            records = schedule_input.extra_amortizations.len(),
            "loaded schedule input document"
        );
        amortization::calculate_sac_schedule(&schedule_input)?
    } else {
        let loan = loan_from_flags(&args)?;
        let candidates: Vec<DirectiveCandidate> = args
            .one_time
            .into_iter()
            .chain(args.recurring)
            .chain(args.growing)
            .collect();
        debug!(directives = candidates.len(), "built schedule input from flags");
        amortization::calculate_sac_schedule_with(&loan, &candidates)?
    };

    report_diagnostics(&output);
    Ok(serde_json::to_value(output)?)
}

fn loan_from_flags(args: &ScheduleArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    let annual_interest_rate = args
        .annual_interest_rate
        .or(args.annual_interest_rate_pct)
        .ok_or("--annual-interest-rate or --annual-interest-rate-pct is required (or provide --input)")?;

    Ok(LoanParameters {
        principal: args
            .principal
            .ok_or("--principal is required (or provide --input)")?,
        annual_interest_rate,
        monthly_insurance: args.monthly_insurance.unwrap_or(Decimal::ZERO),
        monthly_operational_fee: args.monthly_operational_fee.unwrap_or(Decimal::ZERO),
        term_months: args
            .term_months
            .ok_or("--term-months is required (or provide --input)")?,
    })
}

fn report_diagnostics(output: &ComputationOutput<SacScheduleOutput>) {
    for warning in &output.warnings {
        warn!("{warning}");
    }

    let summary = &output.result.summary;
    if let Some(savings) = &output.result.savings {
        info!(
            months = summary.loan_term_actual,
            months_saved = savings.months_saved,
            interest_saved = %savings.interest_saved,
            "loan repaid ahead of schedule"
        );
    }
    debug!(
        elapsed_us = output.metadata.computation_time_us,
        "schedule computed"
    );
}
