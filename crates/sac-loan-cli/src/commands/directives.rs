use clap::Args;
use serde_json::Value;
use tracing::warn;

use sac_loan_core::amortization::{self, DirectiveDocument};

use crate::input;

/// Arguments for directive validation
#[derive(Args)]
pub struct ValidateDirectivesArgs {
    /// Path to JSON or YAML input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_validate_directives(
    args: ValidateDirectivesArgs,
) -> Result<Value, Box<dyn std::error::Error>> {
    let data = input::load(args.input.as_deref())?
        .ok_or("--input <file> or stdin required for directive validation")?;

    let records = serde_json::from_value::<DirectiveDocument>(data)?.into_records();

    let report = amortization::review_directives(&records);
    for warning in &report.warnings {
        warn!("{warning}");
    }
    Ok(serde_json::to_value(report)?)
}
