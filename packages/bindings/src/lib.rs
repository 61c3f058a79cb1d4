use napi::Result as NapiResult;
use napi_derive::napi;

use sac_loan_core::amortization::{self, DirectiveDocument, MonthlyPayment, SacScheduleInput};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// SAC schedule
// ---------------------------------------------------------------------------

#[napi]
pub fn sac_schedule(input_json: String) -> NapiResult<String> {
    let input: SacScheduleInput = serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = amortization::calculate_sac_schedule(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn summarize_schedule(schedule_json: String) -> NapiResult<String> {
    let schedule: Vec<MonthlyPayment> =
        serde_json::from_str(&schedule_json).map_err(to_napi_error)?;
    let totals = amortization::summarize(&schedule).map_err(to_napi_error)?;
    serde_json::to_string(&totals).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Directives
// ---------------------------------------------------------------------------

#[napi]
pub fn validate_directives(input_json: String) -> NapiResult<String> {
    let records = serde_json::from_str::<DirectiveDocument>(&input_json)
        .map_err(to_napi_error)?
        .into_records();
    let report = amortization::review_directives(&records);
    serde_json::to_string(&report).map_err(to_napi_error)
}
