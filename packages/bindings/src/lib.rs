use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Amortization
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_emi(input_json: String) -> NapiResult<String> {
    let input: loancalc_core::emi::EmiInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loancalc_core::emi::quote_emi(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn build_schedule(input_json: String) -> NapiResult<String> {
    let input: loancalc_core::schedule::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loancalc_core::schedule::analyze_loan(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_schedules(input_json: String) -> NapiResult<String> {
    let input: loancalc_core::schedule::LoanInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = loancalc_core::comparison::compare_schedules(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}
