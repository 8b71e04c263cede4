use napi::Result as NapiResult;
use napi_derive::napi;
use serde_json::json;

use emi_calc_core::comparison::banks::ComparisonSort;
use emi_calc_core::costs::savings::calculate_savings as savings_between;
use emi_calc_core::presets::{interest_rate_presets, LOAN_TERMS};
use emi_calc_core::validation::ValidationLimits;
use emi_calc_core::{EmiCalcError, FeeCatalog, LoanCalculationResult, LoanSpecification};

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

fn parse_spec(spec_json: &str) -> NapiResult<LoanSpecification> {
    serde_json::from_str(spec_json).map_err(to_napi_error)
}

/// Built-in catalog unless the caller supplies its own JSON array of policies.
fn parse_catalog(catalog_json: Option<String>) -> NapiResult<FeeCatalog> {
    match catalog_json {
        Some(json) => FeeCatalog::from_json(&json).map_err(to_napi_error),
        None => Ok(FeeCatalog::default()),
    }
}

// ---------------------------------------------------------------------------
// Pricing
// ---------------------------------------------------------------------------

#[napi]
pub fn calculate_loan(spec_json: String, catalog_json: Option<String>) -> NapiResult<String> {
    let spec = parse_spec(&spec_json)?;
    let catalog = parse_catalog(catalog_json)?;
    let output = emi_calc_core::calculate_loan(&spec, &catalog).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compare_banks(
    spec_json: String,
    sort_by: Option<String>,
    catalog_json: Option<String>,
) -> NapiResult<String> {
    let spec = parse_spec(&spec_json)?;
    let catalog = parse_catalog(catalog_json)?;
    let sort_by: ComparisonSort = match sort_by {
        Some(s) => serde_json::from_value(json!(s)).map_err(to_napi_error)?,
        None => ComparisonSort::default(),
    };
    let output = emi_calc_core::comparison::banks::compare_banks(&spec, &catalog, sort_by)
        .map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

/// Savings between two calculation results (the `result` objects of `calculateLoan`).
#[napi]
pub fn calculate_savings(first_json: String, second_json: String) -> NapiResult<String> {
    let first: LoanCalculationResult = serde_json::from_str(&first_json).map_err(to_napi_error)?;
    let second: LoanCalculationResult = serde_json::from_str(&second_json).map_err(to_napi_error)?;
    serde_json::to_string(&savings_between(&first, &second)).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form support
// ---------------------------------------------------------------------------

/// `{"valid": true}` or `{"valid": false, "field": ..., "message": ...}`.
#[napi]
pub fn validate_specification(spec_json: String) -> NapiResult<String> {
    let spec = parse_spec(&spec_json)?;
    let report = match emi_calc_core::validation::validate_specification(
        &spec,
        &ValidationLimits::default(),
    ) {
        Ok(()) => json!({ "valid": true }),
        Err(EmiCalcError::InvalidLoanSpecification { field, reason }) => {
            json!({ "valid": false, "field": field, "message": reason })
        }
        Err(e) => return Err(to_napi_error(e)),
    };
    serde_json::to_string(&report).map_err(to_napi_error)
}

#[napi]
pub fn has_changes(last_calculated_json: Option<String>, current_json: String) -> NapiResult<bool> {
    let current = parse_spec(&current_json)?;
    let last = last_calculated_json.as_deref().map(parse_spec).transpose()?;
    Ok(emi_calc_core::has_changes(last.as_ref(), &current))
}

#[napi]
pub fn list_banks(catalog_json: Option<String>) -> NapiResult<String> {
    let catalog = parse_catalog(catalog_json)?;
    serde_json::to_string(catalog.policies()).map_err(to_napi_error)
}

#[napi]
pub fn loan_presets() -> NapiResult<String> {
    serde_json::to_string(&json!({
        "loan_terms": LOAN_TERMS,
        "interest_rates": interest_rate_presets(),
        "default_specification": LoanSpecification::default(),
        "validation_limits": ValidationLimits::default(),
    }))
    .map_err(to_napi_error)
}
