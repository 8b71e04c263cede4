use clap::Args;
use serde_json::{json, Value};

use emi_calc_core::presets::{interest_rate_presets, LOAN_TERMS};
use emi_calc_core::validation::ValidationLimits;
use emi_calc_core::{FeeCatalog, LoanSpecification};

use crate::input;

/// Arguments for listing fee policies
#[derive(Args)]
pub struct BanksArgs {
    /// Show a single bank's policy
    #[arg(long)]
    pub bank: Option<String>,
}

/// Arguments for the presets listing
#[derive(Args)]
pub struct PresetsArgs {}

/// Built-in catalog, or the policies in `path` after a consistency check.
pub fn load_catalog(path: Option<&str>) -> Result<FeeCatalog, Box<dyn std::error::Error>> {
    let Some(path) = path else {
        return Ok(FeeCatalog::default());
    };
    let catalog: FeeCatalog = input::file::read_document(path)?;
    catalog.check()?;
    log::info!("loaded {} fee policies from {}", catalog.len(), path);
    Ok(catalog)
}

pub fn run_banks(args: BanksArgs, catalog: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let catalog = load_catalog(catalog)?;
    match args.bank {
        Some(ref name) => Ok(serde_json::to_value(catalog.lookup(name)?)?),
        None => Ok(serde_json::to_value(catalog.policies())?),
    }
}

pub fn run_presets(_args: PresetsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    Ok(json!({
        "loan_terms": LOAN_TERMS,
        "interest_rates": interest_rate_presets(),
        "default_specification": LoanSpecification::default(),
        "validation_limits": ValidationLimits::default(),
    }))
}
