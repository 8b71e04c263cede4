use clap::{Args, ValueEnum};
use serde_json::Value;

use emi_calc_core::comparison::banks::{compare_banks, ComparisonSort};

use crate::commands::catalog::load_catalog;
use crate::commands::loan::{resolve_spec, LoanArgs};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum SortArg {
    /// Cheapest processing fee first
    Fees,
    /// Cheapest all-in cost first
    TotalAmount,
    /// Alphabetical
    BankName,
    /// Largest saving against the priciest bank first
    Savings,
}

impl From<SortArg> for ComparisonSort {
    fn from(sort: SortArg) -> Self {
        match sort {
            SortArg::Fees => ComparisonSort::Fees,
            SortArg::TotalAmount => ComparisonSort::TotalAmount,
            SortArg::BankName => ComparisonSort::BankName,
            SortArg::Savings => ComparisonSort::Savings,
        }
    }
}

/// Arguments for a bank comparison
#[derive(Args)]
pub struct CompareArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Row ordering
    #[arg(long, value_enum, default_value = "fees")]
    pub sort: SortArg,
}

pub fn run_compare(args: CompareArgs, catalog: Option<&str>) -> Result<Value, Box<dyn std::error::Error>> {
    let spec = resolve_spec(&args.loan)?;
    let catalog = load_catalog(catalog)?;
    let result = compare_banks(&spec, &catalog, args.sort.into())?;
    Ok(serde_json::to_value(result)?)
}
