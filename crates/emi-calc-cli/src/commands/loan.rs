use chrono::{Local, NaiveDate};
use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use emi_calc_core::validation::{validate_specification, ValidationLimits};
use emi_calc_core::{calculate_loan, DiscountMode, FeeOverrideKind, LoanSpecification};

use crate::commands::catalog::load_catalog;
use crate::input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum FeeKindArg {
    /// Flat amount
    Fixed,
    /// Percent of principal
    Percentage,
}

impl From<FeeKindArg> for FeeOverrideKind {
    fn from(kind: FeeKindArg) -> Self {
        match kind {
            FeeKindArg::Fixed => FeeOverrideKind::Fixed,
            FeeKindArg::Percentage => FeeOverrideKind::Percentage,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DiscountModeArg {
    PrincipalReduction,
    Refund,
}

impl From<DiscountModeArg> for DiscountMode {
    fn from(mode: DiscountModeArg) -> Self {
        match mode {
            DiscountModeArg::PrincipalReduction => DiscountMode::PrincipalReduction,
            DiscountModeArg::Refund => DiscountMode::Refund,
        }
    }
}

/// Loan inputs shared by every pricing command
#[derive(Args)]
pub struct LoanArgs {
    /// Amount borrowed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (15 for 15%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Number of monthly installments
    #[arg(long)]
    pub term: Option<u32>,

    /// Bank whose fee policy applies
    #[arg(long)]
    pub bank: Option<String>,

    /// Custom processing fee; replaces the bank's policy
    #[arg(long)]
    pub fee: Option<Decimal>,

    /// How --fee is read
    #[arg(long, value_enum, requires = "fee")]
    pub fee_kind: Option<FeeKindArg>,

    /// Waive interest (no-cost EMI); fees and their tax still apply
    #[arg(long)]
    pub no_cost_emi: bool,

    /// How the waived interest is passed back
    #[arg(long, value_enum)]
    pub discount_mode: Option<DiscountModeArg>,

    /// Flat tax rate as a decimal (0.18 for 18%)
    #[arg(long)]
    pub tax_rate: Option<Decimal>,

    /// Anchor date (YYYY-MM-DD); installments are labelled from the month after
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Reject inputs outside the calculator's offered principal, rate and term ranges
    #[arg(long)]
    pub strict: bool,

    /// Path to a JSON or YAML loan specification; flags given alongside override its fields
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a full loan calculation
#[derive(Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Leave the month-by-month schedule out of the output
    #[arg(long)]
    pub summary: bool,
}

/// Arguments for the schedule listing
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,
}

/// Specification from --input or piped JSON, with any flags given laid over it.
///
/// Without either source, --principal is required and the remaining fields
/// come from the calculator defaults. A missing anchor date becomes today.
pub fn resolve_spec(args: &LoanArgs) -> Result<LoanSpecification, Box<dyn std::error::Error>> {
    let base: LoanSpecification = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if args.principal.is_some() {
        LoanSpecification::default()
    } else if let Some(spec) = input::stdin::read_spec()? {
        spec
    } else {
        return Err("--principal is required (or provide --input or pipe JSON on stdin)".into());
    };

    let spec = with_default_anchor(apply_flags(base, args), Local::now().date_naive());
    if args.strict {
        validate_specification(&spec, &ValidationLimits::default())?;
    }
    log::debug!("resolved loan specification: {spec:?}");
    Ok(spec)
}

fn apply_flags(mut spec: LoanSpecification, args: &LoanArgs) -> LoanSpecification {
    if let Some(principal) = args.principal {
        spec.principal = principal;
    }
    if let Some(rate) = args.rate {
        spec.annual_rate_percent = rate;
    }
    if let Some(term) = args.term {
        spec.term_months = term;
    }
    if let Some(ref bank) = args.bank {
        spec.bank_reference = bank.clone();
    }
    if args.fee.is_some() {
        spec.fee_override_amount = args.fee;
        spec.fee_override_kind = args.fee_kind.map(Into::into);
    }
    if args.no_cost_emi {
        spec.promotional_zero_interest = true;
    }
    if let Some(mode) = args.discount_mode {
        spec.promotional_discount_mode = mode.into();
    }
    if args.tax_rate.is_some() {
        spec.tax_rate = args.tax_rate;
    }
    if args.start_date.is_some() {
        spec.first_payment_anchor = args.start_date;
    }
    spec
}

fn with_default_anchor(mut spec: LoanSpecification, today: NaiveDate) -> LoanSpecification {
    spec.first_payment_anchor.get_or_insert(today);
    spec
}

pub fn run_calculate(
    args: CalculateArgs,
    catalog: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let spec = resolve_spec(&args.loan)?;
    let catalog = load_catalog(catalog)?;
    let mut output = calculate_loan(&spec, &catalog)?;
    if args.summary {
        output.result.schedule.clear();
    }
    Ok(serde_json::to_value(output)?)
}

pub fn run_schedule(
    args: ScheduleArgs,
    catalog: Option<&str>,
) -> Result<Value, Box<dyn std::error::Error>> {
    let spec = resolve_spec(&args.loan)?;
    let catalog = load_catalog(catalog)?;
    let output = calculate_loan(&spec, &catalog)?;
    Ok(serde_json::to_value(output.result.schedule)?)
}
