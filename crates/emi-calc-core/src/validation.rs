use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::EmiCalcError;
use crate::loan::specification::{FeeOverrideKind, LoanSpecification};
use crate::presets::LOAN_TERMS;
use crate::types::{Money, Percent};
use crate::EmiCalcResult;

/// Bounds a calculator front end enforces before pricing a loan.
///
/// The engine itself only needs a positive principal and term; these limits
/// describe the product being offered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationLimits {
    pub min_principal: Money,
    pub max_principal: Money,
    pub min_rate_percent: Percent,
    pub max_rate_percent: Percent,
    pub allowed_terms: Vec<u32>,
    /// Upper bound for a percentage fee override
    pub max_override_percentage: Percent,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        ValidationLimits {
            min_principal: dec!(1000),
            max_principal: dec!(1000000),
            min_rate_percent: Decimal::ZERO,
            max_rate_percent: dec!(50),
            allowed_terms: LOAN_TERMS.to_vec(),
            max_override_percentage: dec!(10),
        }
    }
}

/// Check a specification against product limits, reporting the first violation.
pub fn validate_specification(
    spec: &LoanSpecification,
    limits: &ValidationLimits,
) -> EmiCalcResult<()> {
    if spec.principal < limits.min_principal {
        return Err(EmiCalcError::invalid(
            "principal",
            format!("Principal amount must be at least {}", limits.min_principal),
        ));
    }
    if spec.principal > limits.max_principal {
        return Err(EmiCalcError::invalid(
            "principal",
            format!("Principal amount must be at most {}", limits.max_principal),
        ));
    }
    if spec.annual_rate_percent < limits.min_rate_percent
        || spec.annual_rate_percent > limits.max_rate_percent
    {
        return Err(EmiCalcError::invalid(
            "annual_rate_percent",
            format!(
                "Interest rate must be between {}% and {}%",
                limits.min_rate_percent, limits.max_rate_percent
            ),
        ));
    }
    if !limits.allowed_terms.contains(&spec.term_months) {
        let allowed: Vec<String> = limits.allowed_terms.iter().map(|t| t.to_string()).collect();
        return Err(EmiCalcError::invalid(
            "term_months",
            format!("Loan term must be one of {} months", allowed.join(", ")),
        ));
    }
    if let Some((amount, kind)) = spec.fee_override() {
        if amount < Decimal::ZERO {
            return Err(EmiCalcError::invalid(
                "fee_override_amount",
                "Custom fee cannot be negative",
            ));
        }
        if kind == FeeOverrideKind::Percentage && amount > limits.max_override_percentage {
            return Err(EmiCalcError::invalid(
                "fee_override_amount",
                format!(
                    "Custom fee percentage must be between 0% and {}%",
                    limits.max_override_percentage
                ),
            ));
        }
    }
    if spec.bank_reference.trim().is_empty() && spec.fee_override().is_none() {
        return Err(EmiCalcError::invalid(
            "bank_reference",
            "Select a bank or enter a custom fee",
        ));
    }
    Ok(())
}
