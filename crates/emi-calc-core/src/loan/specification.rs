use chrono::NaiveDate;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Percent, Rate};

/// Default flat tax applied to interest and fees (18% GST).
pub const DEFAULT_TAX_RATE: Rate = dec!(0.18);

/// How a caller-supplied processing fee is interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeeOverrideKind {
    /// Flat amount in currency units
    #[default]
    Fixed,
    /// Percentage of principal (1.5 = 1.5%)
    Percentage,
}

/// How a no-cost EMI discount is passed back to the borrower.
///
/// Carried for display only: neither mode changes any computed figure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountMode {
    #[default]
    PrincipalReduction,
    Refund,
}

/// Everything needed to price one loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSpecification {
    pub principal: Money,
    /// Annual rate on a 0-100 scale; 0 means interest-free.
    pub annual_rate_percent: Percent,
    pub term_months: u32,
    /// Key into the fee catalog. Ignored when a fee override is present.
    pub bank_reference: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_override_amount: Option<Money>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_override_kind: Option<FeeOverrideKind>,
    #[serde(default)]
    pub promotional_zero_interest: bool,
    #[serde(default)]
    pub promotional_discount_mode: DiscountMode,
    /// Flat tax rate as a decimal; defaults to 0.18.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_rate: Option<Rate>,
    /// Date the payment labels count from. Rows read "Month N" without it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_payment_anchor: Option<NaiveDate>,
}

impl LoanSpecification {
    pub fn new(
        principal: Money,
        annual_rate_percent: Percent,
        term_months: u32,
        bank_reference: impl Into<String>,
    ) -> Self {
        LoanSpecification {
            principal,
            annual_rate_percent,
            term_months,
            bank_reference: bank_reference.into(),
            fee_override_amount: None,
            fee_override_kind: None,
            promotional_zero_interest: false,
            promotional_discount_mode: DiscountMode::default(),
            tax_rate: None,
            first_payment_anchor: None,
        }
    }

    /// The explicit fee override, if any. A bare amount is read as a fixed fee.
    pub fn fee_override(&self) -> Option<(Money, FeeOverrideKind)> {
        self.fee_override_amount
            .map(|amount| (amount, self.fee_override_kind.unwrap_or_default()))
    }

    pub fn effective_tax_rate(&self) -> Rate {
        self.tax_rate.unwrap_or(DEFAULT_TAX_RATE)
    }

    /// Same loan priced against another bank.
    pub fn with_bank(&self, bank_reference: &str) -> Self {
        LoanSpecification {
            bank_reference: bank_reference.to_string(),
            ..self.clone()
        }
    }
}

/// True when nothing has been calculated yet or the inputs moved since.
pub fn has_changes(last_calculated: Option<&LoanSpecification>, current: &LoanSpecification) -> bool {
    last_calculated.map_or(true, |last| last != current)
}
