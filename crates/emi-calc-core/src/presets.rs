use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::specification::LoanSpecification;
use crate::types::Percent;

/// Installment counts offered on the calculator
pub const LOAN_TERMS: [u32; 6] = [3, 6, 9, 12, 18, 24];

pub const DEFAULT_BANK: &str = "HDFC Bank";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRatePreset {
    pub label: String,
    pub annual_rate_percent: Percent,
    pub description: String,
}

pub fn interest_rate_presets() -> Vec<InterestRatePreset> {
    let preset = |label: &str, rate: Decimal, description: &str| InterestRatePreset {
        label: label.into(),
        annual_rate_percent: rate,
        description: description.into(),
    };
    vec![
        preset("Credit Card EMI", dec!(15), "Standard credit card EMI rate"),
        preset("Personal Loan", dec!(12), "Typical personal loan rate"),
        preset("Consumer Durable", dec!(18), "Consumer durable financing"),
        preset("No Cost EMI", Decimal::ZERO, "Zero interest EMI (with processing fees)"),
    ]
}

impl Default for LoanSpecification {
    fn default() -> Self {
        LoanSpecification::new(dec!(15000), dec!(15), 9, DEFAULT_BANK)
    }
}
