use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::types::{round_currency, Money, Rate};

/// Tax split by what it was levied on
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxBreakdown {
    pub on_interest: Money,
    pub on_fees: Money,
    pub total: Money,
}

/// Flat tax on `amount`, rounded to a whole unit.
pub fn apply_tax(amount: Money, rate: Rate) -> Money {
    round_currency(amount * rate)
}

/// Tax on interest and on fees, each rounded before summing.
pub fn tax_on_interest_and_fees(total_interest: Money, total_fees: Money, rate: Rate) -> TaxBreakdown {
    let on_interest = apply_tax(total_interest, rate);
    let on_fees = apply_tax(total_fees, rate);
    TaxBreakdown {
        on_interest,
        on_fees,
        total: on_interest + on_fees,
    }
}

/// Tax when no interest is charged.
pub fn tax_on_fees_only(total_fees: Money, rate: Rate) -> TaxBreakdown {
    tax_on_interest_and_fees(Decimal::ZERO, total_fees, rate)
}
