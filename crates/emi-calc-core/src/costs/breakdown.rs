use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{round_percent, Money, Percent};

/// Each cost component as a share of principal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostShares {
    /// Always 100
    pub principal: Percent,
    pub interest: Percent,
    pub fees: Percent,
    pub tax: Percent,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub principal: Money,
    pub interest_total: Money,
    pub fee_total: Money,
    pub tax_total: Money,
    pub percentages: CostShares,
}

fn share_of_principal(component: Money, principal: Money) -> Percent {
    if principal.is_zero() {
        return Decimal::ZERO;
    }
    round_percent(component / principal * dec!(100))
}

pub fn build_breakdown(
    principal: Money,
    interest_total: Money,
    fee_total: Money,
    tax_total: Money,
) -> CostBreakdown {
    CostBreakdown {
        principal,
        interest_total,
        fee_total,
        tax_total,
        percentages: CostShares {
            principal: dec!(100),
            interest: share_of_principal(interest_total, principal),
            fees: share_of_principal(fee_total, principal),
            tax: share_of_principal(tax_total, principal),
        },
    }
}

pub fn total_amount(principal: Money, interest: Money, fees: Money, tax: Money) -> Money {
    principal + interest + fees + tax
}

/// Cost-inclusive annualised rate, in percent to two decimals.
///
/// Every non-principal cost is treated as interest and spread over the term:
/// `(total − principal) / principal × 12 / term × 100`. Not a regulatory APR.
pub fn effective_apr(principal: Money, total_amount: Money, term_months: u32) -> Percent {
    if principal.is_zero() || term_months == 0 {
        return Decimal::ZERO;
    }
    let cost_ratio = (total_amount - principal) / principal;
    let annualiser = dec!(12) / Decimal::from(term_months);
    round_percent(cost_ratio * annualiser * dec!(100))
}
