use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::costs::breakdown::{build_breakdown, effective_apr, total_amount};
use crate::error::EmiCalcError;
use crate::fees::resolver::ResolvedFee;
use crate::fees::tax::tax_on_fees_only;
use crate::loan::calculator::{LoanCalculationResult, PromotionalSummary};
use crate::loan::schedule::build_interest_free_schedule;
use crate::loan::specification::DiscountMode;
use crate::types::{round_currency, Money, Rate};
use crate::EmiCalcResult;

/// What the zero-interest recomputation needs from the standard path
#[derive(Debug, Clone)]
pub struct PromotionTerms {
    pub principal: Money,
    pub term_months: u32,
    pub fee: ResolvedFee,
    pub tax_rate: Rate,
    /// EMI the borrower would have paid without the promotion
    pub original_emi: Money,
    /// Interest the borrower would have paid without the promotion
    pub original_interest: Money,
    pub discount_mode: DiscountMode,
    pub anchor: Option<NaiveDate>,
}

/// No-cost EMI: the interest is waived and the principal is repaid in equal
/// installments. Fees and the tax on them are unchanged.
pub fn apply_zero_interest_promotion(terms: &PromotionTerms) -> EmiCalcResult<LoanCalculationResult> {
    if terms.term_months == 0 {
        return Err(EmiCalcError::invalid(
            "term_months",
            "Loan term must be at least 1 month",
        ));
    }

    let discounted_emi = round_currency(terms.principal / Decimal::from(terms.term_months));
    let fees = terms.fee.amount;
    let tax = tax_on_fees_only(fees, terms.tax_rate);

    let schedule = build_interest_free_schedule(
        terms.principal,
        discounted_emi,
        terms.term_months,
        fees,
        terms.anchor,
    )?;

    let total = total_amount(terms.principal, Decimal::ZERO, fees, tax.total);
    let apr = effective_apr(terms.principal, total, terms.term_months);
    log::debug!(
        "no-cost EMI: {} → {} per month, {} interest waived",
        terms.original_emi,
        discounted_emi,
        terms.original_interest
    );

    Ok(LoanCalculationResult {
        emi: discounted_emi,
        total_interest: Decimal::ZERO,
        total_fees: fees,
        total_tax: tax.total,
        total_amount: total,
        apr,
        breakdown: build_breakdown(terms.principal, Decimal::ZERO, fees, tax.total),
        schedule,
        fee_details: terms.fee.clone(),
        tax_details: tax,
        promotional_summary: Some(PromotionalSummary {
            original_emi: terms.original_emi,
            discounted_emi,
            total_savings: terms.original_interest,
            effective_interest_rate: Decimal::ZERO,
            discount_mode: terms.discount_mode,
        }),
    })
}
