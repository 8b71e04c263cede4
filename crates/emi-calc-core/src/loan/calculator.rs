use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::costs::breakdown::{build_breakdown, effective_apr, total_amount, CostBreakdown};
use crate::error::EmiCalcError;
use crate::fees::catalog::FeeCatalog;
use crate::fees::resolver::{resolve_fee, FeeClamp, FeeSource, ResolvedFee};
use crate::fees::tax::{tax_on_interest_and_fees, TaxBreakdown};
use crate::loan::emi::compute_emi;
use crate::loan::promotion::{apply_zero_interest_promotion, PromotionTerms};
use crate::loan::schedule::{build_schedule, residual_balance, total_interest, MonthlyPayment};
use crate::loan::specification::{DiscountMode, LoanSpecification};
use crate::types::*;
use crate::EmiCalcResult;

/// What the no-cost EMI scheme changed relative to the standard loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromotionalSummary {
    pub original_emi: Money,
    pub discounted_emi: Money,
    /// Interest the standard loan would have charged
    pub total_savings: Money,
    pub effective_interest_rate: Percent,
    pub discount_mode: DiscountMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanCalculationResult {
    pub emi: Money,
    pub total_interest: Money,
    pub total_fees: Money,
    pub total_tax: Money,
    pub total_amount: Money,
    /// Cost-inclusive annualised rate, percent
    pub apr: Percent,
    pub schedule: Vec<MonthlyPayment>,
    pub breakdown: CostBreakdown,
    pub fee_details: ResolvedFee,
    pub tax_details: TaxBreakdown,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promotional_summary: Option<PromotionalSummary>,
}

fn check_preconditions(spec: &LoanSpecification) -> EmiCalcResult<()> {
    if spec.principal <= Decimal::ZERO {
        return Err(EmiCalcError::invalid("principal", "Principal must be positive"));
    }
    if spec.term_months == 0 {
        return Err(EmiCalcError::invalid(
            "term_months",
            "Loan term must be at least 1 month",
        ));
    }
    if spec.annual_rate_percent < Decimal::ZERO {
        return Err(EmiCalcError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    let tax_rate = spec.effective_tax_rate();
    if tax_rate < Decimal::ZERO || tax_rate > Decimal::ONE {
        return Err(EmiCalcError::invalid(
            "tax_rate",
            "Tax rate must be a decimal between 0 and 1",
        ));
    }
    Ok(())
}

fn fee_warnings(spec: &LoanSpecification, catalog: &FeeCatalog, fee: &ResolvedFee) -> Vec<String> {
    let mut warnings = Vec::new();
    if fee.source != FeeSource::Catalog {
        return warnings;
    }
    let Ok(policy) = catalog.lookup(&spec.bank_reference) else {
        return warnings;
    };
    if let Some(range) = &policy.applicable_range {
        if !range.contains(spec.principal) {
            warnings.push(format!(
                "Principal {} is outside {}'s advertised range {}-{}",
                spec.principal, policy.bank_name, range.min_amount, range.max_amount
            ));
        }
    }
    match fee.clamp {
        Some(FeeClamp::RaisedToMinimum) => warnings.push(format!(
            "{} fee {} raised to minimum {}",
            policy.bank_name,
            fee.raw_amount.round_dp(2),
            fee.amount
        )),
        Some(FeeClamp::CappedAtMaximum) => warnings.push(format!(
            "{} fee {} capped at maximum {}",
            policy.bank_name,
            fee.raw_amount.round_dp(2),
            fee.amount
        )),
        None => {}
    }
    warnings
}

/// Price a loan end to end: fee, EMI, schedule, tax, breakdown, APR and, when
/// requested, the no-cost EMI alternative.
pub fn calculate_loan(
    spec: &LoanSpecification,
    catalog: &FeeCatalog,
) -> EmiCalcResult<ComputationOutput<LoanCalculationResult>> {
    let start = Instant::now();
    check_preconditions(spec)?;

    let tax_rate = spec.effective_tax_rate();
    let fee = resolve_fee(spec, catalog)?;
    let mut warnings = fee_warnings(spec, catalog, &fee);

    let emi = compute_emi(spec.principal, spec.annual_rate_percent, spec.term_months)?;

    // Interest is what the schedule actually accrues, not emi × n − principal
    let schedule = build_schedule(
        spec.principal,
        emi,
        spec.term_months,
        spec.annual_rate_percent,
        fee.amount,
        spec.first_payment_anchor,
    )?;
    let interest = total_interest(&schedule);
    let tax = tax_on_interest_and_fees(interest, fee.amount, tax_rate);
    let total = total_amount(spec.principal, interest, fee.amount, tax.total);
    let apr = effective_apr(spec.principal, total, spec.term_months);

    log::debug!(
        "{} {} @ {}% × {}m: emi={} interest={} fee={} tax={} total={} apr={}",
        spec.bank_reference,
        spec.principal,
        spec.annual_rate_percent,
        spec.term_months,
        emi,
        interest,
        fee.amount,
        tax.total,
        total,
        apr
    );

    let result = if spec.promotional_zero_interest {
        if spec.promotional_discount_mode == DiscountMode::Refund {
            warnings.push(
                "Refund discount mode is recorded but priced the same as principal reduction".into(),
            );
        }
        apply_zero_interest_promotion(&PromotionTerms {
            principal: spec.principal,
            term_months: spec.term_months,
            fee,
            tax_rate,
            original_emi: emi,
            original_interest: interest,
            discount_mode: spec.promotional_discount_mode,
            anchor: spec.first_payment_anchor,
        })?
    } else {
        LoanCalculationResult {
            emi,
            total_interest: interest,
            total_fees: fee.amount,
            total_tax: tax.total,
            total_amount: total,
            apr,
            breakdown: build_breakdown(spec.principal, interest, fee.amount, tax.total),
            schedule,
            fee_details: fee,
            tax_details: tax,
            promotional_summary: None,
        }
    };

    let residual = residual_balance(&result.schedule);
    if !residual.is_zero() {
        warnings.push(format!(
            "Rounding leaves {residual} outstanding after the final installment"
        ));
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        if spec.promotional_zero_interest {
            "No-Cost EMI (interest waived, fees and tax retained)"
        } else {
            "Reducing-balance EMI with flat tax on interest and fees"
        },
        &serde_json::json!({
            "principal": spec.principal.to_string(),
            "annual_rate_percent": spec.annual_rate_percent.to_string(),
            "term_months": spec.term_months,
            "bank_reference": spec.bank_reference,
            "tax_rate": tax_rate.to_string(),
            "fee_source": result.fee_details.source,
            "promotional_zero_interest": spec.promotional_zero_interest,
        }),
        warnings,
        elapsed,
        result,
    ))
}
