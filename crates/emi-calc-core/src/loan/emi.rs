use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::EmiCalcError;
use crate::types::{round_currency, Money, Percent, Rate};
use crate::EmiCalcResult;

/// Convert an annual percentage (15 = 15% p.a.) into the monthly decimal rate.
pub fn monthly_rate(annual_rate_percent: Percent) -> Rate {
    annual_rate_percent / dec!(100) / dec!(12)
}

/// Equated monthly installment, rounded to a whole currency unit.
///
/// EMI = P × r × (1 + r)^n / ((1 + r)^n − 1), with r the monthly rate.
/// A zero rate repays the principal in equal slices.
pub fn compute_emi(
    principal: Money,
    annual_rate_percent: Percent,
    term_months: u32,
) -> EmiCalcResult<Money> {
    if term_months == 0 {
        return Err(EmiCalcError::invalid(
            "term_months",
            "Loan term must be at least 1 month",
        ));
    }
    if annual_rate_percent < Decimal::ZERO {
        return Err(EmiCalcError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }

    let n = Decimal::from(term_months);
    if annual_rate_percent.is_zero() {
        return Ok(round_currency(principal / n));
    }

    let r = monthly_rate(annual_rate_percent);
    let growth = (Decimal::ONE + r)
        .checked_powu(u64::from(term_months))
        .ok_or_else(|| {
            EmiCalcError::FinancialImpossibility(format!(
                "(1 + r)^n overflows for {annual_rate_percent}% over {term_months} months"
            ))
        })?;

    let denominator = growth - Decimal::ONE;
    if denominator.is_zero() {
        return Err(EmiCalcError::DivisionByZero {
            context: "EMI annuity factor".into(),
        });
    }

    let emi = principal
        .checked_mul(r)
        .and_then(|v| v.checked_mul(growth))
        .ok_or_else(|| {
            EmiCalcError::FinancialImpossibility("EMI numerator overflows".into())
        })?
        / denominator;

    Ok(round_currency(emi))
}
