use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EmiCalcError;
use crate::loan::emi::monthly_rate;
use crate::types::{round_currency, Money, Percent};
use crate::EmiCalcResult;

/// One row of the amortisation table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    /// 1-based installment number
    pub month_index: u32,
    pub principal_component: Money,
    pub interest_component: Money,
    pub installment_amount: Money,
    pub remaining_balance: Money,
    /// Upfront fees plus every installment paid so far
    pub cumulative_paid: Money,
    pub payment_label: String,
}

/// Human label for installment `month_index`: "Nov 2026" when anchored, "Month 3" otherwise.
pub fn payment_label(anchor: Option<NaiveDate>, month_index: u32) -> String {
    anchor
        .and_then(|date| date.checked_add_months(Months::new(month_index)))
        .map(|date| date.format("%b %Y").to_string())
        .unwrap_or_else(|| format!("Month {month_index}"))
}

/// Expand a fixed EMI into `term_months` rows.
///
/// Interest accrues on the running balance and is rounded each month; the
/// balance is clamped at zero. Rounding drift on the last row is left as-is.
pub fn build_schedule(
    principal: Money,
    emi: Money,
    term_months: u32,
    annual_rate_percent: Percent,
    upfront_fees: Money,
    anchor: Option<NaiveDate>,
) -> EmiCalcResult<Vec<MonthlyPayment>> {
    if term_months == 0 {
        return Err(EmiCalcError::invalid(
            "term_months",
            "Loan term must be at least 1 month",
        ));
    }

    let rate = monthly_rate(annual_rate_percent);
    let mut balance = principal;
    let mut cumulative_paid = upfront_fees;
    let mut schedule = Vec::with_capacity(term_months as usize);

    for month_index in 1..=term_months {
        let interest = round_currency(balance * rate);
        let principal_component = emi - interest;
        balance = (balance - principal_component).max(Decimal::ZERO);
        cumulative_paid += emi;

        schedule.push(MonthlyPayment {
            month_index,
            principal_component,
            interest_component: interest,
            installment_amount: emi,
            remaining_balance: balance,
            cumulative_paid,
            payment_label: payment_label(anchor, month_index),
        });
    }

    Ok(schedule)
}

/// Zero-interest schedule: every installment goes to principal.
pub fn build_interest_free_schedule(
    principal: Money,
    installment: Money,
    term_months: u32,
    upfront_fees: Money,
    anchor: Option<NaiveDate>,
) -> EmiCalcResult<Vec<MonthlyPayment>> {
    build_schedule(
        principal,
        installment,
        term_months,
        Decimal::ZERO,
        upfront_fees,
        anchor,
    )
}

/// Interest actually accrued across the schedule.
pub fn total_interest(schedule: &[MonthlyPayment]) -> Money {
    schedule.iter().map(|p| p.interest_component).sum()
}

/// Balance left after the last installment (non-zero only through rounding).
pub fn residual_balance(schedule: &[MonthlyPayment]) -> Money {
    schedule
        .last()
        .map(|p| p.remaining_balance)
        .unwrap_or(Decimal::ZERO)
}
