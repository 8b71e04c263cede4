use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::EmiCalcError;
use crate::fees::catalog::FeeCatalog;
use crate::loan::calculator::calculate_loan;
use crate::loan::specification::LoanSpecification;
use crate::types::*;
use crate::EmiCalcResult;

/// Ordering applied to the comparison rows
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonSort {
    /// Cheapest processing fee first
    #[default]
    Fees,
    /// Cheapest all-in cost first
    TotalAmount,
    /// Alphabetical
    BankName,
    /// Largest saving against the most expensive bank first
    Savings,
}

/// One bank's price for the shared loan specification
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankQuote {
    pub bank_name: String,
    pub processing_fees: Money,
    pub emi: Money,
    pub total_interest: Money,
    pub total_tax: Money,
    pub total_amount: Money,
    pub apr: Percent,
    /// Worst total amount minus this bank's total amount
    pub savings_vs_worst: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankComparison {
    pub sort_by: ComparisonSort,
    pub quotes: Vec<BankQuote>,
    pub best_bank: String,
    pub best_total_amount: Money,
    pub worst_bank: String,
    pub worst_total_amount: Money,
    /// Gap between the cheapest and the most expensive bank
    pub max_savings: Money,
}

fn sort_quotes(quotes: &mut [BankQuote], sort_by: ComparisonSort) {
    // Stable sorts keep catalog order among ties
    match sort_by {
        ComparisonSort::Fees => quotes.sort_by(|a, b| a.processing_fees.cmp(&b.processing_fees)),
        ComparisonSort::TotalAmount => quotes.sort_by(|a, b| a.total_amount.cmp(&b.total_amount)),
        ComparisonSort::BankName => quotes.sort_by(|a, b| {
            a.bank_name
                .to_lowercase()
                .cmp(&b.bank_name.to_lowercase())
                .then_with(|| a.bank_name.cmp(&b.bank_name))
        }),
        ComparisonSort::Savings => {
            quotes.sort_by(|a, b| b.savings_vs_worst.cmp(&a.savings_vs_worst))
        }
    }
}

/// Price the same loan at every bank in the catalog.
///
/// Best and worst are picked by total amount, whatever the sort order.
pub fn compare_banks(
    spec: &LoanSpecification,
    catalog: &FeeCatalog,
    sort_by: ComparisonSort,
) -> EmiCalcResult<ComputationOutput<BankComparison>> {
    let start = Instant::now();
    if catalog.is_empty() {
        return Err(EmiCalcError::InsufficientData(
            "Fee catalog has no banks to compare".into(),
        ));
    }

    let mut warnings: Vec<String> = Vec::new();
    let mut quotes = Vec::with_capacity(catalog.len());
    for policy in catalog.policies() {
        let output = calculate_loan(&spec.with_bank(&policy.bank_name), catalog)?;
        for warning in output.warnings {
            if !warnings.contains(&warning) {
                warnings.push(warning);
            }
        }
        let r = output.result;
        quotes.push(BankQuote {
            bank_name: policy.bank_name.clone(),
            processing_fees: r.total_fees,
            emi: r.emi,
            total_interest: r.total_interest,
            total_tax: r.total_tax,
            total_amount: r.total_amount,
            apr: r.apr,
            savings_vs_worst: Money::ZERO,
        });
    }

    let best = quotes
        .iter()
        .enumerate()
        .min_by(|(ia, a), (ib, b)| a.total_amount.cmp(&b.total_amount).then(ia.cmp(ib)))
        .map(|(_, q)| (q.bank_name.clone(), q.total_amount));
    let worst = quotes
        .iter()
        .enumerate()
        .max_by(|(ia, a), (ib, b)| a.total_amount.cmp(&b.total_amount).then(ib.cmp(ia)))
        .map(|(_, q)| (q.bank_name.clone(), q.total_amount));
    let (Some((best_bank, best_total_amount)), Some((worst_bank, worst_total_amount))) = (best, worst)
    else {
        return Err(EmiCalcError::InsufficientData(
            "Fee catalog has no banks to compare".into(),
        ));
    };

    for quote in &mut quotes {
        quote.savings_vs_worst = worst_total_amount - quote.total_amount;
    }
    sort_quotes(&mut quotes, sort_by);

    if spec.fee_override().is_some() {
        warnings.push("Custom fee overrides every bank's policy; quotes differ only in name".into());
    }

    let comparison = BankComparison {
        sort_by,
        quotes,
        best_bank,
        best_total_amount,
        worst_bank,
        worst_total_amount,
        max_savings: worst_total_amount - best_total_amount,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Bank fee comparison under identical loan terms",
        &serde_json::json!({
            "principal": spec.principal.to_string(),
            "annual_rate_percent": spec.annual_rate_percent.to_string(),
            "term_months": spec.term_months,
            "banks": catalog.len(),
            "promotional_zero_interest": spec.promotional_zero_interest,
        }),
        warnings,
        elapsed,
        comparison,
    ))
}
