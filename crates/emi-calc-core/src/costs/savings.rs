use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::loan::calculator::LoanCalculationResult;
use crate::types::{round_percent, Money, Percent};

/// How far apart two priced loans are. All figures are magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSavings {
    pub emi_savings: Money,
    pub total_savings: Money,
    /// Total difference as a share of the first loan's total amount
    pub percentage_savings: Percent,
}

pub fn calculate_savings(first: &LoanCalculationResult, second: &LoanCalculationResult) -> LoanSavings {
    let emi_savings = (first.emi - second.emi).abs();
    let total_savings = (first.total_amount - second.total_amount).abs();
    let percentage_savings = if first.total_amount.is_zero() {
        Decimal::ZERO
    } else {
        round_percent(total_savings / first.total_amount * dec!(100)).abs()
    };

    LoanSavings {
        emi_savings,
        total_savings,
        percentage_savings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fees::catalog::FeeCatalog;
    use crate::loan::calculator::calculate_loan;
    use crate::loan::specification::LoanSpecification;

    #[test]
    fn test_savings_between_standard_and_no_cost() {
        let catalog = FeeCatalog::default();
        let mut spec = LoanSpecification::new(dec!(15000), dec!(15), 9, "HDFC Bank");
        let standard = calculate_loan(&spec, &catalog).unwrap().result;
        spec.promotional_zero_interest = true;
        let no_cost = calculate_loan(&spec, &catalog).unwrap().result;

        let savings = calculate_savings(&standard, &no_cost);
        // 1773 vs round(15000 / 9) = 1667
        assert_eq!(savings.emi_savings, dec!(106));
        // 16479 vs 15353
        assert_eq!(savings.total_savings, dec!(1126));
        // 1126 / 16479 = 6.833…%
        assert_eq!(savings.percentage_savings, dec!(6.83));

        // Order only changes the base of the percentage
        let reversed = calculate_savings(&no_cost, &standard);
        assert_eq!(reversed.total_savings, dec!(1126));
        assert_eq!(reversed.percentage_savings, dec!(7.33));
    }
}
