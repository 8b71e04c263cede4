#![cfg(feature = "comparison")]

use emi_calc_core::comparison::banks::{compare_banks, BankComparison, ComparisonSort};
use emi_calc_core::costs::savings::calculate_savings;
use emi_calc_core::{calculate_loan, EmiCalcError, FeeCatalog, FeeKind, FeePolicy, LoanSpecification};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn twenty_thousand_over_six() -> LoanSpecification {
    LoanSpecification::new(dec!(20000), dec!(12), 6, "HDFC Bank")
}

fn compare(sort_by: ComparisonSort) -> BankComparison {
    compare_banks(&twenty_thousand_over_six(), &FeeCatalog::default(), sort_by)
        .unwrap()
        .result
}

fn names(comparison: &BankComparison) -> Vec<&str> {
    comparison.quotes.iter().map(|q| q.bank_name.as_str()).collect()
}

// ===========================================================================
// Default catalog under identical terms
// ===========================================================================

#[test]
fn test_every_bank_is_quoted() {
    let c = compare(ComparisonSort::Fees);
    assert_eq!(c.quotes.len(), 6);
    // Fees never touch the EMI
    assert!(c.quotes.iter().all(|q| q.emi == dec!(3451)));
    assert!(c.quotes.iter().all(|q| q.total_interest == dec!(705)));
}

#[test]
fn test_quote_figures() {
    let c = compare(ComparisonSort::Fees);
    let quote = |name: &str| c.quotes.iter().find(|q| q.bank_name == name).unwrap().clone();

    let hdfc = quote("HDFC Bank");
    assert_eq!(hdfc.processing_fees, dec!(299));
    assert_eq!(hdfc.total_tax, dec!(181));
    assert_eq!(hdfc.total_amount, dec!(21185));
    assert_eq!(hdfc.apr, dec!(11.85));
    assert_eq!(hdfc.savings_vs_worst, dec!(237));

    // Hybrid: 199 + 1% of 20000
    let sbi = quote("SBI Card");
    assert_eq!(sbi.processing_fees, dec!(399));
    assert_eq!(sbi.total_amount, dec!(21303));

    let axis = quote("Axis Bank");
    assert_eq!(axis.processing_fees, dec!(500));
    assert_eq!(axis.total_amount, dec!(21422));
    assert_eq!(axis.apr, dec!(14.22));
    assert_eq!(axis.savings_vs_worst, Decimal::ZERO);

    let custom = quote("Custom Bank");
    assert_eq!(custom.processing_fees, Decimal::ZERO);
    assert_eq!(custom.total_tax, dec!(127));
    assert_eq!(custom.total_amount, dec!(20832));
}

#[test]
fn test_best_and_worst_by_total_amount() {
    let c = compare(ComparisonSort::BankName);
    assert_eq!(c.best_bank, "Custom Bank");
    assert_eq!(c.best_total_amount, dec!(20832));
    assert_eq!(c.worst_bank, "Axis Bank");
    assert_eq!(c.worst_total_amount, dec!(21422));
    assert_eq!(c.max_savings, dec!(590));
}

#[test]
fn test_best_and_worst_ignore_sort_order() {
    for sort_by in [
        ComparisonSort::Fees,
        ComparisonSort::TotalAmount,
        ComparisonSort::BankName,
        ComparisonSort::Savings,
    ] {
        let c = compare(sort_by);
        assert_eq!(c.sort_by, sort_by);
        assert_eq!(c.best_bank, "Custom Bank");
        assert_eq!(c.worst_bank, "Axis Bank");
        let max = c.quotes.iter().map(|q| q.savings_vs_worst).max().unwrap();
        assert_eq!(max, c.max_savings);
    }
}

// ===========================================================================
// Sort orders
// ===========================================================================

#[test]
fn test_sort_by_fees() {
    let c = compare(ComparisonSort::Fees);
    assert_eq!(
        names(&c),
        ["Custom Bank", "HDFC Bank", "ICICI Bank", "SBI Card", "Kotak Bank", "Axis Bank"]
    );
}

#[test]
fn test_sort_by_bank_name() {
    let c = compare(ComparisonSort::BankName);
    assert_eq!(
        names(&c),
        ["Axis Bank", "Custom Bank", "HDFC Bank", "ICICI Bank", "Kotak Bank", "SBI Card"]
    );
}

#[test]
fn test_sort_by_savings_puts_cheapest_first() {
    let c = compare(ComparisonSort::Savings);
    assert_eq!(names(&c)[0], "Custom Bank");
    assert_eq!(names(&c)[5], "Axis Bank");
    for pair in c.quotes.windows(2) {
        assert!(pair[0].savings_vs_worst >= pair[1].savings_vs_worst);
    }
}

#[test]
fn test_sort_by_total_amount_ascending() {
    let c = compare(ComparisonSort::TotalAmount);
    for pair in c.quotes.windows(2) {
        assert!(pair[0].total_amount <= pair[1].total_amount);
    }
}

// ===========================================================================
// Overrides, promotions and custom catalogs
// ===========================================================================

#[test]
fn test_override_flattens_every_quote() {
    let mut spec = twenty_thousand_over_six();
    spec.fee_override_amount = Some(dec!(250));
    let output = compare_banks(&spec, &FeeCatalog::default(), ComparisonSort::Fees).unwrap();
    assert!(output.result.quotes.iter().all(|q| q.processing_fees == dec!(250)));
    assert_eq!(output.result.max_savings, Decimal::ZERO);
    assert!(output.warnings.iter().any(|w| w.contains("Custom fee")));
}

#[test]
fn test_no_cost_emi_comparison_zeroes_interest() {
    let mut spec = twenty_thousand_over_six();
    spec.promotional_zero_interest = true;
    let c = compare_banks(&spec, &FeeCatalog::default(), ComparisonSort::TotalAmount)
        .unwrap()
        .result;
    assert!(c.quotes.iter().all(|q| q.total_interest.is_zero()));
    // 20000 / 6 = 3333.33
    assert!(c.quotes.iter().all(|q| q.emi == dec!(3333)));
    assert_eq!(c.best_bank, "Custom Bank");
}

#[test]
fn test_ties_keep_catalog_order() {
    let flat = |name: &str| FeePolicy {
        bank_name: name.into(),
        kind: FeeKind::Fixed,
        fixed_amount: dec!(100),
        percentage_rate: None,
        minimum_fee: None,
        maximum_fee: None,
        applicable_range: None,
    };
    let catalog = FeeCatalog::new(vec![flat("Zeta"), flat("Alpha"), flat("Mid")]);
    let c = compare_banks(&twenty_thousand_over_six(), &catalog, ComparisonSort::Fees)
        .unwrap()
        .result;
    assert_eq!(names(&c), ["Zeta", "Alpha", "Mid"]);
    assert_eq!(c.best_bank, "Zeta");
    assert_eq!(c.worst_bank, "Zeta");
    assert_eq!(c.max_savings, Decimal::ZERO);
}

#[test]
fn test_empty_catalog_is_insufficient_data() {
    let err = compare_banks(
        &twenty_thousand_over_six(),
        &FeeCatalog::new(vec![]),
        ComparisonSort::Fees,
    )
    .unwrap_err();
    assert!(matches!(err, EmiCalcError::InsufficientData(_)));
}

#[test]
fn test_comparison_envelope() {
    let output =
        compare_banks(&twenty_thousand_over_six(), &FeeCatalog::default(), ComparisonSort::Fees)
            .unwrap();
    assert_eq!(output.assumptions["banks"], 6);
    assert!(!output.methodology.is_empty());
}

// ===========================================================================
// Savings between two priced loans
// ===========================================================================

#[test]
fn test_savings_of_no_cost_over_standard() {
    let catalog = FeeCatalog::default();
    let standard_spec = LoanSpecification::new(dec!(15000), dec!(15), 9, "HDFC Bank");
    let mut promo_spec = standard_spec.clone();
    promo_spec.promotional_zero_interest = true;

    let standard = calculate_loan(&standard_spec, &catalog).unwrap().result;
    let promo = calculate_loan(&promo_spec, &catalog).unwrap().result;

    let savings = calculate_savings(&standard, &promo);
    assert_eq!(savings.emi_savings, dec!(106));
    assert_eq!(savings.total_savings, dec!(1126));
    assert_eq!(savings.percentage_savings, dec!(6.83));
}
