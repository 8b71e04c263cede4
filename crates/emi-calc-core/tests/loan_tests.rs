use chrono::NaiveDate;
use emi_calc_core::fees::resolver::FeeClamp;
use emi_calc_core::loan::{emi, schedule};
use emi_calc_core::{calculate_loan, EmiCalcError, FeeCatalog, FeeOverrideKind, LoanSpecification};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn catalog() -> FeeCatalog {
    FeeCatalog::default()
}

// ===========================================================================
// Worked scenarios
// ===========================================================================

#[test]
fn test_scenario_fixed_fee_bank_at_fifteen_percent() {
    let spec = LoanSpecification::new(dec!(15000), dec!(15), 9, "HDFC Bank");
    let r = calculate_loan(&spec, &catalog()).unwrap().result;

    assert_eq!(r.emi, dec!(1773));
    assert_eq!(r.total_fees, dec!(299));
    assert_eq!(r.total_interest, dec!(954));
    // round(954 × 0.18) + round(299 × 0.18) = 172 + 54
    assert_eq!(r.total_tax, dec!(226));
    assert_eq!(r.total_amount, dec!(15000) + r.total_interest + dec!(299) + r.total_tax);
    assert_eq!(r.total_amount, dec!(16479));
    assert_eq!(r.apr, dec!(13.15));
    assert_eq!(r.schedule.len(), 9);
    assert_eq!(r.schedule[8].cumulative_paid, dec!(16256));
}

#[test]
fn test_scenario_zero_rate() {
    let spec = LoanSpecification::new(dec!(15000), dec!(0), 9, "HDFC Bank");
    let output = calculate_loan(&spec, &catalog()).unwrap();
    let r = &output.result;

    assert_eq!(r.emi, dec!(1667));
    assert_eq!(r.total_interest, Decimal::ZERO);
    // Only the fee is taxed
    assert_eq!(r.tax_details.on_interest, Decimal::ZERO);
    assert_eq!(r.total_tax, dec!(54));
    assert_eq!(r.total_amount, dec!(15353));
    assert_eq!(r.apr, dec!(3.14));
    assert!(r.schedule.iter().all(|p| p.interest_component.is_zero()));
}

#[test]
fn test_scenario_percentage_fee_clamped_to_minimum() {
    let spec = LoanSpecification::new(dec!(3000), dec!(15), 9, "ICICI Bank");
    let output = calculate_loan(&spec, &catalog()).unwrap();
    let r = &output.result;

    assert_eq!(r.fee_details.raw_amount, dec!(45));
    assert_eq!(r.total_fees, dec!(199));
    assert_eq!(r.fee_details.clamp, Some(FeeClamp::RaisedToMinimum));
    assert_eq!(r.emi, dec!(355));
    assert_eq!(r.total_interest, dec!(191));
    assert_eq!(r.total_amount, dec!(3460));
    assert!(output.warnings.iter().any(|w| w.contains("raised to minimum")));
}

#[test]
fn test_scenario_no_cost_emi() {
    let mut spec = LoanSpecification::new(dec!(12000), dec!(15), 12, "HDFC Bank");
    let standard = calculate_loan(&spec, &catalog()).unwrap().result;
    assert_eq!(standard.total_interest, dec!(998));

    spec.promotional_zero_interest = true;
    let r = calculate_loan(&spec, &catalog()).unwrap().result;

    assert_eq!(r.emi, dec!(1000));
    assert_eq!(r.total_interest, Decimal::ZERO);
    assert!(r.schedule.iter().all(|p| p.interest_component.is_zero()));
    assert_eq!(r.schedule[11].remaining_balance, Decimal::ZERO);
    assert_eq!(r.total_fees, standard.total_fees);
    assert_eq!(r.total_tax, dec!(54));
    assert_eq!(r.total_amount, dec!(12353));

    let summary = r.promotional_summary.unwrap();
    assert_eq!(summary.original_emi, standard.emi);
    assert_eq!(summary.discounted_emi, dec!(1000));
    assert_eq!(summary.total_savings, standard.total_interest);
    assert_eq!(summary.effective_interest_rate, Decimal::ZERO);
}

// ===========================================================================
// Invariants across a grid of loans
// ===========================================================================

fn loan_grid() -> Vec<LoanSpecification> {
    let mut specs = Vec::new();
    for principal in [dec!(1000), dec!(7500), dec!(15000), dec!(123456), dec!(500000)] {
        for rate in [dec!(0), dec!(1.5), dec!(12), dec!(15), dec!(18), dec!(36)] {
            for term in [1u32, 3, 6, 9, 12, 18, 24] {
                for bank in ["HDFC Bank", "ICICI Bank", "SBI Card", "Kotak Bank"] {
                    specs.push(LoanSpecification::new(principal, rate, term, bank));
                }
            }
        }
    }
    specs
}

#[test]
fn test_schedule_length_matches_term() {
    for spec in loan_grid() {
        let r = calculate_loan(&spec, &catalog()).unwrap().result;
        assert_eq!(r.schedule.len(), spec.term_months as usize);
        for (i, row) in r.schedule.iter().enumerate() {
            assert_eq!(row.month_index, i as u32 + 1);
        }
    }
}

#[test]
fn test_balance_never_increases_and_ends_near_zero() {
    for spec in loan_grid() {
        let r = calculate_loan(&spec, &catalog()).unwrap().result;
        let mut previous = spec.principal;
        for row in &r.schedule {
            assert!(row.remaining_balance <= previous, "{spec:?}");
            assert!(row.remaining_balance >= Decimal::ZERO, "{spec:?}");
            previous = row.remaining_balance;
        }
        // Whole-unit rounding of EMI and interest leaves at most a unit per month
        assert!(previous <= Decimal::from(spec.term_months), "{spec:?} left {previous}");
    }
}

#[test]
fn test_total_amount_identity() {
    for spec in loan_grid() {
        let r = calculate_loan(&spec, &catalog()).unwrap().result;
        assert_eq!(
            r.total_amount,
            spec.principal + r.total_interest + r.total_fees + r.total_tax
        );
        assert_eq!(r.total_tax, r.tax_details.on_interest + r.tax_details.on_fees);
    }
}

#[test]
fn test_breakdown_percentages() {
    for spec in loan_grid() {
        let r = calculate_loan(&spec, &catalog()).unwrap().result;
        let expected = (r.total_interest / spec.principal * dec!(100))
            .round_dp_with_strategy(2, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(r.breakdown.percentages.principal, dec!(100));
        assert_eq!(r.breakdown.percentages.interest, expected);
    }
}

#[test]
fn test_components_sum_to_installment() {
    for spec in loan_grid() {
        let r = calculate_loan(&spec, &catalog()).unwrap().result;
        for row in &r.schedule {
            assert_eq!(row.principal_component + row.interest_component, row.installment_amount);
        }
    }
}

#[test]
fn test_promotion_saves_exactly_the_standard_interest() {
    for mut spec in loan_grid() {
        let standard = calculate_loan(&spec, &catalog()).unwrap().result;
        spec.promotional_zero_interest = true;
        let promo = calculate_loan(&spec, &catalog()).unwrap().result;

        assert!(promo.schedule.iter().all(|p| p.interest_component.is_zero()));
        let summary = promo.promotional_summary.unwrap();
        assert_eq!(summary.total_savings, standard.total_interest);
        assert_eq!(promo.total_fees, standard.total_fees);
        assert_eq!(promo.total_tax, promo.tax_details.on_fees);
    }
}

#[test]
fn test_emi_zero_rate_property() {
    for spec in loan_grid() {
        let expected = (spec.principal / Decimal::from(spec.term_months))
            .round_dp_with_strategy(0, rust_decimal::RoundingStrategy::MidpointAwayFromZero);
        assert_eq!(emi::compute_emi(spec.principal, Decimal::ZERO, spec.term_months).unwrap(), expected);
    }
}

// ===========================================================================
// Overrides, warnings and errors
// ===========================================================================

#[test]
fn test_percentage_override_is_not_clamped() {
    let mut spec = LoanSpecification::new(dec!(3000), dec!(15), 9, "ICICI Bank");
    spec.fee_override_amount = Some(dec!(1.5));
    spec.fee_override_kind = Some(FeeOverrideKind::Percentage);
    let r = calculate_loan(&spec, &catalog()).unwrap().result;
    // 45 stays 45 even though ICICI's floor is 199
    assert_eq!(r.total_fees, dec!(45));
}

#[test]
fn test_principal_outside_bank_range_warns() {
    // Axis starts at 10000
    let spec = LoanSpecification::new(dec!(5000), dec!(12), 6, "Axis Bank");
    let output = calculate_loan(&spec, &catalog()).unwrap();
    assert!(output
        .warnings
        .iter()
        .any(|w| w.contains("outside Axis Bank's advertised range")));
}

#[test]
fn test_rounding_residue_warns() {
    let spec = LoanSpecification::new(dec!(12000), dec!(15), 12, "HDFC Bank");
    let output = calculate_loan(&spec, &catalog()).unwrap();
    assert_eq!(schedule::residual_balance(&output.result.schedule), dec!(2));
    assert!(output.warnings.iter().any(|w| w.contains("outstanding")));
}

#[test]
fn test_anchor_labels_schedule() {
    let mut spec = LoanSpecification::new(dec!(15000), dec!(15), 3, "HDFC Bank");
    spec.first_payment_anchor = NaiveDate::from_ymd_opt(2026, 11, 5);
    let r = calculate_loan(&spec, &catalog()).unwrap().result;
    let labels: Vec<&str> = r.schedule.iter().map(|p| p.payment_label.as_str()).collect();
    assert_eq!(labels, vec!["Dec 2026", "Jan 2027", "Feb 2027"]);
}

#[test]
fn test_zero_term_fails_outright() {
    let spec = LoanSpecification::new(dec!(15000), dec!(15), 0, "HDFC Bank");
    match calculate_loan(&spec, &catalog()) {
        Err(EmiCalcError::InvalidLoanSpecification { field, .. }) => assert_eq!(field, "term_months"),
        other => panic!("Expected InvalidLoanSpecification, got {other:?}"),
    }
}

#[test]
fn test_json_round_trip_of_result_keeps_figures() {
    let spec = LoanSpecification::new(dec!(15000), dec!(15), 9, "HDFC Bank");
    let output = calculate_loan(&spec, &catalog()).unwrap();
    let value = serde_json::to_value(&output).unwrap();
    assert_eq!(value["result"]["emi"], "1773");
    assert_eq!(value["result"]["breakdown"]["percentages"]["interest"], "6.36");
    assert!(value["result"].get("promotional_summary").is_none());
}
