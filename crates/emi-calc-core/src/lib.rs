//! Consumer loan cost engine.
//!
//! Turns a [`LoanSpecification`] and a [`FeeCatalog`] into EMI, a monthly
//! amortisation table, processing fee, tax, cost breakdown and a
//! cost-inclusive APR. Every figure is a `rust_decimal::Decimal` rounded to
//! whole currency units; percentages carry two decimals.
//!
//! ```
//! use emi_calc_core::{calculate_loan, FeeCatalog, LoanSpecification};
//! use rust_decimal_macros::dec;
//!
//! let spec = LoanSpecification::new(dec!(15000), dec!(15), 9, "HDFC Bank");
//! let output = calculate_loan(&spec, &FeeCatalog::default()).unwrap();
//! assert_eq!(output.result.emi, dec!(1773));
//! assert_eq!(output.result.total_amount, dec!(16479));
//! ```

pub mod costs;
pub mod error;
pub mod fees;
pub mod loan;
pub mod presets;
pub mod types;
pub mod validation;

#[cfg(feature = "comparison")]
pub mod comparison;

pub use error::EmiCalcError;
pub use fees::catalog::{FeeCatalog, FeeKind, FeePolicy};
pub use loan::calculator::{calculate_loan, LoanCalculationResult};
pub use loan::specification::{has_changes, DiscountMode, FeeOverrideKind, LoanSpecification};
pub use types::*;

/// Standard result type for all engine operations
pub type EmiCalcResult<T> = Result<T, EmiCalcError>;
