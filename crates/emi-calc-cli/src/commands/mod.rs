pub mod catalog;
pub mod comparison;
pub mod loan;
