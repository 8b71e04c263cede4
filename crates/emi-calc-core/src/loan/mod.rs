pub mod calculator;
pub mod emi;
pub mod promotion;
pub mod schedule;
pub mod specification;
