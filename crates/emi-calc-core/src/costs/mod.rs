pub mod breakdown;
pub mod savings;
