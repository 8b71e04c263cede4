pub mod banks;
