//! Core domain types and logic.

pub mod price;
pub mod sma;
pub mod trade;
pub mod signal;
pub mod runner;
pub mod config_validation;
pub mod error;
