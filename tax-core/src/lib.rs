pub mod client;
pub mod models;

pub use client::calculator::{CalculationError, GENERIC_FAILURE_MESSAGE, TaxCalculator};
pub use models::*;
