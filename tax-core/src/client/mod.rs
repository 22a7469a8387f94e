pub mod calculator;
pub mod factory;

pub use calculator::{CalculationError, GENERIC_FAILURE_MESSAGE, TaxCalculator};
pub use factory::{CalculatorConfig, CalculatorFactory, CalculatorRegistry};
