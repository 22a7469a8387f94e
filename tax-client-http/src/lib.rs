//! HTTP backend for [`tax_core::TaxCalculator`].
//!
//! Talks JSON to the calculation service:
//!
//! | operation   | method | path                   |
//! |-------------|--------|------------------------|
//! | `calculate` | POST   | `/api/v1/calculate-tax` |
//! | `health`    | GET    | `/api/v1/health`        |

mod calculator;
mod factory;

pub use calculator::{CALCULATE_PATH, HEALTH_PATH, HttpTaxCalculator};
pub use factory::HttpCalculatorFactory;
