mod address;
mod calculation;
mod health;
mod line_item;

pub use address::{Address, DEFAULT_COUNTRY};
pub use calculation::{CalculationRequest, CalculationResponse, ItemTaxDetail, ServiceErrorBody};
pub use health::HealthStatus;
pub use line_item::LineItemPayload;
