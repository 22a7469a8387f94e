use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A validated line item, keyed by its synthetic wire identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItemPayload {
    /// Synthetic identifier derived from the registry id (e.g. `item-3`).
    pub id: String,
    pub name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u64,
    #[serde(default)]
    pub description: String,
}
