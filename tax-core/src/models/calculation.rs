use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Address, LineItemPayload};

/// Payload posted to the calculation service, built once per submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationRequest {
    pub address: Address,
    pub items: Vec<LineItemPayload>,
}

/// Per-item tax breakdown returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemTaxDetail {
    #[serde(default)]
    pub item_id: String,
    pub item_name: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: u64,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    /// Percentage, e.g. `7.25` for 7.25%.
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_rate: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub tax_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_amount: Decimal,
}

/// Successful response of the calculation service.
///
/// The totals are expected to agree with the per-item figures
/// (`subtotal` is the sum of item subtotals, `grand_total` is
/// `subtotal + total_tax`) but nothing on this side enforces it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResponse {
    #[serde(default)]
    pub address: Option<Address>,
    pub items: Vec<ItemTaxDetail>,
    #[serde(with = "rust_decimal::serde::float")]
    pub subtotal: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total_tax: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub grand_total: Decimal,
    pub tax_jurisdiction: String,
}

/// Error body the service sends with a non-success status. Every field is
/// optional since only `message` is ever shown to the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub code: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;
    use serde_json::json;

    #[test]
    fn request_serializes_prices_as_json_numbers() {
        let request = CalculationRequest {
            address: Address::new("1 Market St", "San Francisco", "CA", "94105"),
            items: vec![LineItemPayload {
                id: "item-1".to_string(),
                name: "Laptop".to_string(),
                price: dec!(999.99),
                quantity: 1,
                description: String::new(),
            }],
        };

        let value = serde_json::to_value(&request).unwrap();

        assert_eq!(
            value,
            json!({
                "address": {
                    "street": "1 Market St",
                    "city": "San Francisco",
                    "state": "CA",
                    "country": "US",
                    "zipcode": "94105"
                },
                "items": [{
                    "id": "item-1",
                    "name": "Laptop",
                    "price": 999.99,
                    "quantity": 1,
                    "description": ""
                }]
            })
        );
    }

    #[test]
    fn response_accepts_integer_and_float_amounts() {
        let body = json!({
            "items": [{
                "item_id": "item-1",
                "item_name": "Book",
                "price": 20,
                "quantity": 2,
                "subtotal": 40,
                "tax_rate": 7.25,
                "tax_amount": 2.9,
                "total_amount": 42.9
            }],
            "subtotal": 40,
            "total_tax": 2.9,
            "grand_total": 42.9,
            "tax_jurisdiction": "California"
        });

        let response: CalculationResponse = serde_json::from_value(body).unwrap();

        assert!(response.address.is_none());
        assert_eq!(response.items.len(), 1);
        assert_eq!(response.items[0].price, dec!(20));
        assert_eq!(response.items[0].tax_rate, dec!(7.25));
        assert_eq!(response.grand_total, dec!(42.9));
        assert_eq!(response.tax_jurisdiction, "California");
    }

    #[test]
    fn error_body_tolerates_missing_fields() {
        let body: ServiceErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body, ServiceErrorBody::default());

        let body: ServiceErrorBody = serde_json::from_value(json!({
            "error": "Bad Request",
            "message": "Invalid ZIP code",
            "code": 400
        }))
        .unwrap();
        assert_eq!(body.message.as_deref(), Some("Invalid ZIP code"));
        assert_eq!(body.code, Some(400));
    }
}
