//! Exercises [`HttpTaxCalculator`] against a mock calculation service.

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use rust_decimal_macros::dec;
use serde_json::json;
use tax_client_http::HttpTaxCalculator;
use tax_core::{
    Address, CalculationError, CalculationRequest, GENERIC_FAILURE_MESSAGE, LineItemPayload,
    TaxCalculator,
};

fn laptop_request() -> CalculationRequest {
    CalculationRequest {
        address: Address::new("", "", "CA", "94105"),
        items: vec![LineItemPayload {
            id: "item-1".to_string(),
            name: "Laptop".to_string(),
            price: dec!(999.99),
            quantity: 1,
            description: String::new(),
        }],
    }
}

fn laptop_response() -> serde_json::Value {
    json!({
        "address": {
            "street": "",
            "city": "",
            "state": "CA",
            "country": "US",
            "zipcode": "94105"
        },
        "items": [{
            "item_id": "item-1",
            "item_name": "Laptop",
            "price": 999.99,
            "quantity": 1,
            "subtotal": 999.99,
            "tax_rate": 7.25,
            "tax_amount": 72.5,
            "total_amount": 1072.49
        }],
        "subtotal": 999.99,
        "total_tax": 72.5,
        "grand_total": 1072.49,
        "tax_jurisdiction": "California"
    })
}

#[tokio::test]
async fn posts_request_and_parses_response() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST)
            .path("/api/v1/calculate-tax")
            .header("content-type", "application/json")
            .json_body(json!({
                "address": {
                    "street": "",
                    "city": "",
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
            }));
        then.status(200).json_body(laptop_response());
    });

    let calculator = HttpTaxCalculator::new(&server.base_url()).unwrap();
    let response = calculator.calculate(&laptop_request()).await.unwrap();

    mock.assert();
    assert_eq!(response.items.len(), 1);
    assert_eq!(response.items[0].item_name, "Laptop");
    assert_eq!(response.items[0].tax_amount, dec!(72.50));
    assert_eq!(response.grand_total, dec!(1072.49));
    assert_eq!(response.tax_jurisdiction, "California");
}

#[tokio::test]
async fn non_success_status_surfaces_service_message() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(Method::POST).path("/api/v1/calculate-tax");
        then.status(400).json_body(json!({
            "error": "Bad Request",
            "message": "Invalid ZIP code",
            "code": 400
        }));
    });

    let calculator = HttpTaxCalculator::new(&server.base_url()).unwrap();
    let err = calculator.calculate(&laptop_request()).await.unwrap_err();

    assert_eq!(err, CalculationError::Service("Invalid ZIP code".to_string()));
    assert_eq!(err.user_message(), "Invalid ZIP code");
}

#[tokio::test]
async fn non_success_without_message_uses_generic_text() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(Method::POST).path("/api/v1/calculate-tax");
        then.status(500).body("internal error");
    });

    let calculator = HttpTaxCalculator::new(&server.base_url()).unwrap();
    let err = calculator.calculate(&laptop_request()).await.unwrap_err();

    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn request_is_sent_exactly_once_on_failure() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST).path("/api/v1/calculate-tax");
        then.status(503).json_body(json!({"message": "Service unavailable"}));
    });

    let calculator = HttpTaxCalculator::new(&server.base_url()).unwrap();
    let _ = calculator.calculate(&laptop_request()).await;

    assert_eq!(mock.calls(), 1, "calculation requests must not be retried");
}

#[tokio::test]
async fn malformed_success_body_is_decode_error() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(Method::POST).path("/api/v1/calculate-tax");
        then.status(200).json_body(json!({"subtotal": "lots"}));
    });

    let calculator = HttpTaxCalculator::new(&server.base_url()).unwrap();
    let err = calculator.calculate(&laptop_request()).await.unwrap_err();

    assert!(matches!(err, CalculationError::Decode(_)), "got {err:?}");
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn unreachable_service_is_transport_error() {
    // Port 1 is reserved and nothing listens on it.
    let calculator = HttpTaxCalculator::new("http://127.0.0.1:1").unwrap();
    let err = calculator.calculate(&laptop_request()).await.unwrap_err();

    assert!(matches!(err, CalculationError::Transport(_)), "got {err:?}");
    assert_eq!(err.user_message(), GENERIC_FAILURE_MESSAGE);
}

#[tokio::test]
async fn health_reports_service_status() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(Method::GET).path("/api/v1/health");
        then.status(200).json_body(json!({
            "status": "healthy",
            "service": "tax-calculation-api",
            "version": "1.0.0"
        }));
    });

    let calculator = HttpTaxCalculator::new(&server.base_url()).unwrap();
    let health = calculator.health().await.unwrap();

    assert!(health.is_healthy());
    assert_eq!(health.service, "tax-calculation-api");
    assert_eq!(health.version, "1.0.0");
}
