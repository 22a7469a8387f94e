//! Controller wired to the real HTTP calculator and a mock service.

use httpmock::prelude::*;
use pretty_assertions::assert_eq;
use serde_json::json;
use tax_ui::{
    AddressField, ItemField, Outcome, Region, app,
    settings::Settings,
};

async fn controller_for(server: &MockServer) -> tax_ui::FormController {
    let settings = Settings {
        api_url: server.base_url(),
        ..Settings::default()
    };
    app::build_controller(&app::build_registry(), &settings)
        .await
        .expect("http backend should be registered")
}

fn fill_form(controller: &mut tax_ui::FormController) {
    controller.set_address_field(AddressField::State, "CA");
    controller.set_address_field(AddressField::Zipcode, "94105");
    let id = controller.items().entries()[0].id();
    controller.set_item_field(id, ItemField::Name, "Laptop");
    controller.set_item_field(id, ItemField::Price, "999.99");
    controller.set_item_field(id, ItemField::Quantity, "1");
}

#[tokio::test]
async fn rejected_zipcode_message_reaches_the_view() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(Method::POST).path("/api/v1/calculate-tax");
        then.status(400).json_body(json!({
            "error": "Bad Request",
            "message": "Invalid ZIP code",
            "code": 400
        }));
    });

    let mut controller = controller_for(&server).await;
    fill_form(&mut controller);
    let outcome = controller.calculate().await;

    mock.assert();
    assert!(matches!(outcome, Outcome::Failed(_)));
    assert_eq!(controller.view().error_message(), "Invalid ZIP code");
    assert!(controller.view().is_visible(Region::Error));
    assert!(!controller.view().is_visible(Region::Loading));
}

#[tokio::test]
async fn successful_calculation_is_rendered() {
    let server = MockServer::start();
    let _m = server.mock(|when, then| {
        when.method(Method::POST).path("/api/v1/calculate-tax");
        then.status(200).json_body(json!({
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
        }));
    });

    let mut controller = controller_for(&server).await;
    fill_form(&mut controller);

    assert_eq!(controller.calculate().await, Outcome::Rendered);

    let view = controller.view();
    assert_eq!(view.summary().subtotal, "$999.99");
    assert_eq!(view.summary().total_tax, "$72.50");
    assert_eq!(view.summary().jurisdiction, "California");
    assert_eq!(view.breakdown()[0].tax_rate, "7.25%");
    assert!(view.to_string().contains("Grand Total: $1072.49"));
}
