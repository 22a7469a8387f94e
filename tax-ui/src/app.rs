use anyhow::{Context, Result};
use tax_client_http::HttpCalculatorFactory;
use tax_core::client::CalculatorRegistry;
use tracing::debug;

use crate::controller::FormController;
use crate::settings::Settings;

/// Registry with every calculator backend this binary knows about.
pub fn build_registry() -> CalculatorRegistry {
    let mut registry = CalculatorRegistry::new();
    registry.register(Box::new(HttpCalculatorFactory));
    registry
}

/// Creates the configured calculator and a freshly loaded form around it.
pub async fn build_controller(
    registry: &CalculatorRegistry,
    settings: &Settings,
) -> Result<FormController> {
    let config = settings.calculator_config();
    debug!(backend = %config.backend, url = %config.base_url, "building controller");

    let calculator = registry
        .create(&config)
        .await
        .with_context(|| format!("cannot create '{}' calculator", config.backend))?;
    Ok(FormController::new(calculator))
}
