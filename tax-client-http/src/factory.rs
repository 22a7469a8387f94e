use async_trait::async_trait;

use tax_core::TaxCalculator;
use tax_core::client::{CalculationError, CalculatorConfig, CalculatorFactory};

use crate::calculator::HttpTaxCalculator;

/// [`CalculatorFactory`] for the JSON-over-HTTP service.
///
/// ```rust,no_run
/// use tax_core::client::CalculatorRegistry;
/// use tax_client_http::HttpCalculatorFactory;
///
/// let mut registry = CalculatorRegistry::new();
/// registry.register(Box::new(HttpCalculatorFactory));
/// ```
pub struct HttpCalculatorFactory;

#[async_trait]
impl CalculatorFactory for HttpCalculatorFactory {
    fn backend_name(&self) -> &'static str {
        "http"
    }

    async fn create(
        &self,
        config: &CalculatorConfig,
    ) -> Result<Box<dyn TaxCalculator>, CalculationError> {
        let calculator = HttpTaxCalculator::new(&config.base_url)?;
        Ok(Box::new(calculator))
    }
}

#[cfg(test)]
mod tests {
    use tax_core::client::{CalculationError, CalculatorConfig, CalculatorFactory};

    use super::HttpCalculatorFactory;

    #[test]
    fn backend_name_is_http() {
        assert_eq!(HttpCalculatorFactory.backend_name(), "http");
    }

    #[tokio::test]
    async fn creates_calculator_for_valid_url() {
        let result = HttpCalculatorFactory
            .create(&CalculatorConfig::default())
            .await;
        assert!(result.is_ok(), "failed to create calculator: {:?}", result.err().map(|e| e.to_string()));
    }

    #[tokio::test]
    async fn rejects_invalid_url() {
        let config = CalculatorConfig {
            backend: "http".to_string(),
            base_url: "::".to_string(),
        };
        assert!(matches!(
            HttpCalculatorFactory.create(&config).await,
            Err(CalculationError::Configuration(_))
        ));
    }
}
