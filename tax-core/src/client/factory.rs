use std::collections::HashMap;

use async_trait::async_trait;

use super::calculator::{CalculationError, TaxCalculator};

/// Backend-agnostic calculator configuration.
///
/// `backend` must match the [`CalculatorFactory::backend_name`] of a
/// registered factory. `base_url` is handed to that factory unchanged.
///
/// | backend | base_url examples          |
/// |---------|----------------------------|
/// | `http`  | `http://localhost:8080`    |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorConfig {
    /// Lowercase identifier matching a registered factory (e.g. `"http"`).
    pub backend: String,
    /// Root of the calculation service; endpoint paths are appended to it.
    pub base_url: String,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            backend: "http".to_string(),
            base_url: "http://localhost:8080".to_string(),
        }
    }
}

/// One implementation per calculator backend. Each backend crate exports a
/// unit struct implementing this trait, registered with a
/// [`CalculatorRegistry`] at startup.
#[async_trait]
pub trait CalculatorFactory: Send + Sync {
    /// Unique, lowercase identifier for this backend.
    fn backend_name(&self) -> &'static str;

    async fn create(
        &self,
        config: &CalculatorConfig,
    ) -> Result<Box<dyn TaxCalculator>, CalculationError>;
}

/// Registry of [`CalculatorFactory`] instances, keyed by backend name.
pub struct CalculatorRegistry {
    factories: HashMap<&'static str, Box<dyn CalculatorFactory>>,
}

impl CalculatorRegistry {
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Register a backend factory, replacing any factory with the same name.
    pub fn register(
        &mut self,
        factory: Box<dyn CalculatorFactory>,
    ) {
        self.factories.insert(factory.backend_name(), factory);
    }

    /// Names of every registered backend, sorted alphabetically.
    pub fn available_backends(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.factories.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Dispatch to the factory matching `config.backend`.
    ///
    /// # Errors
    /// * [`CalculationError::Configuration`] when no factory is registered
    ///   under that name.
    /// * Any error the chosen factory returns.
    pub async fn create(
        &self,
        config: &CalculatorConfig,
    ) -> Result<Box<dyn TaxCalculator>, CalculationError> {
        let factory = self
            .factories
            .get(config.backend.as_str())
            .ok_or_else(|| {
                CalculationError::Configuration(format!(
                    "unknown backend '{}'; available: {:?}",
                    config.backend,
                    self.available_backends()
                ))
            })?;

        tracing::debug!(backend = factory.backend_name(), url = %config.base_url, "creating calculator");
        factory.create(config).await
    }
}

impl Default for CalculatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}
