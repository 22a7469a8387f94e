//! Optional TOML settings file.
//!
//! ```toml
//! api_url = "http://localhost:8080"
//! backend = "http"
//! log_level = "info"
//! log_file = "tax-estimator.log"
//! ```
//!
//! Every key is optional; missing keys take the defaults below. Command-line
//! flags override whatever the file says.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::client::CalculatorConfig;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("cannot read settings file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Root URL of the calculation service.
    pub api_url: String,
    /// Calculator backend name, see [`tax_core::client::CalculatorRegistry`].
    pub backend: String,
    /// Bare level or full `EnvFilter` directive. `RUST_LOG` wins over this.
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        let calculator = CalculatorConfig::default();
        Self {
            api_url: calculator.base_url,
            backend: calculator.backend,
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Settings {
    pub fn from_toml_str(input: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(input)?)
    }

    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn calculator_config(&self) -> CalculatorConfig {
        CalculatorConfig {
            backend: self.backend.clone(),
            base_url: self.api_url.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_file_gives_defaults() {
        let settings = Settings::from_toml_str("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.api_url, "http://localhost:8080");
        assert_eq!(settings.backend, "http");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn file_values_override_defaults() {
        let settings = Settings::from_toml_str(
            r#"
api_url = "https://tax.example.com"
log_level = "debug"
log_file = "/tmp/tax.log"
"#,
        )
        .unwrap();

        assert_eq!(settings.api_url, "https://tax.example.com");
        assert_eq!(settings.backend, "http");
        assert_eq!(settings.log_level, "debug");
        assert_eq!(settings.log_file, Some(PathBuf::from("/tmp/tax.log")));
        assert_eq!(
            settings.calculator_config(),
            CalculatorConfig {
                backend: "http".to_string(),
                base_url: "https://tax.example.com".to_string(),
            }
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            Settings::from_toml_str("api_uri = \"http://x\""),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_io_error() {
        assert!(matches!(
            Settings::load(Path::new("/this/path/does/not/exist.toml")),
            Err(SettingsError::Io { .. })
        ));
    }
}
