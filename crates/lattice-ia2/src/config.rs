//! Bridge configuration.
//!
//! The values here are what the bridge reports about the host application:
//! application and toolkit identity through the application object, and the
//! locale through `locale()`. Configuration can be built in code or read
//! from TOML:
//!
//! ```
//! use lattice_ia2::BridgeConfig;
//!
//! let config = BridgeConfig::from_toml_str(r#"
//! app_name = "Editor"
//! app_version = "2.1"
//!
//! [locale]
//! language = "German"
//! country = "Germany"
//! "#).unwrap();
//!
//! assert_eq!(config.app_name, "Editor");
//! assert_eq!(config.toolkit_name, "Horizon Lattice");
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Result type for configuration loading.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// Errors that can occur while loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The TOML was malformed or had the wrong shape.
    #[error("Invalid bridge configuration: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration file could not be read.
    #[error("Failed to read bridge configuration '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Locale reported to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    /// Language name, e.g. `"English"`.
    pub language: String,
    /// Country name, e.g. `"United States"`.
    pub country: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            language: "English".to_string(),
            country: "United States".to_string(),
        }
    }
}

/// Configuration shared by every object the bridge creates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BridgeConfig {
    /// Host application name.
    pub app_name: String,
    /// Host application version.
    pub app_version: String,
    /// Toolkit name.
    pub toolkit_name: String,
    /// Toolkit version.
    pub toolkit_version: String,
    /// Locale reported by `locale()`.
    pub locale: Locale,
    /// Emit a trace event for every client call.
    pub trace_client_calls: bool,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            app_name: String::new(),
            app_version: String::new(),
            toolkit_name: "Horizon Lattice".to_string(),
            toolkit_version: env!("CARGO_PKG_VERSION").to_string(),
            locale: Locale::default(),
            trace_client_calls: true,
        }
    }
}

impl BridgeConfig {
    /// Parse configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(s: &str) -> ConfigResult<Self> {
        Ok(toml::from_str(s)?)
    }

    /// Read configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Set the application name and version.
    pub fn with_application(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.app_name = name.into();
        self.app_version = version.into();
        self
    }

    /// Set the toolkit name and version.
    pub fn with_toolkit(mut self, name: impl Into<String>, version: impl Into<String>) -> Self {
        self.toolkit_name = name.into();
        self.toolkit_version = version.into();
        self
    }

    /// Set the locale.
    pub fn with_locale(mut self, language: impl Into<String>, country: impl Into<String>) -> Self {
        self.locale = Locale {
            language: language.into(),
            country: country.into(),
        };
        self
    }

    /// Enable or disable per-call tracing.
    pub fn with_client_call_tracing(mut self, enabled: bool) -> Self {
        self.trace_client_calls = enabled;
        self
    }
}
