//! Endpoints, keys, and HTTP settings for the external services.
//!
//! Loaded from TOML; every section and field may be omitted and falls back to
//! the public Min Renovasjon endpoints.

use std::env;
use std::fs;
use std::io;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Errors raised while loading configuration.
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Config file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
    /// Config file is not valid TOML or has wrongly typed fields.
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    /// A field has an unusable value.
    #[error("invalid value for {field}: {reason}")]
    InvalidValue {
        /// Dotted field name.
        field: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Full configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenovasjonConfig {
    /// National address registry.
    pub address_registry: AddressRegistryConfig,
    /// Waste service customer registry.
    pub customer_registry: CustomerRegistryConfig,
    /// Komtek proxy for fractions and calendars.
    pub komtek: KomtekConfig,
    /// Outbound HTTP client.
    pub http: HttpConfig,
}

/// Address registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddressRegistryConfig {
    /// Search endpoint.
    pub url: String,
}

impl Default for AddressRegistryConfig {
    fn default() -> Self {
        Self {
            url: "https://ws.geonorge.no/adresser/v1/sok".to_owned(),
        }
    }
}

/// Customer registry settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerRegistryConfig {
    /// Endpoint listing registered app customers.
    pub url: String,
    /// Client application the customer list is scoped to.
    pub app_id: String,
}

impl Default for CustomerRegistryConfig {
    fn default() -> Self {
        Self {
            url: "https://www.webatlas.no/wacloud/servicerepository/CatalogueService.svc/json/GetRegisteredAppCustomers".to_owned(),
            app_id: "MobilOS-NorkartRenovasjon".to_owned(),
        }
    }
}

/// Komtek proxy settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KomtekConfig {
    /// Proxy every request is sent to.
    pub proxy_url: String,
    /// Upstream API root passed to the proxy in the `server` parameter.
    pub endpoint_url: String,
    /// Static key sent as `RenovasjonAppKey`.
    pub app_key: String,
}

impl Default for KomtekConfig {
    fn default() -> Self {
        Self {
            proxy_url: "https://norkartrenovasjon.azurewebsites.net/proxyserver.ashx".to_owned(),
            endpoint_url: "https://komteksky.norkart.no/komtek.renovasjonwebapi/api/".to_owned(),
            app_key: "AE13DEEC-804F-4615-A74E-B4FAC11F0A30".to_owned(),
        }
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// `User-Agent` header.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 3,
            user_agent: "renovasjon/0.1".to_owned(),
        }
    }
}

impl HttpConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl RenovasjonConfig {
    /// Parse and validate a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and
    /// [`ConfigError::InvalidValue`] when validation fails.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path`, or use defaults when no path is given.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] when the file cannot be read, otherwise as
    /// [`Self::from_toml_str`].
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => {
                debug!("loading config from {}", path.display());
                Self::from_toml_str(&fs::read_to_string(path)?)
            }
            None => {
                debug!("no config file given, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// As [`Self::load`], then apply environment overrides.
    ///
    /// - `RENOVASJON_APP_KEY`: replaces `komtek.app_key`
    /// - `RENOVASJON_TIMEOUT_SECS`: replaces `http.timeout_secs`
    ///
    /// # Errors
    ///
    /// As [`Self::load`]; an unparsable or zero timeout override is
    /// [`ConfigError::InvalidValue`].
    pub fn load_with_env(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env(|key| env::var(key).ok())?;
        Ok(config)
    }

    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(key) = lookup("RENOVASJON_APP_KEY") {
            debug!("override komtek.app_key from env");
            self.komtek.app_key = key;
        }

        if let Some(raw) = lookup("RENOVASJON_TIMEOUT_SECS") {
            self.http.timeout_secs = raw.parse().map_err(|err| ConfigError::InvalidValue {
                field: "http.timeout_secs".to_owned(),
                reason: format!("{raw:?} from RENOVASJON_TIMEOUT_SECS: {err}"),
            })?;
            debug!(timeout_secs = self.http.timeout_secs, "override http.timeout_secs from env");
        }

        self.validate()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.http.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "http.timeout_secs".to_owned(),
                reason: "must be at least one second".to_owned(),
            });
        }
        if self.komtek.app_key.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "komtek.app_key".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }
        Ok(())
    }
}
