//! # Configuration
//!
//! Process-wide configuration installed once, before the first flow starts.
//! Hosts either build [`RqesUiConfig`] in code or load it from TOML/JSON.
//!
//! ```toml
//! print_logs = true
//!
//! [rqes]
//! client_id = "wallet-client"
//! client_secret = "secret"
//! auth_flow_redirection_uri = "rqes://oauth/callback"
//! hash_algorithm = "SHA-256"
//!
//! [[rssps]]
//! name = "Example QTSP"
//! uri = "https://qtsp.example.com/csc/v2"
//! sca_url = "https://qtsp.example.com/sca"
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{Result, RqesUiError};
use crate::model::{HashAlgorithm, QtspData};

/// Environment variable that overrides [`RqesUiConfig::print_logs`].
pub const PRINT_LOGS_ENV: &str = "RQES_UI_PRINT_LOGS";

/// Signing-service client configuration handed to the external library.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RqesServiceConfig {
    /// OAuth client identifier registered with the providers
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Redirect URI the authorization server returns to
    pub auth_flow_redirection_uri: String,
    /// Digest applied to documents before remote signing
    #[serde(default)]
    pub hash_algorithm: HashAlgorithm,
}

/// Configuration for the signing flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RqesUiConfig {
    /// Remote signing service providers offered to the user
    pub rssps: Vec<QtspData>,
    /// Signing-service client configuration
    pub rqes: RqesServiceConfig,
    /// Emit diagnostic logs through [`crate::logging::TracingLogController`]
    #[serde(default)]
    pub print_logs: bool,
}

impl RqesUiConfig {
    /// Create a configuration from its parts.
    pub fn new(rssps: Vec<QtspData>, rqes: RqesServiceConfig) -> Self {
        Self {
            rssps,
            rqes,
            print_logs: false,
        }
    }

    /// Enable or disable diagnostic logs.
    #[must_use]
    pub fn with_print_logs(mut self, print_logs: bool) -> Self {
        self.print_logs = print_logs;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON document.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file, apply environment overrides and validate.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.merge_with_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `RQES_UI_PRINT_LOGS` if it is set.
    pub fn merge_with_env(&mut self) -> Result<()> {
        if let Ok(value) = std::env::var(PRINT_LOGS_ENV) {
            self.print_logs = parse_flag(&value).ok_or_else(|| {
                RqesUiError::config(format!("{PRINT_LOGS_ENV} must be a boolean, got `{value}`"))
            })?;
        }
        Ok(())
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.rssps.is_empty() {
            return Err(RqesUiError::config("at least one RSSP must be configured"));
        }
        for (index, rssp) in self.rssps.iter().enumerate() {
            if rssp.name.trim().is_empty() {
                return Err(RqesUiError::config(format!("rssps[{index}] has an empty name")));
            }
            if rssp.uri.trim().is_empty() {
                return Err(RqesUiError::config(format!(
                    "rssps[{index}] ({}) has an empty uri",
                    rssp.name
                )));
            }
        }
        if self.rqes.client_id.trim().is_empty() {
            return Err(RqesUiError::config("rqes.client_id must not be empty"));
        }
        if self.rqes.auth_flow_redirection_uri.trim().is_empty() {
            return Err(RqesUiError::config(
                "rqes.auth_flow_redirection_uri must not be empty",
            ));
        }
        Ok(())
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
