//! Named configuration profiles.
//!
//! Profiles let a scheduler invoke the pipeline with a short name instead of
//! a full parameter bundle. The configuration system supports:
//! - User config in the home directory (`~/.config/flowlog/flowlog.toml`)
//! - User config in the current directory (`./flowlog.toml`)
//!
//! Current-directory values take precedence. Explicit parameters always
//! override profile values; the profile only fills gaps.
//!
//! # Example
//!
//! ```toml
//! [profiles.production]
//! base_url = "https://api.example.com"
//! api_token = "app-xxxx"
//! fetch_all = true
//! with_details = true
//! output_format = "csv"
//! output_dir = "/var/reports/flowlog"
//! ```

use crate::params::PipelineParams;
use config::{Config, File};
use flowlog_error::{ConfigError, FlowlogResult};
use serde::Deserialize;
use std::collections::BTreeMap;
use tracing::{debug, instrument};

/// The named profiles found in configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Profiles {
    /// Profile name to parameter bundle
    #[serde(default)]
    profiles: BTreeMap<String, PipelineParams>,
}

impl Profiles {
    /// Load profiles with precedence: current dir > home dir.
    ///
    /// Both files are optional; with neither present the profile set is
    /// empty.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when a present file cannot be read or parsed.
    #[instrument]
    pub fn load() -> FlowlogResult<Self> {
        debug!("loading profiles with precedence: current dir > home dir");

        let mut builder = Config::builder();

        // User config from home directory (optional)
        if let Some(home) = dirs::home_dir() {
            let home_config = home.join(".config/flowlog/flowlog.toml");
            builder = builder.add_source(File::from(home_config).required(false));
        }

        // User config from current directory (optional, highest precedence)
        builder = builder.add_source(File::with_name("flowlog").required(false));

        builder
            .build()
            .map_err(|e| {
                ConfigError::new(format!("failed to build configuration: {}", e)).into()
            })
            .and_then(|config| {
                config.try_deserialize().map_err(|e| {
                    ConfigError::new(format!("failed to parse configuration: {}", e)).into()
                })
            })
    }

    /// Load profiles from a single file, bypassing the precedence chain.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` when the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<std::path::Path>) -> FlowlogResult<Self> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .build()
            .map_err(|e| {
                ConfigError::new(format!(
                    "failed to read configuration from {}: {}",
                    path.as_ref().display(),
                    e
                ))
                .into()
            })
            .and_then(|config| {
                config.try_deserialize().map_err(|e| {
                    ConfigError::new(format!("failed to parse configuration: {}", e)).into()
                })
            })
    }

    /// Look up one profile by name.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the available profiles when `name` is
    /// unknown.
    pub fn get(&self, name: &str) -> FlowlogResult<&PipelineParams> {
        self.profiles.get(name).ok_or_else(|| {
            let available: Vec<&str> = self.profiles.keys().map(String::as_str).collect();
            ConfigError::new(format!(
                "unknown profile '{}' (available: {})",
                name,
                if available.is_empty() {
                    "none".to_string()
                } else {
                    available.join(", ")
                }
            ))
            .into()
        })
    }

    /// Profile names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    /// Whether no profiles were configured.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}
