//! # Configuration
//!
//! Runtime settings for the registration intake server.
//!
//! Settings are layered with figment, later sources overriding earlier ones:
//! 1. Built-in defaults
//! 2. `registration.toml` in the working directory (optional)
//! 3. Environment variables prefixed with `REGISTRATION_`
//!    (e.g. `REGISTRATION_PORT=8080`, `REGISTRATION_DATA_DIR=/srv/intake`)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// Default configuration file name, resolved against the working directory
pub const CONFIG_FILE_NAME: &str = "registration.toml";

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "REGISTRATION_";

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Interface to bind the HTTP listener to
    pub host: String,
    /// Port to bind the HTTP listener to
    pub port: u16,
    /// Directory holding `data.csv`, `uploads/` and the generated export files
    pub data_dir: PathBuf,
    /// Static asset root served for every path outside `/api`
    pub public_dir: PathBuf,
    /// Largest accepted request body, in bytes
    pub max_upload_bytes: usize,
    /// Origin allowed to call the API cross-site; CORS is off when unset
    pub cors_origin: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            data_dir: PathBuf::from("."),
            public_dir: PathBuf::from("public"),
            max_upload_bytes: 20 * 1024 * 1024,
            cors_origin: None,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, `registration.toml` and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE_NAME))
    }

    /// Load configuration using a specific TOML file (which need not exist)
    pub fn load_from(config_file: &Path) -> Result<Self> {
        let config: AppConfig = Figment::new()
            .merge(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(config_file))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()
            .context("failed to load configuration")?;

        config.validate()?;
        Ok(config)
    }

    /// Reject settings the server cannot start with
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("port must be greater than 0");
        }
        if self.host.trim().is_empty() {
            bail!("host must not be empty");
        }
        if self.max_upload_bytes == 0 {
            bail!("max_upload_bytes must be greater than 0");
        }
        if let Some(origin) = &self.cors_origin {
            if origin.trim().is_empty() {
                bail!("cors_origin must not be empty when set");
            }
        }
        Ok(())
    }
}
