//! # snack-config
//!
//! Layered configuration loading for Snackbot using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`SNACKBOT_*` prefix, `__` as separator)
//! 2. Deployment variables `PORT`, `DEBUG` and `GCREDS`
//! 3. `snackbot.toml` in the working directory
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `SNACKBOT_SERVER__PORT` -> `server.port`,
//! `SNACKBOT_SHEETS__CREDENTIALS` -> `sheets.credentials`, etc.
//! The deployment variables map `PORT` -> `server.port`,
//! `DEBUG` -> `server.debug` and `GCREDS` -> `sheets.credentials`.
//!
//! # Usage
//!
//! ```no_run
//! use snack_config::SnackConfig;
//!
//! let config = SnackConfig::load_with_dotenv().expect("config");
//! println!("listening on {}", config.server.port);
//! ```

mod api;
mod error;
mod server;
mod sheets;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use server::ServerConfig;
pub use sheets::{DEFAULT_SPREADSHEET_KEY, SheetsConfig};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Project-local config file name.
pub const CONFIG_FILE: &str = "snackbot.toml";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SnackConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub sheets: SheetsConfig,
    #[serde(default)]
    pub api: ApiConfig,
}

impl SnackConfig {
    /// Load configuration from all sources (TOML file + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Figment`] if a source is malformed or a value
    /// has the wrong type.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(CONFIG_FILE))
            .merge(Self::deployment_env())
            .merge(Env::prefixed("SNACKBOT_").split("__"))
    }

    /// Unprefixed variables set by the container platform.
    fn deployment_env() -> Env {
        Env::raw()
            .only(&["PORT", "DEBUG", "GCREDS"])
            .map(|key| {
                if key.as_str().eq_ignore_ascii_case("port") {
                    "server.port".into()
                } else if key.as_str().eq_ignore_ascii_case("debug") {
                    "server.debug".into()
                } else {
                    "sheets.credentials".into()
                }
            })
    }
}
