//! Google Sheets data source configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Key of the production availability sheet.
pub const DEFAULT_SPREADSHEET_KEY: &str = "12oECP06QG6bgJ8LnpNawvJ0kRCIUm4Ej3TSewUQBKoM";

fn default_spreadsheet_key() -> String {
    String::from(DEFAULT_SPREADSHEET_KEY)
}

fn default_api_base() -> String {
    String::from("https://sheets.googleapis.com")
}

/// Default HTTP timeout for token and Sheets API calls.
const fn default_timeout_secs() -> u64 {
    10
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SheetsConfig {
    /// Spreadsheet key (the id segment of the sheet URL).
    #[serde(default = "default_spreadsheet_key")]
    pub spreadsheet_key: String,

    /// Base64-encoded service-account JSON key.
    #[serde(default)]
    pub credentials: String,

    /// Path to a service-account JSON key, used when `credentials` is empty.
    #[serde(default)]
    pub credentials_file: Option<PathBuf>,

    /// OAuth token endpoint. Empty means use the one in the key file.
    #[serde(default)]
    pub token_uri: String,

    /// Sheets API base URL.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for SheetsConfig {
    fn default() -> Self {
        Self {
            spreadsheet_key: default_spreadsheet_key(),
            credentials: String::new(),
            credentials_file: None,
            token_uri: String::new(),
            api_base: default_api_base(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl SheetsConfig {
    /// Whether any credential source is set.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.spreadsheet_key.is_empty()
            && (!self.credentials.trim().is_empty() || self.credentials_file.is_some())
    }
}
