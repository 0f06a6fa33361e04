//! # snack-sheets
//!
//! Record sources for Snackbot.
//!
//! [`SheetsClient`] reads every row of the first worksheet of a Google
//! spreadsheet, authenticating as a service account. [`StaticSource`] serves
//! a fixed set of records from memory. Both implement [`RecordSource`], which
//! is what the server holds.

pub mod auth;

mod error;
mod http;
mod rows;

pub use auth::{ServiceAccountTokens, StaticToken, TokenSource};
pub use error::SheetsError;
pub use rows::records_from_values;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use snack_config::SheetsConfig;
use snack_core::Record;
use snack_secrets::ServiceAccountKey;

use crate::http::check_response;
use crate::rows::{SpreadsheetMeta, ValueRange, a1_range};

// ── Source trait ───────────────────────────────────────────────────

/// Anything that can produce the full, current list of records.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch every record. No pagination, no filtering.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError`] on authentication, transport, or API failure.
    async fn fetch_all(&self) -> Result<Vec<Record>, SheetsError>;
}

/// Serves the same records on every fetch.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    records: Vec<Record>,
}

impl StaticSource {
    #[must_use]
    pub const fn new(records: Vec<Record>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl RecordSource for StaticSource {
    async fn fetch_all(&self) -> Result<Vec<Record>, SheetsError> {
        Ok(self.records.clone())
    }
}

// ── Client ─────────────────────────────────────────────────────────

/// Google Sheets API client bound to one spreadsheet.
pub struct SheetsClient {
    http: reqwest::Client,
    api_base: String,
    spreadsheet_key: String,
    tokens: Arc<dyn TokenSource>,
}

impl SheetsClient {
    /// Build a client that authenticates with a service-account key.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Http`] if the HTTP client cannot be built and
    /// [`SheetsError::Signing`] if the key's private key is unusable.
    pub fn from_config(config: &SheetsConfig, key: &ServiceAccountKey) -> Result<Self, SheetsError> {
        let http = build_http(config.timeout_secs)?;
        let tokens = ServiceAccountTokens::new(http.clone(), key, &config.token_uri)?;
        Ok(Self::with_token_source(http, config, Arc::new(tokens)))
    }

    /// Build a client around an existing HTTP client and token source.
    #[must_use]
    pub fn with_token_source(
        http: reqwest::Client,
        config: &SheetsConfig,
        tokens: Arc<dyn TokenSource>,
    ) -> Self {
        Self {
            http,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            spreadsheet_key: config.spreadsheet_key.clone(),
            tokens,
        }
    }

    #[must_use]
    pub fn spreadsheet_key(&self) -> &str {
        &self.spreadsheet_key
    }

    async fn get<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T, SheetsError> {
        let token = self.tokens.access_token().await?;
        let resp = self.http.get(url).bearer_auth(token).send().await?;
        let resp = check_response(resp).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SheetsError::Parse(e.to_string()))
    }

    /// Title of the spreadsheet's first worksheet.
    async fn first_sheet_title(&self) -> Result<String, SheetsError> {
        let url = format!(
            "{}/v4/spreadsheets/{}?fields=sheets.properties",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_key)
        );
        let meta: SpreadsheetMeta = self.get(&url).await?;
        meta.first_title()
            .map(str::to_string)
            .ok_or_else(|| SheetsError::NoWorksheets {
                spreadsheet_key: self.spreadsheet_key.clone(),
            })
    }
}

#[async_trait]
impl RecordSource for SheetsClient {
    async fn fetch_all(&self) -> Result<Vec<Record>, SheetsError> {
        let title = self.first_sheet_title().await?;
        let url = format!(
            "{}/v4/spreadsheets/{}/values/{}?majorDimension=ROWS&valueRenderOption=FORMATTED_VALUE",
            self.api_base,
            urlencoding::encode(&self.spreadsheet_key),
            urlencoding::encode(&a1_range(&title))
        );
        let range: ValueRange = self.get(&url).await?;
        let records = records_from_values(&range.values);
        tracing::debug!(sheet = %title, records = records.len(), "fetched records");
        Ok(records)
    }
}

fn build_http(timeout_secs: u64) -> Result<reqwest::Client, SheetsError> {
    Ok(reqwest::Client::builder()
        .user_agent(concat!("snackbot/", env!("CARGO_PKG_VERSION")))
        .timeout(Duration::from_secs(timeout_secs))
        .build()?)
}
