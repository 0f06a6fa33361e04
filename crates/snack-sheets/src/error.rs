//! Data source error types.

use thiserror::Error;

/// Errors that can occur while fetching records.
#[derive(Debug, Error)]
pub enum SheetsError {
    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The Sheets API or token endpoint returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code returned by the API.
        status: u16,
        /// Error message or response body.
        message: String,
    },

    /// The API returned a 429 Too Many Requests response.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after_secs: u64,
    },

    /// The service-account assertion could not be signed.
    #[error("failed to sign token assertion: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    /// The token endpoint answered without a usable access token.
    #[error("token exchange failed: {0}")]
    Auth(String),

    /// The spreadsheet has no worksheets to read.
    #[error("spreadsheet '{spreadsheet_key}' has no worksheets")]
    NoWorksheets { spreadsheet_key: String },

    /// Failed to parse an API response.
    #[error("parse error: {0}")]
    Parse(String),
}
