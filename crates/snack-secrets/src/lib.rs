//! # snack-secrets
//!
//! Service-account credential loading for Snackbot.
//!
//! Credentials reach the process either as a base64 blob in configuration
//! (the usual container deployment) or as a JSON key file on disk. Both are
//! decoded in memory; nothing is written back to the filesystem.

use std::fmt;
use std::path::PathBuf;

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use serde::Deserialize;
use thiserror::Error;

const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

fn default_token_uri() -> String {
    GOOGLE_TOKEN_URI.to_string()
}

/// The parts of a Google service-account key file Snackbot needs.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    /// PEM-encoded RSA private key.
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key", &"<redacted>")
            .field("private_key_id", &self.private_key_id)
            .field("token_uri", &self.token_uri)
            .finish()
    }
}

impl ServiceAccountKey {
    /// Parse a key from its JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SecretError::InvalidKey`] if the JSON is malformed or lacks
    /// `client_email`/`private_key`, and [`SecretError::EmptyField`] if either
    /// is blank.
    pub fn from_json(json: &[u8]) -> Result<Self, SecretError> {
        let key: Self = serde_json::from_slice(json)?;
        if key.client_email.trim().is_empty() {
            return Err(SecretError::EmptyField {
                name: "client_email",
            });
        }
        if key.private_key.trim().is_empty() {
            return Err(SecretError::EmptyField {
                name: "private_key",
            });
        }
        Ok(key)
    }
}

#[derive(Debug, Error)]
pub enum SecretError {
    #[error("no service-account credentials configured")]
    NotConfigured,
    #[error("credential blob is not valid base64: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("credential is not a valid service-account key: {0}")]
    InvalidKey(#[from] serde_json::Error),
    #[error("service-account key field '{name}' is empty")]
    EmptyField { name: &'static str },
    #[error("failed to read key file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Something that can produce a service-account key.
pub trait SecretSource: Send + Sync {
    /// # Errors
    ///
    /// Returns [`SecretError`] when the material is missing or malformed.
    fn load(&self) -> Result<ServiceAccountKey, SecretError>;
}

/// A base64-encoded key file held in configuration.
#[derive(Clone)]
pub struct InlineSecret(String);

impl InlineSecret {
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }
}

impl fmt::Debug for InlineSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("InlineSecret(<redacted>)")
    }
}

impl SecretSource for InlineSecret {
    fn load(&self) -> Result<ServiceAccountKey, SecretError> {
        let encoded: String = self.0.split_whitespace().collect();
        if encoded.is_empty() {
            return Err(SecretError::NotConfigured);
        }
        let decoded = if encoded.ends_with('=') {
            STANDARD.decode(&encoded)?
        } else {
            STANDARD_NO_PAD.decode(&encoded)?
        };
        ServiceAccountKey::from_json(&decoded)
    }
}

/// A JSON key file on disk.
#[derive(Debug, Clone)]
pub struct FileSecret(PathBuf);

impl FileSecret {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }
}

impl SecretSource for FileSecret {
    fn load(&self) -> Result<ServiceAccountKey, SecretError> {
        let bytes = std::fs::read(&self.0).map_err(|source| SecretError::Io {
            path: self.0.clone(),
            source,
        })?;
        ServiceAccountKey::from_json(&bytes)
    }
}

/// Pick a source from the configured values.
///
/// A non-empty inline blob wins over a key file path.
///
/// # Errors
///
/// Returns [`SecretError::NotConfigured`] when neither is set.
pub fn select_source(
    inline: &str,
    file: Option<&std::path::Path>,
) -> Result<Box<dyn SecretSource>, SecretError> {
    if !inline.trim().is_empty() {
        if file.is_some() {
            tracing::debug!("both inline credentials and a key file are set; using inline");
        }
        return Ok(Box::new(InlineSecret::new(inline)));
    }
    match file {
        Some(path) => Ok(Box::new(FileSecret::new(path))),
        None => Err(SecretError::NotConfigured),
    }
}
