//! OAuth access tokens for the Sheets API.
//!
//! A service account proves its identity with a short-lived RS256 JWT
//! assertion, which Google's token endpoint exchanges for a bearer token.
//! Bearer tokens last an hour; [`ServiceAccountTokens`] reuses one until it is
//! close to expiry.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use snack_secrets::ServiceAccountKey;
use tokio::sync::Mutex;

use crate::error::SheetsError;
use crate::http::check_response;

/// Read-only access to spreadsheets.
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
/// Tokens this close to expiry are replaced before use.
const EXPIRY_BUFFER_SECS: i64 = 60;

/// Supplies bearer tokens for Sheets API calls.
#[async_trait]
pub trait TokenSource: Send + Sync {
    /// # Errors
    ///
    /// Returns [`SheetsError`] if a token cannot be obtained.
    async fn access_token(&self) -> Result<String, SheetsError>;
}

/// A fixed token, for tests and for tokens minted outside the process.
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

#[async_trait]
impl TokenSource for StaticToken {
    async fn access_token(&self) -> Result<String, SheetsError> {
        Ok(self.0.clone())
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    #[serde(default)]
    expires_in: Option<i64>,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_near_expiry(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now + TimeDelta::seconds(EXPIRY_BUFFER_SECS)
    }
}

/// Mints tokens from a service-account key.
pub struct ServiceAccountTokens {
    http: reqwest::Client,
    client_email: String,
    token_uri: String,
    encoding_key: EncodingKey,
    key_id: Option<String>,
    cache: Mutex<Option<CachedToken>>,
}

impl ServiceAccountTokens {
    /// Prepare a token source.
    ///
    /// `token_uri` overrides the endpoint named in the key when non-empty.
    ///
    /// # Errors
    ///
    /// Returns [`SheetsError::Signing`] if the private key is not a valid
    /// RSA PEM.
    pub fn new(
        http: reqwest::Client,
        key: &ServiceAccountKey,
        token_uri: &str,
    ) -> Result<Self, SheetsError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
        let token_uri = if token_uri.is_empty() {
            key.token_uri.clone()
        } else {
            token_uri.to_string()
        };
        Ok(Self {
            http,
            client_email: key.client_email.clone(),
            token_uri,
            encoding_key,
            key_id: key.private_key_id.clone(),
            cache: Mutex::new(None),
        })
    }

    fn assertion(&self, now: DateTime<Utc>) -> Result<String, SheetsError> {
        let iat = now.timestamp();
        let claims = AssertionClaims {
            iss: &self.client_email,
            scope: SHEETS_READONLY_SCOPE,
            aud: &self.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };
        let mut header = Header::new(Algorithm::RS256);
        header.kid.clone_from(&self.key_id);
        Ok(jsonwebtoken::encode(&header, &claims, &self.encoding_key)?)
    }

    async fn exchange(&self, now: DateTime<Utc>) -> Result<CachedToken, SheetsError> {
        let assertion = self.assertion(now)?;
        let resp = self
            .http
            .post(&self.token_uri)
            .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion.as_str())])
            .send()
            .await?;
        let body: TokenResponse = check_response(resp).await?.json().await?;
        let value = body
            .access_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| SheetsError::Auth("response missing 'access_token'".into()))?;
        let lifetime = body.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS);
        tracing::debug!(lifetime, "minted sheets access token");
        Ok(CachedToken {
            value,
            expires_at: now + TimeDelta::seconds(lifetime),
        })
    }
}

#[async_trait]
impl TokenSource for ServiceAccountTokens {
    async fn access_token(&self) -> Result<String, SheetsError> {
        let mut cache = self.cache.lock().await;
        let now = Utc::now();
        if let Some(token) = cache.as_ref().filter(|token| !token.is_near_expiry(now)) {
            return Ok(token.value.clone());
        }
        let fresh = self.exchange(now).await?;
        let value = fresh.value.clone();
        *cache = Some(fresh);
        Ok(value)
    }
}
