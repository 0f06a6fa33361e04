//! Status handling shared by the token endpoint and the Sheets API.
//!
//! Google reports failures in one of two JSON shapes. The Sheets API wraps
//! them as `{"error": {"code", "message", "status"}}`, while the OAuth token
//! endpoint answers `{"error": "invalid_grant", "error_description": ...}`.
//! Either way [`SheetsError::Api`] carries the human-readable part.

use serde::Deserialize;

use crate::error::SheetsError;

/// Seconds to wait when a 429 carries no usable `Retry-After`.
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Api {
        error: ApiStatus,
    },
    OAuth {
        error: String,
        #[serde(default)]
        error_description: Option<String>,
    },
}

#[derive(Debug, Deserialize)]
struct ApiStatus {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Pass successful responses through and turn the rest into errors.
///
/// 429 becomes [`SheetsError::RateLimited`]. Any other failure becomes
/// [`SheetsError::Api`] with the message from Google's error body, or the raw
/// body when it is not one of the known shapes.
pub async fn check_response(resp: reqwest::Response) -> Result<reqwest::Response, SheetsError> {
    let status = resp.status();
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SheetsError::RateLimited {
            retry_after_secs: retry_after(&resp),
        });
    }
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        return Err(SheetsError::Api {
            status: status.as_u16(),
            message: error_message(&body),
        });
    }
    Ok(resp)
}

fn retry_after(resp: &reqwest::Response) -> u64 {
    resp.headers()
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
        .unwrap_or(DEFAULT_RETRY_AFTER_SECS)
}

fn error_message(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody::Api { error }) => match error.status {
            Some(status) if !error.message.is_empty() => format!("{status}: {}", error.message),
            Some(status) => status,
            None => error.message,
        },
        Ok(ErrorBody::OAuth {
            error,
            error_description: Some(description),
        }) => format!("{error}: {description}"),
        Ok(ErrorBody::OAuth { error, .. }) => error,
        Err(_) => body.trim().to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mock_response(status: u16, body: &'static str) -> reqwest::Response {
        reqwest::Response::from(
            ::http::Response::builder()
                .status(status)
                .body(body)
                .unwrap(),
        )
    }

    #[tokio::test]
    async fn rate_limited_reads_retry_after() {
        let resp = reqwest::Response::from(
            ::http::Response::builder()
                .status(429)
                .header("Retry-After", "30")
                .body("")
                .unwrap(),
        );
        let err = check_response(resp).await.unwrap_err();
        assert!(matches!(
            err,
            SheetsError::RateLimited {
                retry_after_secs: 30
            }
        ));
    }

    #[tokio::test]
    async fn rate_limited_defaults_to_a_minute() {
        let err = check_response(mock_response(429, "")).await.unwrap_err();
        assert!(matches!(
            err,
            SheetsError::RateLimited {
                retry_after_secs: 60
            }
        ));
    }

    #[tokio::test]
    async fn not_found_uses_api_error_message() {
        let resp = mock_response(
            404,
            r#"{"error":{"code":404,"message":"Requested entity was not found.","status":"NOT_FOUND"}}"#,
        );
        let err = check_response(resp).await.unwrap_err();
        match err {
            SheetsError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "NOT_FOUND: Requested entity was not found.");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn oauth_errors_keep_code_and_description() {
        assert_eq!(
            error_message(r#"{"error":"invalid_grant","error_description":"Invalid JWT Signature."}"#),
            "invalid_grant: Invalid JWT Signature."
        );
        assert_eq!(error_message(r#"{"error":"invalid_client"}"#), "invalid_client");
    }

    #[test]
    fn unknown_bodies_are_kept_verbatim() {
        assert_eq!(error_message("  upstream connect error\n"), "upstream connect error");
        assert_eq!(error_message(r#"{"unexpected":true}"#), r#"{"unexpected":true}"#);
    }

    #[tokio::test]
    async fn success_passes_through() {
        assert!(check_response(mock_response(200, "{}")).await.is_ok());
    }
}
