use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// A failed request. Always rendered as a 500: the only failures are the
/// data source and malformed rows, neither of which the caller can fix.
#[derive(Debug)]
pub struct AppError {
    error: anyhow::Error,
    expose: bool,
}

impl AppError {
    /// `expose` puts the error chain in the body (debug mode).
    pub fn new(error: impl Into<anyhow::Error>, expose: bool) -> Self {
        Self {
            error: error.into(),
            expose,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let detail = format!("{:#}", self.error);
        tracing::error!(error = %detail, "request failed");
        let body = if self.expose {
            format!("error: {detail}")
        } else {
            String::from("Internal Server Error")
        };
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}
