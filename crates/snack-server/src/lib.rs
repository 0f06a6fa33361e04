//! # snack-server
//!
//! HTTP front end for Snackbot.
//!
//! Routes:
//! - `GET /` renders the acceptable items as an HTML page
//! - `GET /api/v1/acceptable-now` returns them as JSON
//! - `GET /healthz` answers without touching the data source
//!
//! Every request re-fetches the sheet; nothing is cached between requests.

pub mod bootstrap;
pub mod error;
pub mod render;
mod routes;
pub mod state;

pub use error::AppError;
pub use routes::build_router;
pub use state::AppState;

use axum::Router;
use tower_http::trace::TraceLayer;

/// The full application: routes plus request tracing.
pub fn app(state: AppState) -> Router {
    build_router(state).layer(TraceLayer::new_for_http())
}
