use axum::Router;
use axum::routing::get;
use snack_core::{Acceptability, acceptable_now, now_in_reference_zone};

use crate::error::AppError;
use crate::state::AppState;

mod acceptable;
mod index;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index::index))
        .route("/api/v1/acceptable-now", get(acceptable::acceptable_now))
        .route("/healthz", get(healthz))
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}

/// Fetch every record fresh and filter it against the state's clock.
pub(crate) async fn evaluate(state: &AppState) -> Result<Acceptability, AppError> {
    let now = now_in_reference_zone(state.clock.now());
    let records = state
        .source
        .fetch_all()
        .await
        .map_err(|e| AppError::new(e, state.debug))?;
    let result = acceptable_now(&records, now).map_err(|e| AppError::new(e, state.debug))?;
    tracing::debug!(
        time = ?result.time_bucket,
        records = records.len(),
        matches = result.matches.len(),
        "evaluated acceptable items"
    );
    Ok(result)
}
