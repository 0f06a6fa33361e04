use axum::Json;
use axum::extract::State;
use serde_json::Value;

use crate::error::AppError;
use crate::render::api_body;
use crate::state::AppState;

pub async fn acceptable_now(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    let result = super::evaluate(&state).await?;
    let body = api_body(&result, state.item_label).map_err(|e| AppError::new(e, state.debug))?;
    Ok(Json(body))
}
