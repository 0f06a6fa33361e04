use axum::extract::State;
use axum::response::Html;

use crate::error::AppError;
use crate::render::html_page;
use crate::state::AppState;

pub async fn index(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let result = super::evaluate(&state).await?;
    let page = html_page(&result, state.item_label).map_err(|e| AppError::new(e, state.debug))?;
    Ok(Html(page))
}
