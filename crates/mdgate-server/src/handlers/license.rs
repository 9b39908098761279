//! License endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::http::header;
use axum::response::IntoResponse;

use crate::error::ServerError;
use crate::state::AppState;

/// Handle GET /LICENSE: the configured file's literal contents.
pub(crate) async fn get_license(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, ServerError> {
    let contents = std::fs::read_to_string(&state.license_path)?;
    Ok((
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        contents,
    ))
}
