use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::state::AppState;

/// Health check endpoint
///
/// # Returns
///
/// JSON response with status and session counts
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let stats = state.session_manager.read().await.get_stats();

    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "sessions": stats,
        })),
    )
}
