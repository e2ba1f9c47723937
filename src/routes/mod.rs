pub mod health;
pub mod reveal;
pub mod session;
pub mod setup;

use axum::http::StatusCode;

use crate::core::GameError;

/// Map a refused action to an HTTP error
///
/// Actions refused because of where the game is get 409, bad input gets 400.
pub(crate) fn game_error(error: GameError) -> (StatusCode, String) {
    let status = if error.is_conflict() {
        StatusCode::CONFLICT
    } else {
        StatusCode::BAD_REQUEST
    };
    tracing::debug!("Action refused: {}", error);
    (status, error.to_string())
}

pub(crate) fn session_not_found() -> (StatusCode, String) {
    (StatusCode::NOT_FOUND, "Session not found".to_string())
}
