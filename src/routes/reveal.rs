use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{game_error, session_not_found};
use crate::{
    auth::AuthenticatedDevice,
    models::{CardResponse, SessionStateResponse, WordResponse},
    services::can_disclose_word,
    state::AppState,
};

/// The card of the player holding the device
///
/// Only available on the reveal screen, so a card is never sent while the
/// device is being passed around.
pub async fn show_card(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let manager = state.session_manager.read().await;
    let session = manager
        .get_session(&session_id)
        .ok_or_else(session_not_found)?;

    let player = session.game.reveal_card().ok_or((
        StatusCode::CONFLICT,
        "No card is being revealed".to_string(),
    ))?;

    Ok(Json(CardResponse::from(player)))
}

/// Current player is done: pass to the next one or start the discussion
pub async fn next_player(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let mut manager = state.session_manager.write().await;
    let session = manager
        .get_session_mut(&session_id)
        .ok_or_else(session_not_found)?;

    session.game.next_player().map_err(game_error)?;

    Ok(Json(SessionStateResponse::from_session(session)))
}

/// Show the common word to the whole table once discussion has begun
pub async fn disclose_word(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let manager = state.session_manager.read().await;
    let session = manager
        .get_session(&session_id)
        .ok_or_else(session_not_found)?;

    let (can_disclose, error_msg) = can_disclose_word(session);
    if !can_disclose {
        return Err((StatusCode::CONFLICT, error_msg));
    }

    Ok(Json(WordResponse {
        word: session.game.common_word().to_string(),
    }))
}
