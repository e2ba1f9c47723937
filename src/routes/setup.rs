use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};

use super::{game_error, session_not_found};
use crate::{
    auth::AuthenticatedDevice,
    core::HostedSession,
    models::{RenamePlayerRequest, SessionStateResponse, SetupResponse, UpdateSetupRequest},
    services::{can_edit_setup, can_start_game, start_from_setup},
    state::AppState,
};

fn ensure_editable(session: &HostedSession) -> Result<(), (StatusCode, String)> {
    let (can_edit, error_msg) = can_edit_setup(session);
    if !can_edit {
        return Err((StatusCode::CONFLICT, error_msg));
    }
    Ok(())
}

/// Current setup draft
pub async fn get_setup(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let manager = state.session_manager.read().await;
    let session = manager
        .get_session(&session_id)
        .ok_or_else(session_not_found)?;

    Ok(Json(SetupResponse::from(&session.setup)))
}

/// Replace the roster, impostor count and category in one go
pub async fn update_setup(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
    Json(request): Json<UpdateSetupRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let request = request
        .validate()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;

    let mut manager = state.session_manager.write().await;
    let session = manager
        .get_session_mut(&session_id)
        .ok_or_else(session_not_found)?;
    ensure_editable(session)?;

    session
        .setup
        .replace(
            &request.player_names,
            request.impostor_count,
            request.category,
        )
        .map_err(game_error)?;

    Ok(Json(SetupResponse::from(&session.setup)))
}

/// Add a seat named after its position
pub async fn add_player(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let mut manager = state.session_manager.write().await;
    let session = manager
        .get_session_mut(&session_id)
        .ok_or_else(session_not_found)?;
    ensure_editable(session)?;

    session.setup.add_player().map_err(game_error)?;

    Ok((
        StatusCode::CREATED,
        Json(SetupResponse::from(&session.setup)),
    ))
}

/// Remove a seat, refusing to go below the minimum table size
pub async fn remove_player(
    Path((session_id, index)): Path<(String, usize)>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let mut manager = state.session_manager.write().await;
    let session = manager
        .get_session_mut(&session_id)
        .ok_or_else(session_not_found)?;
    ensure_editable(session)?;

    session.setup.remove_player(index).map_err(game_error)?;

    Ok(Json(SetupResponse::from(&session.setup)))
}

/// Rename one seat
pub async fn rename_player(
    Path((session_id, index)): Path<(String, usize)>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
    Json(request): Json<RenamePlayerRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let mut manager = state.session_manager.write().await;
    let session = manager
        .get_session_mut(&session_id)
        .ok_or_else(session_not_found)?;
    ensure_editable(session)?;

    session
        .setup
        .rename_player(index, &request.name)
        .map_err(game_error)?;

    Ok(Json(SetupResponse::from(&session.setup)))
}

/// Deal roles from the draft and hand the device to the first player
pub async fn start_game(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let mut manager = state.session_manager.write().await;
    let session = manager
        .get_session_mut(&session_id)
        .ok_or_else(session_not_found)?;

    let (can_start, error_msg) = can_start_game(session);
    if !can_start {
        return Err((StatusCode::CONFLICT, error_msg));
    }

    start_from_setup(session, state.word_provider.as_ref()).map_err(game_error)?;

    Ok(Json(SessionStateResponse::from_session(session)))
}
