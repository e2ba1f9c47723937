use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use axum_extra::extract::cookie::CookieJar;

use super::{game_error, session_not_found};
use crate::{
    auth::{device_cookie, generate_device_token, AuthenticatedDevice},
    core::{Category, GameStatus},
    models::{CreateSessionResponse, SessionStateResponse, SetStatusRequest},
    services::change_status,
    state::AppState,
};

/// Create a session for this device
///
/// # Returns
///
/// JSON with the new session id, plus the device token cookie
pub async fn create_session(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    let session_id = state.session_manager.write().await.create_session();

    let token = generate_device_token(&session_id, &state.secret_key)
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, e))?;

    let response = CreateSessionResponse {
        session_id,
        status: GameStatus::Menu,
    };

    Ok((
        StatusCode::CREATED,
        jar.add(device_cookie(token)),
        Json(response),
    ))
}

/// Public state of the session: status, seats, whose turn it is
pub async fn get_session(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let manager = state.session_manager.read().await;
    let session = manager
        .get_session(&session_id)
        .ok_or_else(session_not_found)?;

    Ok(Json(SessionStateResponse::from_session(session)))
}

/// Move to another status by hand (menu, setup, reveal)
pub async fn set_status(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
    Json(request): Json<SetStatusRequest>,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let mut manager = state.session_manager.write().await;
    let session = manager
        .get_session_mut(&session_id)
        .ok_or_else(session_not_found)?;

    change_status(session, request.status).map_err(game_error)?;

    tracing::debug!("Session {} now {}", session_id, session.game.status());
    Ok(Json(SessionStateResponse::from_session(session)))
}

/// Abandon the current game and return to the menu
pub async fn reset_session(
    Path(session_id): Path<String>,
    State(state): State<AppState>,
    auth: AuthenticatedDevice,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth.verify_matches(&session_id)?;

    let mut manager = state.session_manager.write().await;
    let session = manager
        .get_session_mut(&session_id)
        .ok_or_else(session_not_found)?;

    session.game.reset_game();
    tracing::info!("Session {} reset", session_id);

    Ok(Json(SessionStateResponse::from_session(session)))
}

/// Word categories offered during setup
pub async fn list_categories() -> impl IntoResponse {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();

    Json(serde_json::json!({
        "categories": categories,
        "default": Category::default().as_str(),
    }))
}
