use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, post},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    middleware::{rate_limit_middleware, security_headers_middleware},
    routes::{health, reveal, session, setup},
    state::AppState,
};

const REQUEST_TIMEOUT_SECONDS: u64 = 10;

/// CORS with credentials for an explicit list of origins
fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE])
}

/// Build the router with every route and middleware layer
pub fn build_router(state: AppState, allowed_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/categories", get(session::list_categories))
        // Session lifecycle
        .route("/api/sessions", post(session::create_session))
        .route("/api/sessions/:session_id", get(session::get_session))
        .route("/api/sessions/:session_id/status", post(session::set_status))
        .route("/api/sessions/:session_id/reset", post(session::reset_session))
        // Setup
        .route(
            "/api/sessions/:session_id/setup",
            get(setup::get_setup).put(setup::update_setup),
        )
        .route(
            "/api/sessions/:session_id/setup/players",
            post(setup::add_player),
        )
        .route(
            "/api/sessions/:session_id/setup/players/:index",
            axum::routing::put(setup::rename_player).delete(setup::remove_player),
        )
        .route("/api/sessions/:session_id/start", post(setup::start_game))
        // Pass and reveal
        .route("/api/sessions/:session_id/card", get(reveal::show_card))
        .route("/api/sessions/:session_id/next", post(reveal::next_player))
        .route("/api/sessions/:session_id/word", get(reveal::disclose_word))
        .with_state(state.clone())
        // Applied in reverse order
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    REQUEST_TIMEOUT_SECONDS,
                )))
                .layer(middleware::from_fn(security_headers_middleware))
                .layer(middleware::from_fn_with_state(
                    state,
                    rate_limit_middleware,
                ))
                .layer(cors_layer(allowed_origins)),
        )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_layer_skips_invalid_origins() {
        // Must not panic on a bad origin
        let _layer = cors_layer(&[
            "http://localhost:8000".to_string(),
            "not a\nheader".to_string(),
        ]);
    }
}
