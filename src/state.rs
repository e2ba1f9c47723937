use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::{SessionManager, StaticWordProvider, WordProvider};
use crate::middleware::rate_limiter::RateLimiter;

/// Shared application state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub session_manager: Arc<RwLock<SessionManager>>,
    pub secret_key: String,
    pub word_provider: Arc<dyn WordProvider>,
    pub rate_limiter: RateLimiter,
}

impl AppState {
    /// State with no sessions and the built-in word lists
    pub fn new(secret_key: String) -> Self {
        Self::with_word_provider(secret_key, Arc::new(StaticWordProvider))
    }

    pub fn with_word_provider(secret_key: String, word_provider: Arc<dyn WordProvider>) -> Self {
        Self {
            session_manager: Arc::new(RwLock::new(SessionManager::new())),
            secret_key,
            word_provider,
            rate_limiter: RateLimiter::new(),
        }
    }
}
