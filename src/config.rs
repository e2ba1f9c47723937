use rand::Rng;
use std::time::Duration;

use crate::core::SESSION_TTL_SECONDS;

const DEFAULT_PORT: u16 = 8000;
const DEFAULT_CLEANUP_INTERVAL_SECONDS: u64 = 300;

/// Server settings read from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    /// "development" or "production"
    pub environment: String,
    /// Key for signing device tokens
    pub secret_key: String,
    pub public_url: String,
    pub session_ttl: Duration,
    pub cleanup_interval: Duration,
}

impl ServerConfig {
    /// Load settings from environment variables
    ///
    /// Call `dotenvy::dotenv()` first to pick up a `.env` file.
    ///
    /// | Variable | Default |
    /// |---|---|
    /// | `PORT` | 8000 |
    /// | `ENVIRONMENT` | production |
    /// | `SECRET_KEY` | random, tokens die with the process |
    /// | `PUBLIC_URL` | `http://localhost:{PORT}` |
    /// | `SESSION_TTL_SECONDS` | 3600 |
    /// | `CLEANUP_INTERVAL_SECONDS` | 300 |
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);
        let environment = lookup("ENVIRONMENT").unwrap_or_else(|| "production".to_string());

        let secret_key = lookup("SECRET_KEY")
            .filter(|key| !key.is_empty())
            .unwrap_or_else(|| {
                tracing::warn!("SECRET_KEY not set, generating a random key");
                generate_secret_key()
            });

        let public_url = lookup("PUBLIC_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| format!("http://localhost:{}", port));

        let session_ttl = lookup("SESSION_TTL_SECONDS")
            .and_then(|s| s.parse().ok())
            .unwrap_or(SESSION_TTL_SECONDS);
        let cleanup_interval = lookup("CLEANUP_INTERVAL_SECONDS")
            .and_then(|s| s.parse().ok())
            .filter(|&secs: &u64| secs > 0)
            .unwrap_or(DEFAULT_CLEANUP_INTERVAL_SECONDS);

        Self {
            port,
            environment,
            secret_key,
            public_url,
            session_ttl: Duration::from_secs(session_ttl),
            cleanup_interval: Duration::from_secs(cleanup_interval),
        }
    }

    pub fn is_development(&self) -> bool {
        matches!(self.environment.as_str(), "development" | "dev")
    }

    /// Default tracing filter when `RUST_LOG` is unset
    pub fn log_filter(&self) -> &'static str {
        if self.is_development() {
            "impostor=debug,tower_http=info"
        } else {
            "impostor=info,tower_http=warn"
        }
    }

    /// Origins allowed to call the API with credentials
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins = vec![
            self.public_url.clone(),
            format!("http://localhost:{}", self.port),
            format!("http://127.0.0.1:{}", self.port),
        ];
        origins.dedup();
        origins
    }

    pub fn bind_address(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }
}

/// 64 random alphanumeric characters
pub fn generate_secret_key() -> String {
    rand::thread_rng()
        .sample_iter(rand::distributions::Alphanumeric)
        .take(64)
        .map(char::from)
        .collect()
}
