use axum::{
    extract::{ConnectInfo, Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::{
    collections::HashMap,
    net::{IpAddr, Ipv4Addr, SocketAddr},
    sync::Arc,
    time::{Duration, Instant},
};
use tokio::sync::Mutex;

use crate::state::AppState;

/// Entries untouched for this long are forgotten on the next sweep
const IDLE_ENTRY_SECONDS: u64 = 60;

/// Sliding-window request counter per client IP
#[derive(Clone, Debug)]
pub struct RateLimiter {
    /// Map of IP -> list of request timestamps
    requests: Arc<Mutex<HashMap<IpAddr, Vec<Instant>>>>,
    last_cleanup: Arc<Mutex<Instant>>,
    cleanup_interval: Duration,
}

impl RateLimiter {
    pub fn new() -> Self {
        Self {
            requests: Arc::new(Mutex::new(HashMap::new())),
            last_cleanup: Arc::new(Mutex::new(Instant::now())),
            cleanup_interval: Duration::from_secs(60),
        }
    }

    /// Record a request if `ip` is still under `limit` within `window`
    ///
    /// # Returns
    ///
    /// True if the request is allowed
    pub async fn is_allowed(&self, ip: IpAddr, limit: usize, window: Duration) -> bool {
        let now = Instant::now();

        let mut requests = self.requests.lock().await;
        let timestamps = requests.entry(ip).or_default();

        timestamps.retain(|&ts| now.duration_since(ts) < window);

        if timestamps.len() >= limit {
            return false;
        }

        timestamps.push(now);
        true
    }

    /// Forget IPs with no recent requests, at most once per cleanup interval
    pub async fn cleanup_old_entries(&self) {
        let now = Instant::now();

        let mut last_cleanup = self.last_cleanup.lock().await;
        if now.duration_since(*last_cleanup) < self.cleanup_interval {
            return;
        }

        let idle = Duration::from_secs(IDLE_ENTRY_SECONDS);
        let mut requests = self.requests.lock().await;
        requests.retain(|_, timestamps| {
            timestamps
                .iter()
                .any(|&ts| now.duration_since(ts) < idle)
        });

        *last_cleanup = now;
    }

    #[cfg(test)]
    async fn tracked_ips(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

/// Requests per second allowed for a path, or None to skip limiting
fn get_rate_limit(path: &str) -> Option<usize> {
    if path == "/health" {
        return Some(10);
    }

    // Session creation is the only call that allocates server state
    if path == "/api/sessions" {
        return Some(5);
    }

    // A single device taps through pass/reveal quickly
    if path.starts_with("/api") {
        return Some(30);
    }

    Some(20)
}

/// Axum middleware to enforce rate limits per client IP
pub async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Response {
    let ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip())
        .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED));

    let Some(limit) = get_rate_limit(req.uri().path()) else {
        return next.run(req).await;
    };

    if !state
        .rate_limiter
        .is_allowed(ip, limit, Duration::from_secs(1))
        .await
    {
        tracing::warn!("Rate limit exceeded for {} on {}", ip, req.uri().path());
        return (
            StatusCode::TOO_MANY_REQUESTS,
            Json(json!({
                "detail": "Rate limit exceeded. Please try again later."
            })),
        )
            .into_response();
    }

    state.rate_limiter.cleanup_old_entries().await;

    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_rate_limit_health() {
        assert_eq!(get_rate_limit("/health"), Some(10));
    }

    #[test]
    fn test_get_rate_limit_session_create() {
        assert_eq!(get_rate_limit("/api/sessions"), Some(5));
    }

    #[test]
    fn test_get_rate_limit_session_actions() {
        assert_eq!(get_rate_limit("/api/sessions/abc123/next"), Some(30));
        assert_eq!(get_rate_limit("/api/categories"), Some(30));
    }

    #[test]
    fn test_get_rate_limit_default() {
        assert_eq!(get_rate_limit("/some/other/path"), Some(20));
    }

    #[tokio::test]
    async fn test_rate_limiter_allows_under_limit() {
        let limiter = RateLimiter::new();
        let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1));

        for _ in 0..5 {
            assert!(limiter.is_allowed(ip, 5, Duration::from_secs(1)).await);
        }
    }

    #[tokio::test]
    async fn test_rate_limiter_blocks_over_limit() {
        let limiter = RateLimiter::new();
        let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2));

        for _ in 0..3 {
            assert!(limiter.is_allowed(ip, 3, Duration::from_secs(1)).await);
        }
        assert!(!limiter.is_allowed(ip, 3, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_rate_limiter_tracks_ips_separately() {
        let limiter = RateLimiter::new();
        let first = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 3));
        let second = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 4));

        assert!(limiter.is_allowed(first, 1, Duration::from_secs(1)).await);
        assert!(!limiter.is_allowed(first, 1, Duration::from_secs(1)).await);
        assert!(limiter.is_allowed(second, 1, Duration::from_secs(1)).await);
    }

    #[tokio::test]
    async fn test_rate_limiter_window_expires() {
        let limiter = RateLimiter::new();
        let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 5));
        let window = Duration::from_millis(50);

        assert!(limiter.is_allowed(ip, 1, window).await);
        assert!(!limiter.is_allowed(ip, 1, window).await);

        tokio::time::sleep(Duration::from_millis(80)).await;
        assert!(limiter.is_allowed(ip, 1, window).await);
    }

    #[tokio::test]
    async fn test_cleanup_skipped_before_interval() {
        let limiter = RateLimiter::new();
        let ip = IpAddr::V4(Ipv4Addr::new(10, 0, 0, 6));

        limiter.is_allowed(ip, 5, Duration::from_secs(1)).await;
        limiter.cleanup_old_entries().await;

        assert_eq!(limiter.tracked_ips().await, 1);
    }
}
