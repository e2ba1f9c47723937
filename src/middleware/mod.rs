pub mod rate_limiter;
pub mod security_headers;

pub use rate_limiter::{rate_limit_middleware, RateLimiter};
pub use security_headers::security_headers_middleware;
