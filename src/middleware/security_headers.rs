use axum::{
    extract::Request,
    http::{header, HeaderValue},
    middleware::Next,
    response::Response,
};

/// Middleware to add security headers to all responses
///
/// Responses carry secret cards, so besides the usual hardening headers
/// nothing may be cached by the browser or an intermediary.
///
/// # Security Headers
///
/// - **Content-Security-Policy**: JSON only, nothing to load or frame
/// - **Cache-Control**: `no-store`
/// - **X-Frame-Options**: Prevent clickjacking
/// - **X-Content-Type-Options**: Prevent MIME type sniffing
/// - **Strict-Transport-Security**: Force HTTPS
/// - **Referrer-Policy**: Send no referrer
/// - **Permissions-Policy**: Disable unnecessary browser features
pub async fn security_headers_middleware(req: Request, next: Next) -> Response {
    let mut response = next.run(req).await;

    let headers = response.headers_mut();

    headers.insert(
        header::CONTENT_SECURITY_POLICY,
        HeaderValue::from_static("default-src 'none'; frame-ancestors 'none'"),
    );

    headers.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));

    headers.insert(header::X_FRAME_OPTIONS, HeaderValue::from_static("DENY"));

    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        HeaderValue::from_static("nosniff"),
    );

    headers.insert(
        header::STRICT_TRANSPORT_SECURITY,
        HeaderValue::from_static("max-age=31536000; includeSubDomains"),
    );

    headers.insert(header::REFERRER_POLICY, HeaderValue::from_static("no-referrer"));

    headers.insert(
        header::HeaderName::from_static("permissions-policy"),
        HeaderValue::from_static("geolocation=(), microphone=(), camera=(), payment=()"),
    );

    response
}
