use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};

use super::token::{verify_device_token, TOKEN_EXPIRY_SECONDS};
use crate::state::AppState;

/// Name of the cookie holding the device token
pub const DEVICE_COOKIE: &str = "device_token";

/// Build the HttpOnly cookie handed out when a session is created
pub fn device_cookie(token: String) -> Cookie<'static> {
    Cookie::build((DEVICE_COOKIE, token))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(TOKEN_EXPIRY_SECONDS as i64))
        .build()
}

/// Device proven to own a session, extracted from the device cookie
#[derive(Debug, Clone)]
pub struct AuthenticatedDevice {
    pub session_id: String,
    pub expiry: u64,
}

#[async_trait]
impl FromRequestParts<AppState> for AuthenticatedDevice {
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);

        let token = jar
            .get(DEVICE_COOKIE)
            .ok_or((StatusCode::UNAUTHORIZED, "Missing device token"))?
            .value();

        let (session_id, expiry) = verify_device_token(token, &state.secret_key)
            .ok_or((StatusCode::UNAUTHORIZED, "Invalid or expired device token"))?;

        Ok(AuthenticatedDevice { session_id, expiry })
    }
}

impl AuthenticatedDevice {
    /// Verify that the token was issued for the requested session
    pub fn verify_matches(&self, expected_session_id: &str) -> Result<(), (StatusCode, String)> {
        if self.session_id != expected_session_id {
            return Err((
                StatusCode::FORBIDDEN,
                "Device token does not match session".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::token::generate_device_token;
    use axum::http::{header, Request};

    fn parts_with_cookie(cookie: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/api/sessions/abc");
        if let Some(cookie) = cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_extracts_valid_token() {
        let state = AppState::new("secret".to_string());
        let token = generate_device_token("abc", "secret").unwrap();
        let mut parts = parts_with_cookie(Some(&format!("{}={}", DEVICE_COOKIE, token)));

        let device = AuthenticatedDevice::from_request_parts(&mut parts, &state)
            .await
            .unwrap();
        assert_eq!(device.session_id, "abc");
    }

    #[tokio::test]
    async fn test_missing_cookie_unauthorized() {
        let state = AppState::new("secret".to_string());
        let mut parts = parts_with_cookie(None);

        let (status, _) = AuthenticatedDevice::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_foreign_secret_unauthorized() {
        let state = AppState::new("secret".to_string());
        let token = generate_device_token("abc", "other").unwrap();
        let mut parts = parts_with_cookie(Some(&format!("{}={}", DEVICE_COOKIE, token)));

        let (status, _) = AuthenticatedDevice::from_request_parts(&mut parts, &state)
            .await
            .unwrap_err();
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_verify_matches() {
        let device = AuthenticatedDevice {
            session_id: "abc".to_string(),
            expiry: 0,
        };

        assert!(device.verify_matches("abc").is_ok());
        let (status, _) = device.verify_matches("xyz").unwrap_err();
        assert_eq!(status, StatusCode::FORBIDDEN);
    }

    #[test]
    fn test_device_cookie_attributes() {
        let cookie = device_cookie("token".to_string());

        assert_eq!(cookie.name(), DEVICE_COOKIE);
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Strict));
        assert_eq!(cookie.path(), Some("/"));
    }
}
