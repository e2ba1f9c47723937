use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::time::{SystemTime, UNIX_EPOCH};

type HmacSha256 = Hmac<Sha256>;

/// Tokens outlive any single game night (24 hours)
pub const TOKEN_EXPIRY_SECONDS: u64 = 86400;

fn now_unix() -> Result<u64, String> {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .map_err(|e| format!("System time error: {}", e))
}

fn sign(payload: &str, secret_key: &str) -> Result<HmacSha256, String> {
    let mut mac = HmacSha256::new_from_slice(secret_key.as_bytes())
        .map_err(|e| format!("HMAC initialization error: {}", e))?;
    mac.update(payload.as_bytes());
    Ok(mac)
}

/// Generate a signed token binding a device to its session
///
/// # Returns
///
/// Token string in format `session_id:expiry.signature`
pub fn generate_device_token(session_id: &str, secret_key: &str) -> Result<String, String> {
    let expiry = now_unix()? + TOKEN_EXPIRY_SECONDS;
    generate_device_token_with_expiry(session_id, expiry, secret_key)
}

fn generate_device_token_with_expiry(
    session_id: &str,
    expiry: u64,
    secret_key: &str,
) -> Result<String, String> {
    let payload = format!("{}:{}", session_id, expiry);
    let signature = sign(&payload, secret_key)?.finalize().into_bytes();

    Ok(format!("{}.{}", payload, URL_SAFE_NO_PAD.encode(signature)))
}

/// Verify a device token
///
/// The signature is checked in constant time.
///
/// # Returns
///
/// `(session_id, expiry)` if the token is authentic and unexpired
pub fn verify_device_token(token: &str, secret_key: &str) -> Option<(String, u64)> {
    let (payload, signature_b64) = token.split_once('.')?;
    let (session_id, expiry_str) = payload.split_once(':')?;

    if session_id.is_empty() || signature_b64.contains('.') {
        return None;
    }

    let expiry: u64 = expiry_str.parse().ok()?;
    if now_unix().ok()? > expiry {
        return None;
    }

    let provided_signature = URL_SAFE_NO_PAD.decode(signature_b64).ok()?;
    sign(payload, secret_key)
        .ok()?
        .verify_slice(&provided_signature)
        .ok()?;

    Some((session_id.to_string(), expiry))
}
