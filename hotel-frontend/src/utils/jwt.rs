use anyhow::Result;
use base64::{Engine as _, engine::general_purpose};
use chrono::Utc;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    #[serde(default)]
    pub email: Option<String>,
    pub exp: i64,
}

impl JwtClaims {
    pub fn is_expired(&self) -> bool {
        self.exp <= Utc::now().timestamp()
    }
}

/// Decode JWT claims without signature validation.
///
/// The token comes straight from the hotel backend's login endpoint and is
/// only inspected for the user id and expiry. This is a UX convenience, not
/// an authorization check; the backend validates the signature on every
/// request the token is attached to.
pub fn decode_claims(token: &str) -> Result<JwtClaims> {
    let parts: Vec<&str> = token.split('.').collect();

    if parts.len() != 3 {
        return Err(anyhow::anyhow!("Invalid JWT format"));
    }

    let payload = general_purpose::URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|e| anyhow::anyhow!("Failed to decode JWT payload: {}", e))?;

    let claims: JwtClaims = serde_json::from_slice(&payload)
        .map_err(|e| anyhow::anyhow!("Failed to parse JWT claims: {}", e))?;

    Ok(claims)
}

/// Presence-plus-expiry check on a stored credential.
pub fn token_is_current(token: &str) -> bool {
    match decode_claims(token) {
        Ok(claims) => !claims.is_expired(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        let body = general_purpose::URL_SAFE_NO_PAD.encode(payload);
        format!("header.{}.signature", body)
    }

    #[test]
    fn decodes_claims_from_payload() {
        let token = token_with_payload(
            r#"{"sub":"user_123","email":"guest@example.com","exp":9999999999}"#,
        );
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims.sub, "user_123");
        assert_eq!(claims.email.as_deref(), Some("guest@example.com"));
        assert!(!claims.is_expired());
    }

    #[test]
    fn expired_token_is_not_current() {
        let token = token_with_payload(r#"{"sub":"user_123","exp":1000}"#);
        assert!(!token_is_current(&token));
    }

    #[test]
    fn garbage_token_is_not_current() {
        assert!(!token_is_current("not-a-jwt"));
        assert!(!token_is_current("a.b"));
        assert!(!token_is_current("a.!!!.c"));
    }

    #[test]
    fn valid_token_is_current() {
        let token = token_with_payload(r#"{"sub":"user_123","exp":9999999999}"#);
        assert!(token_is_current(&token));
    }
}
