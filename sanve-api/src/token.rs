use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Token thiếu")]
    MissingToken,
    #[error("Token không hợp lệ")]
    InvalidToken,
    #[error("Token đã hết hạn")]
    TokenExpired,
    #[error("Sai tên đăng nhập hoặc mật khẩu")]
    InvalidCredentials,
    #[error("Mật khẩu hiện tại không đúng")]
    CurrentPasswordMismatch,
}

/// Identity claim carried by every admin token. No revocation list: a token
/// stays valid for its full lifetime even after a credential change renames
/// the username it carries.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AdminClaims {
    pub username: String,
    pub exp: i64,
}

pub fn issue(secret: &str, username: &str, ttl_hours: i64) -> Result<String, jsonwebtoken::errors::Error> {
    let claims = AdminClaims {
        username: username.to_owned(),
        exp: (Utc::now() + Duration::hours(ttl_hours)).timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
}

/// Verifies the `Authorization: <scheme> <token>` header value.
pub fn verify(secret: &str, authorization: Option<&str>) -> Result<AdminClaims, AuthError> {
    let header = authorization.ok_or(AuthError::MissingToken)?;

    let mut parts = header.split_whitespace();
    let _scheme = parts.next().ok_or(AuthError::InvalidToken)?;
    let token = parts.next().ok_or(AuthError::InvalidToken)?;

    let mut validation = Validation::default();
    validation.leeway = 0;

    let data = decode::<AdminClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AuthError::TokenExpired,
        _ => AuthError::InvalidToken,
    })?;

    // Belt-and-braces expiry comparison against the wall clock, on top of
    // the library's own check.
    if data.claims.exp < Utc::now().timestamp() {
        return Err(AuthError::TokenExpired);
    }

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn issued_token_verifies_immediately() {
        let token = issue(SECRET, "admin", 24).expect("issue");
        let claims = verify(SECRET, Some(&format!("Bearer {token}"))).expect("verify");
        assert_eq!(claims.username, "admin");
    }

    #[test]
    fn scheme_prefix_is_required_but_not_inspected() {
        let token = issue(SECRET, "admin", 24).expect("issue");
        assert!(verify(SECRET, Some(&format!("Token {token}"))).is_ok());
        assert_eq!(
            verify(SECRET, Some(&token)).unwrap_err(),
            AuthError::InvalidToken
        );
    }

    #[test]
    fn missing_header_is_classified() {
        assert_eq!(verify(SECRET, None).unwrap_err(), AuthError::MissingToken);
    }

    #[test]
    fn expired_token_is_rejected() {
        let token = issue(SECRET, "admin", -1).expect("issue");
        assert_eq!(
            verify(SECRET, Some(&format!("Bearer {token}"))).unwrap_err(),
            AuthError::TokenExpired
        );
    }

    #[test]
    fn malformed_or_foreign_tokens_are_rejected() {
        assert_eq!(
            verify(SECRET, Some("Bearer not-a-jwt")).unwrap_err(),
            AuthError::InvalidToken
        );

        let foreign = issue("other-secret", "admin", 24).expect("issue");
        assert_eq!(
            verify(SECRET, Some(&format!("Bearer {foreign}"))).unwrap_err(),
            AuthError::InvalidToken
        );
    }
}
