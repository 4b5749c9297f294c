//! JWT access token management (HS256).

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::auth::AuthError;

/// Claims carried by an access token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// User id, stringified per JWT convention.
    pub sub: String,
    pub is_superuser: bool,
    pub iat: i64,
    pub exp: i64,
}

impl JwtClaims {
    pub fn user_id(&self) -> Result<i32, AuthError> {
        self.sub.parse::<i32>().map_err(|_| AuthError::TokenInvalid)
    }
}

/// Issues and validates HS256 access tokens.
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in_minutes: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expires_in_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            expires_in_minutes,
        }
    }

    /// Issues an access token for the given user.
    pub fn issue_token(&self, user_id: i32, is_superuser: bool) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: user_id.to_string(),
            is_superuser,
            iat: now.timestamp(),
            exp: (now + chrono::Duration::minutes(self.expires_in_minutes)).timestamp(),
        };
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Validates a token and returns its claims.
    ///
    /// All decode failures (bad signature, expiry, malformed payload)
    /// collapse into `TokenInvalid`.
    pub fn validate_token(&self, token: &str) -> Result<JwtClaims, AuthError> {
        let validation = Validation::new(Algorithm::HS256);
        decode::<JwtClaims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|_| AuthError::TokenInvalid)
    }

    pub const fn expires_in_seconds(&self) -> i64 {
        self.expires_in_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager() -> JwtManager {
        JwtManager::new("test-secret", 30)
    }

    #[test]
    fn issued_token_round_trips() {
        let jwt = manager();
        let token = jwt.issue_token(42, true).unwrap();
        let claims = jwt.validate_token(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert!(claims.is_superuser);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = JwtManager::new("other-secret", 30)
            .issue_token(1, false)
            .unwrap();
        assert!(matches!(
            manager().validate_token(&token),
            Err(AuthError::TokenInvalid)
        ));
    }

    #[test]
    fn garbage_token_is_rejected() {
        assert!(matches!(
            manager().validate_token("not.a.token"),
            Err(AuthError::TokenInvalid)
        ));
    }
}
