//! Authentication primitives: JWT issuance/validation and password
//! hashing.

pub mod jwt;
pub mod password;

pub use jwt::{JwtClaims, JwtManager};
pub use password::{hash_password, verify_password};

/// Extracts the token from a `Bearer <token>` authorization header.
pub fn extract_bearer_token(header: &str) -> Option<&str> {
    let token = header.strip_prefix("Bearer ")?.trim();
    if token.is_empty() { None } else { Some(token) }
}

#[cfg(test)]
mod tests {
    use super::extract_bearer_token;

    #[test]
    fn extracts_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
        assert_eq!(extract_bearer_token(""), None);
    }
}
