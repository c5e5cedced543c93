//! Client-side view of an issued admin token
//!
//! The admin client cannot verify the signature; it only reads `exp` to
//! decide whether a stored session is still worth sending.

use chrono::Utc;
use jsonwebtoken::dangerous::insecure_decode;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Payload {
    exp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionToken {
    raw: String,
    expires_at: Option<i64>,
}

impl SessionToken {
    pub fn parse(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            expires_at: read_expiry(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Unix seconds, if the payload carries one
    pub fn expires_at(&self) -> Option<i64> {
        self.expires_at
    }

    /// Unreadable tokens count as expired.
    pub fn is_expired_at(&self, now_secs: i64) -> bool {
        match self.expires_at {
            Some(exp) => exp <= now_secs,
            None => true,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp())
    }
}

fn read_expiry(raw: &str) -> Option<i64> {
    insecure_decode::<Payload>(raw).ok()?.claims.exp
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jwt::JwtService;

    #[test]
    fn test_reads_expiry_of_issued_token() {
        let token = JwtService::new("s".to_string(), 30).generate_admin_token().unwrap();
        let session = SessionToken::parse(&token);
        let exp = session.expires_at().unwrap();
        assert!(!session.is_expired());
        assert!(session.is_expired_at(exp));
        assert!(!session.is_expired_at(exp - 1));
    }

    #[test]
    fn test_garbage_counts_as_expired() {
        let session = SessionToken::parse("abc");
        assert_eq!(session.expires_at(), None);
        assert!(session.is_expired());
        assert_eq!(session.as_str(), "abc");
    }
}
