// ============================================================================
// Menu Board Core - Authentication Service
// File: crates/menuboard-core/src/services/auth_service.rs
// ============================================================================
//! Single shared admin password, exchanged for a long-lived bearer token

use tracing::{info, warn};

use menuboard_security::{Claims, JwtError, JwtService, PasswordService};

use crate::error::DomainError;

pub struct AuthService {
    admin_password: String,
    jwt_secret: String,
    jwt_service: JwtService,
}

impl AuthService {
    pub fn new(admin_password: String, jwt_secret: String, token_expiry_days: i64) -> Self {
        Self {
            jwt_service: JwtService::new(jwt_secret.clone(), token_expiry_days),
            admin_password,
            jwt_secret,
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.admin_password.is_empty() && !self.jwt_secret.is_empty()
    }

    /// Login with the admin password
    pub fn login(&self, password: &str) -> Result<String, DomainError> {
        if !self.is_configured() {
            warn!("Login refused: admin password or JWT secret missing");
            return Err(DomainError::NotConfigured("auth"));
        }

        if password.is_empty() {
            warn!("Login failed: empty password");
            return Err(DomainError::InvalidCredentials);
        }

        let password_valid = PasswordService::matches_configured(password, &self.admin_password)
            .map_err(|e| {
                warn!("Configured admin password hash is unreadable: {}", e);
                DomainError::InvalidCredentials
            })?;

        if !password_valid {
            warn!("Login failed: invalid password");
            return Err(DomainError::InvalidCredentials);
        }

        let token = self
            .jwt_service
            .generate_admin_token()
            .map_err(|e| DomainError::TokenGenerationError(e.to_string()))?;

        info!("Admin login successful");
        Ok(token)
    }

    /// Check a bearer token issued by [`AuthService::login`].
    pub fn authorize(&self, token: &str) -> Result<Claims, DomainError> {
        if self.jwt_secret.is_empty() {
            return Err(DomainError::NotConfigured("jwt"));
        }
        match self.jwt_service.validate_token(token) {
            Ok(claims) if claims.is_admin() => Ok(claims),
            Ok(_) => Err(DomainError::InvalidToken),
            Err(JwtError::TokenExpired) => {
                warn!("Rejected expired admin token");
                Err(DomainError::InvalidToken)
            }
            Err(e) => {
                warn!("Rejected admin token: {}", e);
                Err(DomainError::InvalidToken)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new("letmein".to_string(), "secret".to_string(), 30)
    }

    #[test]
    fn test_login_issues_verifiable_token() {
        let auth = service();
        let token = auth.login("letmein").unwrap();
        let claims = auth.authorize(&token).unwrap();
        assert_eq!(claims.role, "admin");
    }

    #[test]
    fn test_wrong_or_empty_password() {
        let auth = service();
        assert!(matches!(auth.login("nope"), Err(DomainError::InvalidCredentials)));
        assert!(matches!(auth.login(""), Err(DomainError::InvalidCredentials)));
    }

    #[test]
    fn test_unconfigured_server() {
        let auth = AuthService::new(String::new(), "secret".to_string(), 30);
        assert!(matches!(auth.login("x"), Err(DomainError::NotConfigured(_))));

        let auth = AuthService::new("pw".to_string(), String::new(), 30);
        assert!(matches!(auth.authorize("x"), Err(DomainError::NotConfigured(_))));
    }

    #[test]
    fn test_token_from_other_secret_is_invalid() {
        let other = AuthService::new("letmein".to_string(), "other".to_string(), 30);
        let token = other.login("letmein").unwrap();
        assert!(matches!(service().authorize(&token), Err(DomainError::InvalidToken)));
    }

    #[test]
    fn test_argon2_admin_password() {
        let hash = PasswordService::hash("letmein").unwrap();
        let auth = AuthService::new(hash, "secret".to_string(), 30);
        assert!(auth.login("letmein").is_ok());
    }
}
