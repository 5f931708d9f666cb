//! Session tokens
//!
//! A session is a signed HS256 JWT carrying enough of the user to authorize
//! requests without a database round-trip.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use linkhub_core::{Role, User, UserId};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Session token claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionClaims {
    /// Subject (user ID)
    pub sub: String,
    pub username: String,
    pub role: Role,
    pub is_active: bool,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

impl SessionClaims {
    /// Get the user ID
    ///
    /// # Errors
    /// Returns an error if the subject is not a valid id
    pub fn user_id(&self) -> Result<UserId, AppError> {
        self.sub.parse().map_err(|_| AppError::InvalidToken)
    }

    #[must_use]
    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp() > self.exp
    }
}

/// Issued session token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionToken {
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

/// JWT service for issuing and validating session tokens
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_seconds: i64,
}

impl JwtService {
    #[must_use]
    pub fn new(secret: &str, ttl_seconds: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_seconds,
        }
    }

    #[must_use]
    pub fn ttl_seconds(&self) -> i64 {
        self.ttl_seconds
    }

    /// Issue a session token for a user
    ///
    /// # Errors
    /// Returns an error if token encoding fails
    pub fn issue_session(&self, user: &User) -> Result<SessionToken, AppError> {
        let now = Utc::now();
        let claims = SessionClaims {
            sub: user.id.to_string(),
            username: user.username.clone(),
            role: user.role,
            is_active: user.is_active,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(self.ttl_seconds)).timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AppError::Internal(anyhow::anyhow!("Failed to encode session token")))?;

        Ok(SessionToken {
            token,
            expires_in: self.ttl_seconds,
        })
    }

    /// Decode and validate a session token
    ///
    /// # Errors
    /// Returns an error if the token is invalid or expired
    pub fn validate_session(&self, token: &str) -> Result<SessionClaims, AppError> {
        let validation = Validation::default();

        let token_data =
            decode::<SessionClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AppError::TokenExpired,
                    _ => AppError::InvalidToken,
                }
            })?;

        Ok(token_data.claims)
    }
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("ttl_seconds", &self.ttl_seconds)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_service() -> JwtService {
        JwtService::new("test-secret-key-that-is-long-enough", 3600)
    }

    fn test_user() -> User {
        User::new(
            UserId::new(),
            "demo@example.com".to_string(),
            "Demo".to_string(),
            "demo".to_string(),
        )
    }

    #[test]
    fn test_issue_and_validate() {
        let service = create_test_service();
        let user = test_user();

        let session = service.issue_session(&user).unwrap();
        assert!(!session.token.is_empty());
        assert_eq!(session.expires_in, 3600);

        let claims = service.validate_session(&session.token).unwrap();
        assert_eq!(claims.user_id().unwrap(), user.id);
        assert_eq!(claims.username, "demo");
        assert_eq!(claims.role, Role::User);
        assert!(claims.is_active);
        assert!(!claims.is_expired());
    }

    #[test]
    fn test_expired_token() {
        let service = JwtService::new("test-secret-key-that-is-long-enough", -3600);
        let session = service.issue_session(&test_user()).unwrap();

        let result = service.validate_session(&session.token);
        assert!(matches!(result, Err(AppError::TokenExpired)));
    }

    #[test]
    fn test_wrong_secret() {
        let session = create_test_service().issue_session(&test_user()).unwrap();
        let other = JwtService::new("another-secret-key-entirely", 3600);

        assert!(matches!(
            other.validate_session(&session.token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn test_invalid_token() {
        let service = create_test_service();
        let result = service.validate_session("invalid.token.here");
        assert!(matches!(result, Err(AppError::InvalidToken)));
    }

    #[test]
    fn test_claims_serialize_camel_case() {
        let claims = SessionClaims {
            sub: UserId::new().to_string(),
            username: "demo".to_string(),
            role: Role::Admin,
            is_active: true,
            iat: 0,
            exp: i64::MAX,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["isActive"], true);
        assert_eq!(json["role"], "admin");
    }

    #[test]
    fn test_debug_hides_keys() {
        let debug = format!("{:?}", create_test_service());
        assert!(debug.contains("ttl_seconds"));
        assert!(!debug.contains("test-secret"));
    }
}
