use anyhow::{Context, Result};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use medit_core::config::model::AuthSettings;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Access-token claims. `sub` is the user id.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub login_id: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies HS256 access tokens.
#[derive(Clone)]
pub struct AuthService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_expire_minutes: i64,
}

impl AuthService {
    pub fn new(settings: &AuthSettings) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(settings.secret_key.as_bytes()),
            decoding_key: DecodingKey::from_secret(settings.secret_key.as_bytes()),
            token_expire_minutes: settings.token_expire_minutes as i64,
        }
    }

    pub fn issue_token(&self, user_id: Uuid, login_id: &str) -> Result<(String, DateTime<Utc>)> {
        let now = Utc::now();
        let expires_at = now + Duration::minutes(self.token_expire_minutes);
        let claims = Claims {
            sub: user_id,
            login_id: login_id.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .context("Failed to sign access token")?;

        Ok((token, expires_at))
    }

    /// Decode and validate a token. Expiry is checked by the default
    /// validation; any failure collapses to None for the caller.
    pub fn verify_token(&self, token: &str) -> Option<Claims> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(&AuthSettings {
            secret_key: "test-secret-key-0123456789".to_string(),
            token_expire_minutes: 60,
        })
    }

    #[test]
    fn test_token_round_trip() {
        let service = service();
        let user_id = Uuid::new_v4();
        let (token, expires_at) = service.issue_token(user_id, "kim123").unwrap();

        let claims = service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.login_id, "kim123");
        assert_eq!(claims.exp, expires_at.timestamp());
        assert!(expires_at > Utc::now());
    }

    #[test]
    fn test_garbage_token_rejected() {
        assert!(service().verify_token("not.a.jwt").is_none());
    }

    #[test]
    fn test_token_signed_with_other_key_rejected() {
        let other = AuthService::new(&AuthSettings {
            secret_key: "another-secret-key-xyz".to_string(),
            token_expire_minutes: 60,
        });
        let (token, _) = other.issue_token(Uuid::new_v4(), "kim123").unwrap();
        assert!(service().verify_token(&token).is_none());
    }

    #[test]
    fn test_expired_token_rejected() {
        let service = AuthService::new(&AuthSettings {
            secret_key: "test-secret-key-0123456789".to_string(),
            token_expire_minutes: 0,
        });
        // exp == iat, and the default validation has a 60s leeway; force a
        // clearly stale token instead.
        let now = Utc::now();
        let claims = Claims {
            sub: Uuid::new_v4(),
            login_id: "kim123".to_string(),
            iat: (now - Duration::hours(2)).timestamp(),
            exp: (now - Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret("test-secret-key-0123456789".as_bytes()),
        )
        .unwrap();
        assert!(service.verify_token(&token).is_none());
    }
}
