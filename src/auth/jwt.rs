use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::Config;
use crate::error::{AppError, AppResult};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
}

pub fn create_access_token(user_id: Uuid, email: &str, config: &Config) -> AppResult<String> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        email: email.to_string(),
        exp: (now + Duration::seconds(config.jwt_ttl_secs)).timestamp(),
        iat: now.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create access token: {}", e)))
}

pub fn verify_token(token: &str, config: &Config) -> AppResult<TokenData<Claims>> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map_err(|_| AppError::Unauthorized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip_carries_identity() {
        let config = Config::for_tests();
        let user_id = Uuid::new_v4();
        let token = create_access_token(user_id, "test@example.com", &config).unwrap();

        let data = verify_token(&token, &config).unwrap();
        assert_eq!(data.claims.sub, user_id);
        assert_eq!(data.claims.email, "test@example.com");
        assert_eq!(data.claims.exp - data.claims.iat, config.jwt_ttl_secs);
    }

    #[test]
    fn test_token_signed_with_other_secret_rejected() {
        let config = Config::for_tests();
        let mut other = Config::for_tests();
        other.jwt_secret = "another-secret".into();

        let token = create_access_token(Uuid::new_v4(), "a@b.co", &other).unwrap();
        assert!(matches!(verify_token(&token, &config), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_rejected() {
        let mut config = Config::for_tests();
        // beyond jsonwebtoken's default 60s leeway
        config.jwt_ttl_secs = -120;
        let token = create_access_token(Uuid::new_v4(), "a@b.co", &config).unwrap();
        assert!(matches!(verify_token(&token, &config), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_garbage_token_rejected() {
        let config = Config::for_tests();
        assert!(verify_token("not.a.jwt", &config).is_err());
    }
}
