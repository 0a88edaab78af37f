use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::{ExposeSecret, SecretString};

use crate::{
    auth::claims::Claims,
    errors::{AppError, AppResult},
};

/// Verifies HS256 access tokens signed with the identity provider's secret.
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiration_hours: i64,
}

impl JwtService {
    pub fn new(secret: &SecretString, expiration_hours: i64) -> Self {
        let secret_bytes = secret.expose_secret().as_bytes();

        let mut validation = Validation::new(Algorithm::HS256);
        // Provider tokens carry an audience we do not pin.
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret_bytes),
            decoding_key: DecodingKey::from_secret(secret_bytes),
            validation,
            expiration_hours,
        }
    }

    /// Issues a token the way the provider would. Used by tooling and tests.
    pub fn create_token(&self, user_id: &str, email: &str) -> AppResult<String> {
        let claims = Claims::new(user_id, email, self.expiration_hours);

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalError(format!("Failed to create JWT: {}", e)))
    }

    pub fn validate_token(&self, token: &str) -> AppResult<Claims> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => {
                    AppError::Unauthorized("Token has expired".to_string())
                }
                jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                    AppError::Unauthorized("Token signature is invalid".to_string())
                }
                _ => AppError::Unauthorized(format!("Invalid token: {}", e)),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn test_jwt_create_and_validate() {
        let config = Config::test_config();
        let jwt_service = JwtService::new(&config.jwt_secret, 1);

        let token = jwt_service.create_token("user-1", "john@example.com").unwrap();
        assert!(!token.is_empty());

        let claims = jwt_service.validate_token(&token).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.email, "john@example.com");
    }

    #[test]
    fn test_jwt_invalid_token() {
        let config = Config::test_config();
        let jwt_service = JwtService::new(&config.jwt_secret, 1);

        let result = jwt_service.validate_token("invalid.token.here");
        assert!(matches!(result, Err(AppError::Unauthorized(_))));
    }

    #[test]
    fn test_jwt_rejects_token_signed_with_other_secret() {
        let issuer = JwtService::new(&SecretString::from("one_secret".to_string()), 1);
        let verifier = JwtService::new(&SecretString::from("another_secret".to_string()), 1);

        let token = issuer.create_token("user-1", "a@example.com").unwrap();
        match verifier.validate_token(&token) {
            Err(AppError::Unauthorized(msg)) => assert!(msg.contains("signature")),
            other => panic!("Expected signature failure, got {:?}", other.map(|c| c.sub)),
        }
    }

    #[test]
    fn test_jwt_rejects_expired_token() {
        let config = Config::test_config();
        let jwt_service = JwtService::new(&config.jwt_secret, -2);

        let token = jwt_service.create_token("user-1", "a@example.com").unwrap();
        assert!(jwt_service.validate_token(&token).is_err());
    }
}
