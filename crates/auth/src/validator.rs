//! Signature verification for bearer tokens.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("token could not be decoded: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Verifies a raw bearer token and returns its claims.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, JwtError>;
}

/// HMAC-SHA256 validator with a shared secret.
pub struct Hs256JwtValidator {
    key: DecodingKey,
    validation: Validation,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Time window is checked by `validate_claims` against the caller's clock.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "iat", "sub"]);
        Self {
            key: DecodingKey::from_secret(&secret),
            validation,
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, JwtError> {
        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &self.validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use hearth_core::UserId;
    use jsonwebtoken::{EncodingKey, Header};

    fn mint(secret: &str, claims: &JwtClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn fresh_claims(now: DateTime<Utc>) -> JwtClaims {
        JwtClaims {
            sub: UserId::new(),
            issued_at: now - Duration::seconds(5),
            expires_at: now + Duration::minutes(10),
        }
    }

    #[test]
    fn round_trips_signed_token() {
        let now = Utc::now();
        let claims = fresh_claims(now);
        let token = mint("secret", &claims);

        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        let decoded = validator.validate(&token, now).unwrap();
        assert_eq!(decoded.sub, claims.sub);
    }

    #[test]
    fn rejects_wrong_secret() {
        let now = Utc::now();
        let token = mint("secret", &fresh_claims(now));

        let validator = Hs256JwtValidator::new(b"other".to_vec());
        assert!(matches!(validator.validate(&token, now), Err(JwtError::Decode(_))));
    }

    #[test]
    fn rejects_expired_token() {
        let now = Utc::now();
        let token = mint("secret", &fresh_claims(now));

        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        let later = now + Duration::hours(1);
        assert!(matches!(
            validator.validate(&token, later),
            Err(JwtError::Claims(TokenValidationError::Expired))
        ));
    }

    #[test]
    fn rejects_garbage() {
        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        assert!(validator.validate("not.a.jwt", Utc::now()).is_err());
    }
}
