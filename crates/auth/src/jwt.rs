//! Token verification behind a trait so transports can swap implementations.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};

use crate::claims::{JwtClaims, TokenValidationError, validate_claims};

/// Decodes and validates a bearer token into [`JwtClaims`].
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError>;
}

/// HS256 validator over a shared secret.
pub struct Hs256JwtValidator {
    key: DecodingKey,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            key: DecodingKey::from_secret(&secret),
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, TokenValidationError> {
        // Time-window checks are done by `validate_claims` against our own
        // RFC3339 claims, not jsonwebtoken's numeric `exp`/`iat` handling.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.required_spec_claims.clear();
        validation.validate_exp = false;

        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &validation)
            .map_err(|_| TokenValidationError::Malformed)?;

        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use congregate_core::UserId;
    use jsonwebtoken::{EncodingKey, Header};

    fn mint(secret: &str, claims: &JwtClaims) -> String {
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn valid_token_round_trips() {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: UserId::new(),
            issued_at: now - Duration::minutes(1),
            expires_at: now + Duration::minutes(10),
        };
        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        let decoded = validator.validate(&mint("secret", &claims), now).unwrap();
        assert_eq!(decoded, claims);
    }

    #[test]
    fn wrong_secret_is_malformed() {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: UserId::new(),
            issued_at: now,
            expires_at: now + Duration::minutes(10),
        };
        let validator = Hs256JwtValidator::new(b"right".to_vec());
        let err = validator.validate(&mint("wrong", &claims), now).unwrap_err();
        assert_eq!(err, TokenValidationError::Malformed);
    }

    #[test]
    fn expired_token_is_rejected_at_decode_boundary() {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: UserId::new(),
            issued_at: now - Duration::minutes(30),
            expires_at: now - Duration::minutes(20),
        };
        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        let err = validator.validate(&mint("secret", &claims), now).unwrap_err();
        assert_eq!(err, TokenValidationError::Expired);
    }
}
