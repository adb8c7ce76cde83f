//! HS256 JSON Web Token maker.

use chrono::{DateTime, Duration};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use domain::TOKEN_SYMMETRIC_KEY_SIZE;

use super::{Payload, TokenError, TokenMaker};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Claims {
    jti: Uuid,
    sub: String,
    iat: i64,
    exp: i64,
}

impl From<&Payload> for Claims {
    fn from(payload: &Payload) -> Self {
        Self {
            jti: payload.id,
            sub: payload.username.clone(),
            iat: payload.issued_at.timestamp(),
            exp: payload.expired_at.timestamp(),
        }
    }
}

impl TryFrom<Claims> for Payload {
    type Error = TokenError;

    fn try_from(claims: Claims) -> Result<Self, Self::Error> {
        Ok(Payload {
            id: claims.jti,
            username: claims.sub,
            issued_at: DateTime::from_timestamp(claims.iat, 0).ok_or(TokenError::Invalid)?,
            expired_at: DateTime::from_timestamp(claims.exp, 0).ok_or(TokenError::Invalid)?,
        })
    }
}

/// Token maker signing HS256 JWTs with a fixed-size symmetric key.
#[derive(Clone)]
pub struct JwtMaker {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

// Don't expose key material in debug output
impl std::fmt::Debug for JwtMaker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtMaker").field("key", &"[REDACTED]").finish()
    }
}

impl JwtMaker {
    /// Create a maker from a symmetric key.
    ///
    /// # Errors
    /// Returns `TokenError::InvalidKey` unless the key is exactly
    /// `TOKEN_SYMMETRIC_KEY_SIZE` bytes long.
    pub fn new(symmetric_key: &str) -> Result<Self, TokenError> {
        if symmetric_key.len() != TOKEN_SYMMETRIC_KEY_SIZE {
            return Err(TokenError::InvalidKey {
                expected: TOKEN_SYMMETRIC_KEY_SIZE,
                actual: symmetric_key.len(),
            });
        }

        let secret = symmetric_key.as_bytes();
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
        })
    }

    fn validation() -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation
    }
}

impl TokenMaker for JwtMaker {
    fn create_token(&self, username: &str, duration: Duration) -> Result<(String, Payload), TokenError> {
        let claims = Claims::from(&Payload::new(username, duration));

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok((token, Payload::try_from(claims)?))
    }

    fn verify_token(&self, token: &str) -> Result<Payload, TokenError> {
        let data = decode::<Claims>(token, &self.decoding_key, &Self::validation()).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid,
            }
        })?;

        Payload::try_from(data.claims)
    }
}
