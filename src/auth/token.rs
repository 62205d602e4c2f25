use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::error::TeaError;

/// Tokens stay valid for a week.
pub const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub authorized: bool,
    pub user: String,
    pub exp: i64,
}

/// Issues and checks HS256 bearer tokens signed with the configured key.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(signing_key: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(signing_key.as_bytes()),
            decoding: DecodingKey::from_secret(signing_key.as_bytes()),
            ttl: Duration::days(TOKEN_TTL_DAYS),
        }
    }

    pub fn issue(&self, username: &str) -> Result<String, TeaError> {
        let claims = Claims {
            authorized: true,
            user: username.to_string(),
            exp: (Utc::now() + self.ttl).timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    /// Returns the username carried by a valid, unexpired token.
    pub fn verify(&self, token: &str) -> Result<String, TeaError> {
        let data = decode::<Claims>(token, &self.decoding, &Validation::new(Algorithm::HS256))?;
        if !data.claims.authorized {
            return Err(TeaError::Unauthorized);
        }
        Ok(data.claims.user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_round_trips_username() {
        let svc = TokenService::new("secret");
        let token = svc.issue("john").expect("issue");
        assert_eq!(svc.verify(&token).expect("verify"), "john");
    }

    #[test]
    fn token_signed_with_other_key_is_rejected() {
        let token = TokenService::new("one").issue("john").expect("issue");
        assert!(matches!(
            TokenService::new("two").verify(&token),
            Err(TeaError::Token(_))
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            authorized: true,
            user: "john".into(),
            exp: (Utc::now() - Duration::hours(2)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .expect("encode");
        assert!(TokenService::new("secret").verify(&token).is_err());
    }

    #[test]
    fn unauthorized_claim_is_rejected() {
        let claims = Claims {
            authorized: false,
            user: "john".into(),
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .expect("encode");
        assert!(matches!(
            TokenService::new("secret").verify(&token),
            Err(TeaError::Unauthorized)
        ));
    }
}
