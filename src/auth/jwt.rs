use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use time::{Duration, OffsetDateTime};
use tracing::debug;

use super::claims::Claims;
use super::dto::PublicUser;
use crate::config::JwtConfig;

/// HS256 signing and verification keys with the token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl From<&JwtConfig> for JwtKeys {
    fn from(cfg: &JwtConfig) -> Self {
        Self {
            encoding: EncodingKey::from_secret(cfg.secret.as_bytes()),
            decoding: DecodingKey::from_secret(cfg.secret.as_bytes()),
            ttl: Duration::minutes(cfg.ttl_minutes),
        }
    }
}

impl JwtKeys {
    pub fn sign(&self, user: &PublicUser) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let claims = Claims {
            user_id: user.user_id.clone(),
            email: user.email.clone(),
            name: user.name.clone(),
            sub: user.user_id.clone(),
            iat: now.unix_timestamp(),
            nbf: now.unix_timestamp(),
            exp: (now + self.ttl).unix_timestamp(),
        };
        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?;
        debug!(user_id = %user.user_id, "jwt signed");
        Ok(token)
    }

    /// Returns the claims of a valid token, `None` for expired or otherwise
    /// invalid ones.
    pub fn decode(&self, token: &str) -> Option<Claims> {
        verify(token, &self.decoding)
    }
}

/// Decodes `token` signed with `secret`; `None` when it does not verify.
pub fn decode_token(token: &str, secret: &str) -> Option<Claims> {
    verify(token, &DecodingKey::from_secret(secret.as_bytes()))
}

fn verify(token: &str, key: &DecodingKey) -> Option<Claims> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_nbf = true;
    validation.leeway = 0;
    match decode::<Claims>(token, key, &validation) {
        Ok(data) => Some(data.claims),
        Err(e) => {
            debug!(error = %e, "jwt rejected");
            None
        }
    }
}
