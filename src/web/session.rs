//! Signed session cookie.
//!
//! The cookie named [`SESSION_COOKIE`] carries an HS256 token whose `sub`
//! is the user id. Nothing is kept server side: logging out just expires
//! the cookie, and rotating the secret key invalidates every session.

use super::error::AppError;
use crate::libs::messages::Message;
use axum::http::header::COOKIE;
use axum::http::HeaderMap;
use anyhow::anyhow;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Serialize, Deserialize)]
struct SessionClaims {
    /// User id.
    sub: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies session tokens.
#[derive(Clone)]
pub struct SessionKeys {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    lifetime: Duration,
}

impl SessionKeys {
    pub fn new(secret: &str, session_minutes: i64) -> anyhow::Result<Self> {
        let lifetime = Duration::try_minutes(session_minutes).ok_or_else(|| anyhow!("{}", Message::SessionMinutesOutOfRange(session_minutes)))?;
        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            lifetime,
        })
    }

    pub fn issue(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| AppError::Internal(anyhow!("{}", Message::SessionMinutesOutOfRange(self.lifetime.num_minutes()))))?;
        let claims = SessionClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: expires.timestamp(),
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)?)
    }

    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// The user id carried by `token`, or `None` for a forged, expired or
    /// malformed token.
    pub fn verify(&self, token: &str) -> Option<i64> {
        match decode::<SessionClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data.claims.sub.parse().ok(),
            Err(error) => {
                tracing::debug!(target: "session", "{}", Message::SessionRejected(error.to_string()));
                None
            }
        }
    }
}

/// `Set-Cookie` value installing a fresh session. Without `max_age` the
/// browser drops the cookie when it closes; the token expires either way.
pub fn session_cookie(token: &str, max_age: Option<Duration>) -> String {
    match max_age {
        Some(max_age) => format!("{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}", SESSION_COOKIE, token, max_age.num_seconds()),
        None => format!("{}={}; Path=/; HttpOnly; SameSite=Lax", SESSION_COOKIE, token),
    }
}

/// `Set-Cookie` value removing the session.
pub fn cleared_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", SESSION_COOKIE)
}

/// Session token from the request's `Cookie` headers.
pub fn read_session(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == SESSION_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}
