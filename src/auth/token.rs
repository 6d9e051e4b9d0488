use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::AppError;

/// Claims encoded within an issued JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the username of the authenticated user.
    /// Optional on decode so a signed-but-subjectless token is reported
    /// as `MissingSubject` instead of a parse failure.
    pub sub: Option<String>,
    /// Expiration timestamp (seconds since epoch).
    pub exp: usize,
}

/// Internal reasons a token can be rejected.
///
/// Every variant maps to the same uniform 401 at the HTTP boundary; the
/// distinction exists for tests and debugging only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenError {
    /// The token could not be parsed at all.
    Malformed,
    /// The signature does not match the payload.
    BadSignature,
    /// The token parsed and verified but its expiry has passed.
    Expired,
    /// The payload lacks the `sub` claim.
    MissingSubject,
}

impl fmt::Display for TokenError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TokenError::Malformed => write!(f, "malformed token"),
            TokenError::BadSignature => write!(f, "invalid token signature"),
            TokenError::Expired => write!(f, "token expired"),
            TokenError::MissingSubject => write!(f, "token missing subject claim"),
        }
    }
}

/// Issues and verifies signed bearer tokens.
///
/// The signing keys are derived from the configured secret once at
/// startup and injected into the app as shared state; the secret itself
/// is never logged and never read from the environment per request.
/// Verification is stateless: subject and expiry are embedded in the
/// token, so no session store is consulted.
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenService {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::minutes(ttl_minutes),
        }
    }

    /// Issues a token for `subject`, expiring `ttl` from now.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        self.issue_at(subject, Utc::now())
    }

    fn issue_at(&self, subject: &str, now: DateTime<Utc>) -> Result<String, AppError> {
        let claims = Claims {
            sub: Some(subject.to_owned()),
            exp: (now + self.ttl).timestamp() as usize,
        };

        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token and returns its subject.
    ///
    /// Checks, in order: parse + signature integrity, then expiry, then
    /// presence of the subject claim. A token is considered expired when
    /// `now >= exp` (zero leeway, strict at the boundary).
    pub fn verify(&self, token: &str) -> Result<String, TokenError> {
        self.verify_at(token, Utc::now())
    }

    fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut validation = Validation::default();
        // Expiry is checked manually below so that a token whose expiry
        // equals the current second is already rejected, and so the
        // check is deterministic against an injected clock in tests.
        validation.validate_exp = false;

        let data = decode::<Claims>(token, &self.decoding, &validation).map_err(|e| {
            match e.kind() {
                ErrorKind::InvalidSignature => TokenError::BadSignature,
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Malformed,
            }
        })?;

        if data.claims.exp as i64 <= now.timestamp() {
            return Err(TokenError::Expired);
        }

        data.claims.sub.ok_or(TokenError::MissingSubject)
    }
}
