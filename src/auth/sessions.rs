//! JWT Session Tokens
//!
//! Issues and verifies the bearer tokens that carry an account's identity
//! between requests. Tokens are self-contained: a valid signature, an
//! unexpired `exp` and the fixed issuer/audience pair are all that is needed
//! to accept the embedded claims *as of issuance* — the authentication
//! middleware re-checks the account against the live store on every request.
//!
//! # Token Flavors
//!
//! Every login issues a pair: a short-lived access token and a longer-lived
//! refresh token (defaults come from configuration). With "remember me" both
//! lifetimes are extended to fixed 30/90 day values instead.
//!
//! # Security
//!
//! - HS256 with a process-wide secret injected at startup
//! - Issuer and audience are verified, not just the signature
//! - There is no revocation list; deactivating the account is the only way
//!   to cut a token's effective life short

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::users::{User, UserRole};
use crate::config::JwtConfig;
use crate::error::ApiError;

/// Access-token lifetime when "remember me" is requested.
pub const REMEMBER_ME_ACCESS_LIFETIME: Duration = Duration::from_secs(30 * 24 * 60 * 60);
/// Refresh-token lifetime when "remember me" is requested.
pub const REMEMBER_ME_REFRESH_LIFETIME: Duration = Duration::from_secs(90 * 24 * 60 * 60);

/// Claims embedded in every issued token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: String,
    /// Account email at issuance.
    pub email: String,
    /// Account role at issuance.
    pub role: UserRole,
    /// Issued-at (unix seconds).
    pub iat: i64,
    /// Expiry (unix seconds).
    pub exp: i64,
    /// Fixed issuer.
    pub iss: String,
    /// Fixed audience.
    pub aud: String,
}

/// Access + refresh token pair returned by registration and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signs, verifies and decodes session tokens.
///
/// Constructed once at startup from [`JwtConfig`] and shared by reference;
/// all operations are pure and non-blocking.
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    access_lifetime: Duration,
    refresh_lifetime: Duration,
}

impl JwtService {
    pub fn new(config: &JwtConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            issuer: config.issuer.clone(),
            audience: config.audience.clone(),
            access_lifetime: config.access_lifetime,
            refresh_lifetime: config.refresh_lifetime,
        }
    }

    /// Sign a token for `user` with the given lifetime.
    pub fn issue(&self, user: &User, lifetime: Duration) -> Result<String, ApiError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat: now,
            exp: now + lifetime.as_secs() as i64,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            tracing::error!("failed to sign token: {e}");
            ApiError::internal("token signing failed")
        })
    }

    /// Issue an access/refresh pair.
    ///
    /// `remember_me` switches both tokens to the extended fixed lifetimes.
    pub fn issue_pair(&self, user: &User, remember_me: bool) -> Result<TokenPair, ApiError> {
        let (access, refresh) = if remember_me {
            (REMEMBER_ME_ACCESS_LIFETIME, REMEMBER_ME_REFRESH_LIFETIME)
        } else {
            (self.access_lifetime, self.refresh_lifetime)
        };
        Ok(TokenPair {
            access_token: self.issue(user, access)?,
            refresh_token: self.issue(user, refresh)?,
        })
    }

    /// Verify a token's signature, expiry, issuer and audience.
    pub fn verify(&self, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims),
            Err(e) if matches!(e.kind(), jsonwebtoken::errors::ErrorKind::ExpiredSignature) => {
                tracing::warn!("token expired");
                Err(ApiError::TokenExpired)
            }
            Err(e) => {
                // Signature, issuer, audience and structural failures all
                // collapse to one kind at the boundary.
                tracing::warn!("invalid token: {e}");
                Err(ApiError::TokenInvalid)
            }
        }
    }

    /// Best-effort claims extraction without verifying anything.
    ///
    /// For diagnostics only (for example reading the subject out of an
    /// expired token in a log handler). Never an authorization basis.
    pub fn decode_unverified(&self, token: &str) -> Option<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.insecure_disable_signature_validation();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.set_required_spec_claims::<&str>(&[]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .ok()
            .map(|data| data.claims)
    }

    /// Pull the token out of an `Authorization` header.
    ///
    /// Only the exact two-part `Bearer <token>` shape yields a token; any
    /// other shape is `None` so callers treat "no credential supplied"
    /// uniformly.
    pub fn extract_from_header(header: Option<&str>) -> Option<&str> {
        let mut parts = header?.split(' ');
        match (parts.next(), parts.next(), parts.next()) {
            (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
            _ => None,
        }
    }
}
