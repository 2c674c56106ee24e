//! Application Configuration
//!
//! Process-wide configuration loaded once at startup from environment
//! variables, with development-friendly defaults. Everything that the rest
//! of the crate treats as fixed (signing secret, token lifetimes, hash cost)
//! lives here and is injected into the services that need it — there are no
//! global singletons.
//!
//! # Configuration Sources
//!
//! Values are read from the environment (a `.env` file is loaded by the
//! binary before this module runs). `validate()` enforces the few settings
//! that must not keep their defaults in production.

use std::time::Duration;
use thiserror::Error;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {name} is invalid: {message}")]
    Invalid { name: String, message: String },
    #[error("{0}")]
    Unsafe(String),
}

/// Deployment environment.
///
/// Controls error-message exposure (internal failures are only detailed in
/// `Development`) and CORS behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
    Test,
}

impl Environment {
    fn from_env() -> Self {
        match std::env::var("APP_ENV").as_deref() {
            Ok("production") => Environment::Production,
            Ok("test") => Environment::Test,
            _ => Environment::Development,
        }
    }

    pub fn is_development(self) -> bool {
        self == Environment::Development
    }

    pub fn is_production(self) -> bool {
        self == Environment::Production
    }
}

/// JWT signing and lifetime configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC signing secret.
    pub secret: String,
    /// Fixed issuer claim, checked on verification.
    pub issuer: String,
    /// Fixed audience claim, checked on verification.
    pub audience: String,
    /// Default access-token lifetime.
    pub access_lifetime: Duration,
    /// Default refresh-token lifetime.
    pub refresh_lifetime: Duration,
}

const DEFAULT_JWT_SECRET: &str = "your-super-secret-jwt-key-please-change-in-production";

/// Top-level application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Port the HTTP server binds to.
    pub port: u16,
    /// Deployment environment.
    pub environment: Environment,
    /// PostgreSQL connection string. `None` runs the server on the
    /// in-memory store (development only).
    pub database_url: Option<String>,
    /// Token signing configuration.
    pub jwt: JwtConfig,
    /// bcrypt work factor used for password hashing.
    pub bcrypt_cost: u32,
    /// Allowed CORS origin in production.
    pub cors_origin: String,
}

impl AppConfig {
    /// Load configuration from the environment.
    ///
    /// Every value has a development default; only malformed values (an
    /// unparseable port, a bad duration suffix) are errors.
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(AppConfig {
            port: env_parse("PORT", 3000)?,
            environment: Environment::from_env(),
            database_url: std::env::var("DATABASE_URL").ok(),
            jwt: JwtConfig {
                secret: env_or("JWT_SECRET", DEFAULT_JWT_SECRET),
                issuer: env_or("JWT_ISSUER", "game-feedback-collector"),
                audience: env_or("JWT_AUDIENCE", "game-feedback-collector-users"),
                access_lifetime: env_duration("JWT_EXPIRES_IN", "7d")?,
                refresh_lifetime: env_duration("JWT_REFRESH_EXPIRES_IN", "30d")?,
            },
            bcrypt_cost: env_parse("BCRYPT_ROUNDS", 12)?,
            cors_origin: env_or("CORS_ORIGIN", "http://localhost:3001"),
        })
    }

    /// Reject configurations that are unsafe to deploy.
    ///
    /// Currently: a production deployment must override the default JWT
    /// secret.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.environment.is_production() && self.jwt.secret == DEFAULT_JWT_SECRET {
            return Err(ConfigError::Unsafe(
                "JWT_SECRET must be changed from its default value in production".to_string(),
            ));
        }
        Ok(())
    }
}

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match std::env::var(name) {
        Ok(raw) => raw.parse().map_err(|_| ConfigError::Invalid {
            name: name.to_string(),
            message: format!("cannot parse {raw:?}"),
        }),
        Err(_) => Ok(default),
    }
}

fn env_duration(name: &str, default: &str) -> Result<Duration, ConfigError> {
    let raw = env_or(name, default);
    parse_duration(&raw).ok_or_else(|| ConfigError::Invalid {
        name: name.to_string(),
        message: format!("expected a duration like 30m, 12h or 7d, got {raw:?}"),
    })
}

/// Parse a compact duration string: `45s`, `30m`, `12h`, `7d`, or bare
/// seconds (`3600`).
pub fn parse_duration(raw: &str) -> Option<Duration> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    let (value, unit) = match raw.char_indices().last() {
        Some((idx, c)) if c.is_ascii_alphabetic() => (&raw[..idx], Some(c)),
        _ => (raw, None),
    };
    let value: u64 = value.parse().ok()?;
    let secs = match unit {
        None | Some('s') => value,
        Some('m') => value * 60,
        Some('h') => value * 60 * 60,
        Some('d') => value * 60 * 60 * 24,
        _ => return None,
    };
    Some(Duration::from_secs(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_seconds() {
        assert_eq!(parse_duration("3600"), Some(Duration::from_secs(3600)));
    }

    #[test]
    fn parses_suffixed_durations() {
        assert_eq!(parse_duration("45s"), Some(Duration::from_secs(45)));
        assert_eq!(parse_duration("30m"), Some(Duration::from_secs(1800)));
        assert_eq!(parse_duration("12h"), Some(Duration::from_secs(43_200)));
        assert_eq!(parse_duration("7d"), Some(Duration::from_secs(604_800)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("7w"), None);
        assert_eq!(parse_duration("abc"), None);
        assert_eq!(parse_duration("-5m"), None);
    }

    #[test]
    fn production_rejects_default_secret() {
        let mut config = AppConfig {
            port: 3000,
            environment: Environment::Production,
            database_url: None,
            jwt: JwtConfig {
                secret: DEFAULT_JWT_SECRET.to_string(),
                issuer: "game-feedback-collector".to_string(),
                audience: "game-feedback-collector-users".to_string(),
                access_lifetime: Duration::from_secs(60),
                refresh_lifetime: Duration::from_secs(120),
            },
            bcrypt_cost: 4,
            cors_origin: "http://localhost:3001".to_string(),
        };
        assert!(config.validate().is_err());

        config.jwt.secret = "a-real-secret".to_string();
        assert!(config.validate().is_ok());
    }
}
