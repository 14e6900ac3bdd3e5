//! Application configuration loaded from environment variables.
//!
//! Loading is fail-fast: a present but invalid value is an error, never
//! silently replaced by a default.

use std::env;

use agentmgt_auth::VerificationKey;
use thiserror::Error;

use crate::logging::LogFormat;

/// Application environment mode.
///
/// - `Development`: running without a JWT key is allowed with a warning.
/// - `Production`: a JWT key is required.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    /// Parse an `APP_ENV` value. Anything unrecognized is an error, since
    /// development mode relaxes authentication.
    pub fn from_env_str(s: &str) -> Result<Self, ConfigError> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "development" | "dev" => Ok(Self::Development),
            other => Err(ConfigError::InvalidValue {
                var: "APP_ENV".to_string(),
                message: format!("'{other}' is not one of production, prod, development, dev"),
            }),
        }
    }

    /// Returns true if this is production mode.
    #[must_use]
    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }
}

impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Token verification settings.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Verification key.
    pub key: VerificationKey,

    /// Variable the key was read from, for error reporting.
    pub key_var: &'static str,

    /// Expected `iss`, if any.
    pub issuer: Option<String>,

    /// Accepted `aud` values; empty disables the audience check.
    pub audience: Vec<String>,
}

impl JwtConfig {
    /// Signing algorithm name.
    #[must_use]
    pub fn algorithm(&self) -> &'static str {
        match self.key {
            VerificationKey::Hs256(_) => "HS256",
            VerificationKey::Rs256(_) => "RS256",
        }
    }
}

/// Application configuration.
#[derive(Clone)]
pub struct Config {
    /// Environment mode.
    pub app_env: AppEnvironment,

    /// Bind host.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Log filter used when `RUST_LOG` is not set.
    pub rust_log: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Token verification, absent in keyless development mode.
    pub jwt: Option<JwtConfig>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("app_env", &self.app_env)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .field("log_format", &self.log_format)
            .field("jwt_algorithm", &self.jwt.as_ref().map(JwtConfig::algorithm))
            .field("jwt_issuer", &self.jwt.as_ref().and_then(|j| j.issuer.as_ref()))
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `APP_ENV` or `LOG_FORMAT` is not a recognized value
    /// - `PORT` is not a number in 1..=65535
    /// - both `JWT_SECRET` and `JWT_PUBLIC_KEY` are set
    /// - no JWT key is set while `APP_ENV` is production
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let app_env = match var("APP_ENV") {
            Some(s) => AppEnvironment::from_env_str(&s)?,
            None => AppEnvironment::Development,
        };

        let host = var("HOST").unwrap_or_else(|| "0.0.0.0".to_string());

        let port: u16 = var("PORT").unwrap_or_else(|| "8080".to_string()).parse()?;
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: "Port must be between 1 and 65535".to_string(),
            });
        }

        let rust_log = var("RUST_LOG").unwrap_or_else(|| "info".to_string());

        let log_format = match var("LOG_FORMAT") {
            Some(s) => s.parse().map_err(|message| ConfigError::InvalidValue {
                var: "LOG_FORMAT".to_string(),
                message,
            })?,
            None => LogFormat::default(),
        };

        let key = match (var("JWT_SECRET"), var("JWT_PUBLIC_KEY")) {
            (Some(_), Some(_)) => {
                return Err(ConfigError::InvalidValue {
                    var: "JWT_SECRET".to_string(),
                    message: "JWT_SECRET and JWT_PUBLIC_KEY are mutually exclusive".to_string(),
                });
            }
            (Some(secret), None) => {
                Some((VerificationKey::Hs256(secret.into_bytes()), "JWT_SECRET"))
            }
            (None, Some(pem)) => {
                Some((VerificationKey::Rs256(pem.into_bytes()), "JWT_PUBLIC_KEY"))
            }
            (None, None) => None,
        };

        if key.is_none() && app_env.is_production() {
            return Err(ConfigError::MissingVar(
                "JWT_SECRET or JWT_PUBLIC_KEY".to_string(),
            ));
        }

        let jwt = key.map(|(key, key_var)| JwtConfig {
            key,
            key_var,
            issuer: var("JWT_ISSUER"),
            audience: var("JWT_AUDIENCE")
                .map(|s| {
                    s.split(',')
                        .map(str::trim)
                        .filter(|a| !a.is_empty())
                        .map(String::from)
                        .collect()
                })
                .unwrap_or_default(),
        });

        Ok(Self {
            app_env,
            host,
            port,
            rust_log,
            log_format,
            jwt,
        })
    }

    /// Get the server bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
