//! Connection string configuration
//!
//! The connection string comes from `PG_CONNECTION_STRING`, with `.env` and
//! `.env.example` in the working directory as fallbacks. The legacy
//! `postgres://` scheme is rewritten to `postgresql://` before validation.

use std::env::VarError;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

use sqlx::postgres::PgConnectOptions;
use tracing::{debug, info};

/// Environment variable holding the database connection string
pub const CONNECTION_STRING_VAR: &str = "PG_CONNECTION_STRING";

/// Env files consulted after the process environment, in priority order
pub const ENV_FILES: [&str; 2] = [".env", ".env.example"];

const LEGACY_SCHEME: &str = "postgres://";
const CANONICAL_SCHEME: &str = "postgresql://";

/// Configuration error
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{key} is not set (checked environment, .env and .env.example)")]
    Missing { key: &'static str },

    #[error("invalid connection string: {reason}")]
    Invalid { reason: String },
}

/// Validated service settings
#[derive(Clone)]
pub struct Settings {
    pub pg_connection_string: String,
}

impl Settings {
    /// Build settings from a raw connection string.
    ///
    /// Normalizes the scheme and checks that the driver can parse the result.
    pub fn new(raw: &str) -> Result<Self, ConfigError> {
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ConfigError::Missing {
                key: CONNECTION_STRING_VAR,
            });
        }

        let normalized = normalize_connection_string(raw);
        PgConnectOptions::from_str(&normalized).map_err(|e| ConfigError::Invalid {
            reason: e.to_string(),
        })?;

        Ok(Self {
            pg_connection_string: normalized,
        })
    }

    /// Read settings from the process environment.
    ///
    /// Call [`load_dotenv`] first for the env-file fallbacks to apply.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_var(std::env::var(CONNECTION_STRING_VAR))
    }

    /// Interpret the result of reading `PG_CONNECTION_STRING`.
    ///
    /// A value that is set but not valid unicode is invalid, not missing.
    pub fn from_var(value: Result<String, VarError>) -> Result<Self, ConfigError> {
        match value {
            Ok(raw) => Self::new(&raw),
            Err(VarError::NotPresent) => Err(ConfigError::Missing {
                key: CONNECTION_STRING_VAR,
            }),
            Err(VarError::NotUnicode(_)) => Err(ConfigError::Invalid {
                reason: format!("{CONNECTION_STRING_VAR} is not valid unicode"),
            }),
        }
    }
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("pg_connection_string", &redact(&self.pg_connection_string))
            .finish()
    }
}

/// Rewrite a leading `postgres://` to `postgresql://`.
///
/// Only the first occurrence is replaced; any other value passes through.
pub fn normalize_connection_string(value: &str) -> String {
    if value.starts_with(LEGACY_SCHEME) {
        value.replacen(LEGACY_SCHEME, CANONICAL_SCHEME, 1)
    } else {
        value.to_owned()
    }
}

/// Load `.env` then `.env.example` from the working directory.
///
/// dotenvy never overwrites variables that are already set, so the process
/// environment wins over `.env`, which wins over `.env.example`.
pub fn load_dotenv() {
    load_dotenv_from(Path::new("."));
}

/// Same as [`load_dotenv`] but relative to `dir`.
pub fn load_dotenv_from(dir: &Path) {
    let mut loaded_from = Vec::new();

    for name in ENV_FILES {
        let path = dir.join(name);
        if !path.exists() {
            continue;
        }
        match dotenvy::from_path(&path) {
            Ok(()) => {
                debug!("Loaded env file: {}", path.display());
                loaded_from.push(path.display().to_string());
            }
            Err(e) => debug!("Failed to load {}: {}", path.display(), e),
        }
    }

    if loaded_from.is_empty() {
        info!("Using environment variables only (no .env file found)");
    } else {
        info!("Loaded configuration from: {}", loaded_from.join(", "));
    }
}

/// Mask the password component of a connection URL
fn redact(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_owned();
    };
    let Some((userinfo, host)) = rest.rsplit_once('@') else {
        return url.to_owned();
    };
    match userinfo.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_owned(),
    }
}
