//! Database configuration

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::time::Duration;

use super::error::ValidationError;

const DEFAULT_PORT: u16 = 5432;

/// Database configuration
///
/// Either a full `url` is given, or connect options are built from the
/// discrete `user`, `password`, `host` and `name` settings.
#[derive(Debug, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL; takes precedence over the discrete settings
    #[serde(default)]
    pub url: Option<SecretString>,

    #[serde(default = "default_user")]
    pub user: String,

    #[serde(default = "default_password")]
    pub password: SecretString,

    /// Database name
    #[serde(default = "default_name")]
    pub name: String,

    /// `host` or `host:port`
    #[serde(default = "default_host")]
    pub host: String,

    /// Minimum connections to maintain
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,

    /// Maximum connections allowed
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Connection acquire timeout in seconds
    #[serde(default = "default_acquire_timeout")]
    pub acquire_timeout_secs: u64,

    /// Idle connection timeout in seconds
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_secs: u64,

    /// Maximum connection lifetime in seconds
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_secs: u64,
}

impl DatabaseConfig {
    fn explicit_url(&self) -> Option<&str> {
        self.url
            .as_ref()
            .map(|u| u.expose_secret().as_str())
            .filter(|u| !u.is_empty())
    }

    /// Options handed to the connection pool.
    ///
    /// Credentials are passed as discrete fields, so a password containing
    /// `@` or `/` needs no escaping.
    pub fn connect_options(&self) -> Result<PgConnectOptions, ValidationError> {
        if let Some(url) = self.explicit_url() {
            return url
                .parse::<PgConnectOptions>()
                .map_err(|_| ValidationError::InvalidDatabaseUrl);
        }

        let (host, port) = match self.host.rsplit_once(':') {
            Some((host, port)) => {
                let port = port
                    .parse::<u16>()
                    .map_err(|_| ValidationError::InvalidDatabaseHost(self.host.clone()))?;
                (host, port)
            }
            None => (self.host.as_str(), DEFAULT_PORT),
        };
        if host.is_empty() {
            return Err(ValidationError::InvalidDatabaseHost(self.host.clone()));
        }

        Ok(PgConnectOptions::new()
            .host(host)
            .port(port)
            .username(&self.user)
            .password(self.password.expose_secret())
            .database(&self.name)
            .ssl_mode(PgSslMode::Disable))
    }

    /// Get acquire timeout as Duration
    pub fn acquire_timeout(&self) -> Duration {
        Duration::from_secs(self.acquire_timeout_secs)
    }

    /// Get idle timeout as Duration
    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Get max lifetime as Duration
    pub fn max_lifetime(&self) -> Duration {
        Duration::from_secs(self.max_lifetime_secs)
    }

    /// Validate database configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self.explicit_url() {
            Some(url) => {
                if !url.starts_with("postgres://") && !url.starts_with("postgresql://") {
                    return Err(ValidationError::InvalidDatabaseUrl);
                }
            }
            None => {
                if self.host.is_empty() || self.name.is_empty() {
                    return Err(ValidationError::MissingRequired(
                        "DATABASE__HOST / DATABASE__NAME",
                    ));
                }
            }
        }
        self.connect_options()?;
        if self.min_connections > self.max_connections {
            return Err(ValidationError::InvalidPoolSize);
        }
        if self.max_connections > 100 {
            return Err(ValidationError::PoolSizeTooLarge);
        }
        Ok(())
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            user: default_user(),
            password: default_password(),
            name: default_name(),
            host: default_host(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout(),
            idle_timeout_secs: default_idle_timeout(),
            max_lifetime_secs: default_max_lifetime(),
        }
    }
}

fn default_user() -> String {
    "admin".to_string()
}

fn default_password() -> SecretString {
    SecretString::new("admin".to_string())
}

fn default_name() -> String {
    "billing".to_string()
}

fn default_host() -> String {
    "localhost:5432".to_string()
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout() -> u64 {
    30
}

fn default_idle_timeout() -> u64 {
    600
}

fn default_max_lifetime() -> u64 {
    1800
}
