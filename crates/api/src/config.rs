use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use folio_events::EmailConfig;

/// Startup configuration errors. Any of these stops the process.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} must be a valid {expected} (got {value:?})")]
    Invalid {
        key: &'static str,
        expected: &'static str,
        value: String,
    },
}

/// Connection string prefixes the PostgreSQL driver accepts.
const POSTGRES_SCHEMES: [&str; 2] = ["postgres://", "postgresql://"];

/// Server configuration loaded from environment variables.
///
/// Validated once at boot; handlers only ever see a fully-formed value.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: IpAddr,
    /// Bind port (default: `5000`).
    pub port: u16,
    /// PostgreSQL connection string.
    pub database_url: String,
    /// Directory served for `GET /` and static assets (default: `public`).
    pub public_dir: PathBuf,
    /// Allowed CORS origins. Empty means any origin.
    pub cors_origins: Vec<HeaderValue>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// SMTP notification settings; `None` disables notifications.
    pub email: Option<EmailConfig>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default          |
    /// |------------------------|------------------|
    /// | `DATABASE_URL`         | required, `postgres://` (`MONGO_URI` accepted as an alias) |
    /// | `HOST`                 | `0.0.0.0`        |
    /// | `PORT`                 | `5000`           |
    /// | `PUBLIC_DIR`           | `public`         |
    /// | `CORS_ORIGINS`         | any origin       |
    /// | `REQUEST_TIMEOUT_SECS` | `30`             |
    ///
    /// Email settings are read by [`EmailConfig::from_lookup`].
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let (url_key, database_url) = get("DATABASE_URL")
            .map(|url| ("DATABASE_URL", url))
            .or_else(|| get("MONGO_URI").map(|url| ("MONGO_URI", url)))
            .ok_or(ConfigError::Missing("DATABASE_URL"))?;
        if !POSTGRES_SCHEMES
            .iter()
            .any(|scheme| database_url.starts_with(scheme))
        {
            return Err(ConfigError::Invalid {
                key: url_key,
                expected: "postgres:// connection string",
                value: database_url,
            });
        }

        let host = parse_or("HOST", get("HOST"), "IP address", IpAddr::from([0, 0, 0, 0]))?;
        let port = parse_or("PORT", get("PORT"), "port number", 5000u16)?;
        let request_timeout_secs =
            parse_or("REQUEST_TIMEOUT_SECS", get("REQUEST_TIMEOUT_SECS"), "u64", 30u64)?;

        let public_dir = get("PUBLIC_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("public"));

        let cors_origins = get("CORS_ORIGINS")
            .unwrap_or_default()
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|origin| {
                origin.parse::<HeaderValue>().map_err(|_| ConfigError::Invalid {
                    key: "CORS_ORIGINS",
                    expected: "origin",
                    value: origin.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let email = EmailConfig::from_lookup(&lookup);

        Ok(Self {
            host,
            port,
            database_url,
            public_dir,
            cors_origins,
            request_timeout_secs,
            email,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    key: &'static str,
    raw: Option<String>,
    expected: &'static str,
    default: T,
) -> Result<T, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => value.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            expected,
            value,
        }),
    }
}
