//! Server configuration loaded from the environment
//!
//! Configuration is read once at startup and never changes afterwards. The
//! datastore settings use the standard libpq `PG*` variable names.

use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::net::SocketAddr;
use thiserror::Error;

/// Port used when neither `BIND_ADDRESS` nor `PORT` is set
pub const DEFAULT_PORT: u16 = 3000;

/// Postgres port used when `PGPORT` is not set
pub const DEFAULT_PG_PORT: u16 = 5432;

/// Collector used when `OTEL_EXPORTER_OTLP_ENDPOINT` is not set
pub const DEFAULT_OTLP_ENDPOINT: &str = "http://localhost:4317";

/// Configuration error
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A port variable is not a valid port number
    #[error("{var} must be a port number, got {value:?}")]
    InvalidPort { var: &'static str, value: String },

    /// `BIND_ADDRESS` is not a socket address
    #[error("BIND_ADDRESS must be host:port, got {0:?}")]
    InvalidBindAddress(String),
}

/// Datastore connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub database: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: DEFAULT_PG_PORT,
            database: None,
            user: None,
            password: None,
        }
    }
}

impl DatabaseConfig {
    /// Connection options: TLS required, server certificate not verified
    pub fn connect_options(&self) -> PgConnectOptions {
        let mut options = PgConnectOptions::new_without_pgpass()
            .host(&self.host)
            .port(self.port)
            .ssl_mode(PgSslMode::Require);

        if let Some(database) = &self.database {
            options = options.database(database);
        }
        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }

        options
    }
}

/// Process-wide server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Shared secret for protected endpoints; `None` disables the check
    pub api_key: Option<String>,
    /// Listen address
    pub bind_address: SocketAddr,
    /// Datastore used by the health probe
    pub database: DatabaseConfig,
    /// Export traces over OTLP
    pub otel_enabled: bool,
    /// OTLP collector endpoint
    pub otlp_endpoint: String,
    /// Trace sampling ratio, as given in `OTEL_TRACES_SAMPLER_ARG`
    pub traces_sampler_arg: Option<String>,
    /// Verbose request logging
    pub debug: bool,
}

impl ServerConfig {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let bind_address: SocketAddr = match var("BIND_ADDRESS") {
            Some(addr) => addr
                .parse()
                .map_err(|_| ConfigError::InvalidBindAddress(addr))?,
            None => {
                let port = parse_port("PORT", var("PORT"), DEFAULT_PORT)?;
                SocketAddr::from(([0, 0, 0, 0], port))
            }
        };

        let database = DatabaseConfig {
            host: var("PGHOST").unwrap_or_else(|| "localhost".to_string()),
            port: parse_port("PGPORT", var("PGPORT"), DEFAULT_PG_PORT)?,
            database: var("PGDATABASE"),
            user: var("PGUSER"),
            password: var("PGPASSWORD"),
        };

        Ok(Self {
            api_key: var("API_KEY"),
            bind_address,
            database,
            otel_enabled: var("OTEL_ENABLED")
                .and_then(|v| v.parse::<bool>().ok())
                .unwrap_or(false),
            otlp_endpoint: var("OTEL_EXPORTER_OTLP_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_OTLP_ENDPOINT.to_string()),
            traces_sampler_arg: var("OTEL_TRACES_SAMPLER_ARG"),
            debug: lookup("DEBUG").is_some(),
        })
    }
}

fn parse_port(var: &'static str, value: Option<String>, default: u16) -> Result<u16, ConfigError> {
    match value {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidPort { var, value }),
        None => Ok(default),
    }
}
