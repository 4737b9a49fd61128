use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 5000;
const DEFAULT_LOG_LEVEL: &str = "info";
const DEFAULT_PRODUCTS_PATH: &str = "data/products.json";
const DEFAULT_DATABASE_PATH: &str = "app.db";

fn var_or(name: &str, default: &str) -> String {
    env::var(name).unwrap_or_else(|_| default.to_string())
}

/// Deployment stage, read from `APP_ENV`. Anything unrecognised is development.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Process configuration assembled from `APP_*` variables, after an optional
/// `.env` file has been applied.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub catalog: CatalogConfig,
    pub storage: StorageConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            environment: AppEnvironment::parse(&var_or("APP_ENV", "development")),
            server: ServerConfig::from_env()?,
            telemetry: TelemetryConfig {
                log_level: var_or("APP_LOG_LEVEL", DEFAULT_LOG_LEVEL),
            },
            catalog: CatalogConfig {
                products_path: PathBuf::from(var_or("APP_PRODUCTS_PATH", DEFAULT_PRODUCTS_PATH)),
            },
            storage: StorageConfig::from_env()?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let port = match env::var("APP_PORT") {
            Ok(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| ConfigError::InvalidPort(raw))?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            host: var_or("APP_HOST", DEFAULT_HOST),
            port,
        })
    }

    /// `localhost` is accepted as an alias for the IPv4 loopback address.
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        let ip = if self.host.eq_ignore_ascii_case("localhost") {
            IpAddr::from([127, 0, 0, 1])
        } else {
            self.host
                .parse()
                .map_err(|source| ConfigError::InvalidHost {
                    host: self.host.clone(),
                    source,
                })?
        };

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// `EnvFilter` directive used when `RUST_LOG` is unset.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug, Clone)]
pub struct CatalogConfig {
    pub products_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Sqlite,
    Memory,
}

/// Where submissions and reports are persisted. `database_path` is ignored by
/// the memory backend.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub database_path: PathBuf,
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let raw = var_or("APP_STORAGE", "sqlite");
        let backend = match raw.trim().to_ascii_lowercase().as_str() {
            "sqlite" => StorageBackend::Sqlite,
            "memory" | "in-memory" => StorageBackend::Memory,
            _ => return Err(ConfigError::UnknownStorage(raw)),
        };

        Ok(Self {
            backend,
            database_path: PathBuf::from(var_or("APP_DATABASE_PATH", DEFAULT_DATABASE_PATH)),
        })
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort(String),
    InvalidHost {
        host: String,
        source: std::net::AddrParseError,
    },
    UnknownStorage(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort(value) => {
                write!(f, "APP_PORT must be a port number, found '{value}'")
            }
            ConfigError::InvalidHost { host, .. } => {
                write!(f, "APP_HOST '{host}' is not an IPv4 or IPv6 address")
            }
            ConfigError::UnknownStorage(value) => {
                write!(f, "APP_STORAGE must be 'sqlite' or 'memory', found '{value}'")
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source, .. } => Some(source),
            ConfigError::InvalidPort(_) | ConfigError::UnknownStorage(_) => None,
        }
    }
}
