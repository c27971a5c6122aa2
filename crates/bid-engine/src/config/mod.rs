use crate::estimation::{EngineConfig, RateTable, StrategyKind, ZeroBasisPolicy};
use std::env;
use std::fmt;
use std::fs::File;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub engine: EngineConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            engine: load_engine_config()?,
        })
    }
}

fn load_engine_config() -> Result<EngineConfig, ConfigError> {
    let defaults = EngineConfig::default();

    let strategy = match env::var("BID_RATE_STRATEGY") {
        Ok(value) => StrategyKind::parse(&value).ok_or(ConfigError::InvalidStrategy(value))?,
        Err(_) => defaults.strategy,
    };

    let zero_basis_policy = match env::var("BID_ZERO_BASIS_POLICY") {
        Ok(value) => {
            ZeroBasisPolicy::parse(&value).ok_or(ConfigError::InvalidZeroBasisPolicy(value))?
        }
        Err(_) => defaults.zero_basis_policy,
    };

    let rate_table = match env::var("BID_RATE_TABLE_PATH") {
        Ok(path) if !path.trim().is_empty() => load_rate_table(PathBuf::from(path))?,
        _ => defaults.rate_table,
    };

    Ok(EngineConfig {
        strategy,
        default_lower_limit_rate: env_number(
            "BID_LOWER_LIMIT_RATE",
            defaults.default_lower_limit_rate,
        )?,
        margin_factor: env_number("BID_MARGIN_FACTOR", defaults.margin_factor)?,
        zero_basis_policy,
        range_safety_fraction: env_number(
            "BID_RANGE_SAFETY_FRACTION",
            defaults.range_safety_fraction,
        )?,
        rate_table,
    })
}

fn env_number(key: &'static str, default: f64) -> Result<f64, ConfigError> {
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|number| number.is_finite() && *number >= 0.0)
            .ok_or(ConfigError::InvalidNumber { key, value }),
        Err(_) => Ok(default),
    }
}

fn load_rate_table(path: PathBuf) -> Result<RateTable, ConfigError> {
    let file = match File::open(&path) {
        Ok(file) => file,
        Err(source) => return Err(ConfigError::RateTableIo { path, source }),
    };
    RateTable::from_reader(file).map_err(|source| ConfigError::RateTableFormat { path, source })
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidStrategy(String),
    InvalidZeroBasisPolicy(String),
    InvalidNumber {
        key: &'static str,
        value: String,
    },
    RateTableIo {
        path: PathBuf,
        source: std::io::Error,
    },
    RateTableFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidStrategy(value) => write!(
                f,
                "BID_RATE_STRATEGY '{}' must be one of lookup_table, range_midpoint, fixed_margin",
                value
            ),
            ConfigError::InvalidZeroBasisPolicy(value) => write!(
                f,
                "BID_ZERO_BASIS_POLICY '{}' must be reject or zero_result",
                value
            ),
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{} '{}' must be a non-negative number", key, value)
            }
            ConfigError::RateTableIo { path, .. } => {
                write!(f, "unable to read rate table {}", path.display())
            }
            ConfigError::RateTableFormat { path, .. } => {
                write!(f, "rate table {} is not valid JSON", path.display())
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::RateTableIo { source, .. } => Some(source),
            ConfigError::RateTableFormat { source, .. } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidStrategy(_)
            | ConfigError::InvalidZeroBasisPolicy(_)
            | ConfigError::InvalidNumber { .. } => None,
        }
    }
}
