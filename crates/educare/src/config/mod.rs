use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::time::Duration;

use crate::workflows::admission::EligibilityPolicy;

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
    pub admission: AdmissionConfig,
    pub access: AccessConfig,
}

const DEFAULT_SUBMISSION_TIMEOUT_SECS: u64 = 10;

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

        let defaults = EligibilityPolicy::default();
        let min_age = age_bound("APP_ELIGIBILITY_MIN_AGE", defaults.min_age)?;
        let max_age = age_bound("APP_ELIGIBILITY_MAX_AGE", defaults.max_age)?;
        if min_age > max_age {
            return Err(ConfigError::InvertedAgeBounds { min_age, max_age });
        }

        let submission_timeout = match non_empty_var("APP_SUBMISSION_TIMEOUT_SECS") {
            Some(raw) => raw
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::InvalidTimeout { value: raw })?,
            None => Duration::from_secs(DEFAULT_SUBMISSION_TIMEOUT_SECS),
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            admission: AdmissionConfig {
                eligibility: EligibilityPolicy::new(min_age, max_age),
                enrollment_endpoint: non_empty_var("APP_ENROLLMENT_API_URL"),
                contact_endpoint: non_empty_var("APP_CONTACT_API_URL"),
                submission_timeout,
            },
            access: AccessConfig {
                credentials_csv: non_empty_var("APP_CREDENTIALS_CSV").map(PathBuf::from),
            },
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn age_bound(name: &'static str, default: i32) -> Result<i32, ConfigError> {
    match non_empty_var(name) {
        Some(raw) => raw
            .parse::<u8>()
            .map(i32::from)
            .map_err(|_| ConfigError::InvalidAgeBound { name, value: raw }),
        None => Ok(default),
    }
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Admission policy and the external endpoints enrollment and contact forms post to.
#[derive(Debug, Clone)]
pub struct AdmissionConfig {
    pub eligibility: EligibilityPolicy,
    pub enrollment_endpoint: Option<String>,
    pub contact_endpoint: Option<String>,
    pub submission_timeout: Duration,
}

/// Where role credentials come from. `None` keeps the built-in demo table.
#[derive(Debug, Clone, Default)]
pub struct AccessConfig {
    pub credentials_csv: Option<PathBuf>,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidAgeBound { name: &'static str, value: String },
    InvertedAgeBounds { min_age: i32, max_age: i32 },
    InvalidTimeout { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidAgeBound { name, value } => {
                write!(f, "{name} must be a whole number of years (found '{value}')")
            }
            ConfigError::InvertedAgeBounds { min_age, max_age } => write!(
                f,
                "eligibility minimum age {min_age} is greater than maximum age {max_age}"
            ),
            ConfigError::InvalidTimeout { value } => write!(
                f,
                "APP_SUBMISSION_TIMEOUT_SECS must be a positive number of seconds (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidAgeBound { .. }
            | ConfigError::InvertedAgeBounds { .. }
            | ConfigError::InvalidTimeout { .. } => None,
        }
    }
}
