//! Process settings read from the environment (after `.env` is loaded).

use crate::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// What `GET` list endpoints do when the store fails.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListFailurePolicy {
    /// Log the failure and answer 200 with an empty list.
    Degrade,
    /// Answer 500.
    Strict,
}

impl std::str::FromStr for ListFailurePolicy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "degrade" => Ok(ListFailurePolicy::Degrade),
            "strict" => Ok(ListFailurePolicy::Strict),
            _ => Err(ConfigError::InvalidSetting {
                name: "LIST_FAILURE_POLICY",
                reason: format!("'{}' (expected degrade or strict)", s),
            }),
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub database_url: String,
    pub bind_addr: String,
    pub max_connections: u32,
    pub query_timeout: Duration,
    pub max_body_bytes: usize,
    pub list_failure_policy: ListFailurePolicy,
    pub catalog_path: Option<PathBuf>,
    /// Extra apartment statuses from `APARTMENT_STATUSES` (comma-separated).
    pub extra_apartment_statuses: Vec<String>,
    /// Extra reservation statuses from `RESERVATION_STATUSES` (comma-separated).
    pub extra_reservation_statuses: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            database_url: "sqlite://database.sqlite".into(),
            bind_addr: "0.0.0.0:3000".into(),
            max_connections: 5,
            query_timeout: Duration::from_millis(5000),
            max_body_bytes: 10 * 1024 * 1024,
            list_failure_policy: ListFailurePolicy::Degrade,
            catalog_path: None,
            extra_apartment_statuses: Vec::new(),
            extra_reservation_statuses: Vec::new(),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build settings from any key lookup; unset keys keep their defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut s = Settings::default();
        if let Some(v) = lookup("DATABASE_URL") {
            s.database_url = v;
        }
        if let Some(v) = lookup("BIND_ADDR") {
            s.bind_addr = v;
        }
        if let Some(v) = lookup("DB_MAX_CONNECTIONS") {
            s.max_connections = parse_number("DB_MAX_CONNECTIONS", &v)?;
            if s.max_connections == 0 {
                return Err(ConfigError::InvalidSetting {
                    name: "DB_MAX_CONNECTIONS",
                    reason: "must be at least 1".into(),
                });
            }
        }
        if let Some(v) = lookup("QUERY_TIMEOUT_MS") {
            s.query_timeout = Duration::from_millis(parse_number("QUERY_TIMEOUT_MS", &v)?);
        }
        if let Some(v) = lookup("MAX_BODY_BYTES") {
            s.max_body_bytes = parse_number("MAX_BODY_BYTES", &v)?;
        }
        if let Some(v) = lookup("LIST_FAILURE_POLICY") {
            s.list_failure_policy = v.parse()?;
        }
        s.catalog_path = lookup("STATUS_CATALOG_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);
        s.extra_apartment_statuses = lookup("APARTMENT_STATUSES").map(|v| split_list(&v)).unwrap_or_default();
        s.extra_reservation_statuses = lookup("RESERVATION_STATUSES").map(|v| split_list(&v)).unwrap_or_default();
        Ok(s)
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, v: &str) -> Result<T, ConfigError> {
    v.trim().parse().map_err(|_| ConfigError::InvalidSetting {
        name,
        reason: format!("'{}' is not a valid number", v),
    })
}

fn split_list(v: &str) -> Vec<String> {
    v.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
