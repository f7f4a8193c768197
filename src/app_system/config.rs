use std::str::FromStr;

use crate::error::ConfigError;

pub const DEFAULT_DATABASE_URL: &str = "sqlite::memory:";
pub const DEFAULT_MAX_CONNECTIONS: u32 = 5;
pub const DEFAULT_BUFFER_SIZE: usize = 100;

/// Where products are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(Self::Sqlite),
            "memory" => Ok(Self::Memory),
            other => Err(ConfigError::UnknownBackend(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    pub backend: StoreBackend,
    pub database_url: String,
    pub max_connections: u32,
    /// Capacity of the request channel in front of the catalog service.
    pub buffer_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            database_url: DEFAULT_DATABASE_URL.to_string(),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }
}

impl CatalogConfig {
    /// Reads `CATALOG_STORE`, `DATABASE_URL`, `CATALOG_MAX_CONNECTIONS` and
    /// `CATALOG_BUFFER_SIZE`. Unset variables keep their defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(backend) = lookup("CATALOG_STORE") {
            config.backend = backend.parse()?;
        }
        if let Some(url) = lookup("DATABASE_URL") {
            config.database_url = url;
        }
        if let Some(value) = lookup("CATALOG_MAX_CONNECTIONS") {
            config.max_connections = parse_number("CATALOG_MAX_CONNECTIONS", value)?;
        }
        if let Some(value) = lookup("CATALOG_BUFFER_SIZE") {
            config.buffer_size = parse_number("CATALOG_BUFFER_SIZE", value)?;
        }

        Ok(config)
    }

    #[allow(dead_code)]
    pub fn in_memory() -> Self {
        Self {
            backend: StoreBackend::Memory,
            ..Self::default()
        }
    }
}

fn parse_number<T: FromStr>(name: &'static str, value: String) -> Result<T, ConfigError> {
    match value.trim().parse() {
        Ok(n) => Ok(n),
        Err(_) => Err(ConfigError::InvalidNumber { name, value }),
    }
}
