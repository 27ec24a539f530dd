//! Runtime settings loaded via OrthoConfig.
//!
//! Every value can come from a CLI flag (`--storage sqlite`), an environment
//! variable (`TODO_STORAGE=sqlite`) or a configuration file.

use std::ffi::OsString;
use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_DATABASE_URL: &str = "todo.db";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;

/// Errors raised while reading or interpreting settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// Sources could not be read or merged.
    #[error("failed to load settings: {message}")]
    Load { message: String },
    /// `storage` named neither backend.
    #[error("unknown storage backend {value:?}; expected \"memory\" or \"sqlite\"")]
    UnknownStorage { value: String },
    /// `bind_addr` is not a socket address.
    #[error("invalid bind address {value:?}")]
    BindAddr { value: String },
    /// `base_path` must be empty or start with `/`.
    #[error("base path {value:?} must be empty or start with '/'")]
    BasePath { value: String },
    /// The pool needs at least one connection.
    #[error("db_max_connections must be at least 1")]
    ZeroConnections,
}

/// Storage backend behind the repositories, chosen once at startup.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local maps; data is lost on restart.
    #[default]
    Memory,
    /// SQLite file at `database_url`.
    Sqlite,
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" | "inmemory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            _ => Err(ConfigError::UnknownStorage {
                value: s.to_owned(),
            }),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Memory => "memory",
            Self::Sqlite => "sqlite",
        })
    }
}

/// Raw settings as merged from all sources.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TODO")]
pub struct AppSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<String>,
    /// `memory` or `sqlite`.
    pub storage: Option<String>,
    /// SQLite database file.
    pub database_url: Option<String>,
    /// Prefix for every resource route, such as `/api`.
    pub base_path: Option<String>,
    /// Upper bound on pooled SQLite connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Load settings from `args` (program name first), the environment and
    /// configuration files.
    pub fn load_from<I>(args: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = OsString>,
    {
        Self::load_from_iter(args).map_err(|err| ConfigError::Load {
            message: err.to_string(),
        })
    }

    /// Address the server binds to.
    pub fn bind_addr(&self) -> Result<SocketAddr, ConfigError> {
        let raw = self.bind_addr.as_deref().unwrap_or(DEFAULT_BIND_ADDR);
        raw.trim().parse().map_err(|_| ConfigError::BindAddr {
            value: raw.to_owned(),
        })
    }

    /// Selected storage backend.
    pub fn storage(&self) -> Result<StorageBackend, ConfigError> {
        self.storage
            .as_deref()
            .map_or(Ok(StorageBackend::default()), str::parse)
    }

    /// SQLite database location.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Route prefix without a trailing slash; empty serves at the root.
    pub fn base_path(&self) -> Result<String, ConfigError> {
        let raw = self.base_path.as_deref().unwrap_or_default().trim();
        let trimmed = raw.trim_end_matches('/');
        if trimmed.is_empty() || trimmed.starts_with('/') {
            Ok(trimmed.to_owned())
        } else {
            Err(ConfigError::BasePath {
                value: raw.to_owned(),
            })
        }
    }

    /// Pool size for the SQLite backend.
    pub fn db_max_connections(&self) -> Result<u32, ConfigError> {
        match self.db_max_connections.unwrap_or(DEFAULT_DB_MAX_CONNECTIONS) {
            0 => Err(ConfigError::ZeroConnections),
            n => Ok(n),
        }
    }
}
