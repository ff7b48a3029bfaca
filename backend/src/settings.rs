//! Application settings loaded via OrthoConfig.
//!
//! Values come from `TASKR_*` environment variables, a configuration file or
//! command-line flags; anything unset falls back to the defaults below.

use std::net::{Ipv4Addr, SocketAddr};

use ortho_config::OrthoConfig;
use serde::Deserialize;

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_DATABASE_URL: &str = "taskr.db";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 4;

/// Server and database settings.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "TASKR")]
pub struct AppSettings {
    /// Socket address the HTTP server binds to.
    pub bind_addr: Option<SocketAddr>,
    /// SQLite database file path.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub db_max_connections: Option<u32>,
}

impl AppSettings {
    /// Bind address, defaulting to `0.0.0.0:8080`.
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr
            .unwrap_or_else(|| SocketAddr::from((Ipv4Addr::UNSPECIFIED, DEFAULT_PORT)))
    }

    /// Database path, defaulting to `taskr.db` in the working directory.
    pub fn database_url(&self) -> &str {
        self.database_url.as_deref().unwrap_or(DEFAULT_DATABASE_URL)
    }

    /// Pool size, defaulting to 4. Zero is treated as one.
    pub fn db_max_connections(&self) -> u32 {
        self.db_max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS)
            .max(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;

    use env_lock::lock_env;
    use rstest::rstest;

    fn load() -> AppSettings {
        AppSettings::load_from_iter([OsString::from("taskr")]).expect("settings load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env([
            ("TASKR_BIND_ADDR", None::<String>),
            ("TASKR_DATABASE_URL", None::<String>),
            ("TASKR_DB_MAX_CONNECTIONS", None::<String>),
        ]);

        let settings = load();
        assert_eq!(settings.bind_addr(), "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(settings.database_url(), DEFAULT_DATABASE_URL);
        assert_eq!(settings.db_max_connections(), DEFAULT_DB_MAX_CONNECTIONS);
    }

    #[rstest]
    fn environment_overrides_defaults() {
        let _guard = lock_env([
            ("TASKR_BIND_ADDR", Some("127.0.0.1:5000".to_owned())),
            ("TASKR_DATABASE_URL", Some("/tmp/tasks.db".to_owned())),
            ("TASKR_DB_MAX_CONNECTIONS", Some("0".to_owned())),
        ]);

        let settings = load();
        assert_eq!(settings.bind_addr(), "127.0.0.1:5000".parse().expect("addr"));
        assert_eq!(settings.database_url(), "/tmp/tasks.db");
        assert_eq!(settings.db_max_connections(), 1);
    }
}
