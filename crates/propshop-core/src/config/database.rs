//! PostgreSQL settings under `[database]`.

use serde::{Deserialize, Serialize};

/// Pool sizing, timeouts, and startup migration switch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// PostgreSQL connection URL (`PROPSHOP__DATABASE__URL`).
    pub url: String,
    /// Upper bound on pooled connections.
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    /// Connections kept open while idle.
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    /// Seconds to wait for a free connection.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
    /// Seconds before an idle connection is closed.
    #[serde(default = "default_idle_timeout")]
    pub idle_timeout_seconds: u64,
    /// Seconds before any connection is recycled; `0` keeps connections
    /// for the life of the pool.
    #[serde(default = "default_max_lifetime")]
    pub max_lifetime_seconds: u64,
    /// Apply embedded migrations when the server starts.
    #[serde(default = "default_run_migrations")]
    pub run_migrations: bool,
}

impl DatabaseConfig {
    /// Connection lifetime cap, if any.
    pub fn max_lifetime(&self) -> Option<std::time::Duration> {
        (self.max_lifetime_seconds > 0)
            .then(|| std::time::Duration::from_secs(self.max_lifetime_seconds))
    }
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    2
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_idle_timeout() -> u64 {
    300
}

fn default_max_lifetime() -> u64 {
    1800
}

fn default_run_migrations() -> bool {
    true
}
