//! Layered configuration loading using figment.
//!
//! Sources (in priority order, highest wins):
//! 1. Environment variables (`AEROTRACE_*` prefix, `__` as separator)
//! 2. An explicit `--config` file
//! 3. Project-level `aerotrace.toml`
//! 4. User-level `~/.config/aerotrace/config.toml`
//! 5. Built-in defaults

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

fn default_db_path() -> String {
    "aerotrace.db".into()
}

fn default_concurrency() -> usize {
    4
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file.
    #[serde(default = "default_db_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FleetConfig {
    /// Concurrent component scans during a fleet sweep.
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AeroConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub fleet: FleetConfig,
}

impl AeroConfig {
    /// Load configuration from all sources.
    ///
    /// # Errors
    ///
    /// Returns `figment::Error` if a source is malformed.
    pub fn load(explicit: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(dir) = dirs::config_dir() {
            figment = figment.merge(Toml::file(dir.join("aerotrace").join("config.toml")));
        }
        figment = figment.merge(Toml::file("aerotrace.toml"));
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }
        figment
            .merge(Env::prefixed("AEROTRACE_").split("__"))
            .extract()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_are_correct() {
        let config = AeroConfig::default();
        assert_eq!(config.database.path, "aerotrace.db");
        assert_eq!(config.fleet.concurrency, 4);
    }

    #[test]
    fn env_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("AEROTRACE_DATABASE__PATH", "/var/lib/aero/fleet.db");
            jail.set_env("AEROTRACE_FLEET__CONCURRENCY", "16");
            let config = AeroConfig::load(None)?;
            assert_eq!(config.database.path, "/var/lib/aero/fleet.db");
            assert_eq!(config.fleet.concurrency, 16);
            Ok(())
        });
    }

    #[test]
    fn project_file_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "aerotrace.toml",
                r#"
                [database]
                path = "project.db"
                "#,
            )?;
            let config = AeroConfig::load(None)?;
            assert_eq!(config.database.path, "project.db");
            assert_eq!(config.fleet.concurrency, 4);
            Ok(())
        });
    }
}
