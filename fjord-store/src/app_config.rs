use serde::Deserialize;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

use fjord_core::links::DEFAULT_SITE_URL;
use fjord_core::{PortNameTable, ShipAliasTable, SiteLinks};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub data: DataConfig,
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DataSource {
    /// One CSV file per collection
    #[default]
    CsvDir,
    /// Single JSON object holding every collection
    JsonBundle,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DataConfig {
    #[serde(default)]
    pub source: DataSource,
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SiteConfig {
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_SITE_URL.to_string() }
    }
}

/// Entries merged over the built-in alias and port-name tables
#[derive(Debug, Deserialize, Clone, Default)]
pub struct MatchingConfig {
    #[serde(default)]
    pub ship_aliases: HashMap<String, String>,
    #[serde(default)]
    pub port_names: HashMap<String, String>,
}

impl MatchingConfig {
    // Keys may arrive lowercased from the environment; codes are uppercase.
    pub fn ship_alias_table(&self) -> ShipAliasTable {
        let mut table = ShipAliasTable::default();
        table.extend(
            self.ship_aliases
                .iter()
                .map(|(from, to)| (from.to_uppercase(), to.to_uppercase())),
        );
        table
    }

    pub fn port_name_table(&self) -> PortNameTable {
        let mut table = PortNameTable::default();
        table.extend(
            self.port_names
                .iter()
                .map(|(code, name)| (code.to_uppercase(), name.clone())),
        );
        table
    }
}

impl SiteConfig {
    pub fn links(&self) -> SiteLinks {
        SiteLinks::new(self.base_url.as_str())
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_from("config")
    }

    pub fn load_from(config_dir: &str) -> Result<Self, config::ConfigError> {
        Self::load_with_env(config_dir, environment())
    }

    fn load_with_env(
        config_dir: &str,
        environment: config::Environment,
    ) -> Result<Self, config::ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let s = config::Config::builder()
            .add_source(config::File::with_name(&format!("{}/default", config_dir)))
            // Per-environment overrides are optional
            .add_source(
                config::File::with_name(&format!("{}/{}", config_dir, run_mode)).required(false),
            )
            // Not checked in
            .add_source(config::File::with_name(&format!("{}/local", config_dir)).required(false))
            .add_source(environment)
            .build()?;

        s.try_deserialize()
    }
}

/// Eg. `FJORD__SERVER__PORT=9000`. The separator also follows the prefix.
fn environment() -> config::Environment {
    config::Environment::with_prefix("FJORD").separator("__")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_load_layers_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            r#"
                [server]
                port = 8000

                [data]
                source = "json_bundle"
                path = "data/lookup.json"

                [matching.ship_aliases]
                FN = "FR"

                [matching.port_names]
                ISA = "Isafjordur"
            "#,
        )
        .unwrap();

        let config = Config::load_from(dir.path().to_str().unwrap()).expect("Failed to load config");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.data.source, DataSource::JsonBundle);
        assert_eq!(config.site.base_url, DEFAULT_SITE_URL);

        let aliases = config.matching.ship_alias_table();
        assert_eq!(aliases.resolve("FN"), "FR");
        assert_eq!(aliases.resolve("MS"), "WW");

        let names = config.matching.port_name_table();
        assert_eq!(names.name_for("ISA"), "Isafjordur");
        assert_eq!(names.name_for("BGO"), "Bergen");
    }

    #[test]
    fn test_environment_overrides_use_double_underscore_prefix() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[server]\nport = 8000\n\n[data]\npath = \"data\"\n",
        )
        .unwrap();

        let mut vars = config::Map::new();
        vars.insert("FJORD_SERVER__PORT".to_string(), "9000".to_string());
        let config = Config::load_with_env(dir.path().to_str().unwrap(), environment().source(Some(vars)))
            .expect("Failed to load config");
        assert_eq!(config.server.port, 8000);

        let mut vars = config::Map::new();
        vars.insert("FJORD__SERVER__PORT".to_string(), "9001".to_string());
        let config = Config::load_with_env(dir.path().to_str().unwrap(), environment().source(Some(vars)))
            .expect("Failed to load config");
        assert_eq!(config.server.port, 9001);
        assert_eq!(config.data.source, DataSource::CsvDir);
    }

    #[test]
    fn test_missing_default_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load_from(dir.path().to_str().unwrap()).is_err());
    }
}
