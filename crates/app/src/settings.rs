//! Application settings.
//!
//! Read from `config/fieldbook.toml` when present, then overridden by
//! `FIELDBOOK__*` environment variables (`FIELDBOOK__SERVER__PORT=9000`).
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct App {
    #[serde(default = "default_level")]
    pub level: String,
    #[serde(default = "default_farm_name")]
    pub farm_name: String,
}

impl Default for App {
    fn default() -> Self {
        Self {
            level: default_level(),
            farm_name: default_farm_name(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Database {
    Memory,
    Sqlite(String),
}

#[derive(Debug, Deserialize)]
pub struct Server {
    pub bind: Option<String>,
    #[serde(default = "default_port")]
    pub port: u16,
    pub database: Database,
}

#[derive(Debug, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub app: App,
    pub server: Server,
}

fn default_level() -> String {
    "info".to_string()
}

fn default_farm_name() -> String {
    "My Farm".to_string()
}

fn default_port() -> u16 {
    8000
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.database.sqlite", "fieldbook.db")?
            .add_source(File::with_name("config/fieldbook").required(false))
            .add_source(Environment::with_prefix("FIELDBOOK").separator("__"))
            .build()?
            .try_deserialize()
    }
}
