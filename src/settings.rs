use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// Runtime settings: built-in defaults, then an optional `delizia.toml`,
/// then `DELIZIA_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub pool_size: u32,
    pub db_workers: usize,
    pub log_level: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("database_url", "database/restaurant.db")?
            .set_default("host", "127.0.0.1")?
            .set_default("port", 8080)?
            .set_default("pool_size", 5)?
            .set_default("db_workers", 5)?
            .set_default("log_level", "info")?
            .add_source(File::with_name("delizia").required(false))
            .add_source(Environment::with_prefix("DELIZIA"))
            .build()?
            .try_deserialize()
    }
}
