use anyhow::Result;
use config::{Config, Environment, File};
use serde::Deserialize;
use std::path::PathBuf;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub client: ClientConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DatabaseConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientConfig {
    /// Where the terminal client finds the API server
    pub base_url: String,
    pub page_size: usize,
}

impl Settings {
    /// Defaults, then `config/settings.toml` if present, then `VENDOR__*` env vars.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        Self::load_from("config/settings")
    }

    fn load_from(file_name: &str) -> Result<Self> {
        let config = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000_i64)?
            .set_default("database.path", "vendors.db")?
            .set_default("client.base_url", "http://localhost:3000")?
            .set_default("client.page_size", 5_i64)?
            .add_source(File::with_name(file_name).required(false))
            .add_source(
                Environment::with_prefix("VENDOR")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        Ok(settings)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
