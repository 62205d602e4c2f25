use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::TeaError;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub loglevel: String,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// HMAC secret for bearer tokens.
    pub signing_key: String,
    pub register_enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub location: PathBuf,
    /// Seed rows, inserted only when the database file is first created.
    pub tea_types: Vec<String>,
    pub owners: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            loglevel: "info".to_string(),
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 7344,
            signing_key: String::new(),
            register_enabled: false,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            location: PathBuf::from("tea-selector.db"),
            tea_types: Vec::new(),
            owners: Vec::new(),
        }
    }
}

impl Config {
    /// Defaults, then `config.toml`, then `TEA_*` environment variables
    /// (`TEA_SERVER__PORT=8080`).
    pub fn load() -> Result<Self, TeaError> {
        let cfg: Config = Self::figment(CONFIG_FILE).extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn figment(file: &str) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("TEA_").split("__"))
    }

    pub fn validate(&self) -> Result<(), TeaError> {
        if self.server.signing_key.trim().is_empty() {
            return Err(TeaError::Config(
                "server.signing_key must be set".to_string(),
            ));
        }
        Ok(())
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
