use crate::error::AppError;
use crate::opponent::config::{OpponentConfig, Strategy, DEFAULT_DIFFICULTY};
use crate::storage::file::FileStore;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct Config {
    pub strategy: Strategy,
    pub difficulty: f64,
    pub data_dir: PathBuf,
    pub server_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any variable source; `from_env` passes the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let strategy = match lookup("RPS_STRATEGY") {
            Some(raw) => raw.parse::<Strategy>()?,
            None => Strategy::default(),
        };

        let difficulty = match lookup("RPS_DIFFICULTY") {
            Some(raw) => raw.trim().parse::<f64>().map_err(|_| {
                AppError::InvalidConfiguration(format!(
                    "RPS_DIFFICULTY must be a number between 0 and 1 (got \"{}\")",
                    raw
                ))
            })?,
            None => DEFAULT_DIFFICULTY,
        };

        let data_dir = lookup("RPS_DATA_DIR")
            .filter(|dir| !dir.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(FileStore::default_dir);

        let server_url = lookup("RPS_SERVER_URL").filter(|url| !url.trim().is_empty());

        let config = Config {
            strategy,
            difficulty,
            data_dir,
            server_url,
        };
        // Surface an out-of-range difficulty now rather than at first play.
        config.opponent_config()?;
        Ok(config)
    }

    pub fn opponent_config(&self) -> Result<OpponentConfig, AppError> {
        OpponentConfig::new(self.strategy, Vec::new(), self.difficulty)
    }
}
