use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub database_path: String,
    /// Owner edit window for sales, in hours. The boundary is inclusive.
    pub edit_window_hours: i64,
    /// Allowed drift between a submitted sale date and server time before a
    /// sale is reclassified as OFFLINE, in seconds.
    pub backdate_tolerance_secs: i64,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnv(String),
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_env_map(std::env::vars().collect())
    }

    pub fn from_env_map(env_map: HashMap<String, String>) -> Result<Self, ConfigError> {
        let port = env_map
            .get("PORT")
            .map(|s| s.as_str())
            .unwrap_or("8080")
            .parse::<u16>()
            .map_err(|_| {
                ConfigError::InvalidValue("PORT".to_string(), "must be a valid u16".to_string())
            })?;

        let database_path = env_map
            .get("DATABASE_PATH")
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnv("DATABASE_PATH".to_string()))?;

        let edit_window_hours = env_map
            .get("EDIT_WINDOW_HOURS")
            .map(|s| s.as_str())
            .unwrap_or("24")
            .parse::<i64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "EDIT_WINDOW_HOURS".to_string(),
                    "must be a valid i64".to_string(),
                )
            })?;
        if edit_window_hours <= 0 {
            return Err(ConfigError::InvalidValue(
                "EDIT_WINDOW_HOURS".to_string(),
                "must be positive".to_string(),
            ));
        }

        let backdate_tolerance_secs = env_map
            .get("BACKDATE_TOLERANCE_SECS")
            .map(|s| s.as_str())
            .unwrap_or("300")
            .parse::<i64>()
            .map_err(|_| {
                ConfigError::InvalidValue(
                    "BACKDATE_TOLERANCE_SECS".to_string(),
                    "must be a valid i64".to_string(),
                )
            })?;
        if backdate_tolerance_secs < 0 {
            return Err(ConfigError::InvalidValue(
                "BACKDATE_TOLERANCE_SECS".to_string(),
                "must be non-negative".to_string(),
            ));
        }

        Ok(Config {
            port,
            database_path,
            edit_window_hours,
            backdate_tolerance_secs,
        })
    }
}
