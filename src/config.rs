use crate::storage::STORAGE_KEY;
use std::{env, fmt::Display, path::PathBuf, str::FromStr};
use tracing::{info, warn};

pub struct Config {
    pub port: u16,
    pub data_dir: PathBuf,
    pub storage_key: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any variable source; unset or invalid values
    /// fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            port: try_load(&lookup, "PORT", 8080),
            data_dir: PathBuf::from(try_load(&lookup, "SURVEY_DATA_DIR", "data".to_string())),
            storage_key: try_load(&lookup, "SURVEY_STORAGE_KEY", STORAGE_KEY.to_string()),
        }
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Some(raw) = lookup(key).filter(|value| !value.trim().is_empty()) else {
        info!("{key} not set, using default: {default}");
        return default;
    };

    raw.trim().parse().unwrap_or_else(|err| {
        warn!("Invalid {key} value {raw:?}: {err}, using default: {default}");
        default
    })
}
