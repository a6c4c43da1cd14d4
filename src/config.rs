use simplelog::LevelFilter;
use std::{path::PathBuf, str::FromStr};

use crate::gpa::GpaError;

pub const DB_ENV: &str = "SCHOLAR_GPA_DB";
pub const LOG_LEVEL_ENV: &str = "SCHOLAR_GPA_LOG_LEVEL";
pub const LOG_FILE_ENV: &str = "SCHOLAR_GPA_LOG_FILE";

const DEFAULT_DB: &str = "scholar-gpa.db";

/// Runtime settings, read from the environment (and `.env`)
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub db_path: PathBuf,
    pub log_level: LevelFilter,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB),
            log_level: LevelFilter::Info,
            log_file: None,
        }
    }
}

impl Config {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, GpaError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup, unset or blank keys keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Result<Self, GpaError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let mut config = Config::default();

        if let Some(path) = get(DB_ENV) {
            config.db_path = PathBuf::from(path);
        }
        if let Some(level) = get(LOG_LEVEL_ENV) {
            config.log_level = LevelFilter::from_str(level.trim()).map_err(|_| {
                GpaError::ConfigError(format!("{LOG_LEVEL_ENV}: unknown log level {level:?}"))
            })?;
        }
        config.log_file = get(LOG_FILE_ENV).map(PathBuf::from);

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup(&[
            (DB_ENV, "/var/lib/scholar/history.db"),
            (LOG_LEVEL_ENV, "debug"),
            (LOG_FILE_ENV, "scholar.log"),
        ]))
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/scholar/history.db"));
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert_eq!(config.log_file, Some(PathBuf::from("scholar.log")));
    }

    #[test]
    fn test_blank_values_are_ignored() {
        let config = Config::from_lookup(lookup(&[(DB_ENV, "  "), (LOG_FILE_ENV, "")])).unwrap();
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB));
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_bad_log_level() {
        let result = Config::from_lookup(lookup(&[(LOG_LEVEL_ENV, "loud")]));
        assert!(matches!(result, Err(GpaError::ConfigError(_))));
    }
}
