//! Process configuration from the environment.
//!
//! `DATABASE_PATH` and `COLLECTION_NAME` are required; missing either is
//! fatal at startup. `BIND_ADDR` is optional.

use std::env;
use thiserror::Error;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingVar(&'static str),
}

#[derive(Debug, Clone)]
pub struct Settings {
    /// Path of the redb database file.
    pub database_path: String,
    /// Table holding the task collection.
    pub collection_name: String,
    pub bind_addr: String,
}

impl Settings {
    pub fn from_env() -> Result<Settings, ConfigError> {
        Ok(Settings {
            database_path: required("DATABASE_PATH")?,
            collection_name: required("COLLECTION_NAME")?,
            bind_addr: env::var("BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string()),
        })
    }
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    env::var(name).map_err(|_| ConfigError::MissingVar(name))
}

#[cfg(test)]
mod tests {
    use super::*;

    // One test, sequential cases: the variables are process-global, so
    // splitting these up would race under the parallel test runner.
    #[test]
    fn from_env_requires_store_vars_and_defaults_bind_addr() {
        env::remove_var("DATABASE_PATH");
        env::remove_var("COLLECTION_NAME");
        env::remove_var("BIND_ADDR");

        assert!(matches!(
            Settings::from_env(),
            Err(ConfigError::MissingVar("DATABASE_PATH"))
        ));

        env::set_var("DATABASE_PATH", "/tmp/tasks.redb");
        assert!(matches!(
            Settings::from_env(),
            Err(ConfigError::MissingVar("COLLECTION_NAME"))
        ));

        env::set_var("COLLECTION_NAME", "tasks");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.database_path, "/tmp/tasks.redb");
        assert_eq!(settings.collection_name, "tasks");
        assert_eq!(settings.bind_addr, DEFAULT_BIND_ADDR);

        env::set_var("BIND_ADDR", "127.0.0.1:8080");
        let settings = Settings::from_env().unwrap();
        assert_eq!(settings.bind_addr, "127.0.0.1:8080");

        env::remove_var("DATABASE_PATH");
        env::remove_var("COLLECTION_NAME");
        env::remove_var("BIND_ADDR");
    }
}
