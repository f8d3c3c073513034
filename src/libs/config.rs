//! Configuration management for staffdesk.
//!
//! Settings are kept as JSON in the application data directory and can be
//! overridden from the environment (a `.env` file is honored), which is
//! handy for containers and tests.
//!
//! ## Environment Overrides
//!
//! | Variable                    | Field             |
//! |-----------------------------|-------------------|
//! | `STAFFDESK_DATABASE`        | `database`        |
//! | `STAFFDESK_SECRET_KEY`      | `secret_key`      |
//! | `STAFFDESK_BIND`            | `bind`            |
//! | `STAFFDESK_SESSION_MINUTES` | `session_minutes` |
//!
//! ## Usage Examples
//!
//! ```rust,no_run
//! use staffdesk::libs::config::Config;
//!
//! let config = Config::read()?;
//! println!("Serving from {}", config.database.display());
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::db::db::DB_FILE_NAME;
use crate::libs::messages::Message;
use crate::{msg_bail_anyhow, msg_debug};
use anyhow::{Context, Result};
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

/// Configuration file name inside the data directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Development signing key; `serve` warns when it is still in use.
pub const DEFAULT_SECRET_KEY: &str = "dev";
const DEFAULT_BIND: &str = "127.0.0.1:5000";
const DEFAULT_SESSION_MINUTES: i64 = 1440;
/// Longest accepted session lifetime, ten years.
pub const MAX_SESSION_MINUTES: i64 = 10 * 366 * 24 * 60;

/// Runtime settings for the web server and CLI.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Config {
    /// SQLite database file.
    pub database: PathBuf,

    /// Key used to sign session cookies. Changing it logs everybody out.
    pub secret_key: String,

    /// Socket address the server listens on.
    pub bind: String,

    /// How long a login stays valid.
    #[serde(default = "default_session_minutes")]
    pub session_minutes: i64,

    /// bcrypt work factor for new password hashes.
    #[serde(default = "default_password_cost")]
    pub password_cost: u32,
}

fn default_session_minutes() -> i64 {
    DEFAULT_SESSION_MINUTES
}

fn default_password_cost() -> u32 {
    bcrypt::DEFAULT_COST
}

impl Default for Config {
    fn default() -> Self {
        let database = DataStorage::new()
            .get_path(DB_FILE_NAME)
            .unwrap_or_else(|_| PathBuf::from(DB_FILE_NAME));

        Config {
            database,
            secret_key: DEFAULT_SECRET_KEY.to_string(),
            bind: DEFAULT_BIND.to_string(),
            session_minutes: DEFAULT_SESSION_MINUTES,
            password_cost: bcrypt::DEFAULT_COST,
        }
    }
}

impl Config {
    /// Loads the configuration file (defaults when it is missing) and then
    /// applies environment overrides.
    pub fn read() -> Result<Config> {
        dotenv::dotenv().ok();

        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config = if config_file_path.exists() {
            let config_str = fs::read_to_string(&config_file_path)?;
            serde_json::from_str(&config_str).with_context(|| Message::ConfigParseError(config_file_path.display().to_string()))?
        } else {
            msg_debug!(Message::ConfigFileNotFound);
            Config::default()
        };

        config.with_env_overrides()
    }

    /// Applies `STAFFDESK_*` environment variables on top of `self` and
    /// validates the result, so values from the file are checked too.
    pub fn with_env_overrides(mut self) -> Result<Config> {
        if let Ok(database) = env::var("STAFFDESK_DATABASE") {
            self.database = PathBuf::from(database);
        }
        if let Ok(secret_key) = env::var("STAFFDESK_SECRET_KEY") {
            self.secret_key = secret_key;
        }
        if let Ok(bind) = env::var("STAFFDESK_BIND") {
            self.bind = bind;
        }
        if let Ok(minutes) = env::var("STAFFDESK_SESSION_MINUTES") {
            self.session_minutes = minutes
                .parse()
                .with_context(|| Message::ConfigParseError(format!("STAFFDESK_SESSION_MINUTES={}", minutes)))?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Rejects settings the server cannot run with.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_SESSION_MINUTES).contains(&self.session_minutes) {
            msg_bail_anyhow!(Message::SessionMinutesOutOfRange(self.session_minutes));
        }
        Ok(())
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Interactive setup wizard. Current values are offered as defaults.
    pub fn init() -> Result<Config> {
        let current = Config::read()?;
        let theme = ColorfulTheme::default();

        let bind: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptBind.to_string())
            .default(current.bind)
            .interact_text()?;
        let database: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptDatabase.to_string())
            .default(current.database.display().to_string())
            .interact_text()?;
        let secret_key: String = Input::with_theme(&theme)
            .with_prompt(Message::PromptSecretKey.to_string())
            .default(current.secret_key)
            .interact_text()?;
        let session_minutes: i64 = Input::with_theme(&theme)
            .with_prompt(Message::PromptSessionMinutes.to_string())
            .default(current.session_minutes)
            .interact_text()?;

        let config = Config {
            database: PathBuf::from(database),
            secret_key,
            bind,
            session_minutes,
            password_cost: current.password_cost,
        };
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_optional_fields_fall_back_to_defaults() {
        let json = r#"{"database": "/tmp/staff.db", "secret_key": "s3cret", "bind": "0.0.0.0:8080"}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.database, PathBuf::from("/tmp/staff.db"));
        assert_eq!(config.session_minutes, DEFAULT_SESSION_MINUTES);
        assert_eq!(config.password_cost, bcrypt::DEFAULT_COST);
    }

    #[test]
    fn session_lifetime_must_be_in_range() {
        let with_minutes = |minutes: i64| Config { session_minutes: minutes, ..Config::default() };

        assert!(with_minutes(1).validate().is_ok());
        assert!(with_minutes(MAX_SESSION_MINUTES).validate().is_ok());
        assert!(with_minutes(0).validate().is_err());
        assert!(with_minutes(-5).validate().is_err());
        assert!(with_minutes(MAX_SESSION_MINUTES + 1).validate().is_err());
        assert!(with_minutes(i64::MAX).validate().is_err());
    }

    #[test]
    fn out_of_range_lifetime_in_the_file_is_rejected() {
        let json = r#"{"database": "/tmp/staff.db", "secret_key": "s3cret", "bind": "0.0.0.0:8080", "session_minutes": 9223372036854775807}"#;
        let config: Config = serde_json::from_str(json).unwrap();

        let error = config.validate().unwrap_err();
        assert!(error.to_string().contains("out of range"));
    }
}
