//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SLEEP_DIARY` prefix and nested values use double underscores as separators.
//! Every setting has a default, so an empty environment is a valid configuration.
//!
//! # Example
//!
//! ```no_run
//! use sleep_diary::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Diary day measured in {}", config.diary.timezone);
//! ```

mod diary;
mod error;
mod features;
mod server;

pub use diary::DiaryConfig;
pub use error::{ConfigError, ValidationError};
pub use features::FeatureFlags;
pub use server::{Environment, LogFormat, ServerConfig};

use serde::Deserialize;

/// Root application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (bind address, logging, timeouts)
    #[serde(default)]
    pub server: ServerConfig,

    /// Diary configuration (time zone, default language, seeding)
    #[serde(default)]
    pub diary: DiaryConfig,

    /// Feature flags
    #[serde(default)]
    pub features: FeatureFlags,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SLEEP_DIARY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SLEEP_DIARY__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `SLEEP_DIARY__DIARY__TIMEZONE=Europe/Oslo` -> `diary.timezone = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SLEEP_DIARY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for a zero port, an out-of-range timeout,
    /// an unknown time zone or an unsupported default language.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.diary.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }

    /// Whether internal error detail may reach API callers.
    ///
    /// Always false in production, whatever the feature flag says.
    pub fn verbose_errors(&self) -> bool {
        self.features.verbose_errors && !self.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "SLEEP_DIARY__SERVER__PORT",
        "SLEEP_DIARY__SERVER__ENVIRONMENT",
        "SLEEP_DIARY__DIARY__TIMEZONE",
        "SLEEP_DIARY__DIARY__DEFAULT_LANGUAGE",
        "SLEEP_DIARY__FEATURES__VERBOSE_ERRORS",
    ];

    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_empty_environment_uses_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        let config = result.unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.environment, Environment::Development);
        assert_eq!(config.diary.timezone, "Europe/Copenhagen");
        assert!(config.diary.seed_default_questionnaires);
        assert!(!config.features.verbose_errors);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_nested_values_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SLEEP_DIARY__SERVER__PORT", "3000");
        env::set_var("SLEEP_DIARY__DIARY__TIMEZONE", "Europe/Oslo");
        env::set_var("SLEEP_DIARY__DIARY__DEFAULT_LANGUAGE", "en");
        env::set_var("SLEEP_DIARY__FEATURES__VERBOSE_ERRORS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.diary.tz().unwrap(), chrono_tz::Europe::Oslo);
        assert_eq!(
            config.diary.language().unwrap(),
            crate::domain::foundation::Language::En
        );
        assert!(config.features.verbose_errors);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SLEEP_DIARY__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_production_never_exposes_error_detail() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("SLEEP_DIARY__SERVER__ENVIRONMENT", "production");
        env::set_var("SLEEP_DIARY__FEATURES__VERBOSE_ERRORS", "true");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.features.verbose_errors);
        assert!(!config.verbose_errors());
    }

    #[test]
    fn test_verbose_errors_outside_production() {
        let mut config = AppConfig::default();
        config.features.verbose_errors = true;
        assert!(config.verbose_errors());
    }

    #[test]
    fn test_validate_rejects_unknown_timezone() {
        let config = AppConfig {
            diary: DiaryConfig {
                timezone: "Nowhere/Special".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ValidationError::UnknownTimezone(_))
        ));
    }
}
