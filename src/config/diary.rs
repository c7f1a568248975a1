//! Diary configuration

use chrono_tz::Tz;
use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::Language;

/// Diary behaviour settings
#[derive(Debug, Clone, Deserialize)]
pub struct DiaryConfig {
    /// IANA zone the diary day is measured in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Language used when a request names none (`da` or `en`)
    #[serde(default = "default_language")]
    pub default_language: String,

    /// Create the default morning and evening questionnaires at startup
    #[serde(default = "default_seed")]
    pub seed_default_questionnaires: bool,
}

impl DiaryConfig {
    pub fn tz(&self) -> Result<Tz, ValidationError> {
        self.timezone
            .parse()
            .map_err(|_| ValidationError::UnknownTimezone(self.timezone.clone()))
    }

    pub fn language(&self) -> Result<Language, ValidationError> {
        self.default_language
            .parse()
            .map_err(|_| ValidationError::UnsupportedLanguage(self.default_language.clone()))
    }

    /// Validate diary configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.tz()?;
        self.language()?;
        Ok(())
    }
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            default_language: default_language(),
            seed_default_questionnaires: default_seed(),
        }
    }
}

fn default_timezone() -> String {
    "Europe/Copenhagen".to_string()
}

fn default_language() -> String {
    "da".to_string()
}

fn default_seed() -> bool {
    true
}
