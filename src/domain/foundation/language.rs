//! Language selection and localized text.
//!
//! Diary content is authored in Danish with optional English translations.
//! Lookup falls back to Danish whenever a translation is missing.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Supported presentation languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Da,
    En,
}

impl Language {
    /// Returns the language tag (`da` or `en`).
    pub fn tag(&self) -> &'static str {
        match self {
            Language::Da => "da",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl FromStr for Language {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "da" => Ok(Language::Da),
            "en" => Ok(Language::En),
            other => Err(ValidationError::invalid_format(
                "language",
                format!("unsupported language tag '{}'", other),
            )),
        }
    }
}

/// Text authored per language. Danish is mandatory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocalizedText {
    pub da: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub en: Option<String>,
}

impl LocalizedText {
    pub fn new(da: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            da: da.into(),
            en: Some(en.into()),
        }
    }

    pub fn danish(da: impl Into<String>) -> Self {
        Self {
            da: da.into(),
            en: None,
        }
    }

    /// Selects the text for `language`, falling back to Danish.
    pub fn resolve(&self, language: Language) -> &str {
        match language {
            Language::En => self
                .en
                .as_deref()
                .filter(|text| !text.trim().is_empty())
                .unwrap_or(&self.da),
            Language::Da => &self.da,
        }
    }

    pub fn is_blank(&self) -> bool {
        self.da.trim().is_empty()
    }
}
