//! Questionnaire entity and the two diary kinds.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{QuestionnaireId, ValidationError};

/// The two diaries a citizen fills in each day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionnaireType {
    Morning,
    Evening,
}

impl QuestionnaireType {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionnaireType::Morning => "morning",
            QuestionnaireType::Evening => "evening",
        }
    }
}

impl fmt::Display for QuestionnaireType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionnaireType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "morning" => Ok(QuestionnaireType::Morning),
            "evening" => Ok(QuestionnaireType::Evening),
            other => Err(ValidationError::invalid_format(
                "questionnaire_type",
                format!("expected 'morning' or 'evening', got '{}'", other),
            )),
        }
    }
}

/// A questionnaire. Its questions reference it by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Questionnaire {
    pub id: QuestionnaireId,
    #[serde(rename = "type")]
    pub questionnaire_type: QuestionnaireType,
    pub name: String,
}

impl Questionnaire {
    pub fn new(
        id: QuestionnaireId,
        questionnaire_type: QuestionnaireType,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            questionnaire_type,
            name: name.into(),
        }
    }

    pub fn resolved(&self) -> ResolvedQuestionnaire {
        ResolvedQuestionnaire {
            id: self.id,
            questionnaire_type: self.questionnaire_type,
        }
    }
}

/// How a caller names a questionnaire: by kind or by concrete id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionnaireRef {
    Type(QuestionnaireType),
    Id(QuestionnaireId),
}

impl FromStr for QuestionnaireRef {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(kind) = s.parse::<QuestionnaireType>() {
            return Ok(QuestionnaireRef::Type(kind));
        }
        s.parse::<QuestionnaireId>()
            .map(QuestionnaireRef::Id)
            .map_err(|_| {
                ValidationError::invalid_format(
                    "questionnaire_id",
                    format!("'{}' is neither a questionnaire type nor an id", s.trim()),
                )
            })
    }
}

impl fmt::Display for QuestionnaireRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuestionnaireRef::Type(kind) => write!(f, "{}", kind),
            QuestionnaireRef::Id(id) => write!(f, "{}", id),
        }
    }
}

/// A questionnaire reference normalised to its id and kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolvedQuestionnaire {
    pub id: QuestionnaireId,
    pub questionnaire_type: QuestionnaireType,
}
