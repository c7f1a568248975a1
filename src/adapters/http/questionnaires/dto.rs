//! HTTP DTOs for questionnaire endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::StartQuestionnaireResult;
use crate::domain::foundation::{Language, QuestionnaireId};
use crate::domain::questionnaire::{QuestionView, QuestionnaireType};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageParams {
    #[serde(default)]
    pub language: Option<Language>,
}

/// The questionnaire and its first question.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartQuestionnaireResponse {
    pub questionnaire_id: QuestionnaireId,
    pub questionnaire_type: QuestionnaireType,
    /// Absent when the questionnaire has no active questions.
    pub first_question: Option<QuestionView>,
}

impl From<StartQuestionnaireResult> for StartQuestionnaireResponse {
    fn from(result: StartQuestionnaireResult) -> Self {
        Self {
            questionnaire_id: result.questionnaire.id,
            questionnaire_type: result.questionnaire.questionnaire_type,
            first_question: result.first_question,
        }
    }
}
