//! HTTP DTOs for response endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::{NextQuestionResult, TodayStatus};
use crate::domain::foundation::{Language, Percentage, QuestionId, QuestionnaireId, ResponseId};
use crate::domain::questionnaire::{QuestionView, QuestionnaireType};
use crate::domain::response::{AnswerSet, Response, SleepParameters, SleepRatings};

// ════════════════════════════════════════════════════════════════════════════
// Query parameters
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LanguageParams {
    #[serde(default)]
    pub language: Option<Language>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponsesParams {
    #[serde(default)]
    pub questionnaire_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckTodayParams {
    pub questionnaire_type: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A completed diary. `questionnaireId` may be `morning`, `evening` or an id.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponseRequest {
    pub questionnaire_id: String,
    #[serde(default)]
    pub answers: AnswerSet,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionRequest {
    pub questionnaire_id: String,
    #[serde(default)]
    pub answers: AnswerSet,
    #[serde(default)]
    pub current_question_id: Option<QuestionId>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Sleep parameters with the derived efficiency and ratings.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepParametersDto {
    #[serde(flatten)]
    pub parameters: SleepParameters,
    pub efficiency: Option<Percentage>,
    pub ratings: SleepRatings,
}

impl From<SleepParameters> for SleepParametersDto {
    fn from(parameters: SleepParameters) -> Self {
        Self {
            parameters,
            efficiency: parameters.efficiency(),
            ratings: parameters.ratings(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseDto {
    pub id: ResponseId,
    pub user_id: String,
    pub questionnaire_id: QuestionnaireId,
    pub questionnaire_type: QuestionnaireType,
    pub answers: AnswerSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sleep_parameters: Option<SleepParametersDto>,
    pub created_at: String,
}

impl From<Response> for ResponseDto {
    fn from(response: Response) -> Self {
        Self {
            id: response.id(),
            user_id: response.user_id().to_string(),
            questionnaire_id: response.questionnaire_id(),
            questionnaire_type: response.questionnaire_type(),
            sleep_parameters: response.sleep_parameters().map(Into::into),
            created_at: response.created_at().as_datetime().to_rfc3339(),
            answers: response.answers().clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextQuestionResponse {
    pub question: QuestionView,
    /// Children of `question` the current answers reveal.
    pub revealed_children: Vec<QuestionView>,
}

impl NextQuestionResponse {
    /// `None` when the questionnaire is finished.
    pub fn from_result(result: NextQuestionResult) -> Option<Self> {
        let question = result.question?;
        Some(Self {
            question,
            revealed_children: result.revealed_children,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedAnswersResponse {
    pub questionnaire_id: QuestionnaireId,
    /// Answers including derived defaults.
    pub answers: AnswerSet,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TodayStatusResponse {
    pub has_response: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_id: Option<ResponseId>,
}

impl From<TodayStatus> for TodayStatusResponse {
    fn from(status: TodayStatus) -> Self {
        Self {
            has_response: status.has_response,
            response_id: status.response_id,
        }
    }
}
