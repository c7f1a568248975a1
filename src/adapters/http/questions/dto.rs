//! HTTP DTOs for question endpoints.

use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::foundation::{Language, LocalizedText, QuestionId, QuestionnaireId};
use crate::domain::questionnaire::{
    NewQuestion, Question, QuestionConstraints, QuestionOption, QuestionPatch, QuestionRole,
    QuestionType,
};

// ════════════════════════════════════════════════════════════════════════════
// Query parameters
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuestionsParams {
    /// `morning`, `evening` or a questionnaire id.
    pub questionnaire_id: String,
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub include_deleted: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetQuestionParams {
    #[serde(default)]
    pub language: Option<Language>,
    #[serde(default)]
    pub include_deleted: bool,
}

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to author a new question. Questions created here are never locked.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateQuestionRequest {
    pub questionnaire_id: QuestionnaireId,
    pub order: u32,
    #[serde(rename = "type")]
    pub question_type: QuestionType,
    pub text: LocalizedText,
    #[serde(default)]
    pub role: Option<QuestionRole>,
    #[serde(default)]
    pub constraints: QuestionConstraints,
    #[serde(default)]
    pub options: Vec<QuestionOption>,
}

impl From<CreateQuestionRequest> for NewQuestion {
    fn from(req: CreateQuestionRequest) -> Self {
        let mut new = NewQuestion::new(req.questionnaire_id, req.order, req.question_type, req.text)
            .with_constraints(req.constraints)
            .with_options(req.options);
        if let Some(role) = req.role {
            new = new.with_role(role);
        }
        new
    }
}

/// Partial update; absent fields are left unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionRequest {
    #[serde(default)]
    pub text: Option<LocalizedText>,
    #[serde(default, rename = "type")]
    pub question_type: Option<QuestionType>,
    #[serde(default)]
    pub order: Option<u32>,
    /// Absent leaves the role alone; `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub role: Option<Option<QuestionRole>>,
    #[serde(default)]
    pub constraints: Option<QuestionConstraints>,
    #[serde(default)]
    pub options: Option<Vec<QuestionOption>>,
}

/// Marks a field as present, so an explicit `null` differs from absence.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl From<UpdateQuestionRequest> for QuestionPatch {
    fn from(req: UpdateQuestionRequest) -> Self {
        QuestionPatch {
            text: req.text,
            question_type: req.question_type,
            order: req.order,
            role: req.role,
            constraints: req.constraints,
            options: req.options,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalChildRequest {
    pub option_id: String,
    pub child_question_id: QuestionId,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReorderChildrenRequest {
    pub option_id: String,
    pub child_question_ids: Vec<QuestionId>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateQuestionResponse {
    pub question: Question,
    /// Conditional children whose order followed the parent's.
    pub children_reordered: usize,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalChildResponse {
    pub parent: Question,
    /// False when the request left the links as they were.
    pub changed: bool,
    pub children_reordered: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_request_deserializes_with_defaults() {
        let id = QuestionnaireId::new();
        let json = format!(
            r#"{{"questionnaireId": "{}", "order": 10, "type": "text", "text": {{"da": "Noter"}}}}"#,
            id
        );
        let req: CreateQuestionRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(req.questionnaire_id, id);
        assert_eq!(req.question_type, QuestionType::Text);
        assert!(req.options.is_empty());
        assert_eq!(req.constraints, QuestionConstraints::default());

        let new: NewQuestion = req.into();
        assert!(!new.locked);
        assert_eq!(new.order, 10);
    }

    #[test]
    fn update_request_maps_to_patch() {
        let json = r#"{"order": 12, "constraints": {"maxLength": 50}}"#;
        let req: UpdateQuestionRequest = serde_json::from_str(json).unwrap();
        let patch: QuestionPatch = req.into();
        assert_eq!(patch.order, Some(12));
        assert_eq!(patch.constraints, Some(QuestionConstraints::text(50)));
        assert!(patch.text.is_none());
    }

    #[test]
    fn update_request_tells_null_role_from_absent_role() {
        let absent: UpdateQuestionRequest = serde_json::from_str(r#"{"order": 3}"#).unwrap();
        assert_eq!(absent.role, None);

        let cleared: UpdateQuestionRequest = serde_json::from_str(r#"{"role": null}"#).unwrap();
        assert_eq!(cleared.role, Some(None));

        let set: UpdateQuestionRequest =
            serde_json::from_str(r#"{"role": "wake_time"}"#).unwrap();
        let patch: QuestionPatch = set.into();
        assert_eq!(patch.role, Some(Some(QuestionRole::WakeTime)));
    }

    #[test]
    fn list_params_use_camel_case() {
        let params: ListQuestionsParams = serde_json::from_str(
            r#"{"questionnaireId": "morning", "includeDeleted": true}"#,
        )
        .unwrap();
        assert_eq!(params.questionnaire_id, "morning");
        assert!(params.include_deleted);
        assert!(params.language.is_none());
    }
}
