//! Response aggregate - one submitted diary.
//!
//! # Invariants
//!
//! - at most one response per user, questionnaire type and diary day
//!   (enforced by the submitting handler against the store)
//! - answers never change after creation; only sleep parameters are
//!   recomputed

use serde::{Deserialize, Serialize};

use super::{AnswerSet, SleepParameters};
use crate::domain::foundation::{QuestionnaireId, ResponseId, Timestamp, UserId};
use crate::domain::questionnaire::{QuestionnaireType, ResolvedQuestionnaire};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    id: ResponseId,
    user_id: UserId,
    questionnaire_id: QuestionnaireId,
    questionnaire_type: QuestionnaireType,
    answers: AnswerSet,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sleep_parameters: Option<SleepParameters>,
    created_at: Timestamp,
}

impl Response {
    pub fn new(
        id: ResponseId,
        user_id: UserId,
        questionnaire: ResolvedQuestionnaire,
        answers: AnswerSet,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user_id,
            questionnaire_id: questionnaire.id,
            questionnaire_type: questionnaire.questionnaire_type,
            answers,
            sleep_parameters: None,
            created_at,
        }
    }

    pub fn id(&self) -> ResponseId {
        self.id
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn questionnaire_id(&self) -> QuestionnaireId {
        self.questionnaire_id
    }

    pub fn questionnaire_type(&self) -> QuestionnaireType {
        self.questionnaire_type
    }

    pub fn questionnaire(&self) -> ResolvedQuestionnaire {
        ResolvedQuestionnaire {
            id: self.questionnaire_id,
            questionnaire_type: self.questionnaire_type,
        }
    }

    pub fn answers(&self) -> &AnswerSet {
        &self.answers
    }

    pub fn sleep_parameters(&self) -> Option<SleepParameters> {
        self.sleep_parameters
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }

    /// Replaces the derived sleep parameters.
    pub fn attach_sleep_parameters(&mut self, params: SleepParameters) {
        self.sleep_parameters = Some(params);
    }
}
