//! GetQuestionnaireHandler - Query handler for a questionnaire by type.

use std::sync::Arc;

use crate::application::DiaryError;
use crate::domain::questionnaire::{Questionnaire, QuestionnaireType};
use crate::ports::QuestionnaireRepository;

#[derive(Debug, Clone, Copy)]
pub struct GetQuestionnaireQuery {
    pub questionnaire_type: QuestionnaireType,
}

pub struct GetQuestionnaireHandler {
    questionnaires: Arc<dyn QuestionnaireRepository>,
}

impl GetQuestionnaireHandler {
    pub fn new(questionnaires: Arc<dyn QuestionnaireRepository>) -> Self {
        Self { questionnaires }
    }

    pub async fn handle(&self, query: GetQuestionnaireQuery) -> Result<Questionnaire, DiaryError> {
        self.questionnaires
            .find_by_type(query.questionnaire_type)
            .await?
            .ok_or_else(|| DiaryError::QuestionnaireNotFound(query.questionnaire_type.to_string()))
    }
}
