//! In-memory questionnaire store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, QuestionnaireId};
use crate::domain::questionnaire::{Questionnaire, QuestionnaireType};
use crate::ports::QuestionnaireRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionnaireRepository {
    questionnaires: Arc<RwLock<HashMap<QuestionnaireId, Questionnaire>>>,
}

impl InMemoryQuestionnaireRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl QuestionnaireRepository for InMemoryQuestionnaireRepository {
    async fn find_by_type(
        &self,
        questionnaire_type: QuestionnaireType,
    ) -> Result<Option<Questionnaire>, DomainError> {
        let questionnaires = self.questionnaires.read().await;
        Ok(questionnaires
            .values()
            .find(|q| q.questionnaire_type == questionnaire_type)
            .cloned())
    }

    async fn find_by_id(
        &self,
        id: &QuestionnaireId,
    ) -> Result<Option<Questionnaire>, DomainError> {
        Ok(self.questionnaires.read().await.get(id).cloned())
    }

    async fn save(&self, questionnaire: &Questionnaire) -> Result<(), DomainError> {
        self.questionnaires
            .write()
            .await
            .insert(questionnaire.id, questionnaire.clone());
        Ok(())
    }
}
