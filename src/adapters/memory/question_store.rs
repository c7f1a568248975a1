//! In-memory question store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, QuestionId, QuestionnaireId};
use crate::domain::questionnaire::Question;
use crate::ports::QuestionRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryQuestionRepository {
    questions: Arc<RwLock<HashMap<QuestionId, Question>>>,
}

impl InMemoryQuestionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored questions, deleted ones included.
    pub async fn len(&self) -> usize {
        self.questions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.questions.read().await.is_empty()
    }
}

#[async_trait]
impl QuestionRepository for InMemoryQuestionRepository {
    async fn find_by_id(
        &self,
        id: &QuestionId,
        include_deleted: bool,
    ) -> Result<Option<Question>, DomainError> {
        let questions = self.questions.read().await;
        Ok(questions
            .get(id)
            .filter(|q| include_deleted || !q.is_deleted())
            .cloned())
    }

    async fn find_by_questionnaire(
        &self,
        questionnaire_id: &QuestionnaireId,
        include_deleted: bool,
    ) -> Result<Vec<Question>, DomainError> {
        let questions = self.questions.read().await;
        let mut found: Vec<Question> = questions
            .values()
            .filter(|q| q.questionnaire_id() == *questionnaire_id)
            .filter(|q| include_deleted || !q.is_deleted())
            .cloned()
            .collect();
        found.sort_by_key(|q| q.order());
        Ok(found)
    }

    async fn save(&self, question: &Question) -> Result<(), DomainError> {
        self.questions
            .write()
            .await
            .insert(question.id(), question.clone());
        Ok(())
    }
}
