//! In-memory response store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{
    DomainError, ErrorCode, QuestionnaireId, ResponseId, Timestamp, UserId,
};
use crate::domain::questionnaire::QuestionnaireType;
use crate::domain::response::Response;
use crate::ports::ResponseRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryResponseRepository {
    responses: Arc<RwLock<HashMap<ResponseId, Response>>>,
}

impl InMemoryResponseRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn newest_first(mut responses: Vec<Response>) -> Vec<Response> {
    responses.sort_by(|a, b| b.created_at().cmp(&a.created_at()));
    responses
}

#[async_trait]
impl ResponseRepository for InMemoryResponseRepository {
    async fn save(&self, response: &Response) -> Result<(), DomainError> {
        self.responses
            .write()
            .await
            .insert(response.id(), response.clone());
        Ok(())
    }

    async fn update(&self, response: &Response) -> Result<(), DomainError> {
        let mut responses = self.responses.write().await;
        match responses.get_mut(&response.id()) {
            Some(stored) => {
                *stored = response.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ResponseNotFound,
                format!("Response not found: {}", response.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &ResponseId) -> Result<Option<Response>, DomainError> {
        Ok(self.responses.read().await.get(id).cloned())
    }

    async fn find_by_user(
        &self,
        user_id: &UserId,
        questionnaire_id: Option<&QuestionnaireId>,
    ) -> Result<Vec<Response>, DomainError> {
        let responses = self.responses.read().await;
        Ok(newest_first(
            responses
                .values()
                .filter(|r| r.is_owned_by(user_id))
                .filter(|r| questionnaire_id.map_or(true, |id| r.questionnaire_id() == *id))
                .cloned()
                .collect(),
        ))
    }

    async fn find_in_range(
        &self,
        user_id: &UserId,
        questionnaire_type: QuestionnaireType,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Response>, DomainError> {
        let responses = self.responses.read().await;
        Ok(newest_first(
            responses
                .values()
                .filter(|r| r.is_owned_by(user_id))
                .filter(|r| r.questionnaire_type() == questionnaire_type)
                .filter(|r| r.created_at() >= start && r.created_at() < end)
                .cloned()
                .collect(),
        ))
    }
}
