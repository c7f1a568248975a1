//! Fixtures shared by handler tests.

use std::sync::Arc;

use async_trait::async_trait;

use crate::adapters::memory::{
    InMemoryQuestionRepository, InMemoryQuestionnaireRepository, InMemoryResponseRepository,
};
use crate::adapters::seed::DiarySeeder;
use crate::domain::foundation::{
    DomainError, QuestionId, QuestionnaireId, ResponseId, Timestamp, UserId,
};
use crate::domain::questionnaire::{Question, QuestionnaireType};
use crate::domain::response::Response;
use crate::ports::{QuestionRepository, QuestionnaireRepository, ResponseRepository};

/// In-memory stores holding the default diary.
pub struct Stores {
    pub questionnaires: Arc<InMemoryQuestionnaireRepository>,
    pub questions: Arc<InMemoryQuestionRepository>,
    pub responses: Arc<InMemoryResponseRepository>,
}

impl Stores {
    pub async fn seeded() -> Self {
        let stores = Self {
            questionnaires: Arc::new(InMemoryQuestionnaireRepository::new()),
            questions: Arc::new(InMemoryQuestionRepository::new()),
            responses: Arc::new(InMemoryResponseRepository::new()),
        };
        DiarySeeder::new(stores.questionnaires.clone(), stores.questions.clone())
            .seed()
            .await
            .unwrap();
        stores
    }

    pub async fn questionnaire_id(&self, kind: QuestionnaireType) -> QuestionnaireId {
        self.questionnaires
            .find_by_type(kind)
            .await
            .unwrap()
            .unwrap()
            .id
    }

    pub async fn morning_questions(&self) -> Vec<Question> {
        let id = self.questionnaire_id(QuestionnaireType::Morning).await;
        self.questions.find_by_questionnaire(&id, false).await.unwrap()
    }

    /// The active morning question at `order`.
    pub async fn morning_question(&self, order: u32) -> Question {
        self.morning_questions()
            .await
            .into_iter()
            .find(|q| q.order() == order)
            .unwrap()
    }

    pub async fn morning_id(&self, order: u32) -> QuestionId {
        self.morning_question(order).await.id()
    }
}

pub fn citizen() -> UserId {
    UserId::new("citizen-42").unwrap()
}

/// A store whose every call fails.
pub struct FailingStore;

fn failure() -> DomainError {
    DomainError::database("Simulated store failure")
}

#[async_trait]
impl QuestionRepository for FailingStore {
    async fn find_by_id(
        &self,
        _id: &QuestionId,
        _include_deleted: bool,
    ) -> Result<Option<Question>, DomainError> {
        Err(failure())
    }

    async fn find_by_questionnaire(
        &self,
        _questionnaire_id: &QuestionnaireId,
        _include_deleted: bool,
    ) -> Result<Vec<Question>, DomainError> {
        Err(failure())
    }

    async fn save(&self, _question: &Question) -> Result<(), DomainError> {
        Err(failure())
    }
}

#[async_trait]
impl ResponseRepository for FailingStore {
    async fn save(&self, _response: &Response) -> Result<(), DomainError> {
        Err(failure())
    }

    async fn update(&self, _response: &Response) -> Result<(), DomainError> {
        Err(failure())
    }

    async fn find_by_id(&self, _id: &ResponseId) -> Result<Option<Response>, DomainError> {
        Err(failure())
    }

    async fn find_by_user(
        &self,
        _user_id: &UserId,
        _questionnaire_id: Option<&QuestionnaireId>,
    ) -> Result<Vec<Response>, DomainError> {
        Err(failure())
    }

    async fn find_in_range(
        &self,
        _user_id: &UserId,
        _questionnaire_type: QuestionnaireType,
        _start: Timestamp,
        _end: Timestamp,
    ) -> Result<Vec<Response>, DomainError> {
        Err(failure())
    }
}
