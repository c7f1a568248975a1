//! Questionnaire repository port.

use crate::domain::foundation::{DomainError, QuestionnaireId};
use crate::domain::questionnaire::{Questionnaire, QuestionnaireType};
use async_trait::async_trait;

#[async_trait]
pub trait QuestionnaireRepository: Send + Sync {
    /// The questionnaire of the given kind. There is one per kind.
    async fn find_by_type(
        &self,
        questionnaire_type: QuestionnaireType,
    ) -> Result<Option<Questionnaire>, DomainError>;

    async fn find_by_id(&self, id: &QuestionnaireId)
        -> Result<Option<Questionnaire>, DomainError>;

    /// Insert or replace a questionnaire.
    async fn save(&self, questionnaire: &Questionnaire) -> Result<(), DomainError>;
}
