//! Question repository port.
//!
//! Soft-deleted questions are hidden unless a query asks for them, so
//! historical responses can still render questions that were retired.

use crate::domain::foundation::{DomainError, QuestionId, QuestionnaireId};
use crate::domain::questionnaire::Question;
use async_trait::async_trait;

#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// Find a question by id.
    ///
    /// Returns `None` if absent, or if deleted and `include_deleted` is false.
    async fn find_by_id(
        &self,
        id: &QuestionId,
        include_deleted: bool,
    ) -> Result<Option<Question>, DomainError>;

    /// All questions of a questionnaire, ascending by order.
    async fn find_by_questionnaire(
        &self,
        questionnaire_id: &QuestionnaireId,
        include_deleted: bool,
    ) -> Result<Vec<Question>, DomainError>;

    /// Insert or replace a question.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, question: &Question) -> Result<(), DomainError>;
}
