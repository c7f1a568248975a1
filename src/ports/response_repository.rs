//! Response repository port.
//!
//! The store is not required to enforce one response per user, type and
//! day. Submitting handlers check before inserting, which leaves a window
//! for concurrent duplicates unless an implementation adds a unique index
//! on `(user_id, questionnaire_type, diary day)`.

use crate::domain::foundation::{DomainError, QuestionnaireId, ResponseId, Timestamp, UserId};
use crate::domain::questionnaire::QuestionnaireType;
use crate::domain::response::Response;
use async_trait::async_trait;

#[async_trait]
pub trait ResponseRepository: Send + Sync {
    /// Save a new response.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, response: &Response) -> Result<(), DomainError>;

    /// Replace a stored response.
    ///
    /// # Errors
    ///
    /// - `ResponseNotFound` if the response doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, response: &Response) -> Result<(), DomainError>;

    async fn find_by_id(&self, id: &ResponseId) -> Result<Option<Response>, DomainError>;

    /// A user's responses, newest first, optionally for one questionnaire.
    async fn find_by_user(
        &self,
        user_id: &UserId,
        questionnaire_id: Option<&QuestionnaireId>,
    ) -> Result<Vec<Response>, DomainError>;

    /// A user's responses of one kind created in `[start, end)`.
    async fn find_in_range(
        &self,
        user_id: &UserId,
        questionnaire_type: QuestionnaireType,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<Response>, DomainError>;
}
