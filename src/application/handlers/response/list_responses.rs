//! ListResponsesHandler - Query handler for a user's diaries.

use std::sync::Arc;

use crate::application::handlers::questionnaire::QuestionnaireResolver;
use crate::application::DiaryError;
use crate::domain::foundation::UserId;
use crate::domain::questionnaire::QuestionnaireRef;
use crate::domain::response::Response;
use crate::ports::ResponseRepository;

#[derive(Debug, Clone)]
pub struct ListResponsesQuery {
    pub user_id: UserId,
    /// Restrict to one questionnaire.
    pub questionnaire: Option<QuestionnaireRef>,
}

pub struct ListResponsesHandler {
    resolver: QuestionnaireResolver,
    responses: Arc<dyn ResponseRepository>,
}

impl ListResponsesHandler {
    pub fn new(resolver: QuestionnaireResolver, responses: Arc<dyn ResponseRepository>) -> Self {
        Self {
            resolver,
            responses,
        }
    }

    /// The user's responses, newest first.
    pub async fn handle(&self, query: ListResponsesQuery) -> Result<Vec<Response>, DiaryError> {
        let questionnaire_id = match query.questionnaire {
            Some(reference) => Some(self.resolver.resolve(reference).await?.id),
            None => None,
        };
        let responses = self
            .responses
            .find_by_user(&query.user_id, questionnaire_id.as_ref())
            .await?;
        Ok(responses)
    }
}
