//! QuestionnaireResolver - normalizes a questionnaire keyword or id.

use std::sync::Arc;

use crate::application::DiaryError;
use crate::domain::questionnaire::{QuestionnaireRef, ResolvedQuestionnaire};
use crate::ports::QuestionnaireRepository;

/// Resolves `"morning"`/`"evening"` or a concrete id to a stored questionnaire.
#[derive(Clone)]
pub struct QuestionnaireResolver {
    questionnaires: Arc<dyn QuestionnaireRepository>,
}

impl QuestionnaireResolver {
    pub fn new(questionnaires: Arc<dyn QuestionnaireRepository>) -> Self {
        Self { questionnaires }
    }

    pub async fn resolve(
        &self,
        reference: QuestionnaireRef,
    ) -> Result<ResolvedQuestionnaire, DiaryError> {
        let found = match reference {
            QuestionnaireRef::Type(kind) => self.questionnaires.find_by_type(kind).await?,
            QuestionnaireRef::Id(id) => self.questionnaires.find_by_id(&id).await?,
        };
        found
            .map(|q| q.resolved())
            .ok_or_else(|| DiaryError::QuestionnaireNotFound(reference.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::Stores;
    use crate::domain::foundation::QuestionnaireId;
    use crate::domain::questionnaire::QuestionnaireType;

    #[tokio::test]
    async fn keyword_and_id_resolve_to_the_same_questionnaire() {
        let stores = Stores::seeded().await;
        let resolver = QuestionnaireResolver::new(stores.questionnaires.clone());

        let by_type = resolver
            .resolve(QuestionnaireRef::Type(QuestionnaireType::Morning))
            .await
            .unwrap();
        let by_id = resolver
            .resolve(QuestionnaireRef::Id(by_type.id))
            .await
            .unwrap();

        assert_eq!(by_type, by_id);
        assert_eq!(by_id.questionnaire_type, QuestionnaireType::Morning);
    }

    #[tokio::test]
    async fn unknown_id_is_not_found() {
        let stores = Stores::seeded().await;
        let resolver = QuestionnaireResolver::new(stores.questionnaires.clone());
        let id = QuestionnaireId::new();

        let result = resolver.resolve(QuestionnaireRef::Id(id)).await;
        assert_eq!(result, Err(DiaryError::QuestionnaireNotFound(id.to_string())));
    }
}
