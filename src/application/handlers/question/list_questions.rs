//! ListQuestionsHandler - Query handler for a questionnaire's questions.

use std::sync::Arc;

use crate::application::handlers::questionnaire::QuestionnaireResolver;
use crate::application::DiaryError;
use crate::domain::foundation::Language;
use crate::domain::questionnaire::{QuestionView, QuestionnaireRef};
use crate::ports::QuestionRepository;

#[derive(Debug, Clone, Copy)]
pub struct ListQuestionsQuery {
    pub questionnaire: QuestionnaireRef,
    pub language: Language,
    pub include_deleted: bool,
}

pub struct ListQuestionsHandler {
    resolver: QuestionnaireResolver,
    questions: Arc<dyn QuestionRepository>,
}

impl ListQuestionsHandler {
    pub fn new(resolver: QuestionnaireResolver, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            resolver,
            questions,
        }
    }

    /// All questions by ascending order, conditional children included.
    pub async fn handle(&self, query: ListQuestionsQuery) -> Result<Vec<QuestionView>, DiaryError> {
        let questionnaire = self.resolver.resolve(query.questionnaire).await?;
        let questions = self
            .questions
            .find_by_questionnaire(&questionnaire.id, query.include_deleted)
            .await?;
        Ok(questions
            .iter()
            .map(|q| q.translate(query.language))
            .collect())
    }
}
