//! StartQuestionnaireHandler - Query handler for the first question.

use std::sync::Arc;

use super::QuestionnaireResolver;
use crate::application::DiaryError;
use crate::domain::flow::FlowNavigator;
use crate::domain::foundation::Language;
use crate::domain::questionnaire::{QuestionView, QuestionnaireRef, ResolvedQuestionnaire};
use crate::domain::response::AnswerSet;
use crate::ports::QuestionRepository;

#[derive(Debug, Clone, Copy)]
pub struct StartQuestionnaireQuery {
    pub questionnaire: QuestionnaireRef,
    pub language: Language,
}

#[derive(Debug, Clone)]
pub struct StartQuestionnaireResult {
    pub questionnaire: ResolvedQuestionnaire,
    /// `None` when the questionnaire has no active questions.
    pub first_question: Option<QuestionView>,
}

pub struct StartQuestionnaireHandler {
    resolver: QuestionnaireResolver,
    questions: Arc<dyn QuestionRepository>,
}

impl StartQuestionnaireHandler {
    pub fn new(resolver: QuestionnaireResolver, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            resolver,
            questions,
        }
    }

    pub async fn handle(
        &self,
        query: StartQuestionnaireQuery,
    ) -> Result<StartQuestionnaireResult, DiaryError> {
        let questionnaire = self.resolver.resolve(query.questionnaire).await?;
        let questions = self
            .questions
            .find_by_questionnaire(&questionnaire.id, false)
            .await?;

        let first_question = FlowNavigator::next_question(&questions, &AnswerSet::new(), None)?
            .map(|q| q.translate(query.language));

        tracing::debug!(
            questionnaire_id = %questionnaire.id,
            first_question_id = ?first_question.as_ref().map(|q| q.id),
            "Questionnaire started"
        );
        Ok(StartQuestionnaireResult {
            questionnaire,
            first_question,
        })
    }
}
