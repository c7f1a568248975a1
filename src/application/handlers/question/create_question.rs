//! CreateQuestionHandler - Command handler for authoring a new question.

use std::sync::Arc;

use super::child_orders::ensure_order_free;
use crate::application::DiaryError;
use crate::domain::foundation::QuestionId;
use crate::domain::questionnaire::{NewQuestion, Question};
use crate::ports::{QuestionRepository, QuestionnaireRepository};

#[derive(Debug, Clone)]
pub struct CreateQuestionCommand {
    pub question: NewQuestion,
}

pub struct CreateQuestionHandler {
    questions: Arc<dyn QuestionRepository>,
    questionnaires: Arc<dyn QuestionnaireRepository>,
}

impl CreateQuestionHandler {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        questionnaires: Arc<dyn QuestionnaireRepository>,
    ) -> Self {
        Self {
            questions,
            questionnaires,
        }
    }

    pub async fn handle(&self, cmd: CreateQuestionCommand) -> Result<Question, DiaryError> {
        let questionnaire_id = cmd.question.questionnaire_id;

        // 1. Questionnaire must exist
        if self.questionnaires.find_by_id(&questionnaire_id).await?.is_none() {
            return Err(DiaryError::QuestionnaireNotFound(
                questionnaire_id.to_string(),
            ));
        }

        // 2. Build and validate the question
        let question = Question::create(QuestionId::new(), cmd.question)?;

        // 3. Order must be unused among active questions
        let siblings = self
            .questions
            .find_by_questionnaire(&questionnaire_id, false)
            .await?;
        ensure_order_free(&siblings, question.order(), &[])?;

        // 4. Persist
        self.questions.save(&question).await?;

        tracing::info!(
            question_id = %question.id(),
            questionnaire_id = %questionnaire_id,
            order = question.order(),
            "Question created"
        );
        Ok(question)
    }
}
