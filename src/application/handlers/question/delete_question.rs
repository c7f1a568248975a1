//! DeleteQuestionHandler - Command handler for retiring a question.

use std::sync::Arc;

use crate::application::DiaryError;
use crate::domain::foundation::{QuestionId, Timestamp};
use crate::domain::questionnaire::Question;
use crate::ports::QuestionRepository;

#[derive(Debug, Clone, Copy)]
pub struct DeleteQuestionCommand {
    pub question_id: QuestionId,
}

/// Soft-deletes questions so past responses can still show them.
pub struct DeleteQuestionHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl DeleteQuestionHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(&self, cmd: DeleteQuestionCommand) -> Result<Question, DiaryError> {
        let mut question = self
            .questions
            .find_by_id(&cmd.question_id, true)
            .await?
            .ok_or(DiaryError::QuestionNotFound(cmd.question_id))?;

        if question.is_deleted() {
            return Ok(question);
        }
        question.soft_delete(Timestamp::now())?;
        self.questions.save(&question).await?;

        tracing::info!(question_id = %question.id(), "Question deleted");
        Ok(question)
    }
}
