//! GetQuestionHandler - Query handler for a single translated question.

use std::sync::Arc;

use crate::application::DiaryError;
use crate::domain::foundation::{Language, QuestionId};
use crate::domain::questionnaire::QuestionView;
use crate::ports::QuestionRepository;

#[derive(Debug, Clone, Copy)]
pub struct GetQuestionQuery {
    pub question_id: QuestionId,
    pub language: Language,
    pub include_deleted: bool,
}

pub struct GetQuestionHandler {
    questions: Arc<dyn QuestionRepository>,
}

impl GetQuestionHandler {
    pub fn new(questions: Arc<dyn QuestionRepository>) -> Self {
        Self { questions }
    }

    pub async fn handle(&self, query: GetQuestionQuery) -> Result<QuestionView, DiaryError> {
        self.questions
            .find_by_id(&query.question_id, query.include_deleted)
            .await?
            .map(|q| q.translate(query.language))
            .ok_or(DiaryError::QuestionNotFound(query.question_id))
    }
}
