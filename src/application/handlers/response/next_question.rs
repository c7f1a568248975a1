//! NextQuestionHandler - Query handler for flow navigation.

use std::sync::Arc;

use super::validate_answers::validate;
use crate::application::handlers::questionnaire::QuestionnaireResolver;
use crate::application::DiaryError;
use crate::domain::flow::{ConditionalEvaluator, FlowNavigator, RuleValidator};
use crate::domain::foundation::{Language, QuestionId};
use crate::domain::questionnaire::{QuestionView, QuestionnaireRef};
use crate::domain::response::AnswerSet;
use crate::ports::QuestionRepository;

#[derive(Debug, Clone)]
pub struct NextQuestionQuery {
    pub questionnaire: QuestionnaireRef,
    pub answers: AnswerSet,
    /// The question on screen; `None` asks for the first question.
    pub current_question_id: Option<QuestionId>,
    pub language: Language,
}

#[derive(Debug, Clone, Default)]
pub struct NextQuestionResult {
    /// `None` when the questionnaire is finished.
    pub question: Option<QuestionView>,
    /// Children of `question` already revealed by the answers so far.
    pub revealed_children: Vec<QuestionView>,
}

pub struct NextQuestionHandler {
    resolver: QuestionnaireResolver,
    questions: Arc<dyn QuestionRepository>,
}

impl NextQuestionHandler {
    pub fn new(resolver: QuestionnaireResolver, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            resolver,
            questions,
        }
    }

    pub async fn handle(&self, query: NextQuestionQuery) -> Result<NextQuestionResult, DiaryError> {
        // 1. Resolve the questionnaire and load its active questions
        let questionnaire = self.resolver.resolve(query.questionnaire).await?;
        let questions = self
            .questions
            .find_by_questionnaire(&questionnaire.id, false)
            .await?;

        // 2. Answers so far must be consistent
        let answers = validate(&RuleValidator::new(&questions), &query.answers, questionnaire.id)?;

        // 3. First eligible root after the current question
        let next = FlowNavigator::next_question(&questions, &answers, query.current_question_id)?;

        tracing::debug!(
            questionnaire_id = %questionnaire.id,
            current_question_id = ?query.current_question_id,
            next_question_id = ?next.map(|q| q.id()),
            "Navigated"
        );

        let Some(next) = next else {
            return Ok(NextQuestionResult::default());
        };
        let revealed_children = ConditionalEvaluator::revealed_children(next, &answers, &questions)
            .into_iter()
            .map(|q| q.translate(query.language))
            .collect();
        Ok(NextQuestionResult {
            question: Some(next.translate(query.language)),
            revealed_children,
        })
    }
}
