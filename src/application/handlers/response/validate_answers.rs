//! ValidateAnswersHandler - Command handler for checking an answer set.

use std::sync::Arc;

use crate::application::handlers::questionnaire::QuestionnaireResolver;
use crate::application::DiaryError;
use crate::domain::flow::RuleValidator;
use crate::domain::foundation::QuestionnaireId;
use crate::domain::questionnaire::{QuestionnaireRef, ResolvedQuestionnaire};
use crate::domain::response::AnswerSet;
use crate::ports::QuestionRepository;

#[derive(Debug, Clone)]
pub struct ValidateAnswersCommand {
    pub questionnaire: QuestionnaireRef,
    pub answers: AnswerSet,
}

#[derive(Debug, Clone)]
pub struct ValidateAnswersResult {
    pub questionnaire: ResolvedQuestionnaire,
    /// The submitted answers with derived defaults filled in.
    pub answers: AnswerSet,
}

pub struct ValidateAnswersHandler {
    resolver: QuestionnaireResolver,
    questions: Arc<dyn QuestionRepository>,
}

impl ValidateAnswersHandler {
    pub fn new(resolver: QuestionnaireResolver, questions: Arc<dyn QuestionRepository>) -> Self {
        Self {
            resolver,
            questions,
        }
    }

    pub async fn handle(
        &self,
        cmd: ValidateAnswersCommand,
    ) -> Result<ValidateAnswersResult, DiaryError> {
        let questionnaire = self.resolver.resolve(cmd.questionnaire).await?;
        let questions = self
            .questions
            .find_by_questionnaire(&questionnaire.id, false)
            .await?;
        let answers = validate(&RuleValidator::new(&questions), &cmd.answers, questionnaire.id)?;
        Ok(ValidateAnswersResult {
            questionnaire,
            answers,
        })
    }
}

/// Runs the validator, logging the rule a rejected set breaks.
pub(super) fn validate(
    validator: &RuleValidator<'_>,
    answers: &AnswerSet,
    questionnaire_id: QuestionnaireId,
) -> Result<AnswerSet, DiaryError> {
    validator.validate(answers).map_err(|violation| {
        tracing::warn!(
            questionnaire_id = %questionnaire_id,
            question_id = ?violation.question_id,
            reason = %violation.message.en,
            "Answers rejected"
        );
        DiaryError::from(violation)
    })
}
