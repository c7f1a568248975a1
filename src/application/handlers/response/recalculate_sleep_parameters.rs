//! RecalculateSleepParametersHandler - Command handler for recomputing a
//! stored morning diary's sleep parameters.

use std::sync::Arc;

use crate::application::DiaryError;
use crate::domain::foundation::ResponseId;
use crate::domain::flow::RuleValidator;
use crate::domain::questionnaire::QuestionnaireType;
use crate::domain::response::{SleepCalculator, SleepParameters};
use crate::ports::{QuestionRepository, ResponseRepository};

#[derive(Debug, Clone, Copy)]
pub struct RecalculateSleepParametersCommand {
    pub response_id: ResponseId,
}

/// Recomputes from the stored answers without re-validating them.
///
/// Answers to children hidden by their parent's answer are ignored.
pub struct RecalculateSleepParametersHandler {
    questions: Arc<dyn QuestionRepository>,
    responses: Arc<dyn ResponseRepository>,
}

impl RecalculateSleepParametersHandler {
    pub fn new(
        questions: Arc<dyn QuestionRepository>,
        responses: Arc<dyn ResponseRepository>,
    ) -> Self {
        Self {
            questions,
            responses,
        }
    }

    pub async fn handle(
        &self,
        cmd: RecalculateSleepParametersCommand,
    ) -> Result<SleepParameters, DiaryError> {
        // 1. Load the response
        let mut response = self
            .responses
            .find_by_id(&cmd.response_id)
            .await?
            .ok_or(DiaryError::ResponseNotFound(cmd.response_id))?;
        if response.questionnaire_type() != QuestionnaireType::Morning {
            return Err(DiaryError::validation(
                "Søvnparametre beregnes kun for morgenskemaet.",
                "Sleep parameters are only calculated for morning responses.",
            ));
        }

        // 2. Resolve roles and visibility against the current questions
        let questions = self
            .questions
            .find_by_questionnaire(&response.questionnaire_id(), false)
            .await?;
        let validator = RuleValidator::new(&questions);
        let answers = validator.visible_answers(response.answers());

        // 3. Recompute and persist
        let params = SleepCalculator::calculate(&answers, validator.roles())?;
        response.attach_sleep_parameters(params);
        self.responses.update(&response).await?;

        tracing::info!(
            response_id = %response.id(),
            tst = params.tst,
            tib = params.tib,
            "Sleep parameters recalculated"
        );
        Ok(params)
    }
}
