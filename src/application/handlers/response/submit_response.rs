//! SubmitResponseHandler - Command handler for submitting a diary.

use std::sync::Arc;

use chrono_tz::Tz;

use super::validate_answers::validate;
use crate::application::handlers::questionnaire::QuestionnaireResolver;
use crate::application::DiaryError;
use crate::domain::flow::RuleValidator;
use crate::domain::foundation::{ResponseId, Timestamp, UserId};
use crate::domain::questionnaire::{QuestionnaireRef, QuestionnaireType, ResolvedQuestionnaire};
use crate::domain::response::{AnswerSet, Response, SleepCalculator};
use crate::ports::{QuestionRepository, ResponseRepository};

#[derive(Debug, Clone)]
pub struct SubmitResponseCommand {
    pub user_id: UserId,
    pub questionnaire: QuestionnaireRef,
    pub answers: AnswerSet,
}

/// Validates and stores one diary per user, questionnaire type and day.
///
/// The day is measured in the diary's configured time zone, not the
/// caller's. Morning diaries get their sleep parameters on submission.
pub struct SubmitResponseHandler {
    resolver: QuestionnaireResolver,
    questions: Arc<dyn QuestionRepository>,
    responses: Arc<dyn ResponseRepository>,
    timezone: Tz,
}

impl SubmitResponseHandler {
    pub fn new(
        resolver: QuestionnaireResolver,
        questions: Arc<dyn QuestionRepository>,
        responses: Arc<dyn ResponseRepository>,
        timezone: Tz,
    ) -> Self {
        Self {
            resolver,
            questions,
            responses,
            timezone,
        }
    }

    pub async fn handle(&self, cmd: SubmitResponseCommand) -> Result<Response, DiaryError> {
        // 1. Resolve the questionnaire
        let questionnaire = self.resolver.resolve(cmd.questionnaire).await?;

        // 2. One response per user, type and day
        let now = Timestamp::now();
        self.ensure_first_today(&cmd.user_id, questionnaire, now)
            .await?;

        // 3. Validate against the current questions
        let questions = self
            .questions
            .find_by_questionnaire(&questionnaire.id, false)
            .await?;
        let validator = RuleValidator::new(&questions);
        let answers = validate(&validator, &cmd.answers, questionnaire.id)?;

        // 4. Build the response; morning diaries carry sleep parameters
        let mut response = Response::new(
            ResponseId::new(),
            cmd.user_id,
            questionnaire,
            answers,
            now,
        );
        if questionnaire.questionnaire_type == QuestionnaireType::Morning {
            let params = SleepCalculator::calculate(response.answers(), validator.roles())?;
            response.attach_sleep_parameters(params);
        }

        // 5. Persist
        self.responses.save(&response).await?;

        tracing::info!(
            response_id = %response.id(),
            user_id = %response.user_id(),
            questionnaire_id = %questionnaire.id,
            questionnaire_type = %questionnaire.questionnaire_type,
            "Response submitted"
        );
        Ok(response)
    }

    async fn ensure_first_today(
        &self,
        user_id: &UserId,
        questionnaire: ResolvedQuestionnaire,
        now: Timestamp,
    ) -> Result<(), DiaryError> {
        let (start, end) = now
            .day_bounds(self.timezone)
            .ok_or_else(|| DiaryError::infrastructure("Could not determine the diary day"))?;
        let existing = self
            .responses
            .find_in_range(user_id, questionnaire.questionnaire_type, start, end)
            .await?;
        if !existing.is_empty() {
            tracing::warn!(
                user_id = %user_id,
                questionnaire_type = %questionnaire.questionnaire_type,
                "Duplicate response for today"
            );
            return Err(DiaryError::DuplicateResponse(
                questionnaire.questionnaire_type,
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::test_support::{citizen, FailingStore, Stores};
    use crate::domain::response::SleepParameters;

    fn handler(stores: &Stores) -> SubmitResponseHandler {
        SubmitResponseHandler::new(
            QuestionnaireResolver::new(stores.questionnaires.clone()),
            stores.questions.clone(),
            stores.responses.clone(),
            chrono_tz::Europe::Copenhagen,
        )
    }

    async fn full_morning(stores: &Stores) -> AnswerSet {
        AnswerSet::new()
            .with(stores.morning_id(1).await, "med_no")
            .with(stores.morning_id(2).await, "Læste en bog")
            .with(stores.morning_id(3).await, "22:30")
            .with(stores.morning_id(4).await, "23:00")
            .with(stores.morning_id(5).await, 20)
            .with(stores.morning_id(6).await, "wake_yes")
            .with(stores.morning_id(601).await, 1)
            .with(stores.morning_id(602).await, 15)
            .with(stores.morning_id(7).await, "06:30")
            .with(stores.morning_id(8).await, "07:00")
            .with(stores.morning_id(9).await, 4)
    }

    fn morning_cmd(answers: AnswerSet) -> SubmitResponseCommand {
        SubmitResponseCommand {
            user_id: citizen(),
            questionnaire: QuestionnaireRef::Type(QuestionnaireType::Morning),
            answers,
        }
    }

    #[tokio::test]
    async fn morning_response_gets_sleep_parameters() {
        let stores = Stores::seeded().await;
        let answers = full_morning(&stores).await;

        let response = handler(&stores).handle(morning_cmd(answers)).await.unwrap();

        assert_eq!(
            response.sleep_parameters(),
            Some(SleepParameters {
                sol: 20,
                waso: 15,
                tib: 510,
                tst: 415,
            })
        );
        let stored = stores.responses.find_by_id(&response.id()).await.unwrap();
        assert_eq!(stored, Some(response));
    }

    #[tokio::test]
    async fn second_response_same_day_is_rejected() {
        let stores = Stores::seeded().await;
        let answers = full_morning(&stores).await;
        let handler = handler(&stores);

        handler.handle(morning_cmd(answers.clone())).await.unwrap();
        let second = handler.handle(morning_cmd(answers)).await;

        assert_eq!(
            second.unwrap_err(),
            DiaryError::DuplicateResponse(QuestionnaireType::Morning)
        );
        let all = stores.responses.find_by_user(&citizen(), None).await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn evening_and_morning_are_counted_separately() {
        let stores = Stores::seeded().await;
        let handler = handler(&stores);
        handler
            .handle(morning_cmd(full_morning(&stores).await))
            .await
            .unwrap();

        let evening = handler
            .handle(SubmitResponseCommand {
                user_id: citizen(),
                questionnaire: QuestionnaireRef::Type(QuestionnaireType::Evening),
                answers: AnswerSet::new(),
            })
            .await
            .unwrap();

        assert_eq!(evening.questionnaire_type(), QuestionnaireType::Evening);
        assert!(evening.sleep_parameters().is_none());
    }

    #[tokio::test]
    async fn invalid_answers_are_not_stored() {
        let stores = Stores::seeded().await;
        let mut answers = full_morning(&stores).await;
        answers.insert(stores.morning_id(8).await, "06:00");

        let result = handler(&stores).handle(morning_cmd(answers)).await;

        assert!(matches!(result, Err(DiaryError::Validation(_))));
        assert!(stores
            .responses
            .find_by_user(&citizen(), None)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn hidden_wake_minutes_do_not_count_as_waso() {
        let stores = Stores::seeded().await;
        let answers = AnswerSet::new()
            .with(stores.morning_id(3).await, "22:30")
            .with(stores.morning_id(4).await, "23:00")
            .with(stores.morning_id(5).await, 20)
            .with(stores.morning_id(602).await, 240)
            .with(stores.morning_id(7).await, "06:30")
            .with(stores.morning_id(8).await, "07:00");

        let response = handler(&stores).handle(morning_cmd(answers)).await.unwrap();

        let params = response.sleep_parameters().unwrap();
        assert_eq!(params.waso, 0);
        assert_eq!(params.tst, 430);
        assert!(!response.answers().contains(&stores.morning_id(602).await));
    }

    #[tokio::test]
    async fn missing_sleep_times_are_a_validation_error() {
        let stores = Stores::seeded().await;
        let answers = AnswerSet::new().with(stores.morning_id(6).await, "wake_no");

        let result = handler(&stores).handle(morning_cmd(answers)).await;

        assert!(matches!(result, Err(DiaryError::Validation(_))));
    }

    #[tokio::test]
    async fn store_failure_is_internal() {
        let stores = Stores::seeded().await;
        let answers = full_morning(&stores).await;
        let handler = SubmitResponseHandler::new(
            QuestionnaireResolver::new(stores.questionnaires.clone()),
            stores.questions.clone(),
            Arc::new(FailingStore),
            chrono_tz::Europe::Copenhagen,
        );

        let result = handler.handle(morning_cmd(answers)).await;
        assert!(result.unwrap_err().is_internal());
    }
}
