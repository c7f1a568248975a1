//! CheckTodayHandler - Query handler for "has the user filled it in today?".

use std::sync::Arc;

use chrono_tz::Tz;

use crate::application::DiaryError;
use crate::domain::foundation::{ResponseId, Timestamp, UserId};
use crate::domain::questionnaire::QuestionnaireType;
use crate::ports::ResponseRepository;

#[derive(Debug, Clone)]
pub struct CheckTodayQuery {
    pub user_id: UserId,
    pub questionnaire_type: QuestionnaireType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TodayStatus {
    pub has_response: bool,
    pub response_id: Option<ResponseId>,
}

pub struct CheckTodayHandler {
    responses: Arc<dyn ResponseRepository>,
    timezone: Tz,
}

impl CheckTodayHandler {
    pub fn new(responses: Arc<dyn ResponseRepository>, timezone: Tz) -> Self {
        Self {
            responses,
            timezone,
        }
    }

    pub async fn handle(&self, query: CheckTodayQuery) -> Result<TodayStatus, DiaryError> {
        let (start, end) = Timestamp::now()
            .day_bounds(self.timezone)
            .ok_or_else(|| DiaryError::infrastructure("Could not determine the diary day"))?;
        let existing = self
            .responses
            .find_in_range(&query.user_id, query.questionnaire_type, start, end)
            .await?;
        let response_id = existing.first().map(|r| r.id());
        Ok(TodayStatus {
            has_response: response_id.is_some(),
            response_id,
        })
    }
}
