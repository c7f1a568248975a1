//! Response command and query handlers.

mod check_today;
mod list_responses;
mod next_question;
mod recalculate_sleep_parameters;
mod submit_response;
mod validate_answers;

pub use check_today::{CheckTodayHandler, CheckTodayQuery, TodayStatus};
pub use list_responses::{ListResponsesHandler, ListResponsesQuery};
pub use next_question::{NextQuestionHandler, NextQuestionQuery, NextQuestionResult};
pub use recalculate_sleep_parameters::{
    RecalculateSleepParametersCommand, RecalculateSleepParametersHandler,
};
pub use submit_response::{SubmitResponseCommand, SubmitResponseHandler};
pub use validate_answers::{ValidateAnswersCommand, ValidateAnswersHandler, ValidateAnswersResult};
