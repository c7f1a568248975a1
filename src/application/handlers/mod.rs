//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod question;
pub mod questionnaire;
pub mod response;

#[cfg(test)]
mod test_support;

pub use question::{
    AddConditionalChildCommand, AddConditionalChildHandler, AddConditionalChildResult,
    CreateQuestionCommand, CreateQuestionHandler, DeleteQuestionCommand, DeleteQuestionHandler,
    GetQuestionHandler, GetQuestionQuery, ListQuestionsHandler, ListQuestionsQuery,
    RemoveConditionalChildCommand, RemoveConditionalChildHandler, RemoveConditionalChildResult,
    ReorderConditionalChildrenCommand, ReorderConditionalChildrenHandler,
    ReorderConditionalChildrenResult, UpdateQuestionCommand, UpdateQuestionHandler,
    UpdateQuestionResult,
};
pub use questionnaire::{
    GetQuestionnaireHandler, GetQuestionnaireQuery, QuestionnaireResolver,
    StartQuestionnaireHandler, StartQuestionnaireQuery, StartQuestionnaireResult,
};
pub use response::{
    CheckTodayHandler, CheckTodayQuery, ListResponsesHandler, ListResponsesQuery,
    NextQuestionHandler, NextQuestionQuery, NextQuestionResult, RecalculateSleepParametersCommand,
    RecalculateSleepParametersHandler, SubmitResponseCommand, SubmitResponseHandler, TodayStatus,
    ValidateAnswersCommand, ValidateAnswersHandler, ValidateAnswersResult,
};
