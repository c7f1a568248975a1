//! Questionnaire query handlers.

mod get_questionnaire;
mod resolve_questionnaire;
mod start_questionnaire;

pub use get_questionnaire::{GetQuestionnaireHandler, GetQuestionnaireQuery};
pub use resolve_questionnaire::QuestionnaireResolver;
pub use start_questionnaire::{
    StartQuestionnaireHandler, StartQuestionnaireQuery, StartQuestionnaireResult,
};
