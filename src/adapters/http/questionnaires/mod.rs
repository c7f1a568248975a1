//! HTTP adapter for questionnaire endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::StartQuestionnaireResponse;
pub use routes::questionnaire_router;
