//! Route configuration for questionnaire endpoints.

use axum::routing::get;
use axum::Router;

use super::handlers::{get_questionnaire, start_questionnaire};
use crate::adapters::http::state::DiaryAppState;

/// Routes:
/// - `GET /api/questionnaires/:type` - Questionnaire by type
/// - `GET /api/questionnaires/:type/start` - First question, translated
pub fn questionnaire_router() -> Router<DiaryAppState> {
    Router::new()
        .route("/api/questionnaires/:type", get(get_questionnaire))
        .route("/api/questionnaires/:type/start", get(start_questionnaire))
}
