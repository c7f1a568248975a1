//! Route configuration for response endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    check_today, list_responses, next_question, recalculate_sleep_parameters, submit_response,
    validate_answers,
};
use crate::adapters::http::state::DiaryAppState;

/// Routes:
/// - `POST /api/responses` - Submit a diary (requires `X-User-Id`)
/// - `GET /api/responses` - The caller's diaries (requires `X-User-Id`)
/// - `POST /api/responses/next` - Next question, 204 when finished
/// - `POST /api/responses/validate` - Validate answers without storing
/// - `GET /api/responses/check-today` - Today's status (requires `X-User-Id`)
/// - `POST /api/responses/:id/sleep-parameters` - Recompute sleep parameters
pub fn response_router() -> Router<DiaryAppState> {
    Router::new()
        .route("/api/responses", post(submit_response).get(list_responses))
        .route("/api/responses/next", post(next_question))
        .route("/api/responses/validate", post(validate_answers))
        .route("/api/responses/check-today", get(check_today))
        .route(
            "/api/responses/:id/sleep-parameters",
            post(recalculate_sleep_parameters),
        )
}
