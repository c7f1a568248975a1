//! HTTP adapters - REST API implementations.
//!
//! Each resource has its own adapter for endpoint exposure. All of them
//! share [`DiaryAppState`] and render failures through [`ApiError`].

mod error;
mod extract;
mod middleware;
mod state;

pub mod questionnaires;
pub mod questions;
pub mod responses;

pub use error::{ApiError, ErrorResponse};
pub use extract::{DiaryUser, USER_ID_HEADER};
pub use middleware::HttpLayers;
pub use state::DiaryAppState;

use axum::Router;

/// The complete diary API.
pub fn api_router(state: DiaryAppState) -> Router {
    Router::new()
        .merge(questionnaires::questionnaire_router())
        .merge(questions::question_router())
        .merge(responses::response_router())
        .with_state(state)
}
