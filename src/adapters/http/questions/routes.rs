//! Route configuration for question authoring endpoints.

use axum::routing::{get, post, put};
use axum::Router;

use super::handlers::{
    add_conditional_child, create_question, delete_question, get_question, list_questions,
    remove_conditional_child, reorder_conditional_children, update_question,
};
use crate::adapters::http::state::DiaryAppState;

/// Routes:
/// - `GET /api/questions` - Questions of one questionnaire
/// - `POST /api/questions` - Author a question
/// - `GET|PUT|DELETE /api/questions/:id` - Read, patch or retire a question
/// - `POST|DELETE /api/questions/:id/conditional` - Link or unlink a child
/// - `PUT /api/questions/:id/conditional/order` - Reorder an option's children
pub fn question_router() -> Router<DiaryAppState> {
    Router::new()
        .route("/api/questions", get(list_questions).post(create_question))
        .route(
            "/api/questions/:id",
            get(get_question).put(update_question).delete(delete_question),
        )
        .route(
            "/api/questions/:id/conditional",
            post(add_conditional_child).delete(remove_conditional_child),
        )
        .route(
            "/api/questions/:id/conditional/order",
            put(reorder_conditional_children),
        )
}
