//! HTTP adapter for question authoring endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ConditionalChildRequest, ConditionalChildResponse, CreateQuestionRequest,
    ReorderChildrenRequest, UpdateQuestionRequest, UpdateQuestionResponse,
};
pub use routes::question_router;
