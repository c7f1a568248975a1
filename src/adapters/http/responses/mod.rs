//! HTTP adapter for diary response endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    NextQuestionRequest, NextQuestionResponse, ResponseDto, SleepParametersDto,
    SubmitResponseRequest, TodayStatusResponse,
};
pub use routes::response_router;
