//! Error responses shared by every diary endpoint.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::application::DiaryError;
use crate::domain::foundation::ErrorCode;

/// Standard error body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    /// Danish text for errors a citizen can act on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message_da: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            message_da: None,
            details: None,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self {
            code: "UNAUTHORIZED".to_string(),
            message: message.into(),
            message_da: None,
            details: None,
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            message_da: None,
            details: None,
        }
    }
}

/// A rendered API failure.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorResponse,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorResponse::bad_request(message),
        }
    }

    /// Maps a handler error to a status and body.
    ///
    /// Internal faults are logged here. Their detail only reaches the
    /// caller when `verbose` is set.
    pub fn from_diary(error: DiaryError, verbose: bool) -> Self {
        let status = status_for(error.code());
        if error.is_internal() {
            tracing::error!(error = %error, "Request failed with an internal error");
            let message = if verbose {
                error.message()
            } else {
                "An internal error occurred".to_string()
            };
            return Self {
                status,
                body: ErrorResponse::internal(message),
            };
        }

        let bilingual = error.bilingual();
        Self {
            status,
            body: ErrorResponse {
                code: error.code().to_string(),
                message: bilingual
                    .as_ref()
                    .map(|m| m.en.clone())
                    .unwrap_or_else(|| error.message()),
                message_da: bilingual.map(|m| m.da),
                details: None,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn body(&self) -> &ErrorResponse {
        &self.body
    }
}

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::ValidationFailed | ErrorCode::InvalidFormat => StatusCode::BAD_REQUEST,
        ErrorCode::QuestionLocked => StatusCode::FORBIDDEN,
        ErrorCode::QuestionNotFound
        | ErrorCode::QuestionnaireNotFound
        | ErrorCode::ResponseNotFound => StatusCode::NOT_FOUND,
        ErrorCode::DuplicateResponse | ErrorCode::DuplicateOrder => StatusCode::CONFLICT,
        ErrorCode::DatabaseError | ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}
