//! Request extractors.

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use super::error::{ApiError, ErrorResponse};
use crate::domain::foundation::UserId;

/// Header carrying the caller's user id, set by the authenticating proxy.
pub const USER_ID_HEADER: &str = "X-User-Id";

/// The citizen making the request.
#[derive(Debug, Clone)]
pub struct DiaryUser {
    pub user_id: UserId,
}

/// Rejection when the user header is missing or blank.
pub struct UserRequired;

impl IntoResponse for UserRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::unauthorized("The X-User-Id header is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

impl<S> axum::extract::FromRequestParts<S> for DiaryUser
where
    S: Send + Sync,
{
    type Rejection = UserRequired;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut axum::http::request::Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let user_id = parts
                .headers
                .get(USER_ID_HEADER)
                .and_then(|v| v.to_str().ok())
                .and_then(|s| UserId::new(s).ok())
                .ok_or(UserRequired)?;

            Ok(DiaryUser { user_id })
        })
    }
}

/// Parses a path or query value, rejecting it with 400 when malformed.
pub fn parse_param<T: std::str::FromStr>(value: &str, name: &str) -> Result<T, ApiError> {
    value
        .parse()
        .map_err(|_| ApiError::bad_request(format!("Invalid {}: '{}'", name, value)))
}
