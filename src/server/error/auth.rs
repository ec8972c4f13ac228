use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug)]
pub enum AuthError {
    /// The upstream auth layer did not attach a user id header.
    #[error("Request is missing the authenticated user header")]
    MissingUserHeader,

    /// The user id header is present but not a valid integer id.
    #[error("Authenticated user header '{0}' is not a valid user id")]
    InvalidUserHeader(String),

    /// The authenticated user id does not exist in the database.
    #[error("Authenticated user {0} not found in database")]
    UserNotFound(i32),
}

/// Converts authentication errors into HTTP responses.
///
/// All variants map to 401 Unauthorized with a generic message. Details are logged
/// at debug level for diagnostics while the client-facing message avoids leaking
/// which check failed.
impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        (
            StatusCode::UNAUTHORIZED,
            Json(ErrorDto {
                error: "Could not validate credentials".to_string(),
            }),
        )
            .into_response()
    }
}
