//! Server error type and HTTP mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Errors produced by request handlers.
#[derive(Debug, thiserror::Error)]
pub(crate) enum ServerError {
    /// The logical page has no backing markdown file.
    #[error("page not found: {0}")]
    PageNotFound(String),

    /// Filesystem failure while serving an existing file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        match self {
            Self::PageNotFound(_) => (StatusCode::NOT_FOUND, "Not Found").into_response(),
            Self::Io(err) => {
                tracing::error!(error = %err, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
            }
        }
    }
}
