use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

/// Failures that end a request with an error page.
///
/// Form problems and bad credentials are not errors here; handlers render
/// them back into the form.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    #[error("{0}")]
    NotFound(String),

    #[error("template error: {0}")]
    Render(#[from] handlebars::RenderError),

    #[error("session error: {0}")]
    Session(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(what) => {
                tracing::info!(target: "web", what = %what, "not found");
                StatusCode::NOT_FOUND
            }
            AppError::Storage(error) => {
                tracing::error!(target: "database", error = %error, "database error occurred");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            other => {
                tracing::error!(target: "web", error = %other, "request failed");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let reason = status.canonical_reason().unwrap_or("Error");
        (status, reason).into_response()
    }
}
