use axum::http::StatusCode;
use askama::Template;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::views::ErrorTemplate;

/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Unknown input type: {0}")]
    BadInput(String),

    #[error("Report not found")]
    NotFound,

    #[error("Invalid download signature")]
    Forbidden,

    #[error("Failed to generate report: {0}")]
    Render(#[from] seoscope_core::SeoscopeError),

    #[error("Report task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Forbidden => StatusCode::FORBIDDEN,
            AppError::Render(_) | AppError::Join(_) | AppError::Io(_) | AppError::Template(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        match ErrorTemplate::new(status.to_string(), self.to_string()).render() {
            Ok(html) => (status, Html(html)).into_response(),
            Err(e) => (status, Html(format!("Template error: {}", e))).into_response(),
        }
    }
}
