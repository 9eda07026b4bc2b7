// File: src/error.rs
// Purpose: Handler error type rendered as an HTML error page

use crate::pages;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use formcraft::ClientError;
use tracing::{debug, error};

/// Site title used on error pages, which render without app state.
pub const ERROR_PAGE_TITLE: &str = "Formcraft";

#[derive(Debug)]
pub enum AppError {
    /// No form with this id (404)
    FormNotFound(String),
    /// The form exists but is not accepting responses (403)
    Unpublished { title: String },
    /// The form backend failed or could not be reached (502)
    Backend(ClientError),
    /// Anything else (500)
    Internal(anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, markup) = match self {
            AppError::FormNotFound(id) => {
                debug!(form_id = %id, "form not found");
                (StatusCode::NOT_FOUND, pages::not_found_page(ERROR_PAGE_TITLE))
            }
            AppError::Unpublished { title } => (
                StatusCode::FORBIDDEN,
                pages::unavailable_page(ERROR_PAGE_TITLE, &title),
            ),
            AppError::Backend(err) => {
                error!("Backend request failed: {}", err);
                (
                    StatusCode::BAD_GATEWAY,
                    pages::error_page(
                        ERROR_PAGE_TITLE,
                        "Service Unavailable",
                        "The form service could not be reached. Please try again later.",
                    ),
                )
            }
            AppError::Internal(err) => {
                error!("Internal server error: {:#}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    pages::error_page(ERROR_PAGE_TITLE, "Something went wrong", "Please try again later."),
                )
            }
        };

        (status, Html(markup.into_string())).into_response()
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        AppError::Backend(err)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err)
    }
}
