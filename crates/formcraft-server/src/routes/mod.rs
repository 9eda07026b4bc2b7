// File: src/routes/mod.rs
// Purpose: Route handlers and helpers shared between them

pub mod forms;
pub mod generate;
pub mod preview;
pub mod responses;

use crate::error::AppError;
use crate::AppState;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use formcraft::{FormDocument, FormLookup, SubmitOutcome};
use maud::Markup;

pub async fn health() -> &'static str {
    "ok"
}

/// `/forms/{id}` with the id percent-encoded
pub fn form_path(form_id: &str) -> String {
    format!("/forms/{}", urlencoding::encode(form_id))
}

/// Fetch a form regardless of its publish state.
pub(crate) async fn load_form(state: &AppState, form_id: &str) -> Result<FormDocument, AppError> {
    match state.client.fetch_form(form_id).await? {
        FormLookup::Found(form) => Ok(form),
        FormLookup::NotFound => Err(AppError::FormNotFound(form_id.to_string())),
    }
}

/// Status for a re-rendered form after a submit that did not complete.
pub(crate) fn outcome_status(outcome: &SubmitOutcome) -> StatusCode {
    match outcome {
        SubmitOutcome::Rejected(_) => StatusCode::UNPROCESSABLE_ENTITY,
        SubmitOutcome::Failed(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::OK,
    }
}

pub(crate) fn html(status: StatusCode, markup: Markup) -> Response {
    (status, Html(markup.into_string())).into_response()
}
