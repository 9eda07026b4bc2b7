// File: src/routes/preview.rs
// Purpose: Builder preview; submissions are validated and echoed, never stored

use super::{form_path, html, load_form, outcome_status};
use crate::error::AppError;
use crate::pages;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Form;
use formcraft::{FormDocument, FormInstance, PreviewSubmission, SubmissionMode, SubmitOutcome};
use tracing::info;

pub(crate) fn preview_instance(form: &FormDocument) -> FormInstance {
    let form_id = form.id.clone();
    let submission = PreviewSubmission::new(move |answers| {
        let answers = serde_json::to_string(answers).unwrap_or_default();
        info!(form_id = %form_id, %answers, "preview submission");
    });
    FormInstance::new(form.schema(), SubmissionMode::Preview(submission))
}

fn preview_action(form_id: &str) -> String {
    format!("{}/preview", form_path(form_id))
}

/// GET /forms/:id/preview
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, AppError> {
    let form = load_form(&state, &id).await?;
    let instance = preview_instance(&form);

    Ok(html(
        StatusCode::OK,
        pages::preview_page(&state.site, &form, &instance, &preview_action(&form.id), None),
    ))
}

/// POST /forms/:id/preview
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = load_form(&state, &id).await?;
    let mut instance = preview_instance(&form);
    instance.fill(pairs);

    let outcome = instance.submit().await;
    let echoed = match &outcome {
        SubmitOutcome::Previewed(answers) => Some(answers),
        _ => None,
    };

    Ok(html(
        outcome_status(&outcome),
        pages::preview_page(&state.site, &form, &instance, &preview_action(&form.id), echoed),
    ))
}
