// File: src/routes/forms.rs
// Purpose: Public form page and persisted submissions

use super::{form_path, html, load_form, outcome_status};
use crate::error::AppError;
use crate::pages;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use axum::Form;
use formcraft::{FormDocument, FormInstance, PersistedSubmission, SubmissionMode, SubmitOutcome};
use tracing::info;

/// Fetch a form and refuse it unless it is published.
async fn load_published(state: &AppState, form_id: &str) -> Result<FormDocument, AppError> {
    let form = load_form(state, form_id).await?;
    if !form.is_published {
        info!(form_id = %form.id, "form is unpublished");
        return Err(AppError::Unpublished { title: form.title });
    }
    Ok(form)
}

fn public_instance(state: &AppState, form: &FormDocument) -> FormInstance {
    let submission = PersistedSubmission::new(state.client.clone(), form.id.clone());
    FormInstance::new(form.schema(), SubmissionMode::Persisted(submission))
}

/// GET /forms/:id
pub async fn show(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, AppError> {
    let form = load_published(&state, &id).await?;
    let instance = public_instance(&state, &form);

    Ok(html(
        StatusCode::OK,
        pages::form_page(&state.site, &form, &instance, &form_path(&form.id)),
    ))
}

/// POST /forms/:id
pub async fn submit(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let form = load_published(&state, &id).await?;
    let mut instance = public_instance(&state, &form);
    instance.fill(pairs);

    let outcome = instance.submit().await;
    let action = form_path(&form.id);

    if let SubmitOutcome::Accepted(_) = outcome {
        return Ok(html(
            StatusCode::OK,
            pages::thank_you_page(&state.site, &form, &action),
        ));
    }

    Ok(html(
        outcome_status(&outcome),
        pages::form_page(&state.site, &form, &instance, &action),
    ))
}
