// File: src/routes/generate.rs
// Purpose: AI form generation page

use super::preview::preview_instance;
use super::{html, outcome_status};
use crate::error::AppError;
use crate::pages::{self, Generated};
use crate::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Response;
use axum::Form;
use formcraft::{
    Answers, FieldDescriptor, FieldKind, FormInstance, FormSchema, GenerateFormRequest, PreviewSubmission,
    SubmissionMode, SubmitOutcome,
};
use tracing::{info, warn};

pub const GENERATE_FAILED_NOTICE: &str = "Failed to generate the form. Please try again.";

fn prompt_schema() -> FormSchema {
    FormSchema::new(vec![
        FieldDescriptor::new("prompt", "Prompt", FieldKind::Textarea),
        FieldDescriptor::new("title", "Title", FieldKind::Text).required(),
        FieldDescriptor::new("description", "Description", FieldKind::Textarea),
    ])
}

/// The prompt form itself runs on the engine; valid answers come back
/// through the preview callback path.
fn prompt_instance() -> FormInstance {
    FormInstance::new(
        prompt_schema(),
        SubmissionMode::Preview(PreviewSubmission::new(|_| {})),
    )
}

fn to_request(answers: &Answers) -> GenerateFormRequest {
    let text = |key: &str| {
        answers
            .get(key)
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .trim()
            .to_string()
    };

    GenerateFormRequest {
        prompt: text("prompt"),
        title: text("title"),
        description: text("description"),
    }
}

/// GET /generate
pub async fn show(State(state): State<AppState>) -> Response {
    html(
        StatusCode::OK,
        pages::generate_page(&state.site, &prompt_instance(), None, None),
    )
}

/// POST /generate
pub async fn submit(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Response, AppError> {
    let mut instance = prompt_instance();
    instance.fill(pairs);

    let outcome = instance.submit().await;
    let SubmitOutcome::Previewed(answers) = &outcome else {
        return Ok(html(
            outcome_status(&outcome),
            pages::generate_page(&state.site, &instance, None, None),
        ));
    };

    let request = to_request(answers);
    let form = match state.client.generate_form(&request).await {
        Ok(form) => form,
        Err(e) => {
            warn!(title = %request.title, error = %e, "form generation failed");
            return Ok(html(
                StatusCode::BAD_GATEWAY,
                pages::generate_page(&state.site, &instance, Some(GENERATE_FAILED_NOTICE), None),
            ));
        }
    };

    info!(form_id = %form.id, fields = form.schema().len(), "form generated");

    let preview = preview_instance(&form);
    let generated = Generated {
        form: &form,
        preview: &preview,
        share_url: state.share_url(&form.id),
    };
    let instance = instance.reset();

    Ok(html(
        StatusCode::OK,
        pages::generate_page(&state.site, &instance, None, Some(&generated)),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_to_request_trims_fields() {
        let schema = prompt_schema();
        let values = formcraft::FieldValues::bind_form(
            &schema,
            vec![("prompt", " event signup "), ("title", "Event"), ("description", "")],
        );
        let request = to_request(&values.answers(&schema));

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({ "prompt": "event signup", "title": "Event", "description": "" })
        );
    }

    #[test]
    fn test_title_is_required() {
        let schema = prompt_schema();
        let rules = formcraft::RuleSet::synthesize(&schema);
        let values = formcraft::FieldValues::bind_form(&schema, vec![("prompt", "x")]);

        assert_eq!(rules.validate(&values).get_error("title"), Some("Title is required"));
    }
}
