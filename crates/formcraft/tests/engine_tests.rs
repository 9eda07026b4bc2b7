//! Integration tests for the formcraft engine
//!
//! Covers the full path a form takes: backend JSON -> schema -> rules ->
//! rendered controls -> submission against a mocked backend.

use formcraft::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn signup_schema() -> FormSchema {
    normalize(&json!([
        { "name": "fullName", "label": "Full Name", "type": "text", "required": true },
        { "name": "age", "label": "Age", "type": "number" }
    ]))
}

fn client_for(server: &MockServer) -> BackendClient {
    BackendClient::new(format!("{}/api", server.uri())).unwrap()
}

#[test]
fn test_normalize_then_render_email_field() {
    let schema = normalize(&json!([
        { "name": "email", "type": "email", "required": true, "label": "Email" }
    ]));
    let values = FieldValues::defaults_for(&schema);

    let html = render_form(&schema, &values, &ValidationResult::success(), &RenderOptions::new("/forms/f1"))
        .into_string();

    assert_eq!(html.matches("<input").count(), 1);
    assert!(html.contains(r#"type="email""#));
    assert!(html.contains(r#"name="email""#));
    assert!(html.contains(r#"<label for="field-email">Email <span class="required">*</span></label>"#));
}

#[test]
fn test_controls_follow_schema_order() {
    let schema = normalize(&json!([
        { "name": "plan", "label": "Plan", "type": "select", "options": ["Free", "Pro"] },
        { "name": "bio", "label": "Bio", "type": "textarea" },
        { "name": "terms", "label": "Terms", "type": "checkbox", "required": true },
        { "name": "size", "label": "Size", "type": "radio", "options": ["S", "M"] }
    ]));

    let controls = render::controls(&schema);
    let names: Vec<&str> = controls.iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["plan", "bio", "terms", "size"]);

    let html = render_form(
        &schema,
        &FieldValues::defaults_for(&schema),
        &ValidationResult::success(),
        &RenderOptions::new("/forms/f1"),
    )
    .into_string();

    let positions: Vec<usize> = ["name=\"plan\"", "name=\"bio\"", "name=\"terms\"", "name=\"size\""]
        .iter()
        .map(|needle| html.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(html.contains(r#"<option value="" selected>Select Plan</option>"#));
    assert_eq!(html.matches(r#"type="radio""#).count(), 2);
}

#[rstest]
#[case(vec![("fullName", ""), ("age", "")])]
#[case(vec![("fullName", "Jane"), ("age", "abc")])]
#[case(vec![("fullName", "Jane"), ("age", "0")])]
fn test_validation_is_idempotent(#[case] input: Vec<(&str, &str)>) {
    let schema = signup_schema();
    let rules = RuleSet::synthesize(&schema);
    let values = FieldValues::bind_form(&schema, input);

    assert_eq!(rules.validate(&values), rules.validate(&values));
}

#[tokio::test]
async fn test_end_to_end_public_submission() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/response/f1/responses"))
        .and(body_json(json!({ "answers": { "fullName": "Jane" } })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let mut form = FormInstance::new(
        signup_schema(),
        SubmissionMode::Persisted(PersistedSubmission::new(client, "f1")),
    );

    let rejected = form.submit().await;
    match rejected {
        SubmitOutcome::Rejected(result) => {
            assert_eq!(result.get_error("fullName"), Some("Full Name is required"));
            assert_eq!(result.get_error("age"), None);
        }
        other => panic!("expected rejection, got {:?}", other),
    }
    assert_eq!(form.state(), SubmissionState::Idle);

    form.input("fullName", "Jane");
    form.input("age", "");
    assert!(form.errors().is_valid());

    let accepted = form.submit().await;
    match accepted {
        SubmitOutcome::Accepted(receipt) => {
            assert_eq!(receipt.status, 201);
            assert_eq!(receipt.body, json!({ "success": true }));
        }
        other => panic!("expected acceptance, got {:?}", other),
    }
    assert_eq!(form.state(), SubmissionState::Submitted);
    // Public forms start blank again after success
    assert_eq!(form.values().get("fullName"), &FieldValue::Text(String::new()));
}

#[tokio::test]
async fn test_failed_submission_keeps_values_and_sets_notice() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/response/f1/responses"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .expect(1)
        .mount(&server)
        .await;

    let mut form = FormInstance::new(
        signup_schema(),
        SubmissionMode::Persisted(PersistedSubmission::new(client_for(&server), "f1")),
    );
    form.input("fullName", "Jane");

    let outcome = form.submit().await;

    assert!(matches!(outcome, SubmitOutcome::Failed(ClientError::Http { status: 500, .. })));
    assert_eq!(form.state(), SubmissionState::Idle);
    assert_eq!(form.notice(), Some(SUBMIT_FAILED_NOTICE));
    assert_eq!(form.values().get("fullName"), &FieldValue::Text("Jane".into()));

    let html = form.render(RenderOptions::new("/forms/f1")).into_string();
    assert!(html.contains(SUBMIT_FAILED_NOTICE));
    assert!(html.contains(r#"value="Jane""#));
}

#[tokio::test]
async fn test_fetch_form_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/form/f1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "_id": "f1",
                "title": "Signup",
                "isPublished": true,
                "fields": { "fields": [
                    { "name": "fullName", "label": "Full Name", "type": "text", "required": true }
                ]}
            }
        })))
        .mount(&server)
        .await;

    let lookup = client_for(&server).fetch_form("f1").await.unwrap();

    match lookup {
        FormLookup::Found(form) => {
            assert_eq!(form.title, "Signup");
            assert_eq!(form.schema().names().collect::<Vec<_>>(), vec!["fullName"]);
        }
        FormLookup::NotFound => panic!("expected a form"),
    }
}

#[rstest]
#[case(ResponseTemplate::new(404))]
#[case(ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "Form not found" })))]
#[case(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))]
#[tokio::test]
async fn test_fetch_form_not_found(#[case] response: ResponseTemplate) {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/form/missing"))
        .respond_with(response)
        .mount(&server)
        .await;

    let lookup = client_for(&server).fetch_form("missing").await.unwrap();

    assert_eq!(lookup, FormLookup::NotFound);
}

#[tokio::test]
async fn test_unauthorized_is_reported() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/response/f1/responses"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = client_for(&server).list_responses("f1").await.unwrap_err();

    assert!(matches!(err, ClientError::Unauthorized { .. }));
    assert_eq!(err.status(), Some(401));
}

#[tokio::test]
async fn test_bearer_token_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/response/f1/responses"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "_id": "r1", "submittedAt": "2024-05-01T10:00:00Z", "answers": { "fullName": "Jane" } }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let records = client_for(&server)
        .with_token("secret")
        .list_responses("f1")
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].answers.get("fullName"), Some(&json!("Jane")));
}

#[tokio::test]
async fn test_generate_form() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/form/ai"))
        .and(body_json(json!({ "prompt": "event signup", "title": "Event", "description": "" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "success": true,
            "data": {
                "_id": "gen1",
                "title": "Event",
                "isPublished": true,
                "fields": { "fields": [
                    { "name": "email", "label": "Email", "type": "email", "required": true },
                    { "name": "when", "label": "Date", "type": "date" }
                ]}
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = GenerateFormRequest {
        prompt: "event signup".into(),
        title: "Event".into(),
        description: String::new(),
    };
    let form = client_for(&server).generate_form(&request).await.unwrap();

    assert_eq!(form.id, "gen1");
    let schema = form.schema();
    assert_eq!(schema.get("when").map(|f| &f.kind), Some(&FieldKind::Text));
}

#[tokio::test]
async fn test_generate_form_failure_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/form/ai"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "success": false, "message": "quota exceeded" })),
        )
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_form(&GenerateFormRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ClientError::Rejected(ref m) if m == "quota exceeded"));
}
