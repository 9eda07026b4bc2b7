//! Client for the form backend REST API.
//!
//! Covers the calls the form engine needs: loading a form definition,
//! posting a response, AI generation and listing stored responses.

use std::time::Duration;

use chrono::{DateTime, Utc};
use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::BackendConfig;
use crate::schema::{normalize, FormSchema};
use crate::value::Answers;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("network error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("unauthorized request to {path}")]
    Unauthorized { path: String },
    #[error("backend rejected the request: {0}")]
    Rejected(String),
    #[error("invalid backend configuration: {0}")]
    Config(String),
}

impl ClientError {
    /// HTTP status returned by the backend, if the request got that far.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Http { status, .. } => Some(*status),
            ClientError::Unauthorized { .. } => Some(401),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            ClientError::Rejected(_) | ClientError::Config(_) => None,
        }
    }
}

/// `{ success, data, message }` wrapper used by most backend endpoints.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    success: bool,
    data: Option<T>,
    #[serde(default)]
    message: Option<String>,
}

/// A form definition as stored by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormDocument {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub fields: FieldList,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub template_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Raw `fields.fields` list, normalized on demand.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldList {
    #[serde(default)]
    pub fields: JsonValue,
}

impl FormDocument {
    /// Normalized schema for this form's fields.
    pub fn schema(&self) -> FormSchema {
        normalize(&self.fields.fields)
    }
}

/// Result of looking a form up by id.
#[derive(Debug, Clone, PartialEq)]
pub enum FormLookup {
    Found(FormDocument),
    NotFound,
}

/// Body of `POST /form/ai`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateFormRequest {
    pub prompt: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// One stored response to a form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseRecord {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub answers: Map<String, JsonValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ResponseList {
    Bare(Vec<ResponseRecord>),
    Wrapped {
        #[serde(default)]
        data: Vec<ResponseRecord>,
    },
}

/// Backend acknowledgement of a stored response.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitReceipt {
    pub status: u16,
    /// Parsed response body; `Null` when the body was empty or not JSON
    pub body: JsonValue,
}

#[derive(Debug, Serialize)]
struct SubmitBody<'a> {
    answers: &'a Answers,
}

/// Backend API client
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    base_url: String,
    token: Option<String>,
}

impl BackendClient {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::build(base_url.into(), Self::DEFAULT_TIMEOUT, None)
    }

    pub fn from_config(config: &BackendConfig) -> Result<Self, ClientError> {
        Self::build(
            config.base_url.clone(),
            Duration::from_secs(config.timeout_secs),
            config.token.clone(),
        )
    }

    fn build(base_url: String, timeout: Duration, token: Option<String>) -> Result<Self, ClientError> {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base url must start with http:// or https://, got {:?}",
                base_url
            )));
        }

        let http = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url,
            token: token.filter(|t| !t.trim().is_empty()),
        })
    }

    /// Attach a bearer token to every request
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, segments: &[&str]) -> String {
        let path: String = segments
            .iter()
            .map(|s| format!("/{}", urlencoding::encode(s)))
            .collect();
        format!("{}{}", self.base_url, path)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        debug!(%method, %url, "backend request");
        let builder = self.http.request(method, url);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Turn non-success statuses into errors, logging unauthorized calls.
    async fn check(response: reqwest::Response, url: &str) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            warn!(%url, "backend rejected the request as unauthorized");
            return Err(ClientError::Unauthorized {
                path: url.to_string(),
            });
        }
        let body = response.text().await.unwrap_or_default();
        Err(ClientError::Http {
            status: status.as_u16(),
            body,
        })
    }

    /// `GET /form/{id}`
    ///
    /// A 404, `success: false` or a missing `data` object all mean the form
    /// does not exist.
    pub async fn fetch_form(&self, form_id: &str) -> Result<FormLookup, ClientError> {
        let url = self.url(&["form", form_id]);
        let response = self.request(Method::GET, &url).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(FormLookup::NotFound);
        }

        let envelope: Envelope<FormDocument> = Self::check(response, &url).await?.json().await?;
        match envelope {
            Envelope {
                success: true,
                data: Some(form),
                ..
            } => Ok(FormLookup::Found(form)),
            _ => Ok(FormLookup::NotFound),
        }
    }

    /// `POST /response/{id}/responses` with `{ answers }`
    pub async fn submit_response(&self, form_id: &str, answers: &Answers) -> Result<SubmitReceipt, ClientError> {
        let url = self.url(&["response", form_id, "responses"]);
        let response = self
            .request(Method::POST, &url)
            .json(&SubmitBody { answers })
            .send()
            .await?;

        let response = Self::check(response, &url).await?;
        let status = response.status().as_u16();
        let bytes = response.bytes().await?;
        let body = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);

        Ok(SubmitReceipt { status, body })
    }

    /// `POST /form/ai`
    pub async fn generate_form(&self, request: &GenerateFormRequest) -> Result<FormDocument, ClientError> {
        let url = self.url(&["form", "ai"]);
        let response = self.request(Method::POST, &url).json(request).send().await?;

        let envelope: Envelope<FormDocument> = Self::check(response, &url).await?.json().await?;
        match envelope {
            Envelope {
                success: true,
                data: Some(form),
                ..
            } => Ok(form),
            Envelope { message, .. } => Err(ClientError::Rejected(
                message.unwrap_or_else(|| "form generation failed".to_string()),
            )),
        }
    }

    /// `GET /response/{id}/responses`
    pub async fn list_responses(&self, form_id: &str) -> Result<Vec<ResponseRecord>, ClientError> {
        let url = self.url(&["response", form_id, "responses"]);
        let response = self.request(Method::GET, &url).send().await?;

        let list: ResponseList = Self::check(response, &url).await?.json().await?;
        Ok(match list {
            ResponseList::Bare(records) => records,
            ResponseList::Wrapped { data } => data,
        })
    }
}
