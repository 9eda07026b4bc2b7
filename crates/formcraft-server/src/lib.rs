// Formcraft server - public forms, previews, AI generation and responses
// over the formcraft engine, rendered with Maud.

pub mod error;
pub mod layout;
pub mod pages;
pub mod routes;

use axum::routing::get;
use axum::Router;
use formcraft::config::{Config, SiteConfig};
use formcraft::{BackendClient, ClientError};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::AppError;

/// Application state shared across handlers
#[derive(Debug, Clone)]
pub struct AppState {
    pub client: BackendClient,
    pub site: Arc<SiteConfig>,
}

impl AppState {
    pub fn new(client: BackendClient, site: SiteConfig) -> Self {
        Self {
            client,
            site: Arc::new(site),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        Ok(Self::new(
            BackendClient::from_config(&config.backend)?,
            config.site.clone(),
        ))
    }

    /// Link that opens the public form; absolute when a public URL is set.
    pub fn share_url(&self, form_id: &str) -> String {
        let path = routes::form_path(form_id);
        match self.site.public_url.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
            Some(origin) => format!("{}{}", origin.trim_end_matches('/'), path),
            None => path,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route("/forms/:id", get(routes::forms::show).post(routes::forms::submit))
        .route(
            "/forms/:id/preview",
            get(routes::preview::show).post(routes::preview::submit),
        )
        .route("/forms/:id/responses", get(routes::responses::list))
        .route("/generate", get(routes::generate::show).post(routes::generate::submit))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
