// Formcraft - runtime form engine
// Field descriptors arrive as JSON, get normalized into a schema, and drive
// validation, Maud rendering and submission.

pub mod client;
pub mod config;
pub mod instance;
pub mod render;
pub mod schema;
pub mod submission;
pub mod validation;
pub mod value;

pub use client::{
    BackendClient, ClientError, FormDocument, FormLookup, GenerateFormRequest, ResponseRecord, SubmitReceipt,
};
pub use config::Config;
pub use instance::{FormInstance, FormVariant};
pub use render::{render_form, Control, ControlKind, FieldAttrs, RenderOptions};
pub use schema::{normalize, FieldDescriptor, FieldKind, FormSchema};
pub use submission::{
    PersistedSubmission, PreviewSubmission, SubmissionCoordinator, SubmissionMode, SubmissionState,
    SubmitOutcome, SUBMIT_FAILED_NOTICE,
};
pub use validation::{RuleSet, ValidationResult};
pub use value::{Answers, FieldValue, FieldValues};

// Re-export Maud for page templates built on top of the renderer
pub use maud::{html as maud, Markup, PreEscaped, DOCTYPE};
