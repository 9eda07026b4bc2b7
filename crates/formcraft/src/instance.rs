// File: src/instance.rs
// Purpose: One live form: schema, values, errors and its submission coordinator

use crate::render::{render_form, RenderOptions};
use crate::schema::FormSchema;
use crate::submission::{SubmissionCoordinator, SubmissionMode, SubmissionState, SubmitOutcome};
use crate::validation::{RuleSet, ValidationResult};
use crate::value::FieldValues;
use maud::Markup;
use std::sync::Arc;

/// Which surface an instance serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormVariant {
    /// Published form; answers are persisted
    Public,
    /// Builder preview; answers go to a callback
    Preview,
}

/// A mounted form.
///
/// Rules are synthesized once from the schema and shared with the
/// coordinator; values and errors change with every input.
#[derive(Debug)]
pub struct FormInstance {
    schema: FormSchema,
    rules: Arc<RuleSet>,
    values: FieldValues,
    errors: ValidationResult,
    coordinator: SubmissionCoordinator,
    attempted: bool,
    notice: Option<String>,
}

impl FormInstance {
    pub fn new(schema: FormSchema, mode: SubmissionMode) -> Self {
        let rules = Arc::new(RuleSet::synthesize(&schema));
        Self::with_rules(schema, rules, mode)
    }

    fn with_rules(schema: FormSchema, rules: Arc<RuleSet>, mode: SubmissionMode) -> Self {
        let values = FieldValues::defaults_for(&schema);
        let coordinator = SubmissionCoordinator::new(schema.clone(), rules.clone(), mode);

        Self {
            schema,
            rules,
            values,
            errors: ValidationResult::success(),
            coordinator,
            attempted: false,
            notice: None,
        }
    }

    pub fn variant(&self) -> FormVariant {
        if self.coordinator.mode().is_preview() {
            FormVariant::Preview
        } else {
            FormVariant::Public
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    pub fn errors(&self) -> &ValidationResult {
        &self.errors
    }

    pub fn state(&self) -> SubmissionState {
        self.coordinator.state()
    }

    /// Form-level notice from the last failed submission
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Bind one input event.
    ///
    /// After the first submit attempt the changed field is re-validated so
    /// its inline error tracks the input. Returns false for unknown names.
    pub fn input(&mut self, name: &str, raw: &str) -> bool {
        if !self.values.bind_raw(&self.schema, name, raw) {
            return false;
        }
        if self.attempted {
            let error = self.rules.validate_field(name, self.values.get(name));
            self.errors.set_field(name, error);
        }
        true
    }

    /// Replace all values at once, e.g. from a decoded form post.
    pub fn fill<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.values = FieldValues::bind_form(&self.schema, pairs);
        if self.attempted {
            self.errors = self.rules.validate(&self.values);
        }
    }

    /// Validate and submit through the coordinator, recording the result.
    pub async fn submit(&mut self) -> SubmitOutcome {
        self.attempted = true;
        let outcome = self.coordinator.submit(&self.values).await;

        match &outcome {
            SubmitOutcome::Rejected(result) => {
                self.errors = result.clone();
                self.notice = None;
            }
            SubmitOutcome::Previewed(_) => {
                self.errors = ValidationResult::success();
                self.notice = None;
            }
            SubmitOutcome::Accepted(_) => {
                self.errors = ValidationResult::success();
                self.values = FieldValues::defaults_for(&self.schema);
                self.notice = None;
            }
            SubmitOutcome::Failed(_) => {
                self.notice = outcome.notice().map(str::to_string);
            }
            SubmitOutcome::InFlight | SubmitOutcome::AlreadySubmitted | SubmitOutcome::Detached => {}
        }

        outcome
    }

    /// Start over as a new logical instance with the same schema and mode.
    pub fn reset(self) -> Self {
        Self::with_rules(self.schema, self.rules, self.coordinator.into_mode())
    }

    /// The instance is being torn down; in-flight responses are discarded.
    pub fn detach(&self) {
        self.coordinator.detach();
    }

    /// Render with the current values, errors and submit state. A failed
    /// submission notice takes precedence over one passed in `options`.
    pub fn render(&self, options: RenderOptions) -> Markup {
        let notice = self.notice.clone().or_else(|| options.notice.clone());
        let options = options
            .submitting(self.coordinator.is_submitting())
            .notice(notice);
        render_form(&self.schema, &self.values, &self.errors, &options)
    }
}
