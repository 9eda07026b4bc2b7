// File: src/validation/rules.rs
// Purpose: Synthesize per-field validators from a schema, once per schema

use super::ValidationResult;
use crate::schema::{FieldDescriptor, FieldKind, FormSchema};
use crate::value::{FieldValue, FieldValues};
use formcraft_validation::{is_one_of, is_valid_email};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;

pub const INVALID_EMAIL: &str = "Invalid email address";

type Check = Box<dyn Fn(&FieldValue) -> Option<String> + Send + Sync>;

/// Rules for one field, published as the control's `data-validate` JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub required: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub email: bool,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub number: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub one_of: Option<Vec<String>>,
}

impl RuleSummary {
    /// Summary of the rules synthesized for `field`.
    pub fn for_field(field: &FieldDescriptor) -> Self {
        let mut summary = RuleSummary {
            required: field.required,
            ..RuleSummary::default()
        };
        match &field.kind {
            FieldKind::Email => summary.email = true,
            FieldKind::Number => summary.number = true,
            FieldKind::Select(options) => summary.one_of = Some(options.clone()),
            FieldKind::Text | FieldKind::Textarea | FieldKind::Radio(_) | FieldKind::Checkbox => {}
        }
        summary
    }
}

/// A synthesized validator bound to one field.
pub struct FieldRule {
    name: String,
    summary: RuleSummary,
    check: Check,
}

impl FieldRule {
    fn synthesize(field: &FieldDescriptor) -> Self {
        let required = field.required;
        let required_message = format!("{} is required", field.label);

        // Format checks per kind. Only reached for non-empty values.
        let format: Check = match &field.kind {
            FieldKind::Email => Box::new(|value: &FieldValue| match value {
                FieldValue::Text(s) if !is_valid_email(s) => Some(INVALID_EMAIL.to_string()),
                _ => None,
            }),
            FieldKind::Number => {
                let message = format!("{} must be a number", field.label);
                Box::new(move |value: &FieldValue| match value {
                    FieldValue::Number(n) if n.is_finite() => None,
                    _ => Some(message.clone()),
                })
            }
            FieldKind::Select(options) => {
                let allowed = options.clone();
                let message = format!("{} must be one of the listed options", field.label);
                Box::new(move |value: &FieldValue| match value {
                    FieldValue::Text(s) if is_one_of(s, allowed.as_slice()) => None,
                    _ => Some(message.clone()),
                })
            }
            FieldKind::Text | FieldKind::Textarea | FieldKind::Radio(_) | FieldKind::Checkbox => {
                Box::new(|_: &FieldValue| None)
            }
        };

        let check: Check = Box::new(move |value: &FieldValue| {
            if value.is_empty() {
                return required.then(|| required_message.clone());
            }
            format(value)
        });

        Self {
            name: field.name.clone(),
            summary: RuleSummary::for_field(field),
            check,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn summary(&self) -> &RuleSummary {
        &self.summary
    }

    /// Evaluate against a live value
    pub fn check(&self, value: &FieldValue) -> Option<String> {
        (self.check)(value)
    }
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldRule")
            .field("name", &self.name)
            .field("summary", &self.summary)
            .finish()
    }
}

/// Rule table for a schema: one validator per field, in schema order.
///
/// Build it once when the schema is bound; evaluate it on every change.
#[derive(Debug)]
pub struct RuleSet {
    rules: Vec<FieldRule>,
    index: HashMap<String, usize>,
}

impl RuleSet {
    pub fn synthesize(schema: &FormSchema) -> Self {
        let rules: Vec<FieldRule> = schema.iter().map(FieldRule::synthesize).collect();
        let index = rules
            .iter()
            .enumerate()
            .map(|(i, rule)| (rule.name.clone(), i))
            .collect();

        Self { rules, index }
    }

    /// Evaluate every rule against `values`. Pure; safe to call repeatedly.
    pub fn validate(&self, values: &FieldValues) -> ValidationResult {
        let errors = self
            .rules
            .iter()
            .filter_map(|rule| rule.check(values.get(&rule.name)).map(|e| (rule.name.clone(), e)))
            .collect();

        ValidationResult::from_errors(errors)
    }

    /// Evaluate a single field; unknown names never fail.
    pub fn validate_field(&self, name: &str, value: &FieldValue) -> Option<String> {
        self.rule(name).and_then(|rule| rule.check(value))
    }

    pub fn rule(&self, name: &str) -> Option<&FieldRule> {
        self.index.get(name).map(|&i| &self.rules[i])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldRule> {
        self.rules.iter()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
