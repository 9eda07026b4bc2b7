// File: src/validation/mod.rs
// Purpose: Validation results and the runtime rule table

use std::collections::HashMap;

pub mod rules;

pub use rules::{FieldRule, RuleSet, RuleSummary};

/// Per-field error messages for one evaluation of a [`RuleSet`].
///
/// Only failing fields have an entry. Two evaluations over the same values
/// compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    errors: HashMap<String, String>,
}

impl ValidationResult {
    /// Create a successful validation result
    pub fn success() -> Self {
        Self::default()
    }

    /// Create a result from field name -> message pairs
    pub fn from_errors(errors: HashMap<String, String>) -> Self {
        Self { errors }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Check if there are any errors
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Get the error for a specific field
    pub fn get_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).map(String::as_str)
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Replace the entry for one field after re-validating it.
    pub fn set_field(&mut self, field: &str, error: Option<String>) {
        match error {
            Some(message) => {
                self.errors.insert(field.to_string(), message);
            }
            None => {
                self.errors.remove(field);
            }
        }
    }
}
