// File: src/render.rs
// Purpose: Map field descriptors plus live values and errors to Maud controls

use crate::schema::{FieldDescriptor, FieldKind, FormSchema};
use crate::validation::{RuleSummary, ValidationResult};
use crate::value::{FieldValue, FieldValues};
use maud::{html, Markup};

/// Attributes shared by every control of a field, including the
/// `data-validate` JSON used for client-side checks.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldAttrs {
    /// DOM id of the (first) control, referenced by the label
    pub id: String,
    pub label: String,
    pub required: bool,
    pub placeholder: Option<String>,
    /// JSON string for the data-validate attribute
    pub data_validate: String,
}

impl FieldAttrs {
    pub fn for_field(field: &FieldDescriptor) -> Self {
        let placeholder = match &field.kind {
            FieldKind::Text | FieldKind::Email | FieldKind::Number | FieldKind::Textarea => {
                Some(format!("Enter {}", field.label.to_lowercase()))
            }
            FieldKind::Select(_) => Some(format!("Select {}", field.label)),
            FieldKind::Radio(_) | FieldKind::Checkbox => None,
        };

        let data_validate = serde_json::to_string(&RuleSummary::for_field(field))
            .unwrap_or_else(|_| "{}".to_string());

        Self {
            id: control_id(&field.name),
            label: field.label.clone(),
            required: field.required,
            placeholder,
            data_validate,
        }
    }
}

/// The HTML control chosen for a field kind.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlKind {
    /// `<input>` with the given `type`
    Input { input_type: &'static str },
    Textarea,
    Select { options: Vec<String> },
    RadioGroup { options: Vec<String> },
    Checkbox,
}

/// One rendered control, bound to a field by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Control<'a> {
    pub field: &'a FieldDescriptor,
    pub kind: ControlKind,
    pub attrs: FieldAttrs,
}

impl<'a> Control<'a> {
    pub fn for_field(field: &'a FieldDescriptor) -> Self {
        let kind = match &field.kind {
            FieldKind::Text => ControlKind::Input { input_type: "text" },
            FieldKind::Email => ControlKind::Input { input_type: "email" },
            FieldKind::Number => ControlKind::Input { input_type: "number" },
            FieldKind::Textarea => ControlKind::Textarea,
            FieldKind::Select(options) => ControlKind::Select {
                options: options.clone(),
            },
            FieldKind::Radio(options) => ControlKind::RadioGroup {
                options: options.clone(),
            },
            FieldKind::Checkbox => ControlKind::Checkbox,
        };

        Self {
            field,
            kind,
            attrs: FieldAttrs::for_field(field),
        }
    }

    pub fn name(&self) -> &str {
        &self.field.name
    }

    /// Label, control and inline error, in that order.
    pub fn render(&self, value: &FieldValue, error: Option<&str>) -> Markup {
        let name = self.field.name.as_str();
        let attrs = &self.attrs;
        let current = value.to_string();

        html! {
            div class="field" data-field=(name) data-kind=(self.field.kind.wire_name()) {
                label for=(attrs.id) {
                    (attrs.label)
                    @if attrs.required {
                        " "
                        span class="required" { "*" }
                    }
                }
                @match &self.kind {
                    ControlKind::Input { input_type } => {
                        input type=(input_type) id=(attrs.id) name=(name) value=(current)
                            placeholder=[attrs.placeholder.as_deref()]
                            required[attrs.required]
                            aria-invalid=[error.map(|_| "true")]
                            data-validate=(attrs.data_validate);
                    }
                    ControlKind::Textarea => {
                        textarea id=(attrs.id) name=(name)
                            placeholder=[attrs.placeholder.as_deref()]
                            required[attrs.required]
                            aria-invalid=[error.map(|_| "true")]
                            data-validate=(attrs.data_validate) { (current) }
                    }
                    ControlKind::Select { options } => {
                        select id=(attrs.id) name=(name)
                            required[attrs.required]
                            aria-invalid=[error.map(|_| "true")]
                            data-validate=(attrs.data_validate) {
                            option value="" selected[current.is_empty()] {
                                (attrs.placeholder.as_deref().unwrap_or_default())
                            }
                            @for option in options {
                                option value=(option) selected[*option == current] { (option) }
                            }
                        }
                    }
                    ControlKind::RadioGroup { options } => {
                        div class="radio-group" id=(attrs.id) role="radiogroup" data-validate=(attrs.data_validate) {
                            @for (i, option) in options.iter().enumerate() {
                                label class="radio" {
                                    input type="radio" id=(format!("{}-{}", attrs.id, i)) name=(name) value=(option)
                                        checked[*option == current]
                                        required[attrs.required];
                                    " " (option)
                                }
                            }
                        }
                    }
                    ControlKind::Checkbox => {
                        input type="checkbox" id=(attrs.id) name=(name) value="true"
                            checked[value.as_bool()]
                            required[attrs.required]
                            data-validate=(attrs.data_validate);
                    }
                }
                @if let Some(message) = error {
                    p class="field-error" id=(format!("{}-error", attrs.id)) { (message) }
                }
            }
        }
    }
}

/// DOM id for a field name. ASCII alphanumerics and `_` are kept; every
/// other byte is written as `-XX` hex, so distinct names never share an id.
fn control_id(name: &str) -> String {
    let mut id = String::with_capacity(name.len() + 6);
    id.push_str("field-");
    for byte in name.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' {
            id.push(char::from(byte));
        } else {
            id.push_str(&format!("-{:02X}", byte));
        }
    }
    id
}

/// One control per field, in schema order.
pub fn controls(schema: &FormSchema) -> Vec<Control<'_>> {
    schema.iter().map(Control::for_field).collect()
}

/// Form-level rendering options.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Where the form posts to
    pub action: String,
    pub submit_label: String,
    /// Disable the submit control (a submission is in flight)
    pub submitting: bool,
    /// Form-level notice shown above the fields (e.g. a failed submission)
    pub notice: Option<String>,
}

impl RenderOptions {
    pub fn new(action: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            ..Self::default()
        }
    }

    pub fn submit_label(mut self, label: impl Into<String>) -> Self {
        self.submit_label = label.into();
        self
    }

    pub fn submitting(mut self, submitting: bool) -> Self {
        self.submitting = submitting;
        self
    }

    pub fn notice(mut self, notice: Option<String>) -> Self {
        self.notice = notice;
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            action: String::new(),
            submit_label: "Submit".to_string(),
            submitting: false,
            notice: None,
        }
    }
}

/// Render the whole form: notice, every field in order, submit button.
pub fn render_form(
    schema: &FormSchema,
    values: &FieldValues,
    errors: &ValidationResult,
    options: &RenderOptions,
) -> Markup {
    html! {
        form class="dynamic-form" method="post" action=(options.action) novalidate
            onsubmit="this.querySelector('button[type=submit]').disabled = true" {
            @if let Some(notice) = &options.notice {
                div class="form-notice" role="alert" { (notice) }
            }
            @for control in controls(schema) {
                (control.render(values.get(control.name()), errors.get_error(control.name())))
            }
            button type="submit" class="submit" disabled[options.submitting] {
                @if options.submitting { "Submitting..." } @else { (options.submit_label) }
            }
        }
    }
}
