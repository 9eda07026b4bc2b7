// File: src/schema.rs
// Purpose: Field descriptors and the normalizer that builds them from untyped JSON

use serde_json::Value as JsonValue;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// The kind of input a field collects.
///
/// Choice kinds carry their option list, so a `Select` or `Radio` always has
/// at least one option once it leaves the normalizer.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    Email,
    Number,
    Select(Vec<String>),
    Radio(Vec<String>),
    Checkbox,
    Textarea,
}

impl FieldKind {
    /// Name used for this kind in backend payloads (the `type` key).
    pub fn wire_name(&self) -> &'static str {
        match self {
            FieldKind::Text => "text",
            FieldKind::Email => "email",
            FieldKind::Number => "number",
            FieldKind::Select(_) => "select",
            FieldKind::Radio(_) => "radio",
            FieldKind::Checkbox => "checkbox",
            FieldKind::Textarea => "textarea",
        }
    }

    /// Declared options; empty for kinds without a fixed choice set.
    pub fn options(&self) -> &[String] {
        match self {
            FieldKind::Select(options) | FieldKind::Radio(options) => options,
            _ => &[],
        }
    }

    pub fn is_choice(&self) -> bool {
        matches!(self, FieldKind::Select(_) | FieldKind::Radio(_))
    }

    /// Resolve a wire name plus options into a kind.
    ///
    /// Unknown names resolve to `Text`. Choice kinds without options also
    /// resolve to `Text` since there would be nothing to pick from.
    fn resolve(raw: &str, options: Vec<String>) -> FieldKind {
        let name = raw.trim().to_ascii_lowercase();
        match name.as_str() {
            "text" => FieldKind::Text,
            "email" => FieldKind::Email,
            "number" => FieldKind::Number,
            "checkbox" => FieldKind::Checkbox,
            "textarea" => FieldKind::Textarea,
            "select" | "radio" if options.is_empty() => {
                debug!(kind = %name, "choice field without options, rendering as text");
                FieldKind::Text
            }
            "select" => FieldKind::Select(options),
            "radio" => FieldKind::Radio(options),
            other => {
                debug!(kind = %other, "unrecognized field kind, rendering as text");
                FieldKind::Text
            }
        }
    }
}

/// Static description of one form field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Submission key, unique within a schema
    pub name: String,
    /// Caption shown next to the control
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, label: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            kind,
            required: false,
        }
    }

    /// Mark the field as required
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn options(&self) -> &[String] {
        self.kind.options()
    }
}

/// Ordered, immutable list of field descriptors.
///
/// Cloning is cheap; the descriptors are shared.
#[derive(Debug, Clone, PartialEq)]
pub struct FormSchema {
    fields: Arc<[FieldDescriptor]>,
}

impl FormSchema {
    /// Build a schema from typed descriptors.
    ///
    /// Field names stay unique: when a name repeats, the first descriptor wins
    /// and the later one is dropped.
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        let mut seen = HashSet::new();
        let fields: Vec<FieldDescriptor> = fields
            .into_iter()
            .filter(|field| {
                let fresh = seen.insert(field.name.clone());
                if !fresh {
                    warn!(field = %field.name, "duplicate field name in schema, keeping the first");
                }
                fresh
            })
            .collect();

        Self {
            fields: fields.into(),
        }
    }

    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FieldDescriptor> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Look up a field by name
    pub fn get(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }
}

impl Default for FormSchema {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl<'a> IntoIterator for &'a FormSchema {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Normalize a loosely-typed field list into a [`FormSchema`].
///
/// Accepts the `fields.fields` array as it comes off the wire (persisted forms
/// and AI output share this shape). Anything that is not an array produces an
/// empty schema. Records without a usable `name` are skipped.
pub fn normalize(raw: &JsonValue) -> FormSchema {
    match raw {
        JsonValue::Array(records) => normalize_records(records),
        JsonValue::Null => FormSchema::default(),
        other => {
            warn!(found = %json_type(other), "field list is not an array, using an empty schema");
            FormSchema::default()
        }
    }
}

/// Normalize a slice of untyped field records, preserving their order.
pub fn normalize_records(records: &[JsonValue]) -> FormSchema {
    let fields = records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| normalize_field(index, record))
        .collect();

    FormSchema::new(fields)
}

fn normalize_field(index: usize, record: &JsonValue) -> Option<FieldDescriptor> {
    let Some(obj) = record.as_object() else {
        warn!(index, "field record is not an object, skipping");
        return None;
    };

    let name = obj.get("name").and_then(scalar_string).filter(|s| !s.is_empty());
    let Some(name) = name else {
        warn!(index, "field record has no name, skipping");
        return None;
    };

    let label = obj
        .get("label")
        .and_then(scalar_string)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| name.clone());

    let kind_name = obj
        .get("type")
        .or_else(|| obj.get("kind"))
        .and_then(JsonValue::as_str)
        .unwrap_or("text");

    let options = obj.get("options").map(option_list).unwrap_or_default();

    Some(FieldDescriptor {
        name,
        label,
        kind: FieldKind::resolve(kind_name, options),
        required: obj.get("required").map(truthy).unwrap_or(false),
    })
}

/// Strings, numbers and booleans all become trimmed strings.
fn scalar_string(value: &JsonValue) -> Option<String> {
    match value {
        JsonValue::String(s) => Some(s.trim().to_string()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn option_list(value: &JsonValue) -> Vec<String> {
    match value {
        JsonValue::Array(items) => items
            .iter()
            .filter_map(scalar_string)
            .filter(|s| !s.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

fn truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Bool(b) => *b,
        JsonValue::String(s) => matches!(s.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1"),
        JsonValue::Number(n) => n.as_f64().map(|n| n != 0.0).unwrap_or(false),
        _ => false,
    }
}

fn json_type(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
