// File: src/value.rs
// Purpose: Live field values, input binding and the submission payload

use crate::schema::{FieldKind, FormSchema};
use formcraft_validation::{is_blank, parse_finite};
use serde::Serialize;
use serde_json::{Map, Value as JsonValue};
use std::collections::HashMap;
use std::fmt;

/// Current value of one field.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value entered (e.g. a cleared number input)
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

static EMPTY: FieldValue = FieldValue::Empty;

/// 2^53; larger whole numbers are not exact in an f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

impl FieldValue {
    /// Initial value for a freshly bound control of this kind.
    pub fn default_for(kind: &FieldKind) -> Self {
        match kind {
            FieldKind::Number => FieldValue::Empty,
            FieldKind::Checkbox => FieldValue::Bool(false),
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::Textarea
            | FieldKind::Select(_)
            | FieldKind::Radio(_) => FieldValue::Text(String::new()),
        }
    }

    /// Convert the raw string of an input event into a value for `kind`.
    ///
    /// Number inputs map blank to `Empty` and keep unparseable input as
    /// `Text` so the format rule can report it.
    pub fn bind(kind: &FieldKind, raw: &str) -> Self {
        match kind {
            FieldKind::Number => {
                if is_blank(raw) {
                    FieldValue::Empty
                } else {
                    parse_finite(raw)
                        .map(FieldValue::Number)
                        .unwrap_or_else(|| FieldValue::Text(raw.to_string()))
                }
            }
            FieldKind::Checkbox => FieldValue::Bool(matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "true" | "on" | "1" | "yes"
            )),
            FieldKind::Text
            | FieldKind::Email
            | FieldKind::Textarea
            | FieldKind::Select(_)
            | FieldKind::Radio(_) => FieldValue::Text(raw.to_string()),
        }
    }

    /// True for "nothing entered": `Empty`, an empty string or an unticked box.
    ///
    /// `Number(0.0)` and whitespace-only text are values, not empty input.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(s) => s.is_empty(),
            FieldValue::Number(_) => false,
            FieldValue::Bool(b) => !b,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> bool {
        matches!(self, FieldValue::Bool(true))
    }

    /// JSON form used in submissions; `Empty` has none.
    pub fn to_json(&self) -> Option<JsonValue> {
        match self {
            FieldValue::Empty => None,
            FieldValue::Text(s) => Some(JsonValue::String(s.clone())),
            // Whole numbers go out as JSON integers (41, not 41.0)
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => Some(JsonValue::from(*n as i64)),
            FieldValue::Number(n) => serde_json::Number::from_f64(*n).map(JsonValue::Number),
            FieldValue::Bool(b) => Some(JsonValue::Bool(*b)),
        }
    }

    /// Read a value back from a stored answer.
    pub fn from_json(value: &JsonValue) -> Self {
        match value {
            JsonValue::Null => FieldValue::Empty,
            JsonValue::Bool(b) => FieldValue::Bool(*b),
            JsonValue::Number(n) => n.as_f64().map(FieldValue::Number).unwrap_or(FieldValue::Empty),
            JsonValue::String(s) => FieldValue::Text(s.clone()),
            other => FieldValue::Text(other.to_string()),
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Empty => Ok(()),
            FieldValue::Text(s) => f.write_str(s),
            // Integral numbers print without the trailing ".0"
            FieldValue::Number(n) if n.fract() == 0.0 && n.abs() < MAX_SAFE_INTEGER => write!(f, "{}", *n as i64),
            FieldValue::Number(n) => write!(f, "{}", n),
            FieldValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<i32> for FieldValue {
    fn from(n: i32) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// Live values of one form instance, keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldValues {
    values: HashMap<String, FieldValue>,
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults for every field of the schema
    pub fn defaults_for(schema: &FormSchema) -> Self {
        let values = schema
            .iter()
            .map(|field| (field.name.clone(), FieldValue::default_for(&field.kind)))
            .collect();
        Self { values }
    }

    /// Value for `name`; missing entries read as `Empty`.
    pub fn get(&self, name: &str) -> &FieldValue {
        self.values.get(name).unwrap_or(&EMPTY)
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Bind the raw input string for `name` using the field's kind.
    ///
    /// Returns false when the schema has no such field.
    pub fn bind_raw(&mut self, schema: &FormSchema, name: &str, raw: &str) -> bool {
        match schema.get(name) {
            Some(field) => {
                self.values
                    .insert(field.name.clone(), FieldValue::bind(&field.kind, raw));
                true
            }
            None => false,
        }
    }

    /// Bind a full form post (e.g. decoded `application/x-www-form-urlencoded`).
    ///
    /// Checkboxes that are absent from the post are unticked; keys that match
    /// no field are ignored.
    pub fn bind_form<I, K, V>(schema: &FormSchema, pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut values = Self::defaults_for(schema);
        for (key, raw) in pairs {
            values.bind_raw(schema, key.as_ref(), raw.as_ref());
        }
        values
    }

    /// Submission payload for the fields of `schema`.
    pub fn answers(&self, schema: &FormSchema) -> Answers {
        let map = schema
            .iter()
            .filter_map(|field| {
                self.get(&field.name)
                    .to_json()
                    .map(|json| (field.name.clone(), json))
            })
            .collect();
        Answers(map)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// The `answers` object posted to the backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Answers(Map<String, JsonValue>);

impl Answers {
    pub fn get(&self, name: &str) -> Option<&JsonValue> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &JsonValue)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldDescriptor;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn schema() -> FormSchema {
        FormSchema::new(vec![
            FieldDescriptor::new("name", "Name", FieldKind::Text),
            FieldDescriptor::new("age", "Age", FieldKind::Number),
            FieldDescriptor::new("terms", "Accept terms", FieldKind::Checkbox),
        ])
    }

    #[test]
    fn test_defaults() {
        let values = FieldValues::defaults_for(&schema());
        assert_eq!(values.get("name"), &FieldValue::Text(String::new()));
        assert_eq!(values.get("age"), &FieldValue::Empty);
        assert_eq!(values.get("terms"), &FieldValue::Bool(false));
        assert_eq!(values.get("missing"), &FieldValue::Empty);
    }

    #[test]
    fn test_number_binding() {
        assert_eq!(FieldValue::bind(&FieldKind::Number, ""), FieldValue::Empty);
        assert_eq!(FieldValue::bind(&FieldKind::Number, "  "), FieldValue::Empty);
        assert_eq!(FieldValue::bind(&FieldKind::Number, "0"), FieldValue::Number(0.0));
        assert_eq!(FieldValue::bind(&FieldKind::Number, "12.5"), FieldValue::Number(12.5));
        assert_eq!(
            FieldValue::bind(&FieldKind::Number, "twelve"),
            FieldValue::Text("twelve".into())
        );
    }

    #[test]
    fn test_checkbox_binding() {
        assert_eq!(FieldValue::bind(&FieldKind::Checkbox, "on"), FieldValue::Bool(true));
        assert_eq!(FieldValue::bind(&FieldKind::Checkbox, "true"), FieldValue::Bool(true));
        assert_eq!(FieldValue::bind(&FieldKind::Checkbox, ""), FieldValue::Bool(false));
    }

    #[test]
    fn test_zero_is_not_empty() {
        assert!(!FieldValue::Number(0.0).is_empty());
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::Text(String::new()).is_empty());
        assert!(!FieldValue::Text("  ".into()).is_empty());
        assert!(FieldValue::Bool(false).is_empty());
    }

    #[test]
    fn test_bind_form_ignores_unknown_keys() {
        let values = FieldValues::bind_form(
            &schema(),
            vec![("name", "Jane"), ("age", "41"), ("admin", "true")],
        );

        assert_eq!(values.get("name"), &FieldValue::Text("Jane".into()));
        assert_eq!(values.get("age"), &FieldValue::Number(41.0));
        assert_eq!(values.get("terms"), &FieldValue::Bool(false));
        assert_eq!(values.get("admin"), &FieldValue::Empty);
    }

    #[test]
    fn test_answers_skip_empty_values() {
        let values = FieldValues::bind_form(&schema(), vec![("name", "Jane"), ("terms", "on")]);
        let answers = values.answers(&schema());

        assert_eq!(
            serde_json::to_value(&answers).unwrap(),
            json!({ "name": "Jane", "terms": true })
        );
    }

    #[test]
    fn test_whole_numbers_serialize_as_integers() {
        assert_eq!(FieldValue::Number(41.0).to_json(), Some(json!(41)));
        assert_eq!(FieldValue::Number(2.5).to_json(), Some(json!(2.5)));
        assert_eq!(FieldValue::Empty.to_json(), None);
    }

    #[test]
    fn test_display_formats_integers() {
        assert_eq!(FieldValue::Number(42.0).to_string(), "42");
        assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
        assert_eq!(FieldValue::Empty.to_string(), "");
    }
}
