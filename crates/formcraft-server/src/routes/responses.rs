// File: src/routes/responses.rs
// Purpose: Responses table for a form

use super::{html, load_form};
use crate::error::AppError;
use crate::pages;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Response;
use formcraft::{FieldValue, FormSchema, ResponseRecord};
use serde_json::Value as JsonValue;

#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub key: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub id: String,
    pub submitted_at: String,
    pub cells: Vec<String>,
}

/// Response records laid out for display: schema fields first, in schema
/// order, then any answer keys the schema no longer has.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseTable {
    pub columns: Vec<Column>,
    pub rows: Vec<Row>,
}

impl ResponseTable {
    pub fn build(schema: &FormSchema, records: &[ResponseRecord]) -> Self {
        let mut columns: Vec<Column> = schema
            .iter()
            .map(|field| Column {
                key: field.name.clone(),
                label: field.label.clone(),
            })
            .collect();

        for record in records {
            for key in record.answers.keys() {
                if !columns.iter().any(|c| &c.key == key) {
                    columns.push(Column {
                        key: key.clone(),
                        label: key.clone(),
                    });
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| Row {
                id: record.id.clone(),
                submitted_at: record
                    .submitted_at
                    .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
                    .unwrap_or_default(),
                cells: columns
                    .iter()
                    .map(|c| record.answers.get(&c.key).map(display_answer).unwrap_or_default())
                    .collect(),
            })
            .collect();

        Self { columns, rows }
    }
}

fn display_answer(value: &JsonValue) -> String {
    match value {
        JsonValue::Bool(true) => "Yes".to_string(),
        JsonValue::Bool(false) => "No".to_string(),
        other => FieldValue::from_json(other).to_string(),
    }
}

/// GET /forms/:id/responses
pub async fn list(State(state): State<AppState>, Path(id): Path<String>) -> Result<Response, AppError> {
    let form = load_form(&state, &id).await?;
    let records = state.client.list_responses(&form.id).await?;
    let table = ResponseTable::build(&form.schema(), &records);

    Ok(html(
        StatusCode::OK,
        pages::responses_page(&state.site, &form, &table),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use formcraft::{FieldDescriptor, FieldKind};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn record(id: &str, answers: JsonValue) -> ResponseRecord {
        serde_json::from_value(json!({
            "_id": id,
            "submittedAt": "2024-05-01T10:30:00Z",
            "answers": answers,
        }))
        .unwrap()
    }

    #[test]
    fn test_columns_follow_schema_then_extras() {
        let schema = FormSchema::new(vec![
            FieldDescriptor::new("fullName", "Full Name", FieldKind::Text),
            FieldDescriptor::new("age", "Age", FieldKind::Number),
        ]);
        let records = vec![
            record("r1", json!({ "age": 41, "fullName": "Jane", "legacy": "x" })),
            record("r2", json!({ "fullName": "Ada", "terms": true })),
        ];

        let table = ResponseTable::build(&schema, &records);

        let labels: Vec<&str> = table.columns.iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["Full Name", "Age", "legacy", "terms"]);
        assert_eq!(table.rows[0].cells, vec!["Jane", "41", "x", ""]);
        assert_eq!(table.rows[1].cells, vec!["Ada", "", "", "Yes"]);
        assert_eq!(table.rows[0].submitted_at, "2024-05-01 10:30 UTC");
    }

    #[test]
    fn test_empty_records() {
        let schema = FormSchema::new(vec![FieldDescriptor::new("a", "A", FieldKind::Text)]);
        let table = ResponseTable::build(&schema, &[]);

        assert_eq!(table.columns.len(), 1);
        assert!(table.rows.is_empty());
    }
}
