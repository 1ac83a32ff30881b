// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Sample payload rendering.
//!
//! Create and update payloads are assembled row by row so every row can
//! carry a trailing `//` annotation describing its field:
//!
//! ```text
//! {
//! 	"name":"Hv3kq0LmZa", // String,Display name
//! 	"status":"active" // String,enum: active, inactive
//! }
//! ```
//!
//! An annotation is only known once its row is written, so it is emitted
//! in front of the next row (or the closing brace). The result is JSON
//! with line comments; [`strip_line_comments`] turns it into plain JSON.

use std::fmt::Write;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Serializer, Value, ser::PrettyFormatter};

use super::Record;
use crate::{
    config::DocConfig,
    error::{DocError, Result},
    graph::{Entity, Field},
    schema::Schema,
    utils::text::{strip_line_comments, wrap_in_array}
};

/// Sample payloads of one entity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSample {
    /// Annotated create request body.
    pub create_json: String,

    /// Annotated update request body, without primary keys.
    pub update_json: String,

    /// Create body in a one-element array.
    pub batch_json: String,

    /// Record as returned by a read.
    pub single_response_json: String,

    /// Single response in a one-element array.
    pub multiple_response_json: String
}

impl DataSample {
    /// Render the payloads of `entity` from one record.
    ///
    /// `schema` supplies every field for the response payloads; create and
    /// update payloads use the entity's column fields, skipping generated
    /// and audit columns.
    ///
    /// # Errors
    ///
    /// Returns [`DocError::Serialization`] if a value cannot be serialized.
    pub fn render(entity: &Entity, schema: &Schema, record: &Record, config: &DocConfig) -> Result<Self> {
        let serialization = |source| DocError::Serialization {
            entity: entity.id.clone(),
            source
        };

        let mut create = AnnotatedObject::default();
        let mut update = AnnotatedObject::default();
        for field in &entity.fields {
            if field.auto_increment || config.is_audit_column(&field.db_name) {
                continue;
            }

            let value = record.get(&field.name).unwrap_or(&Value::Null);
            let value = serde_json::to_string(value).map_err(serialization)?;
            let key = serde_json::to_string(&field.json_tag).map_err(serialization)?;
            let annotation = annotation(field);

            create.push(&key, &value, &annotation);
            if !field.primary_key {
                update.push(&key, &value, &annotation);
            }
        }
        let create_json = create.finish();

        let mut response = Map::new();
        for field in &schema.fields {
            let tag = field.json_tag();
            if tag == "-" {
                continue;
            }
            let value = record.get(&field.name).cloned().unwrap_or(Value::Null);
            response.insert(tag.to_string(), value);
        }
        let single_response_json = to_pretty(&Value::Object(response)).map_err(serialization)?;

        Ok(Self {
            batch_json: wrap_in_array(&create_json),
            multiple_response_json: wrap_in_array(&single_response_json),
            create_json,
            update_json: update.finish(),
            single_response_json
        })
    }

    /// Check if this is the empty stand-in for a failed render.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.create_json.is_empty()
    }

    /// Create payload without annotations.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid JSON.
    pub fn create_value(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&strip_line_comments(&self.create_json))
    }

    /// Update payload without annotations.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid JSON.
    pub fn update_value(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&strip_line_comments(&self.update_json))
    }

    /// Batch payload without annotations.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid JSON.
    pub fn batch_value(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&strip_line_comments(&self.batch_json))
    }

    /// Parsed single response.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid JSON.
    pub fn single_value(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.single_response_json)
    }

    /// Parsed multiple response.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload is not valid JSON.
    pub fn multiple_value(&self) -> serde_json::Result<Value> {
        serde_json::from_str(&self.multiple_response_json)
    }
}

/// Object body whose rows carry trailing annotations.
#[derive(Debug, Default)]
struct AnnotatedObject {
    body:    String,
    pending: String
}

impl AnnotatedObject {
    fn push(&mut self, key: &str, value: &str, annotation: &str) {
        let _ = write!(self.body, "{}\n\t{}:{},", self.pending, key, value);
        self.pending = format!(" // {annotation}");
    }

    fn finish(self) -> String {
        let body = self.body.strip_suffix(',').unwrap_or(&self.body);
        format!("{{{}{}\n}}", body, self.pending)
    }
}

/// Comma-joined description of a field, on one line.
fn annotation(field: &Field) -> String {
    let mut parts = vec![field.type_signature.clone()];
    if !field.enum_values.is_empty() {
        parts.push(format!("enum: {}", field.enum_values.join(", ")));
    }
    if !field.description.is_empty() {
        parts.push(field.description.clone());
    }
    if field.nullable {
        parts.push("optional".to_string());
    }
    if field.unique {
        parts.push("unique".to_string());
    }
    if let Some(validation) = field.validation.as_deref().filter(|v| !v.is_empty()) {
        parts.push(format!("validation: {validation}"));
    }
    if field.primary_key {
        parts.push("pk".to_string());
    }
    if field.auto_increment {
        parts.push("autoIncr.".to_string());
    }
    parts.join(",").replace(['\r', '\n'], " ")
}

/// Pretty-print with tab indentation.
fn to_pretty(value: &Value) -> serde_json::Result<String> {
    let mut out = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&out).into_owned())
}
