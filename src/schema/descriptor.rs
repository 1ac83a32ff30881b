// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resource descriptors.
//!
//! A [`ResourceDescriptor`] bundles everything the graph builder needs to
//! know about one data-model type: where it is declared, which table backs
//! it, its column/relationship schema and the actions exposed for it.
//! Descriptors are plain data; they come from [`discover`](super::discover)
//! or from any other collaborator (e.g. deserialized from JSON).

use std::sync::Arc;

use convert_case::{Case, Casing};
use serde::{Deserialize, Serialize};

use super::{ColumnShape, DataType, TagSettings};
use crate::source::types::base_type_name;

/// Package name used for types declared directly in the source root.
pub const ROOT_PACKAGE: &str = "crate";

/// Defining package and declared name of a type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeIdentity {
    /// `/`-separated package directory relative to the source root.
    pub pkg_path: String,

    /// Declared type name.
    pub name: String
}

impl TypeIdentity {
    /// Create an identity from a package path and a type name.
    #[must_use]
    pub fn new(pkg_path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            pkg_path: pkg_path.into(),
            name:     name.into()
        }
    }

    /// Last segment of the package path.
    #[must_use]
    pub fn package(&self) -> &str {
        self.pkg_path
            .rsplit('/')
            .find(|segment| !segment.is_empty())
            .unwrap_or(ROOT_PACKAGE)
    }

    /// Qualified `package.Name` form.
    ///
    /// ```
    /// use entity_docify::schema::TypeIdentity;
    ///
    /// assert_eq!(TypeIdentity::new("app/shop", "Category").full_name(), "shop.Category");
    /// assert_eq!(TypeIdentity::new("", "Config").full_name(), "crate.Config");
    /// ```
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}.{}", self.package(), self.name)
    }
}

/// An action exposed for a resource. Opaque to the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Endpoint {
    /// Action name (e.g. `create`).
    pub name: String,

    /// HTTP method.
    pub method: String,

    /// Route path.
    pub path: String,

    /// Free-text description.
    pub description: String
}

/// Everything known about one data-model type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceDescriptor {
    /// Qualified `package.Name`.
    pub name: String,

    /// Backing table.
    pub table: String,

    /// Where the type is declared.
    pub type_identity: TypeIdentity,

    /// Column and relationship schema.
    pub schema: Schema,

    /// Exposed actions, shared with every consumer.
    #[serde(default = "no_actions")]
    pub actions: Arc<[Endpoint]>
}

fn no_actions() -> Arc<[Endpoint]> {
    Arc::from(Vec::new())
}

impl ResourceDescriptor {
    /// Create a descriptor named after its type identity, without actions.
    #[must_use]
    pub fn new(table: impl Into<String>, type_identity: TypeIdentity, schema: Schema) -> Self {
        Self {
            name: type_identity.full_name(),
            table: table.into(),
            type_identity,
            schema,
            actions: no_actions()
        }
    }

    /// Replace the qualified name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Attach the action list.
    #[must_use]
    pub fn with_actions(mut self, actions: impl Into<Arc<[Endpoint]>>) -> Self {
        self.actions = actions.into();
        self
    }
}

/// Ordered field schema of a resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schema {
    /// Fields in declaration order.
    pub fields: Vec<SchemaField>
}

impl Schema {
    /// Create a schema from fields in declaration order.
    #[must_use]
    pub fn new(fields: Vec<SchemaField>) -> Self {
        Self {
            fields
        }
    }

    /// Column names of primary-key fields, in declaration order.
    #[must_use]
    pub fn primary_keys(&self) -> Vec<&str> {
        self.fields
            .iter()
            .filter(|field| field.primary_key)
            .filter_map(SchemaField::db_name)
            .collect()
    }

    /// Find a field by its declared name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&SchemaField> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// One field of a resource schema.
///
/// A field with a `db_name` is a column; one without is a relationship
/// candidate, classified by its [`ColumnShape`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemaField {
    /// Declared field name.
    pub name: String,

    /// Backing column, `None` for relationships and skipped fields.
    pub db_name: Option<String>,

    /// Canonical type signature.
    pub type_signature: String,

    /// Kind of the field's type.
    pub shape: ColumnShape,

    /// Storage data type.
    pub data_type: DataType,

    /// Raw JSON tag (`name,omitempty`, `-`).
    pub json: Option<String>,

    /// Validation expression.
    pub validation: Option<String>,

    /// Storage settings (`TYPE`, `FK`, ...).
    pub settings: TagSettings,

    /// Default value expression.
    pub default: Option<String>,

    /// Column comment.
    pub comment: Option<String>,

    /// Part of the primary key.
    pub primary_key: bool,

    /// Generated by storage.
    pub auto_increment: bool,

    /// UNIQUE constraint.
    pub unique: bool,

    /// Explicitly nullable.
    pub nullable: bool,

    /// Unique index name.
    pub unique_index: Option<String>,

    /// Index name.
    pub index: Option<String>
}

impl SchemaField {
    /// A column field named after its snake-cased declared name.
    #[must_use]
    pub fn column(name: &str, type_signature: &str, shape: ColumnShape, data_type: DataType) -> Self {
        Self {
            name: name.to_string(),
            db_name: Some(name.to_case(Case::Snake)),
            type_signature: type_signature.to_string(),
            shape,
            data_type,
            ..Self::default()
        }
    }

    /// A relationship field without a backing column.
    #[must_use]
    pub fn relation(name: &str, type_signature: &str, shape: ColumnShape) -> Self {
        Self {
            name: name.to_string(),
            type_signature: type_signature.to_string(),
            shape,
            ..Self::default()
        }
    }

    /// Backing column name.
    #[must_use]
    pub fn db_name(&self) -> Option<&str> {
        self.db_name.as_deref()
    }

    /// Check if the field is backed by a column.
    #[must_use]
    pub fn is_column(&self) -> bool {
        self.db_name.is_some()
    }

    /// First segment of the JSON tag, defaulting to the declared name.
    #[must_use]
    pub fn json_tag(&self) -> &str {
        self.json
            .as_deref()
            .and_then(|tag| tag.split(',').next())
            .filter(|tag| !tag.is_empty())
            .unwrap_or(&self.name)
    }

    /// Check if the type is a fixed-precision decimal.
    #[must_use]
    pub fn is_decimal(&self) -> bool {
        syn::parse_str::<syn::Type>(&self.type_signature)
            .ok()
            .and_then(|ty| base_type_name(&ty))
            .is_some_and(|name| matches!(name.as_str(), "Decimal" | "BigDecimal"))
    }

    /// Set the raw JSON tag.
    #[must_use]
    pub fn with_json(mut self, json: &str) -> Self {
        self.json = Some(json.to_string());
        self
    }

    /// Mark as primary key.
    #[must_use]
    pub fn primary(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Mark as generated by storage.
    #[must_use]
    pub fn auto(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Add a storage setting.
    #[must_use]
    pub fn with_setting(mut self, key: &str, value: &str) -> Self {
        self.settings.insert(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_name_uses_last_package_segment() {
        assert_eq!(TypeIdentity::new("shop", "Product").full_name(), "shop.Product");
        assert_eq!(TypeIdentity::new("app/shop/", "Product").full_name(), "shop.Product");
        assert_eq!(TypeIdentity::new("", "Product").full_name(), "crate.Product");
    }

    #[test]
    fn primary_keys_keep_declaration_order() {
        let schema = Schema::new(vec![
            SchemaField::column("tenant", "i64", ColumnShape::Integer, DataType::Int).primary(),
            SchemaField::column("name", "String", ColumnShape::String, DataType::String),
            SchemaField::column("customerId", "i64", ColumnShape::Integer, DataType::Int).primary(),
        ]);
        assert_eq!(schema.primary_keys(), vec!["tenant", "customer_id"]);
    }

    #[test]
    fn json_tag_first_segment_or_name() {
        let field = SchemaField::column("name", "String", ColumnShape::String, DataType::String);
        assert_eq!(field.json_tag(), "name");
        assert_eq!(field.clone().with_json("title,omitempty").json_tag(), "title");
        assert_eq!(field.clone().with_json(",omitempty").json_tag(), "name");
        assert_eq!(field.with_json("-").json_tag(), "-");
    }

    #[test]
    fn decimal_detection() {
        let price = SchemaField::column(
            "price",
            "Option<rust_decimal::Decimal>",
            ColumnShape::Pointer(Box::new(ColumnShape::Struct(TypeIdentity::new(
                "rust_decimal",
                "Decimal"
            )))),
            DataType::Custom("decimal".to_string())
        );
        assert!(price.is_decimal());
        let name = SchemaField::column("name", "String", ColumnShape::String, DataType::String);
        assert!(!name.is_decimal());
    }

    #[test]
    fn descriptor_deserializes_without_actions() {
        let descriptor: ResourceDescriptor = serde_json::from_value(serde_json::json!({
            "name": "shop.Product",
            "table": "products",
            "type_identity": { "pkg_path": "shop", "name": "Product" },
            "schema": { "fields": [] }
        }))
        .unwrap();
        assert_eq!(descriptor.name, "shop.Product");
        assert!(descriptor.actions.is_empty());
    }
}
