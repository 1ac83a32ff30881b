// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Documentation graph types.
//!
//! Entities live in one arena ([`Documentation::entities`]). Links between
//! them (association targets, foreign-key targets) are [`EntityId`] indices
//! into that arena, never owning references.

use std::{fmt, sync::Arc};

use serde::Serialize;

use crate::{
    sample::DataSample,
    schema::{Endpoint, JsonType},
    source::StructDefinition
};

/// Index of an entity in [`Documentation::entities`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct EntityId(pub(crate) usize);

impl EntityId {
    /// Position in the arena.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Root of the documentation graph.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Documentation {
    /// Title, from configuration overrides.
    pub title: String,

    /// Description, from configuration overrides.
    pub description: String,

    /// Entities sorted by table name.
    pub entities: Vec<Entity>,

    /// Problems recovered from while building.
    pub diagnostics: Vec<Diagnostic>
}

impl Documentation {
    /// Entity at an arena index.
    #[must_use]
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(id.0)
    }

    /// Entity with a qualified `package.Name`.
    #[must_use]
    pub fn find(&self, qualified: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.id == qualified)
    }

    /// Entity backed by a table.
    #[must_use]
    pub fn find_table(&self, table: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.table == table)
    }

    /// Resolved target of an association.
    #[must_use]
    pub fn association_target(&self, association: &Association) -> Option<&Entity> {
        association.entity.and_then(|id| self.entity(id))
    }

    /// Resolved target of a foreign key.
    #[must_use]
    pub fn foreign_key_target(&self, foreign_key: &ForeignKey) -> Option<&Entity> {
        foreign_key.entity.and_then(|id| self.entity(id))
    }

    /// Diagnostics recorded for one entity.
    pub fn diagnostics_for<'a>(&'a self, entity: &'a str) -> impl Iterator<Item = &'a Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |diagnostic| diagnostic.entity == entity)
    }
}

/// One documented data-model type.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Entity {
    /// Arena index.
    pub handle: EntityId,

    /// Qualified `package.Name`, unique per run.
    pub id: String,

    /// Type name.
    pub name: String,

    /// Struct doc comment.
    pub description: String,

    /// Package name.
    pub pkg: String,

    /// Package path.
    pub path: String,

    /// Backing table.
    pub table: String,

    /// Column fields in schema order.
    pub fields: Vec<Field>,

    /// Relationship fields in schema order.
    pub associations: Vec<Association>,

    /// Actions, shared with the descriptor.
    pub endpoints: Arc<[Endpoint]>,

    /// Extracted declaration; empty when extraction failed.
    pub definition: StructDefinition,

    /// Sample payloads; empty when generation failed.
    pub data_sample: DataSample
}

impl Entity {
    /// Primary-key fields in declaration order.
    pub fn primary_key(&self) -> impl Iterator<Item = &Field> {
        self.fields.iter().filter(|field| field.primary_key)
    }

    /// Find a column field by declared name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Find an association by declared name.
    #[must_use]
    pub fn association(&self, name: &str) -> Option<&Association> {
        self.associations.iter().find(|association| association.name == name)
    }
}

/// A column field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Field {
    /// Declared name.
    pub name: String,

    /// Column comment.
    pub description: String,

    /// JSON key.
    pub json_tag: String,

    /// Coarse JSON category.
    pub json_type: JsonType,

    /// Storage data type name.
    pub db_type: String,

    /// Canonical type signature.
    pub type_signature: String,

    /// Column name.
    pub db_name: String,

    /// Validation expression.
    pub validation: Option<String>,

    /// Part of the primary key.
    pub primary_key: bool,

    /// Generated by storage.
    pub auto_increment: bool,

    /// Nullable column or pointer type.
    pub nullable: bool,

    /// UNIQUE constraint.
    pub unique: bool,

    /// Unique index name.
    pub unique_index: Option<String>,

    /// Default value expression.
    pub default: Option<String>,

    /// Allowed values, empty unless the type is an enum.
    #[serde(rename = "enum")]
    pub enum_values: Vec<String>,

    /// Covered by an index.
    pub indexed: bool,

    /// Index name.
    pub index: Option<String>,

    /// Referenced table, if any.
    pub foreign_key: Option<ForeignKey>
}

/// A relationship field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Association {
    /// Declared name.
    pub name: String,

    /// Qualified name of the target; empty for plural associations.
    pub entity_name: String,

    /// Resolved target.
    pub entity: Option<EntityId>,

    /// Plural relationship.
    pub array: bool
}

/// A foreign-key link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ForeignKey {
    /// Referenced table.
    pub table: String,

    /// Referenced column.
    pub field: String,

    /// Entity backed by the referenced table.
    pub entity: Option<EntityId>
}

/// A recovered problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Diagnostic {
    /// Qualified name of the affected entity.
    pub entity: String,

    /// What went wrong.
    pub message: String
}

impl Diagnostic {
    /// Create a diagnostic for an entity.
    #[must_use]
    pub fn new(entity: impl Into<String>, message: impl fmt::Display) -> Self {
        Self {
            entity:  entity.into(),
            message: message.to_string()
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.entity, self.message)
    }
}
