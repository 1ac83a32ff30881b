// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Two-pass graph construction.
//!
//! # Algorithm
//!
//! ```text
//! descriptors ── sort by table (stable)
//!   │
//!   ├── pass 1, per descriptor:
//!   │     extract struct          ── failure → empty definition + diagnostic
//!   │     split "pkg.Name"
//!   │     schema fields ── column           → Field (+ ForeignKey)
//!   │                  └─ no column, struct → Association { entity_name }
//!   │                  └─ no column, slice  → Association { array }
//!   │     fetch or synthesize record → DataSample ── failure → diagnostic
//!   │
//!   └── pass 2, per entity:
//!         Association.entity_name → EntityId (by qualified name)
//!         ForeignKey.table        → EntityId (by table)
//! ```
//!
//! Misses in pass 2 leave the link empty; they are not errors.

use std::{collections::HashMap, sync::Arc};

use tracing::{debug, error, info, warn};

use super::{Association, Diagnostic, Documentation, Entity, EntityId, Field, ForeignKey};
use crate::{
    config::DocConfig,
    sample::{self, RecordSource},
    schema::{ColumnShape, JsonType, ResourceDescriptor, SchemaField},
    source::{StructDefinition, StructExtractor}
};

/// Builds a [`Documentation`] from resource descriptors.
///
/// # Example
///
/// ```rust
/// use entity_docify::{DocConfig, GraphBuilder, sample::NoRecords};
///
/// let config = DocConfig::new("src");
/// let documentation = GraphBuilder::new(&config, &NoRecords).build(&[]);
/// assert!(documentation.entities.is_empty());
/// ```
pub struct GraphBuilder<'a> {
    config:    &'a DocConfig,
    records:   &'a dyn RecordSource,
    extractor: StructExtractor
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder reading sources under `config.source_root`.
    #[must_use]
    pub fn new(config: &'a DocConfig, records: &'a dyn RecordSource) -> Self {
        Self {
            config,
            records,
            extractor: StructExtractor::new(&config.source_root)
        }
    }

    /// Build the documentation graph.
    #[must_use]
    pub fn build(&self, descriptors: &[ResourceDescriptor]) -> Documentation {
        let mut documentation = Documentation {
            title: self.config.title.clone().unwrap_or_default(),
            description: self.config.description.clone().unwrap_or_default(),
            ..Documentation::default()
        };

        let mut sorted: Vec<&ResourceDescriptor> = descriptors.iter().collect();
        sorted.sort_by(|a, b| a.table.cmp(&b.table));

        let mut tables: HashMap<&str, &ResourceDescriptor> = HashMap::new();
        for &descriptor in &sorted {
            tables.entry(descriptor.table.as_str()).or_insert(descriptor);
        }

        for (index, descriptor) in sorted.iter().enumerate() {
            let entity = self.build_entity(
                EntityId(index),
                descriptor,
                &tables,
                &mut documentation.diagnostics
            );
            documentation.entities.push(entity);
        }

        resolve_links(&mut documentation);

        info!(
            entities = documentation.entities.len(),
            diagnostics = documentation.diagnostics.len(),
            "documentation built"
        );
        documentation
    }

    fn build_entity(
        &self,
        handle: EntityId,
        descriptor: &ResourceDescriptor,
        tables: &HashMap<&str, &ResourceDescriptor>,
        diagnostics: &mut Vec<Diagnostic>
    ) -> Entity {
        debug!(entity = %descriptor.name, table = %descriptor.table, "building entity");

        let definition = match self.extractor.extract(&descriptor.type_identity) {
            Ok(definition) => definition,
            Err(err) => {
                warn!(entity = %descriptor.name, error = %err, "struct extraction failed");
                diagnostics.push(Diagnostic::new(&descriptor.name, &err));
                StructDefinition::default()
            }
        };

        let (pkg, name) = match descriptor.name.split_once('.') {
            Some((pkg, name)) => (pkg, name),
            None => {
                warn!(entity = %descriptor.name, "qualified name has no package");
                diagnostics.push(Diagnostic::new(
                    &descriptor.name,
                    "qualified name has no package"
                ));
                ("", descriptor.name.as_str())
            }
        };

        let mut entity = Entity {
            handle,
            id: descriptor.name.clone(),
            name: name.to_string(),
            description: definition.description.clone(),
            pkg: pkg.to_string(),
            path: descriptor.type_identity.pkg_path.clone(),
            table: descriptor.table.clone(),
            endpoints: Arc::clone(&descriptor.actions),
            definition,
            ..Entity::default()
        };

        for field in &descriptor.schema.fields {
            if field.is_column() {
                entity.fields.push(column_field(field, tables));
            } else if let Some(association) = association(field) {
                entity.associations.push(association);
            }
        }

        match sample::generate(&entity, descriptor, self.records, self.config) {
            Ok(data_sample) => entity.data_sample = data_sample,
            Err(err) => {
                error!(entity = %descriptor.name, error = %err, "sample generation failed");
                diagnostics.push(Diagnostic::new(&descriptor.name, &err));
            }
        }

        entity
    }
}

/// Pass 2: attach association and foreign-key targets.
fn resolve_links(documentation: &mut Documentation) {
    let by_id: HashMap<String, EntityId> = documentation
        .entities
        .iter()
        .map(|entity| (entity.id.clone(), entity.handle))
        .collect();
    let mut by_table: HashMap<String, EntityId> = HashMap::new();
    for entity in &documentation.entities {
        by_table.entry(entity.table.clone()).or_insert(entity.handle);
    }

    for entity in &mut documentation.entities {
        for association in &mut entity.associations {
            if association.entity_name.is_empty() {
                continue;
            }
            association.entity = by_id.get(&association.entity_name).copied();
            if association.entity.is_none() {
                warn!(
                    entity = %entity.id,
                    target = %association.entity_name,
                    "association target not documented"
                );
            }
        }

        for foreign_key in entity
            .fields
            .iter_mut()
            .filter_map(|field| field.foreign_key.as_mut())
        {
            foreign_key.entity = by_table.get(&foreign_key.table).copied();
        }
    }
}

/// Column field of an entity.
fn column_field(field: &SchemaField, tables: &HashMap<&str, &ResourceDescriptor>) -> Field {
    let enum_values = field.settings.enum_values();
    let json_type = if enum_values.is_empty() {
        field.data_type.json_type()
    } else {
        JsonType::String
    };

    Field {
        name: field.name.clone(),
        description: field.comment.clone().unwrap_or_default(),
        json_tag: field.json_tag().to_string(),
        json_type,
        db_type: field.data_type.name().to_string(),
        type_signature: field.type_signature.clone(),
        db_name: field.db_name().unwrap_or_default().to_string(),
        validation: field.validation.clone(),
        primary_key: field.primary_key,
        auto_increment: field.auto_increment,
        nullable: field.nullable || field.shape.is_pointer(),
        unique: field.unique,
        unique_index: field.unique_index.clone(),
        default: field.default.clone(),
        enum_values,
        indexed: field.index.is_some() || field.unique_index.is_some(),
        index: field.index.clone(),
        foreign_key: foreign_key(field, tables)
    }
}

/// Foreign key of a field. Without an explicit field the referenced
/// table's first primary-key column is used, which requires the table to
/// be documented; a documented table without a primary key leaves the
/// field empty.
fn foreign_key(field: &SchemaField, tables: &HashMap<&str, &ResourceDescriptor>) -> Option<ForeignKey> {
    let (table, explicit) = field.settings.foreign_key()?;

    let column = match explicit {
        Some(column) => column.to_string(),
        None => {
            let Some(referenced) = tables.get(table) else {
                debug!(field = %field.name, table, "foreign key table not documented");
                return None;
            };
            referenced
                .schema
                .primary_keys()
                .first()
                .map(|key| key.to_string())
                .unwrap_or_default()
        }
    };

    Some(ForeignKey {
        table:  table.to_string(),
        field:  column,
        entity: None
    })
}

/// Relationship described by a field without a column.
fn association(field: &SchemaField) -> Option<Association> {
    match field.shape.base() {
        ColumnShape::Struct(identity) => Some(Association {
            name:        field.name.clone(),
            entity_name: identity.full_name(),
            entity:      None,
            array:       false
        }),
        ColumnShape::Slice => Some(Association {
            name:        field.name.clone(),
            entity_name: String::new(),
            entity:      None,
            array:       true
        }),
        _ => None
    }
}
