// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Extracted struct declarations.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One struct declaration as found in source.
///
/// Produced by [`StructExtractor`](super::StructExtractor) and owned by its
/// entity afterwards. `Default` is the empty definition substituted when
/// extraction fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructDefinition {
    /// File the declaration was found in.
    pub file: PathBuf,

    /// Doc comment text of the struct.
    pub description: String,

    /// Canonical, reformatted declaration text.
    pub body: String,

    /// Fields in declaration order.
    pub fields: Vec<FieldDefinition>
}

impl StructDefinition {
    /// Check if this is the empty stand-in for a missing declaration.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Find a field by name.
    #[must_use]
    pub fn field(&self, name: &str) -> Option<&FieldDefinition> {
        self.fields.iter().find(|field| field.name == name)
    }
}

/// One field of an extracted struct.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldDefinition {
    /// Field name.
    pub name: String,

    /// Canonical type signature.
    #[serde(rename = "type")]
    pub ty: String,

    /// Source text of the field's non-doc attributes, space separated.
    /// Line breaks inside a multi-line attribute are kept.
    pub tag: String,

    /// Comment attached to the field.
    pub description: String
}
