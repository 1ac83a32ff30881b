// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Run configuration.
//!
//! A [`DocConfig`] is built once per run and handed to the
//! [`GraphBuilder`](crate::graph::GraphBuilder). Every key is optional;
//! missing keys fall back to the defaults below.
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `source_root` | `"."` | Directory package paths are resolved against |
//! | `title` | none | Title merged into the root document |
//! | `description` | none | Description merged into the root document |
//! | `audit_columns` | `created_at`, `updated_at`, `deleted_at` | Columns left out of write payloads |
//! | `sample_string_len` | `10` | Length of synthesized strings |

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Returns the conventional audit timestamp columns.
pub fn default_audit_columns() -> Vec<String> {
    ["created_at", "updated_at", "deleted_at"]
        .into_iter()
        .map(String::from)
        .collect()
}

/// Pipeline configuration.
///
/// # Example
///
/// ```rust
/// use entity_docify::DocConfig;
///
/// let config: DocConfig =
///     serde_json::from_str(r#"{ "source_root": "src", "title": "Shop API" }"#).unwrap();
/// assert_eq!(config.title.as_deref(), Some("Shop API"));
/// assert_eq!(config.sample_string_len, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocConfig {
    /// Directory that `TypeIdentity::pkg_path` is resolved against.
    pub source_root: PathBuf,

    /// Documentation title override.
    pub title: Option<String>,

    /// Documentation description override.
    pub description: Option<String>,

    /// Column names skipped in create, update and batch payloads.
    pub audit_columns: Vec<String>,

    /// Length of random strings in synthesized records.
    pub sample_string_len: usize
}

impl Default for DocConfig {
    fn default() -> Self {
        Self {
            source_root:       PathBuf::from("."),
            title:             None,
            description:       None,
            audit_columns:     default_audit_columns(),
            sample_string_len: 10
        }
    }
}

impl DocConfig {
    /// Create a configuration rooted at `source_root`.
    #[must_use]
    pub fn new(source_root: impl Into<PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            ..Self::default()
        }
    }

    /// Set the title and description overrides.
    #[must_use]
    pub fn with_overrides(
        mut self,
        title: impl Into<String>,
        description: impl Into<String>
    ) -> Self {
        self.title = Some(title.into());
        self.description = Some(description.into());
        self
    }

    /// Check if a column is one of the audit columns.
    #[must_use]
    pub fn is_audit_column(&self, db_name: &str) -> bool {
        self.audit_columns.iter().any(|column| column == db_name)
    }
}
