// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Column-level storage configuration.
//!
//! # Supported Attributes
//!
//! | Attribute | Example | Effect |
//! |-----------|---------|--------|
//! | `name` | `#[column(name = "user_name")]` | Custom column name |
//! | `sql_type` | `#[column(sql_type = "enum('a','b')")]` | `TYPE` setting |
//! | `fk` | `#[column(fk = "customers")]` | `FK` setting |
//! | `settings` | `#[column(settings = "TYPE:int;FK:users")]` | Raw settings |
//! | `default` | `#[column(default = "true")]` | Default value |
//! | `comment` | `#[column(comment = "Shown to users")]` | Column comment |
//! | `unique` | `#[column(unique)]` | UNIQUE constraint |
//! | `unique_index` | `#[column(unique_index = "uq_email")]` | Named unique index |
//! | `index` | `#[column(index)]`, `#[column(index = "idx_x")]` | Index |
//! | `nullable` | `#[column(nullable)]` | Allow NULL |
//! | `skip` | `#[column(skip)]` | No backing column |

use syn::{Attribute, LitStr, Meta, meta::ParseNestedMeta};

use super::{TagSettings, tags};

/// Column configuration parsed from `#[column(...)]`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnConfig {
    /// Custom column name.
    pub name: Option<String>,

    /// Settings collected from `sql_type`, `fk` and `settings`.
    pub settings: TagSettings,

    /// Default value expression.
    pub default: Option<String>,

    /// Column comment.
    pub comment: Option<String>,

    /// UNIQUE constraint.
    pub unique: bool,

    /// Unique index; empty name means generated.
    pub unique_index: Option<String>,

    /// Index; empty name means generated.
    pub index: Option<String>,

    /// Explicitly nullable.
    pub nullable: bool,

    /// Field has no backing column.
    pub skip: bool
}

impl ColumnConfig {
    /// Parse `#[column(...)]`. A bare `#[column]` yields the default.
    ///
    /// # Errors
    ///
    /// Returns an error for unknown options or malformed values.
    pub fn from_attr(attr: &Attribute) -> syn::Result<Self> {
        let mut config = Self::default();

        if let Meta::List(meta_list) = &attr.meta {
            meta_list.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    config.name = Some(string_value(&meta)?);
                } else if meta.path.is_ident("sql_type") {
                    config.settings.insert(tags::TYPE, &string_value(&meta)?);
                } else if meta.path.is_ident("fk") {
                    config.settings.insert(tags::FK, &string_value(&meta)?);
                } else if meta.path.is_ident("settings") {
                    for (key, value) in TagSettings::parse(&string_value(&meta)?).iter() {
                        config.settings.insert(key, value);
                    }
                } else if meta.path.is_ident("default") {
                    config.default = Some(string_value(&meta)?);
                } else if meta.path.is_ident("comment") {
                    config.comment = Some(string_value(&meta)?);
                } else if meta.path.is_ident("unique") {
                    config.unique = true;
                } else if meta.path.is_ident("unique_index") {
                    config.unique_index = Some(optional_value(&meta)?);
                } else if meta.path.is_ident("index") {
                    config.index = Some(optional_value(&meta)?);
                } else if meta.path.is_ident("nullable") {
                    config.nullable = true;
                } else if meta.path.is_ident("skip") {
                    config.skip = true;
                } else {
                    return Err(meta.error("unknown column option"));
                }
                Ok(())
            })?;
        }

        Ok(config)
    }

    /// Get the column name, using custom name if set.
    #[must_use]
    pub fn column_name<'a>(&'a self, field_name: &'a str) -> &'a str {
        self.name.as_deref().unwrap_or(field_name)
    }

    /// Index name, generated as `idx_<table>_<column>` when not given.
    #[must_use]
    pub fn index_name(&self, table: &str, column: &str) -> Option<String> {
        self.index.as_deref().map(|name| generated(name, "idx", table, column))
    }

    /// Unique index name, generated as `uidx_<table>_<column>` when not given.
    #[must_use]
    pub fn unique_index_name(&self, table: &str, column: &str) -> Option<String> {
        self.unique_index
            .as_deref()
            .map(|name| generated(name, "uidx", table, column))
    }
}

fn generated(name: &str, prefix: &str, table: &str, column: &str) -> String {
    if name.is_empty() {
        format!("{prefix}_{table}_{column}")
    } else {
        name.to_string()
    }
}

fn string_value(meta: &ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: LitStr = meta.value()?.parse()?;
    Ok(value.value())
}

/// `key` or `key = "value"`; bare keys yield an empty string.
fn optional_value(meta: &ParseNestedMeta<'_>) -> syn::Result<String> {
    if meta.input.peek(syn::Token![=]) {
        string_value(meta)
    } else {
        Ok(String::new())
    }
}
