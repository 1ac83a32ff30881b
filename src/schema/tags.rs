// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Storage settings.
//!
//! Settings are `;`-separated `KEY:value` pairs with case-insensitive keys:
//!
//! ```text
//! TYPE:enum('active','inactive');FK:customers.customer_id;NOT NULL
//! ```
//!
//! A pair without `:` maps the key to itself.

use std::collections::BTreeMap;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Storage type setting key.
pub const TYPE: &str = "TYPE";

/// Foreign-key setting key (`table` or `table.field`).
pub const FK: &str = "FK";

static ENUM_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"enum\((.*?)\)").expect("valid regex"));

/// Parsed storage settings of one field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSettings(BTreeMap<String, String>);

impl TagSettings {
    /// Parse a settings string.
    ///
    /// ```
    /// use entity_docify::schema::TagSettings;
    ///
    /// let settings = TagSettings::parse("type:enum('a','b'); fk:customers");
    /// assert_eq!(settings.get("TYPE"), Some("enum('a','b')"));
    /// assert_eq!(settings.get("fk"), Some("customers"));
    /// ```
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let mut settings = Self::default();
        for pair in text.split(';').map(str::trim).filter(|pair| !pair.is_empty()) {
            match pair.split_once(':') {
                Some((key, value)) => settings.insert(key, value.trim()),
                None => settings.insert(pair, pair)
            }
        }
        settings
    }

    /// Set a value; the key is upper-cased.
    pub fn insert(&mut self, key: &str, value: &str) {
        self.0.insert(key.trim().to_uppercase(), value.to_string());
    }

    /// Look up a value by case-insensitive key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(&key.to_uppercase()).map(String::as_str)
    }

    /// Iterate over `(KEY, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_str()))
    }

    /// Check if no settings are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Values of an `enum(...)` storage type, empty for other types.
    #[must_use]
    pub fn enum_values(&self) -> Vec<String> {
        self.get(TYPE).map(extract_enum_values).unwrap_or_default()
    }

    /// Referenced table and optional field of the foreign-key setting.
    #[must_use]
    pub fn foreign_key(&self) -> Option<(&str, Option<&str>)> {
        let value = self.get(FK)?.trim();
        if value.is_empty() {
            return None;
        }
        Some(match value.split_once('.') {
            Some((table, field)) if !field.is_empty() => (table, Some(field)),
            Some((table, _)) => (table, None),
            None => (value, None)
        })
    }
}

/// Values listed in the first `enum(...)` of a type expression.
///
/// Values are trimmed of whitespace, then of single quotes. Empty values
/// are dropped.
#[must_use]
pub fn extract_enum_values(text: &str) -> Vec<String> {
    ENUM_PATTERN
        .captures(text)
        .and_then(|captures| captures.get(1))
        .map(|list| {
            list.as_str()
                .split(',')
                .map(|value| value.trim().trim_matches('\'').to_string())
                .filter(|value| !value.is_empty())
                .collect()
        })
        .unwrap_or_default()
}
