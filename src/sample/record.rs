// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Persisted records and where they come from.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::schema::ResourceDescriptor;

/// One record of an entity, keyed by declared field name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    /// Create an empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// Set the value of a field, keeping first-insertion order.
    pub fn insert(&mut self, field: impl Into<String>, value: Value) {
        self.0.insert(field.into(), value);
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: Value) -> Self {
        self.insert(field, value);
        self
    }

    /// Number of fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check if the record has no fields.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// Fetches one persisted record of a resource, if any exists.
///
/// Absence is not an error; the synthesizer fills the gap.
pub trait RecordSource {
    /// Fetch any one record of `descriptor`'s type.
    fn fetch_one(&self, descriptor: &ResourceDescriptor) -> Option<Record>;
}

/// A source that never has records.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoRecords;

impl RecordSource for NoRecords {
    fn fetch_one(&self, _descriptor: &ResourceDescriptor) -> Option<Record> {
        None
    }
}

/// Fixed records keyed by qualified entity name.
#[derive(Debug, Clone, Default)]
pub struct StaticRecords {
    records: HashMap<String, Record>
}

impl StaticRecords {
    /// Create an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the record returned for `entity`.
    #[must_use]
    pub fn with(mut self, entity: impl Into<String>, record: Record) -> Self {
        self.records.insert(entity.into(), record);
        self
    }
}

impl RecordSource for StaticRecords {
    fn fetch_one(&self, descriptor: &ResourceDescriptor) -> Option<Record> {
        self.records.get(&descriptor.name).cloned()
    }
}

impl<F> RecordSource for F
where
    F: Fn(&ResourceDescriptor) -> Option<Record>
{
    fn fetch_one(&self, descriptor: &ResourceDescriptor) -> Option<Record> {
        self(descriptor)
    }
}
