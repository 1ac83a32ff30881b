// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Sample payloads for documented entities.
//!
//! One record per entity is fetched from a [`RecordSource`]; when none
//! exists a synthetic one is made up. The record is then rendered into the
//! five payloads of a [`DataSample`].
//!
//! # Submodules
//!
//! - `record`: [`Record`], [`RecordSource`] and its stock implementations
//! - `synth`: value synthesis rules
//! - `render`: payload assembly

mod record;
mod render;
mod synth;

use tracing::debug;

pub use record::{NoRecords, Record, RecordSource, StaticRecords};
pub use render::DataSample;
pub use synth::{DECIMAL_SAMPLE, sample_value, synthesize};

use crate::{config::DocConfig, error::Result, graph::Entity, schema::ResourceDescriptor};

/// Fetch or synthesize a record of `descriptor` and render `entity`'s
/// payloads from it.
///
/// # Errors
///
/// Returns [`DocError::Serialization`](crate::DocError::Serialization) if
/// rendering fails.
pub fn generate(
    entity: &Entity,
    descriptor: &ResourceDescriptor,
    records: &dyn RecordSource,
    config: &DocConfig
) -> Result<DataSample> {
    let record = match records.fetch_one(descriptor) {
        Some(record) => record,
        None => {
            debug!(entity = %entity.id, "no persisted record, synthesizing");
            synthesize(descriptor, config.sample_string_len, &mut rand::thread_rng())
        }
    };
    DataSample::render(entity, &descriptor.schema, &record, config)
}
