// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Resource descriptors: the schema side of the pipeline.
//!
//! # Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | `descriptor` | [`ResourceDescriptor`], [`Schema`], [`SchemaField`], [`TypeIdentity`] |
//! | `shape` | [`ColumnShape`], [`DataType`], [`JsonType`] |
//! | [`tags`] | [`TagSettings`] and `enum(...)` parsing |
//! | `column` | `#[column(...)]` parsing |
//! | `scan` | [`discover`] descriptors from `#[entity]` structs |

mod column;
mod descriptor;
mod scan;
mod shape;
pub mod tags;

pub use column::ColumnConfig;
pub use descriptor::{
    Endpoint, ROOT_PACKAGE, ResourceDescriptor, Schema, SchemaField, TypeIdentity
};
pub use scan::{discover, discover_in_source};
pub use shape::{ColumnShape, DataType, JsonType};
pub use tags::{TagSettings, extract_enum_values};
