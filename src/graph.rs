// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Entity documentation graph.
//!
//! [`GraphBuilder`] turns resource descriptors into a [`Documentation`]:
//! one [`Entity`] per descriptor, sorted by table name, each carrying its
//! column [`Field`]s, relationship [`Association`]s, extracted source
//! declaration and sample payloads.

mod builder;
mod model;

pub use builder::GraphBuilder;
pub use model::{Association, Diagnostic, Documentation, Entity, EntityId, Field, ForeignKey};
