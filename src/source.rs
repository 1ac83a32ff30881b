// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Source-level view of entity types.
//!
//! Resolves type expressions to canonical signatures and extracts struct
//! declarations (with their comments and attributes) from the source tree.
//!
//! # Submodules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`types`] | `syn::Type` → canonical signature string |
//! | `definition` | [`StructDefinition`] / [`FieldDefinition`] |
//! | `extract` | [`StructExtractor`] over a package directory |
//! | `render` | Declaration text assembly and reformatting |

mod definition;
mod extract;
mod render;
pub mod types;

pub use definition::{FieldDefinition, StructDefinition};
pub use extract::{StructExtractor, extract_from_source};
pub use render::{Declaration, DeclaredField, reformat};
