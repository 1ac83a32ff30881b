// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    missing_docs,
    rustdoc::missing_crate_level_docs,
    rustdoc::broken_intra_doc_links,
    rust_2018_idioms
)]
#![deny(unsafe_code)]

//! # entity-docify
//!
//! Builds a cross-linked documentation graph from entity descriptors.
//!
//! For every documented entity the graph holds its column fields, its
//! relationships to other entities, the verbatim source declaration of
//! its struct and sample request/response payloads.
//!
//! # Pipeline
//!
//! ```text
//! source tree ── schema::discover ──► [ResourceDescriptor]
//!                                          │
//!                                          ▼
//!                                    GraphBuilder::build
//!                                     │    │    │
//!       source::StructExtractor ◄─────┘    │    └────► sample::generate
//!       (declaration, comments)            │           (RecordSource or synthesis)
//!                                          ▼
//!                                    Documentation
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use entity_docify::{DocConfig, sample::NoRecords};
//!
//! let config = DocConfig::new("src").with_overrides("Shop API", "Products and orders");
//! let documentation = entity_docify::document(&config, &NoRecords)?;
//!
//! for entity in &documentation.entities {
//!     println!("{} ({})", entity.id, entity.table);
//!     for field in &entity.fields {
//!         println!("  {}: {}", field.json_tag, field.json_type);
//!     }
//! }
//! # Ok::<(), entity_docify::DocError>(())
//! ```
//!
//! # Annotating Entities
//!
//! ```rust,ignore
//! /// Product offered in the shop.
//! #[entity(table = "products")]
//! pub struct Product {
//!     #[id]
//!     #[auto]
//!     pub id: i64,
//!
//!     // Display name
//!     pub name: String,
//!
//!     #[column(sql_type = "enum('active','inactive')")]
//!     pub status: String,
//!
//!     #[column(fk = "categories")]
//!     pub category_id: i64,
//!
//!     pub category: Option<Category>,
//! }
//! ```
//!
//! See [`schema`] for every recognized attribute.
//!
//! # Modules
//!
//! | Module | Role |
//! |--------|------|
//! | [`schema`] | Resource descriptors and their discovery |
//! | [`source`] | Struct declaration lookup and type signatures |
//! | [`sample`] | Sample records and payload rendering |
//! | [`graph`] | Entity graph and its builder |
//! | [`config`] | Run configuration |
//! | [`error`] | Error type |

pub mod config;
pub mod error;
pub mod graph;
pub mod sample;
pub mod schema;
pub mod source;
pub mod utils;

pub use config::DocConfig;
pub use error::{DocError, Result};
pub use graph::{Documentation, GraphBuilder};

/// Discover every entity under `config.source_root` and document it.
///
/// # Errors
///
/// Returns an error if the source tree cannot be enumerated or an entity
/// carries malformed attributes. Problems with single entities after
/// discovery are recorded in [`Documentation::diagnostics`] instead.
pub fn document(config: &DocConfig, records: &dyn sample::RecordSource) -> Result<Documentation> {
    let descriptors = schema::discover(&config.source_root)?;
    Ok(GraphBuilder::new(config, records).build(&descriptors))
}
