// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types for the documentation pipeline.
//!
//! Only a few of these ever reach the caller. The graph builder recovers
//! from extraction and sample failures per entity and records them as
//! [`Diagnostic`](crate::graph::Diagnostic)s instead.
//!
//! | Variant | Raised by | Recovery |
//! |---------|-----------|----------|
//! | `NotFound` | struct extractor | entity keeps an empty definition |
//! | `Parse` | struct extractor, discovery | empty definition; discovery skips the file |
//! | `Io` / `Walk` | struct extractor, discovery | empty definition; discovery aborts |
//! | `Serialization` | sample renderer | entity keeps an empty sample |
//! | `Attributes` | descriptor discovery | discovery aborts |

use std::path::PathBuf;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, DocError>;

/// Errors produced while building documentation.
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    /// No struct with the requested name exists under the package directory.
    #[error("struct `{name}` not found under {}", .dir.display())]
    NotFound {
        /// Declared type name.
        name: String,
        /// Package directory that was scanned.
        dir:  PathBuf
    },

    /// A source file could not be parsed.
    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        /// Offending file.
        path:   PathBuf,
        /// Parser error with location.
        #[source]
        source: syn::Error
    },

    /// A source file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        /// Offending file.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error
    },

    /// The source tree could not be enumerated.
    #[error("failed to walk {}: {source}", .dir.display())]
    Walk {
        /// Directory being walked.
        dir:    PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error
    },

    /// A sample artifact could not be serialized.
    #[error("failed to serialize sample for `{entity}`: {source}")]
    Serialization {
        /// Qualified entity name.
        entity: String,
        /// Underlying serializer error.
        #[source]
        source: serde_json::Error
    },

    /// Entity attributes on an annotated struct are malformed.
    #[error("invalid entity attributes on `{name}`: {source}")]
    Attributes {
        /// Struct identifier.
        name:   String,
        /// Attribute parser error.
        #[source]
        source: darling::Error
    }
}

impl DocError {
    /// Check if this error means the struct simply was not there.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}
