// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Shared utilities.
//!
//! # Submodules
//!
//! - [`comments`]: line comment map built by a small lexer
//! - [`docs`]: doc comment extraction from attributes
//! - [`span`]: original source text behind token spans
//! - [`text`]: indentation and comment stripping for JSON payloads

pub mod comments;
pub mod docs;
pub mod span;
pub mod text;
