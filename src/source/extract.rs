// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Struct declaration lookup.
//!
//! # Algorithm
//!
//! ```text
//! source_root/pkg_path/**.rs   (file-name order)
//!   │
//!   ├── parse file (syn)              ── error → DocError::Parse
//!   ├── find `struct Name { .. }`     ── top level or inline `mod`
//!   │     none → next file
//!   ├── CommentMap::scan              ── `//` comments by following line
//!   ├── per field: name, type_signature, attribute text, comment
//!   └── Declaration::assemble → reformat
//!
//! no file matched → DocError::NotFound
//! ```

use std::{
    fs,
    path::{Path, PathBuf}
};

use quote::ToTokens;
use syn::{Field, Fields, Item, ItemStruct, Visibility, ext::IdentExt};
use tracing::debug;
use walkdir::WalkDir;

use super::{
    FieldDefinition, StructDefinition,
    render::{Declaration, DeclaredField, canonical},
    types::type_signature
};
use crate::{
    error::{DocError, Result},
    schema::TypeIdentity,
    utils::{
        comments::CommentMap,
        docs::{doc_lines, extract_doc_comments, is_doc},
        span::SourceLines
    }
};

/// Locates struct declarations under a source root.
#[derive(Debug, Clone)]
pub struct StructExtractor {
    root: PathBuf
}

impl StructExtractor {
    /// Create an extractor resolving package paths against `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into()
        }
    }

    /// Source root this extractor reads from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding the sources of a type's package.
    #[must_use]
    pub fn package_dir(&self, identity: &TypeIdentity) -> PathBuf {
        self.root.join(&identity.pkg_path)
    }

    /// Find and render the declaration of `identity`.
    ///
    /// # Errors
    ///
    /// - [`DocError::NotFound`] if no file under the package directory
    ///   declares the struct (or the directory does not exist)
    /// - [`DocError::Parse`] / [`DocError::Io`] if a file visited before the
    ///   match cannot be parsed or read
    /// - [`DocError::Walk`] if the directory cannot be enumerated
    pub fn extract(&self, identity: &TypeIdentity) -> Result<StructDefinition> {
        let dir = self.package_dir(identity);
        let not_found = || DocError::NotFound {
            name: identity.name.clone(),
            dir:  dir.clone()
        };

        if !dir.is_dir() {
            return Err(not_found());
        }

        for entry in WalkDir::new(&dir).sort_by_file_name() {
            let entry = entry.map_err(|source| DocError::Walk {
                dir: dir.clone(),
                source
            })?;
            let path = entry.path();
            if !entry.file_type().is_file() || path.extension().is_none_or(|ext| ext != "rs") {
                continue;
            }

            let source = fs::read_to_string(path).map_err(|source| DocError::Io {
                path: path.to_path_buf(),
                source
            })?;
            if let Some(definition) = extract_from_source(path, &source, &identity.name)? {
                debug!(name = %identity.name, file = %path.display(), "struct found");
                return Ok(definition);
            }
        }

        Err(not_found())
    }
}

/// Extract the struct `name` from one file's source text.
///
/// Returns `Ok(None)` when the file parses but does not declare it.
///
/// # Errors
///
/// Returns [`DocError::Parse`] if the text is not valid Rust.
pub fn extract_from_source(path: &Path, source: &str, name: &str) -> Result<Option<StructDefinition>> {
    let file = syn::parse_file(source).map_err(|err| DocError::Parse {
        path:   path.to_path_buf(),
        source: err
    })?;

    let Some(item) = find_struct(&file.items, name) else {
        return Ok(None);
    };

    let comments = CommentMap::scan(source);
    let lines = SourceLines::new(source);
    Ok(Some(build_definition(path, item, &comments, &lines)))
}

/// Depth-first search through items and inline modules.
fn find_struct<'a>(items: &'a [Item], name: &str) -> Option<&'a ItemStruct> {
    items.iter().find_map(|item| match item {
        Item::Struct(item) if item.ident == name && !matches!(item.fields, Fields::Unnamed(_)) => {
            Some(item)
        }
        Item::Mod(module) => module
            .content
            .as_ref()
            .and_then(|(_, items)| find_struct(items, name)),
        _ => None
    })
}

fn build_definition(
    path: &Path,
    item: &ItemStruct,
    comments: &CommentMap,
    lines: &SourceLines<'_>
) -> StructDefinition {
    let description = extract_doc_comments(&item.attrs)
        .or_else(|| comments.get(item_line(item)).map(str::to_string))
        .unwrap_or_default();

    let mut doc = doc_lines(&item.attrs);
    if doc.is_empty() {
        doc = description.lines().map(|line| format!(" {line}")).collect();
    }

    let mut declaration = Declaration {
        doc,
        vis: visibility_text(&item.vis),
        name: item.ident.to_string(),
        generics: if item.generics.params.is_empty() {
            String::new()
        } else {
            item.generics.to_token_stream().to_string()
        },
        where_clause: item
            .generics
            .where_clause
            .as_ref()
            .map(|clause| clause.to_token_stream().to_string())
            .unwrap_or_default(),
        fields: Vec::new()
    };

    let mut fields = Vec::new();
    for field in &item.fields {
        let Some(ident) = &field.ident else {
            continue;
        };

        let ty = type_signature(&field.ty);
        let attrs: Vec<String> = field
            .attrs
            .iter()
            .filter(|attr| !is_doc(attr))
            .map(|attr| lines.attribute(attr))
            .collect();
        let comment = extract_doc_comments(&field.attrs)
            .or_else(|| comments.get(field_line(field)).map(str::to_string))
            .unwrap_or_default();

        fields.push(FieldDefinition {
            name:        ident.unraw().to_string(),
            ty:          ty.clone(),
            tag:         attrs.join(" "),
            description: comment.clone()
        });
        declaration.fields.push(DeclaredField {
            comment,
            attrs,
            vis: visibility_text(&field.vis),
            name: ident.to_string(),
            ty
        });
    }

    StructDefinition {
        file: path.to_path_buf(),
        description,
        body: canonical(declaration.assemble()),
        fields
    }
}

fn visibility_text(vis: &Visibility) -> String {
    match vis {
        Visibility::Inherited => String::new(),
        _ => vis.to_token_stream().to_string()
    }
}

fn visibility_line(vis: &Visibility) -> Option<usize> {
    match vis {
        Visibility::Public(token) => Some(token.span.start().line),
        Visibility::Restricted(restricted) => Some(restricted.pub_token.span.start().line),
        Visibility::Inherited => None
    }
}

/// First line of the struct after its doc comments.
fn item_line(item: &ItemStruct) -> usize {
    item.attrs
        .iter()
        .find(|attr| !is_doc(attr))
        .map(|attr| attr.pound_token.span.start().line)
        .or_else(|| visibility_line(&item.vis))
        .unwrap_or_else(|| item.struct_token.span.start().line)
}

/// First line of the field after its doc comments.
fn field_line(field: &Field) -> usize {
    field
        .attrs
        .iter()
        .find(|attr| !is_doc(attr))
        .map(|attr| attr.pound_token.span.start().line)
        .or_else(|| visibility_line(&field.vis))
        .or_else(|| field.ident.as_ref().map(|ident| ident.span().start().line))
        .unwrap_or_default()
}
