// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Descriptor discovery from annotated sources.
//!
//! Every struct carrying `#[entity(...)]` under the source root becomes one
//! [`ResourceDescriptor`]. The package of a struct is the directory of its
//! file relative to the root.
//!
//! # Attributes
//!
//! ```rust,ignore
//! #[entity(table = "products", name = "shop.Product")]
//! #[serde(rename_all = "camelCase")]
//! pub struct Product {
//!     #[id]
//!     #[auto]
//!     pub id: i64,
//!
//!     #[column(sql_type = "enum('active','inactive')", index)]
//!     pub status: String,
//!
//!     #[column(fk = "customers")]
//!     #[validate(range(min = 1))]
//!     pub customer_id: i64,
//!
//!     #[serde(skip)]
//!     pub category: Option<Category>,
//! }
//! ```
//!
//! | Attribute | Effect |
//! |-----------|--------|
//! | `#[entity(table, name)]` | Table (default: snake-case name + `s`), qualified name |
//! | `#[id]` | Primary key |
//! | `#[auto]` | Generated by storage |
//! | `#[relation]` | Relationship, no column |
//! | `#[column(...)]` | See [`ColumnConfig`] |
//! | `#[validate(...)]` | Validation expression (source text) |
//! | `#[serde(rename, skip)]`, `#[serde(rename_all)]` | JSON tag |
//!
//! Fields without `#[column]` whose type is another record (`Category`,
//! `Option<Box<Category>>`, `Vec<Category>`) are relationships.

use std::{fs, path::Path};

use convert_case::{Case, Casing};
use darling::FromDeriveInput;
use proc_macro2::TokenStream;
use quote::ToTokens;
use syn::{
    Attribute, DeriveInput, Expr, Field, Fields, Ident, Item, ItemStruct, Lit, MacroDelimiter,
    Meta, Type, ext::IdentExt, meta::ParseNestedMeta
};
use tracing::{debug, warn};
use walkdir::WalkDir;

use super::{
    ColumnConfig, ColumnShape, DataType, ResourceDescriptor, Schema, SchemaField, TypeIdentity
};
use crate::{
    error::{DocError, Result},
    source::types::{first_type_argument, type_signature},
    utils::{docs::extract_doc_comments, span::SourceLines}
};

/// Entity-level attributes parsed from `#[entity(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(entity), forward_attrs(serde), supports(struct_named))]
struct EntityAttrs {
    /// Struct identifier.
    ident: Ident,

    /// Forwarded `#[serde(...)]` attributes.
    attrs: Vec<Attribute>,

    /// Backing table.
    #[darling(default)]
    table: Option<String>,

    /// Qualified name override.
    #[darling(default)]
    name: Option<String>
}

/// Build descriptors for every `#[entity]` struct under `root`.
///
/// Files that do not parse are skipped with a warning.
///
/// # Errors
///
/// Returns [`DocError::Walk`] or [`DocError::Io`] if the tree cannot be
/// read, and [`DocError::Attributes`] for malformed entity attributes.
pub fn discover(root: &Path) -> Result<Vec<ResourceDescriptor>> {
    let mut descriptors = Vec::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| DocError::Walk {
            dir: root.to_path_buf(),
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
        match discover_in_source(path, &source, &package_path(root, path)) {
            Ok(found) => descriptors.extend(found),
            Err(err @ DocError::Parse { .. }) => warn!(error = %err, "skipping file"),
            Err(err) => return Err(err)
        }
    }

    debug!(root = %root.display(), count = descriptors.len(), "descriptors discovered");
    Ok(descriptors)
}

/// Build descriptors for the `#[entity]` structs of one file.
///
/// # Errors
///
/// Returns [`DocError::Parse`] if the text is not valid Rust and
/// [`DocError::Attributes`] for malformed entity attributes.
pub fn discover_in_source(
    path: &Path,
    source: &str,
    pkg_path: &str
) -> Result<Vec<ResourceDescriptor>> {
    let file = syn::parse_file(source).map_err(|err| DocError::Parse {
        path:   path.to_path_buf(),
        source: err
    })?;

    let lines = SourceLines::new(source);
    let mut descriptors = Vec::new();
    collect(&file.items, pkg_path, &lines, &mut descriptors)?;
    Ok(descriptors)
}

fn collect(
    items: &[Item],
    pkg_path: &str,
    lines: &SourceLines<'_>,
    out: &mut Vec<ResourceDescriptor>
) -> Result<()> {
    for item in items {
        match item {
            Item::Struct(item) if item.attrs.iter().any(|attr| attr.path().is_ident("entity")) => {
                out.push(describe(item, pkg_path, lines)?);
            }
            Item::Mod(module) => {
                if let Some((_, items)) = &module.content {
                    collect(items, pkg_path, lines, out)?;
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// `/`-joined directory of `path` relative to `root`.
fn package_path(root: &Path, path: &Path) -> String {
    path.parent()
        .and_then(|dir| dir.strip_prefix(root).ok())
        .map(|relative| {
            relative
                .components()
                .map(|component| component.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .unwrap_or_default()
}

fn describe(item: &ItemStruct, pkg_path: &str, lines: &SourceLines<'_>) -> Result<ResourceDescriptor> {
    let attributes_error = |source: darling::Error| DocError::Attributes {
        name: item.ident.to_string(),
        source
    };

    let input = DeriveInput::from(item.clone());
    let attrs = EntityAttrs::from_derive_input(&input).map_err(attributes_error)?;
    let rename_all = rename_all(&attrs.attrs)
        .map_err(darling::Error::from)
        .map_err(attributes_error)?;

    let type_name = attrs.ident.to_string();
    let table = attrs
        .table
        .unwrap_or_else(|| format!("{}s", type_name.to_case(Case::Snake)));

    let mut fields = Vec::new();
    if let Fields::Named(named) = &item.fields {
        for field in &named.named {
            let field = schema_field(field, pkg_path, &table, rename_all.as_deref(), lines)
                .map_err(darling::Error::from)
                .map_err(attributes_error)?;
            fields.push(field);
        }
    }

    let descriptor = ResourceDescriptor::new(table, TypeIdentity::new(pkg_path, type_name), Schema::new(fields));
    Ok(match attrs.name {
        Some(name) => descriptor.with_name(name),
        None => descriptor
    })
}

fn schema_field(
    field: &Field,
    pkg_path: &str,
    table: &str,
    rename_all: Option<&str>,
    lines: &SourceLines<'_>
) -> syn::Result<SchemaField> {
    let Some(ident) = &field.ident else {
        return Err(syn::Error::new_spanned(field, "named field required"));
    };
    let name = ident.unraw().to_string();

    let mut column = None;
    let mut primary_key = false;
    let mut auto_increment = false;
    let mut relation = false;
    let mut validation = None;

    for attr in &field.attrs {
        if attr.path().is_ident("id") {
            primary_key = true;
        } else if attr.path().is_ident("auto") {
            auto_increment = true;
        } else if attr.path().is_ident("relation") {
            relation = true;
        } else if attr.path().is_ident("column") {
            column = Some(ColumnConfig::from_attr(attr)?);
        } else if attr.path().is_ident("validate") {
            validation = Some(validation_text(attr, lines));
        }
    }

    let (rename, skip) = serde_field(&field.attrs)?;
    let json = if skip {
        Some("-".to_string())
    } else {
        rename.or_else(|| rename_all.map(|rule| apply_rename(rule, &name)))
    };

    let explicit = column.is_some();
    let column = column.unwrap_or_default();
    let is_column = !relation && !column.skip && (explicit || !is_record(&field.ty, pkg_path));
    let db_name = is_column.then(|| column.column_name(&name).to_string());

    Ok(SchemaField {
        index: db_name
            .as_deref()
            .and_then(|db_name| column.index_name(table, db_name)),
        unique_index: db_name
            .as_deref()
            .and_then(|db_name| column.unique_index_name(table, db_name)),
        type_signature: type_signature(&field.ty),
        shape: ColumnShape::from_type(&field.ty, pkg_path),
        data_type: DataType::from_type(&field.ty),
        json,
        validation,
        comment: column.comment.or_else(|| extract_doc_comments(&field.attrs)),
        default: column.default,
        settings: column.settings,
        primary_key,
        auto_increment,
        unique: column.unique,
        nullable: column.nullable,
        db_name,
        name
    })
}

/// Check if a type names another record, directly or as elements.
fn is_record(ty: &Type, pkg_path: &str) -> bool {
    match ColumnShape::from_type(ty, pkg_path).base() {
        ColumnShape::Struct(_) => !DataType::from_type(ty).is_scalar(),
        ColumnShape::Slice => element_type(ty).is_some_and(|elem| {
            matches!(ColumnShape::from_type(elem, pkg_path).base(), ColumnShape::Struct(_))
                && !DataType::from_type(elem).is_scalar()
        }),
        _ => false
    }
}

/// Element type of a (possibly wrapped) sequence.
fn element_type(ty: &Type) -> Option<&Type> {
    match ty {
        Type::Path(type_path) => {
            let segment = type_path.path.segments.last()?;
            let inner = first_type_argument(&segment.arguments)?;
            match segment.ident.to_string().as_str() {
                "Option" | "Box" | "Rc" | "Arc" => element_type(inner),
                _ => Some(inner)
            }
        }
        Type::Reference(reference) => element_type(&reference.elem),
        Type::Slice(slice) => Some(&slice.elem),
        Type::Array(array) => Some(&array.elem),
        _ => None
    }
}

/// Source text inside `#[validate(...)]`.
fn validation_text(attr: &Attribute, lines: &SourceLines<'_>) -> String {
    match &attr.meta {
        Meta::List(list) => match &list.delimiter {
            MacroDelimiter::Paren(paren) => lines
                .slice(paren.span.open().end(), paren.span.close().start())
                .unwrap_or_else(|| list.tokens.to_string()),
            _ => list.tokens.to_string()
        },
        Meta::NameValue(name_value) => match &name_value.value {
            Expr::Lit(expr) => match &expr.lit {
                Lit::Str(lit) => lit.value(),
                lit => lit.to_token_stream().to_string()
            },
            value => value.to_token_stream().to_string()
        },
        Meta::Path(_) => String::new()
    }
}

/// `rename_all` rule of struct-level `#[serde(...)]`.
fn rename_all(attrs: &[Attribute]) -> syn::Result<Option<String>> {
    let mut rule = None;
    visit_serde(attrs, |meta| {
        if meta.path.is_ident("rename_all") && meta.input.peek(syn::Token![=]) {
            rule = Some(string_value(meta)?);
            return Ok(true);
        }
        Ok(false)
    })?;
    Ok(rule)
}

/// `rename` value and skip flag of field-level `#[serde(...)]`.
fn serde_field(attrs: &[Attribute]) -> syn::Result<(Option<String>, bool)> {
    let mut rename = None;
    let mut skip = false;
    visit_serde(attrs, |meta| {
        if meta.path.is_ident("rename") && meta.input.peek(syn::Token![=]) {
            rename = Some(string_value(meta)?);
            return Ok(true);
        }
        if meta.path.is_ident("skip") || meta.path.is_ident("skip_serializing") {
            skip = true;
            return Ok(true);
        }
        Ok(false)
    })?;
    Ok((rename, skip))
}

/// Walk every `#[serde(...)]` option; `visit` returns whether it consumed
/// the option, unconsumed values are skipped.
fn visit_serde(
    attrs: &[Attribute],
    mut visit: impl FnMut(&ParseNestedMeta<'_>) -> syn::Result<bool>
) -> syn::Result<()> {
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("serde")) {
        attr.parse_nested_meta(|meta| {
            if !visit(&meta)? {
                skip_value(&meta)?;
            }
            Ok(())
        })?;
    }
    Ok(())
}

fn skip_value(meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
    if meta.input.peek(syn::Token![=]) {
        meta.value()?.parse::<Expr>()?;
    } else if meta.input.peek(syn::token::Paren) {
        let content;
        syn::parenthesized!(content in meta.input);
        content.parse::<TokenStream>()?;
    }
    Ok(())
}

fn string_value(meta: &ParseNestedMeta<'_>) -> syn::Result<String> {
    let value: syn::LitStr = meta.value()?.parse()?;
    Ok(value.value())
}

/// Apply a serde `rename_all` rule to a field name.
fn apply_rename(rule: &str, name: &str) -> String {
    match rule {
        "lowercase" => name.to_lowercase(),
        "UPPERCASE" => name.to_uppercase(),
        "camelCase" => name.to_case(Case::Camel),
        "PascalCase" => name.to_case(Case::Pascal),
        "snake_case" => name.to_case(Case::Snake),
        "SCREAMING_SNAKE_CASE" => name.to_case(Case::Constant),
        "kebab-case" => name.to_case(Case::Kebab),
        "SCREAMING-KEBAB-CASE" => name.to_case(Case::Cobol),
        _ => name.to_string()
    }
}
