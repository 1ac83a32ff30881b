// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Documentation extraction utilities.
//!
//! In Rust, doc comments (`///` and `/** */`) are stored as `#[doc = "..."]`
//! attributes. This module pulls them back out, either cleaned up for use as
//! a description or verbatim for re-rendering a declaration.
//!
//! # Example
//!
//! ```rust,ignore
//! /// Product offered in the shop.
//! ///
//! /// Prices are stored in cents.
//! pub struct Product { ... }
//!
//! // extract_doc_comments: "Product offered in the shop.\n\nPrices are stored in cents."
//! // doc_lines:            [" Product offered in the shop.", "", " Prices are stored in cents."]
//! ```

use syn::Attribute;

/// Check if an attribute is a doc comment.
#[must_use]
pub fn is_doc(attr: &Attribute) -> bool {
    attr.path().is_ident("doc")
}

/// Collect the raw string values of all `#[doc = "..."]` attributes.
///
/// Values are returned untouched (a `/// text` comment yields `" text"`),
/// so they can be rendered back as `///{value}`.
#[must_use]
pub fn doc_lines(attrs: &[Attribute]) -> Vec<String> {
    attrs
        .iter()
        .filter(|attr| is_doc(attr))
        .filter_map(|attr| {
            if let syn::Meta::NameValue(meta) = &attr.meta
                && let syn::Expr::Lit(syn::ExprLit {
                    lit: syn::Lit::Str(lit_str),
                    ..
                }) = &meta.value
            {
                return Some(lit_str.value());
            }
            None
        })
        .flat_map(|value| {
            // Block doc comments arrive as a single multi-line value; an
            // empty `///` still yields one empty line
            value
                .split('\n')
                .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Extract doc comments from attributes.
///
/// Combines all `#[doc = "..."]` attributes into a single string,
/// trimming leading whitespace from each line.
///
/// # Returns
///
/// Combined doc string, or `None` if no doc comments present.
#[must_use]
pub fn extract_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let doc_lines = doc_lines(attrs);
    if doc_lines.is_empty() {
        return None;
    }

    let combined = doc_lines
        .iter()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n");

    let trimmed = combined.trim().to_string();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_attrs(input: &str) -> Vec<Attribute> {
        let item: syn::ItemStruct = syn::parse_str(input).unwrap();
        item.attrs
    }

    #[test]
    fn extract_single_line_doc() {
        let attrs = parse_attrs(
            r#"
            /// User entity.
            struct Foo;
        "#
        );
        let docs = extract_doc_comments(&attrs);
        assert_eq!(docs, Some("User entity.".to_string()));
    }

    #[test]
    fn extract_multi_line_doc() {
        let attrs = parse_attrs(
            r#"
            /// First line.
            /// Second line.
            struct Foo;
        "#
        );
        let docs = extract_doc_comments(&attrs);
        assert_eq!(docs, Some("First line.\nSecond line.".to_string()));
    }

    #[test]
    fn extract_doc_with_empty_lines() {
        let attrs = parse_attrs(
            r#"
            /// Summary.
            ///
            /// Details here.
            struct Foo;
        "#
        );
        let docs = extract_doc_comments(&attrs);
        assert_eq!(docs, Some("Summary.\n\nDetails here.".to_string()));
    }

    #[test]
    fn doc_lines_keep_empty_lines() {
        let attrs = parse_attrs(
            r#"
            /// First.
            ///
            /// Second.
            struct Foo;
        "#
        );
        assert_eq!(doc_lines(&attrs), vec![" First.", "", " Second."]);
    }

    #[test]
    fn extract_no_docs() {
        let attrs = parse_attrs(
            r#"
            #[derive(Debug)]
            struct Foo;
        "#
        );
        assert_eq!(extract_doc_comments(&attrs), None);
        assert!(doc_lines(&attrs).is_empty());
    }

    #[test]
    fn doc_lines_are_verbatim() {
        let attrs = parse_attrs(
            r#"
            /// Summary.
            ///   Indented.
            #[derive(Debug)]
            struct Foo;
        "#
        );
        assert_eq!(doc_lines(&attrs), vec![" Summary.", "   Indented."]);
        assert!(is_doc(&attrs[0]));
        assert!(!is_doc(&attrs[2]));
    }
}
