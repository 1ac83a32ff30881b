// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Canonical declaration text.
//!
//! Rendering is two explicit steps:
//!
//! 1. [`Declaration::assemble`] writes the pieces gathered by the extractor
//!    as plain text, one line per doc comment, attribute and field.
//! 2. [`reformat`] parses that text with `syn` and prints it with
//!    `prettyplease`. When parsing fails the assembled text is kept as is
//!    (see [`canonical`]).

use std::fmt::Write;

use tracing::debug;

/// A struct declaration broken into its printable parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Declaration {
    /// Raw doc lines, printed as `///{line}`.
    pub doc: Vec<String>,

    /// Visibility (`pub`, `pub(crate)`, or empty).
    pub vis: String,

    /// Struct name.
    pub name: String,

    /// Generic parameters including angle brackets, or empty.
    pub generics: String,

    /// Where clause, or empty.
    pub where_clause: String,

    /// Fields in declaration order.
    pub fields: Vec<DeclaredField>
}

/// A field line of a [`Declaration`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeclaredField {
    /// Attached comment, printed as `///` lines above the field.
    pub comment: String,

    /// Attribute source texts, one per line.
    pub attrs: Vec<String>,

    /// Field visibility, or empty.
    pub vis: String,

    /// Field name.
    pub name: String,

    /// Canonical type signature.
    pub ty: String
}

impl Declaration {
    /// Write the declaration as unformatted source text.
    #[must_use]
    pub fn assemble(&self) -> String {
        let mut out = String::new();

        for line in &self.doc {
            let _ = writeln!(out, "///{line}");
        }

        let _ = write!(out, "{}struct {}{}", prefixed(&self.vis), self.name, self.generics);
        if !self.where_clause.is_empty() {
            let _ = write!(out, " {}", self.where_clause);
        }
        out.push_str(" {\n");

        for field in &self.fields {
            for line in field.comment.lines() {
                if line.is_empty() {
                    out.push_str("    ///\n");
                } else {
                    let _ = writeln!(out, "    /// {line}");
                }
            }
            for attr in &field.attrs {
                for line in attr.lines() {
                    let _ = writeln!(out, "    {line}");
                }
            }
            let _ = writeln!(out, "    {}{}: {},", prefixed(&field.vis), field.name, field.ty);
        }

        out.push_str("}\n");
        out
    }
}

fn prefixed(vis: &str) -> String {
    if vis.is_empty() {
        String::new()
    } else {
        format!("{vis} ")
    }
}

/// Reformat source text with a deterministic printer.
///
/// Returns `None` when the text does not parse.
#[must_use]
pub fn reformat(text: &str) -> Option<String> {
    match syn::parse_file(text) {
        Ok(file) => Some(prettyplease::unparse(&file)),
        Err(err) => {
            debug!(error = %err, "declaration does not parse, keeping assembled text");
            None
        }
    }
}

/// Reformat `text`, falling back to it unchanged.
#[must_use]
pub fn canonical(text: String) -> String {
    reformat(&text).unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product() -> Declaration {
        Declaration {
            doc:          vec![" Product offered in the shop.".to_string()],
            vis:          "pub".to_string(),
            name:         "Product".to_string(),
            generics:     String::new(),
            where_clause: String::new(),
            fields:       vec![
                DeclaredField {
                    comment: String::new(),
                    attrs:   vec!["#[id]".to_string()],
                    vis:     "pub".to_string(),
                    name:    "id".to_string(),
                    ty:      "i64".to_string()
                },
                DeclaredField {
                    comment: "Display name.".to_string(),
                    attrs:   vec![],
                    vis:     "pub".to_string(),
                    name:    "name".to_string(),
                    ty:      "String".to_string()
                },
            ]
        }
    }

    #[test]
    fn assemble_layout() {
        let text = product().assemble();
        assert_eq!(
            text,
            "/// Product offered in the shop.\n\
             pub struct Product {\n    \
             #[id]\n    \
             pub id: i64,\n    \
             /// Display name.\n    \
             pub name: String,\n\
             }\n"
        );
    }

    #[test]
    fn reformat_round_trips_struct() {
        let body = canonical(product().assemble());
        let file = syn::parse_file(&body).unwrap();
        let found = file.items.iter().any(|item| {
            matches!(item, syn::Item::Struct(item) if item.ident == "Product")
        });
        assert!(found);
        assert!(body.contains("/// Display name."));
        assert!(body.contains("pub name: String,"));
    }

    #[test]
    fn reformat_is_idempotent() {
        let once = canonical(product().assemble());
        let twice = canonical(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn generics_and_where_clause() {
        let declaration = Declaration {
            name: "Page".to_string(),
            generics: "<T>".to_string(),
            where_clause: "where T: Clone".to_string(),
            fields: vec![DeclaredField {
                name: "items".to_string(),
                ty: "Vec<T>".to_string(),
                ..DeclaredField::default()
            }],
            ..Declaration::default()
        };
        let body = canonical(declaration.assemble());
        let file = syn::parse_file(&body).unwrap();
        assert!(matches!(&file.items[0], syn::Item::Struct(item) if item.generics.params.len() == 1));
    }

    #[test]
    fn unparsable_text_is_kept() {
        let text = "struct Broken { a: }".to_string();
        assert!(reformat(&text).is_none());
        assert_eq!(canonical(text.clone()), text);
    }

    #[test]
    fn unit_struct_renders_empty_body() {
        let declaration = Declaration {
            name: "Marker".to_string(),
            ..Declaration::default()
        };
        let body = canonical(declaration.assemble());
        assert!(body.contains("struct Marker"));
        assert!(syn::parse_file(&body).is_ok());
    }
}
