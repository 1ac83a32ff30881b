// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Recovering original source text from token spans.
//!
//! Printing tokens back with `ToTokens` spaces them out
//! (`# [serde (rename = "id")]`). With `proc-macro2`'s `span-locations`
//! feature every span knows its line and column, so the text the author
//! actually wrote can be cut out of the file instead.

use proc_macro2::LineColumn;
use quote::ToTokens;
use syn::Attribute;

/// Source text split into lines for span lookups.
#[derive(Debug, Clone)]
pub struct SourceLines<'a> {
    lines: Vec<&'a str>
}

impl<'a> SourceLines<'a> {
    /// Split `source` into lines.
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            lines: source.lines().collect()
        }
    }

    /// Text between two span positions.
    ///
    /// Lines are 1-based and columns count characters, as reported by
    /// `proc-macro2`. Text spanning several lines is joined with single
    /// spaces. Returns `None` when a position is out of range.
    #[must_use]
    pub fn slice(&self, start: LineColumn, end: LineColumn) -> Option<String> {
        self.pieces(start, end).map(|pieces| pieces.join(" "))
    }

    /// Original text of an attribute, `#[...]` included.
    ///
    /// Line breaks are kept, since a `//` comment inside a multi-line
    /// attribute would swallow the rest of it on a single line. Falls back
    /// to the token printer when the span does not map onto these lines.
    #[must_use]
    pub fn attribute(&self, attr: &Attribute) -> String {
        let start = attr.pound_token.span.start();
        let end = attr.bracket_token.span.close().end();
        self.pieces(start, end)
            .map(|pieces| pieces.join("\n"))
            .unwrap_or_else(|| attr.to_token_stream().to_string())
    }

    /// Trimmed, non-empty line pieces between two positions.
    fn pieces(&self, start: LineColumn, end: LineColumn) -> Option<Vec<String>> {
        if start.line == 0 || end.line < start.line {
            return None;
        }

        let mut pieces = Vec::new();
        for line_no in start.line..=end.line {
            let line = self.lines.get(line_no - 1)?;
            let chars: Vec<char> = line.chars().collect();
            let from = if line_no == start.line { start.column } else { 0 };
            let to = if line_no == end.line { end.column } else { chars.len() };
            if from > to || to > chars.len() {
                return None;
            }
            let piece: String = chars[from..to].iter().collect();
            let piece = piece.trim();
            if !piece.is_empty() {
                pieces.push(piece.to_string());
            }
        }
        Some(pieces)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_single_line() {
        let lines = SourceLines::new("let x = 1;\nlet y = 2;");
        let text = lines.slice(
            LineColumn {
                line:   2,
                column: 4
            },
            LineColumn {
                line:   2,
                column: 5
            }
        );
        assert_eq!(text.as_deref(), Some("y"));
    }

    #[test]
    fn slice_multi_line_joins_with_spaces() {
        let lines = SourceLines::new("#[column(\n    unique,\n    index\n)]");
        let text = lines.slice(
            LineColumn {
                line:   1,
                column: 0
            },
            LineColumn {
                line:   4,
                column: 2
            }
        );
        assert_eq!(text.as_deref(), Some("#[column( unique, index )]"));
    }

    #[test]
    fn slice_out_of_range_is_none() {
        let lines = SourceLines::new("short");
        let text = lines.slice(
            LineColumn {
                line:   3,
                column: 0
            },
            LineColumn {
                line:   3,
                column: 1
            }
        );
        assert!(text.is_none());
    }

    #[test]
    fn attribute_text_is_verbatim() {
        let source = "struct A {\n    #[serde(rename = \"id\")]\n    a: i32,\n}\n";
        let item: syn::ItemStruct = syn::parse_str(source).unwrap();
        let lines = SourceLines::new(source);
        let field = item.fields.iter().next().unwrap();
        assert_eq!(lines.attribute(&field.attrs[0]), "#[serde(rename = \"id\")]");
    }

    #[test]
    fn multi_line_attribute_keeps_line_breaks() {
        let source = "struct A {\n    #[column(\n        // storage name\n        name = \"x\"\n    )]\n    a: i32,\n}\n";
        let item: syn::ItemStruct = syn::parse_str(source).unwrap();
        let lines = SourceLines::new(source);
        let field = item.fields.iter().next().unwrap();
        assert_eq!(
            lines.attribute(&field.attrs[0]),
            "#[column(\n// storage name\nname = \"x\"\n)]"
        );
    }
}
