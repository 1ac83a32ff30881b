// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Text helpers for the hand-assembled JSON payloads.

/// Indent every line of `text` by one tab.
#[must_use]
pub fn shift(text: &str) -> String {
    format!("\t{}", text.split('\n').collect::<Vec<_>>().join("\n\t"))
}

/// Wrap a JSON document in a one-element array, indented one level.
#[must_use]
pub fn wrap_in_array(text: &str) -> String {
    format!("[\n{}\n]", shift(text))
}

/// Remove `//` line comments from annotated JSON.
///
/// Comment markers inside string literals are kept, so URLs survive.
#[must_use]
pub fn strip_line_comments(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match c {
            '"' => {
                in_string = true;
                out.push(c);
            }
            '/' if chars.peek() == Some(&'/') => {
                while let Some(&next) = chars.peek() {
                    if next == '\n' {
                        break;
                    }
                    chars.next();
                }
            }
            _ => out.push(c)
        }
    }

    out
}
