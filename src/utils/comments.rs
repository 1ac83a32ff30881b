// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Line comment map for Rust source text.
//!
//! `syn` drops ordinary `//` comments, so declarations lose the notes
//! written above them. [`CommentMap::scan`] runs a small lexer over the raw
//! text and records every line comment under the line *after* it, which is
//! where the commented declaration usually starts.
//!
//! ```text
//! 12 | // Display name shown in the catalog.   -> stored under line 13
//! 13 | pub name: String,
//! ```
//!
//! String, raw string and char literals are skipped so `"http://..."` is not
//! taken for a comment. Block comments are skipped and not recorded.

use std::collections::HashMap;

/// Comments keyed by the line that follows them (1-based).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommentMap {
    by_line: HashMap<usize, String>
}

impl CommentMap {
    /// Scan source text and build the map.
    #[must_use]
    pub fn scan(source: &str) -> Self {
        let chars: Vec<char> = source.chars().collect();
        let mut by_line = HashMap::new();
        let mut line = 1;
        let mut i = 0;

        while i < chars.len() {
            match chars[i] {
                '\n' => {
                    line += 1;
                    i += 1;
                }
                '/' if chars.get(i + 1) == Some(&'/') => {
                    let start = i + 2;
                    let mut end = start;
                    while end < chars.len() && chars[end] != '\n' {
                        end += 1;
                    }
                    let text = clean_comment(&chars[start..end].iter().collect::<String>());
                    if !text.is_empty() {
                        by_line.insert(line + 1, text);
                    }
                    i = end;
                }
                '/' if chars.get(i + 1) == Some(&'*') => {
                    i = skip_block_comment(&chars, i + 2, &mut line);
                }
                '"' => {
                    i = skip_string(&chars, i + 1, &mut line);
                }
                'r' if starts_literal(&chars, i) => {
                    i = skip_raw_string(&chars, i + 1, &mut line).unwrap_or(i + 1);
                }
                '\'' => {
                    i = skip_char_literal(&chars, i);
                }
                _ => i += 1
            }
        }

        Self {
            by_line
        }
    }

    /// Comment attached to `line`, if any.
    #[must_use]
    pub fn get(&self, line: usize) -> Option<&str> {
        self.by_line.get(&line).map(String::as_str)
    }

    /// Number of recorded comments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.by_line.len()
    }

    /// Check if no comments were recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_line.is_empty()
    }
}

/// Strip the doc marker (`/` or `!`) and one leading space.
fn clean_comment(text: &str) -> String {
    let text = text
        .strip_prefix('/')
        .or_else(|| text.strip_prefix('!'))
        .unwrap_or(text);
    let text = text.strip_prefix(' ').unwrap_or(text);
    text.trim_end().to_string()
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// An `r` at `i` may open a raw string when it starts a token or follows a
/// lone `b` prefix.
fn starts_literal(chars: &[char], i: usize) -> bool {
    match i {
        0 => true,
        _ if !is_ident_char(chars[i - 1]) => true,
        1 => chars[0] == 'b',
        _ => chars[i - 1] == 'b' && !is_ident_char(chars[i - 2])
    }
}

fn skip_block_comment(chars: &[char], mut i: usize, line: &mut usize) -> usize {
    let mut depth = 1;
    while i < chars.len() && depth > 0 {
        match (chars[i], chars.get(i + 1)) {
            ('/', Some('*')) => {
                depth += 1;
                i += 2;
            }
            ('*', Some('/')) => {
                depth -= 1;
                i += 2;
            }
            ('\n', _) => {
                *line += 1;
                i += 1;
            }
            _ => i += 1
        }
    }
    i
}

fn skip_string(chars: &[char], mut i: usize, line: &mut usize) -> usize {
    while i < chars.len() {
        match chars[i] {
            '\\' => {
                if chars.get(i + 1) == Some(&'\n') {
                    *line += 1;
                }
                i += 2;
            }
            '"' => return i + 1,
            '\n' => {
                *line += 1;
                i += 1;
            }
            _ => i += 1
        }
    }
    chars.len()
}

/// Skip `#*"..."#*` starting right after the `r`.
fn skip_raw_string(chars: &[char], start: usize, line: &mut usize) -> Option<usize> {
    let hashes = chars[start..].iter().take_while(|c| **c == '#').count();
    if chars.get(start + hashes) != Some(&'"') {
        return None;
    }

    let mut i = start + hashes + 1;
    while i < chars.len() {
        match chars[i] {
            '"' if chars[i + 1..].iter().take(hashes).filter(|c| **c == '#').count() == hashes => {
                return Some(i + 1 + hashes);
            }
            '\n' => *line += 1,
            _ => {}
        }
        i += 1;
    }
    Some(chars.len())
}

/// Skip a char literal, or step over a lifetime tick.
fn skip_char_literal(chars: &[char], i: usize) -> usize {
    if chars.get(i + 1) == Some(&'\\') {
        let mut end = i + 3;
        while end < chars.len() && chars[end] != '\'' && chars[end] != '\n' {
            end += 1;
        }
        return end + 1;
    }
    if chars.get(i + 2) == Some(&'\'') {
        return i + 3;
    }
    i + 1
}
