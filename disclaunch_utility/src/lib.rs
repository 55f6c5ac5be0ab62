// SPDX-License-Identifier: GPL-3.0
// lib.rs - Copyright Phillip Potter, 2026, under GPLv3 only.

// This crate contains useful text utility functions that can be used throughout the codebase.

/// Exists to allow us to define custom trait operations on byte slices.
type CustomBytes = [u8];

/// This trait exists to allow us to decode raw disc bytes into text, in the same
/// way regardless of where on the disc they came from.
pub trait CustomByteText {

    /// This function should return the bytes decoded as Latin-1, which can never fail
    /// as every byte maps to exactly one character.
    fn latin1_to_string(&self) -> String;

    /// This function should return a fixed-width ASCII field with surrounding whitespace
    /// and NUL padding removed, or `None` if the field is non-ASCII or ends up empty.
    fn ascii_field(&self) -> Option<String>;
}

impl CustomByteText for CustomBytes {

    /// Decodes as Latin-1, returning `String`.
    fn latin1_to_string(&self) -> String {
        self.iter().map(|&byte| byte as char).collect()
    }

    /// Decodes a padded ASCII field, returning `Option<String>`.
    fn ascii_field(&self) -> Option<String> {

        if !self.is_ascii() {
            return None;
        }

        let text = self
            .latin1_to_string()
            .trim_matches(|c: char| c.is_ascii_whitespace() || c == '\0')
            .to_string();

        if text.is_empty() || text.chars().any(|c| c.is_ascii_control()) {
            None
        } else {
            Some(text)
        }
    }
}

/// Splits a single CSV row into its fields. Fields may be wrapped in double quotes, in
/// which case they may contain commas, and a doubled quote stands for a literal one.
/// Unquoted fields are returned as-is, without trimming.
pub fn split_csv_row(line: &str) -> Vec<String> {

    let mut fields = vec![];
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.trim_end_matches(['\r', '\n']).chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' if current.is_empty() => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    fields.push(current);

    fields
}

/// Escapes a string so it can be placed inside a double-quoted XML attribute or
/// used as element text.
pub fn escape_xml(text: &str) -> String {

    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
