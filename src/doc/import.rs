//! Collaborators used when a document is built from raw text: line
//! splitting, key generation and line sanitizing.

use std::sync::atomic::{AtomicU64, Ordering};
use uuid::Uuid;

use super::rich_text::UNSTYLED_TYPE;

/// How raw text is cut into block-level lines.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Delimiter {
    /// Any of `\r\n`, `\r` or `\n`.
    #[default]
    LineBreaks,
    /// Exact separator string. An empty separator does not split at all:
    /// the whole text becomes a single block.
    Literal(String),
}

impl Delimiter {
    pub fn split<'a>(&self, text: &'a str) -> Vec<&'a str> {
        match self {
            Delimiter::LineBreaks => split_line_breaks(text),
            Delimiter::Literal(sep) if sep.is_empty() => vec![text],
            Delimiter::Literal(sep) => text.split(sep.as_str()).collect(),
        }
    }
}

fn split_line_breaks(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut idx = 0usize;
    while idx < bytes.len() {
        match bytes[idx] {
            b'\r' => {
                lines.push(&text[start..idx]);
                idx += if bytes.get(idx + 1) == Some(&b'\n') { 2 } else { 1 };
                start = idx;
            }
            b'\n' => {
                lines.push(&text[start..idx]);
                idx += 1;
                start = idx;
            }
            _ => idx += 1,
        }
    }
    lines.push(&text[start..]);
    lines
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfig {
    pub delimiter: Delimiter,
    pub block_type: String,
}

impl ImportConfig {
    pub fn line_breaks() -> Self {
        Self {
            delimiter: Delimiter::LineBreaks,
            block_type: UNSTYLED_TYPE.to_string(),
        }
    }

    pub fn with_delimiter(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: Delimiter::Literal(delimiter.into()),
            ..Self::line_breaks()
        }
    }
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self::line_breaks()
    }
}

/// Source of block keys. Keys must not collide within one document.
pub trait KeyGenerator {
    fn generate(&self) -> String;
}

impl<F: Fn() -> String> KeyGenerator for F {
    fn generate(&self) -> String {
        self()
    }
}

/// Random v4 UUID keys in simple (hyphenless) form.
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomKeys;

impl KeyGenerator for RandomKeys {
    fn generate(&self) -> String {
        Uuid::new_v4().simple().to_string()
    }
}

/// Deterministic keys: `prefix0`, `prefix1`, ...
#[derive(Debug)]
pub struct SequentialKeys {
    prefix: String,
    next: AtomicU64,
}

impl SequentialKeys {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: AtomicU64::new(0),
        }
    }
}

impl KeyGenerator for SequentialKeys {
    fn generate(&self) -> String {
        let n = self.next.fetch_add(1, Ordering::Relaxed);
        format!("{}{}", self.prefix, n)
    }
}

/// Normalizes one line of imported text before it becomes block text.
pub trait Sanitizer {
    fn sanitize(&self, line: &str) -> String;
}

impl<F: Fn(&str) -> String> Sanitizer for F {
    fn sanitize(&self, line: &str) -> String {
        self(line)
    }
}

/// Strips carriage returns, the block delimiter character.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSanitizer;

impl Sanitizer for DefaultSanitizer {
    fn sanitize(&self, line: &str) -> String {
        line.replace('\r', "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_breaks_accept_all_newline_styles() {
        let lines = Delimiter::LineBreaks.split("a\r\nb\rc\nd");
        assert_eq!(lines, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_line_breaks_keep_empty_lines() {
        assert_eq!(Delimiter::LineBreaks.split(""), vec![""]);
        assert_eq!(Delimiter::LineBreaks.split("a\n\nb\n"), vec!["a", "", "b", ""]);
    }

    #[test]
    fn test_literal_delimiter() {
        let delimiter = Delimiter::Literal("||".into());
        assert_eq!(delimiter.split("x||y"), vec!["x", "y"]);
        assert_eq!(Delimiter::Literal(String::new()).split("xy"), vec!["xy"]);
    }

    #[test]
    fn test_sequential_keys_count_up() {
        let keys = SequentialKeys::new("b");
        assert_eq!(keys.generate(), "b0");
        assert_eq!(keys.generate(), "b1");
    }

    #[test]
    fn test_random_keys_differ() {
        assert_ne!(RandomKeys.generate(), RandomKeys.generate());
    }

    #[test]
    fn test_default_sanitizer_strips_carriage_returns() {
        assert_eq!(DefaultSanitizer.sanitize("a\rb"), "ab");
        assert_eq!((|line: &str| line.to_uppercase()).sanitize("ab"), "AB");
    }
}
