//! Per-character formatting metadata.
//!
//! Every character of a rich-text block carries a [`CharacterMetadata`]: the
//! set of inline style tags applied to it and an optional entity reference
//! (a link target, a mention id, ...).

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Ordered set of inline style tags such as `BOLD` or `ITALIC`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InlineStyle(BTreeSet<String>);

pub(crate) static EMPTY_STYLE: InlineStyle = InlineStyle::new();

impl InlineStyle {
    pub const fn new() -> Self {
        Self(BTreeSet::new())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn has(&self, style: &str) -> bool {
        self.0.contains(style)
    }

    pub fn add(&self, style: impl Into<String>) -> Self {
        let mut styles = self.0.clone();
        styles.insert(style.into());
        Self(styles)
    }

    pub fn remove(&self, style: &str) -> Self {
        let mut styles = self.0.clone();
        styles.remove(style);
        Self(styles)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for InlineStyle {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CharacterMetadata {
    style: InlineStyle,
    entity: Option<String>,
}

impl CharacterMetadata {
    /// No style, no entity.
    pub const EMPTY: CharacterMetadata = CharacterMetadata {
        style: InlineStyle::new(),
        entity: None,
    };

    pub fn new(style: InlineStyle, entity: Option<String>) -> Self {
        Self { style, entity }
    }

    pub fn get_style(&self) -> &InlineStyle {
        &self.style
    }

    pub fn get_entity(&self) -> Option<&str> {
        self.entity.as_deref()
    }

    pub fn has_style(&self, style: &str) -> bool {
        self.style.has(style)
    }

    pub fn apply_style(&self, style: impl Into<String>) -> Self {
        Self {
            style: self.style.add(style),
            entity: self.entity.clone(),
        }
    }

    pub fn remove_style(&self, style: &str) -> Self {
        Self {
            style: self.style.remove(style),
            entity: self.entity.clone(),
        }
    }

    pub fn with_entity(&self, entity: Option<String>) -> Self {
        Self {
            style: self.style.clone(),
            entity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_has_no_style_or_entity() {
        let empty = CharacterMetadata::EMPTY;
        assert!(empty.get_style().is_empty());
        assert_eq!(empty.get_entity(), None);
        assert_eq!(empty, CharacterMetadata::default());
    }

    #[test]
    fn test_style_updates_return_new_values() {
        let plain = CharacterMetadata::EMPTY;
        let bold = plain.apply_style("BOLD");
        assert!(bold.has_style("BOLD"));
        assert!(!plain.has_style("BOLD"));
        assert_eq!(bold.remove_style("BOLD"), plain);
    }

    #[test]
    fn test_style_equality_ignores_insertion_order() {
        let a: InlineStyle = ["BOLD", "ITALIC"].into_iter().collect();
        let b = InlineStyle::new().add("ITALIC").add("BOLD");
        assert_eq!(a, b);
    }
}
