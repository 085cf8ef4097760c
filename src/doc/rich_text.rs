//! Rich-text payload for document blocks.
//!
//! A rich-text block pairs its text with one [`CharacterMetadata`] per
//! character. Characters are extended grapheme clusters, so offsets line up
//! with what a user perceives as a single character.

use super::ContentError;
use crate::block::{Block, BlockField};
use crate::core::character::EMPTY_STYLE;
use crate::core::{CharacterMetadata, InlineStyle, collect_ranges, find_ranges};
use serde::{Deserialize, Deserializer, Serialize};
use std::ops::Range;
use unicode_segmentation::UnicodeSegmentation;

pub const RICH_TEXT_TYPE: &str = "richtext";
pub const UNSTYLED_TYPE: &str = "unstyled";

/// Number of characters (grapheme clusters) in `text`.
pub fn text_length(text: &str) -> usize {
    text.graphemes(true).count()
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawRichText")]
pub struct RichText {
    text: String,
    character_list: Vec<CharacterMetadata>,
    depth: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawRichText {
    #[serde(default)]
    text: String,
    #[serde(default)]
    character_list: Vec<CharacterMetadata>,
    #[serde(default)]
    depth: u32,
}

impl TryFrom<RawRichText> for RichText {
    type Error = ContentError;

    fn try_from(raw: RawRichText) -> Result<Self, Self::Error> {
        RichText::new(raw.text, raw.character_list, raw.depth)
    }
}

impl RichText {
    /// Fails when `character_list` does not hold exactly one entry per
    /// character of `text`.
    pub fn new(
        text: impl Into<String>,
        character_list: Vec<CharacterMetadata>,
        depth: u32,
    ) -> Result<Self, ContentError> {
        let text = text.into();
        let text_len = text_length(&text);
        if text_len != character_list.len() {
            tracing::warn!(
                text = text_len,
                characters = character_list.len(),
                "rejected rich text with mismatched character list"
            );
            return Err(ContentError::CharacterListMismatch {
                text: text_len,
                characters: character_list.len(),
            });
        }
        Ok(Self {
            text,
            character_list,
            depth,
        })
    }

    /// Unformatted text: every character gets [`CharacterMetadata::EMPTY`].
    pub fn plain(text: impl Into<String>) -> Self {
        let text = text.into();
        let character_list = vec![CharacterMetadata::EMPTY; text_length(&text)];
        Self {
            text,
            character_list,
            depth: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn character_list(&self) -> &[CharacterMetadata] {
        &self.character_list
    }

    pub fn depth(&self) -> u32 {
        self.depth
    }

    pub fn len(&self) -> usize {
        self.character_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.character_list.is_empty()
    }
}

/// Payload carried by document blocks.
///
/// The synthetic root container carries nothing; text blocks carry
/// [`RichText`]. Serialized as `null` or the rich-text object.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BlockData {
    #[default]
    Empty,
    RichText(RichText),
}

impl<'de> Deserialize<'de> for BlockData {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rich_text = Option::<RichText>::deserialize(deserializer)?;
        Ok(rich_text.map_or(BlockData::Empty, BlockData::RichText))
    }
}

pub type ContentBlock = Block<BlockData>;

/// Field-level update for a [`ContentBlock`].
///
/// Text, character list and depth land in the rich-text payload; anything
/// else is a plain block field.
#[derive(Debug, Clone, PartialEq)]
pub enum ContentField {
    Text(String),
    CharacterList(Vec<CharacterMetadata>),
    Depth(u32),
    Block(BlockField<BlockData>),
}

fn have_equal_style(a: &CharacterMetadata, b: &CharacterMetadata) -> bool {
    a.get_style() == b.get_style()
}

fn have_equal_entity(a: &CharacterMetadata, b: &CharacterMetadata) -> bool {
    a.get_entity() == b.get_entity()
}

impl Block<BlockData> {
    pub fn rich_text(key: impl Into<String>, rich_text: RichText) -> Self {
        Block::new(key, RICH_TEXT_TYPE, BlockData::RichText(rich_text))
    }

    /// Plain `unstyled` block holding `text`.
    pub fn unstyled(key: impl Into<String>, text: impl Into<String>) -> Self {
        Block::new(
            key,
            UNSTYLED_TYPE,
            BlockData::RichText(RichText::plain(text)),
        )
    }

    pub fn with_rich_text(self, rich_text: RichText) -> Self {
        self.with_data(BlockData::RichText(rich_text))
    }

    pub fn as_rich_text(&self) -> Option<&RichText> {
        match self.data() {
            BlockData::RichText(rich_text) => Some(rich_text),
            BlockData::Empty => None,
        }
    }

    pub fn text(&self) -> &str {
        self.as_rich_text().map_or("", RichText::text)
    }

    pub fn character_list(&self) -> &[CharacterMetadata] {
        self.as_rich_text()
            .map(RichText::character_list)
            .unwrap_or_default()
    }

    pub fn depth(&self) -> u32 {
        self.as_rich_text().map_or(0, RichText::depth)
    }

    pub fn length(&self) -> usize {
        self.character_list().len()
    }

    /// Style at `offset`; empty when the offset is out of range.
    pub fn inline_style_at(&self, offset: usize) -> &InlineStyle {
        self.character_list()
            .get(offset)
            .map_or(&EMPTY_STYLE, CharacterMetadata::get_style)
    }

    pub fn entity_at(&self, offset: usize) -> Option<&str> {
        self.character_list()
            .get(offset)
            .and_then(CharacterMetadata::get_entity)
    }

    /// Calls `callback(start, end)` for every maximal run of characters that
    /// share a style set and pass `filter`.
    pub fn find_style_ranges<F, C>(&self, filter: F, callback: C)
    where
        F: Fn(&CharacterMetadata) -> bool,
        C: FnMut(usize, usize),
    {
        find_ranges(self.character_list(), have_equal_style, filter, callback);
    }

    /// Calls `callback(start, end)` for every maximal run of characters that
    /// share an entity and pass `filter`.
    pub fn find_entity_ranges<F, C>(&self, filter: F, callback: C)
    where
        F: Fn(&CharacterMetadata) -> bool,
        C: FnMut(usize, usize),
    {
        find_ranges(self.character_list(), have_equal_entity, filter, callback);
    }

    pub fn style_ranges<F>(&self, filter: F) -> Vec<Range<usize>>
    where
        F: Fn(&CharacterMetadata) -> bool,
    {
        collect_ranges(self.character_list(), have_equal_style, filter)
    }

    pub fn entity_ranges<F>(&self, filter: F) -> Vec<Range<usize>>
    where
        F: Fn(&CharacterMetadata) -> bool,
    {
        collect_ranges(self.character_list(), have_equal_entity, filter)
    }

    /// Returns a copy with one field replaced.
    ///
    /// Writes to the rich-text payload are re-validated, so a text whose
    /// length no longer matches the character list is rejected.
    pub fn update(&self, field: ContentField) -> Result<Self, ContentError> {
        let current = self.as_rich_text().cloned().unwrap_or_default();
        let rich_text = match field {
            ContentField::Block(field) => return Ok(self.set(field)),
            ContentField::Depth(depth) => RichText { depth, ..current },
            ContentField::Text(text) => {
                RichText::new(text, current.character_list, current.depth)?
            }
            ContentField::CharacterList(character_list) => {
                RichText::new(current.text, character_list, current.depth)?
            }
        };
        Ok(self.clone().with_rich_text(rich_text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styled(text: &str, styles: &[&[&str]]) -> ContentBlock {
        let character_list = styles
            .iter()
            .map(|names| CharacterMetadata::new(names.iter().copied().collect(), None))
            .collect();
        ContentBlock::rich_text("k", RichText::new(text, character_list, 0).unwrap())
    }

    #[test]
    fn test_mismatched_character_list_is_rejected() {
        let err = RichText::new("abc", vec![CharacterMetadata::EMPTY], 0).unwrap_err();
        assert_eq!(
            err,
            ContentError::CharacterListMismatch {
                text: 3,
                characters: 1
            }
        );
    }

    #[test]
    fn test_length_counts_graphemes() {
        let block = ContentBlock::unstyled("k", "e\u{301}!");
        assert_eq!(block.length(), 2);
        assert_eq!(block.text(), "e\u{301}!");
    }

    #[test]
    fn test_style_lookup_out_of_range_is_empty() {
        let block = styled("ab", &[&["BOLD"], &[]]);
        assert!(block.inline_style_at(0).has("BOLD"));
        assert!(block.inline_style_at(1).is_empty());
        assert!(block.inline_style_at(99).is_empty());
        assert_eq!(block.entity_at(99), None);
    }

    #[test]
    fn test_update_redirects_into_payload() {
        let block = ContentBlock::unstyled("k", "abc");
        let deeper = block.update(ContentField::Depth(2)).unwrap();
        assert_eq!(deeper.depth(), 2);
        assert_eq!(deeper.text(), "abc");

        let renamed = block.update(ContentField::Text("xyz".into())).unwrap();
        assert_eq!(renamed.text(), "xyz");

        assert!(block.update(ContentField::Text("too long".into())).is_err());

        let retyped = block
            .update(ContentField::Block(BlockField::Type("header-one".into())))
            .unwrap();
        assert_eq!(retyped.block_type(), "header-one");
        assert_eq!(retyped.text(), "abc");
    }

    #[test]
    fn test_container_block_has_no_text() {
        let root = ContentBlock::new("root", "plain-container", BlockData::Empty);
        assert_eq!(root.text(), "");
        assert_eq!(root.length(), 0);
        assert!(root.as_rich_text().is_none());
    }

    #[test]
    fn test_loading_bad_payload_reports_mismatch() {
        let json = r#"{"key":"k","type":"unstyled","data":{"text":"abc","characterList":[]}}"#;
        let err = serde_json::from_str::<ContentBlock>(json).unwrap_err();
        assert!(err.to_string().contains("character list has 0 entries"));

        let root: ContentBlock =
            serde_json::from_str(r#"{"key":"r","type":"plain-container","data":null}"#).unwrap();
        assert_eq!(root.data(), &BlockData::Empty);
    }
}
