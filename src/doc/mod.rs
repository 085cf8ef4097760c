//! Document model built on the block tree.
//!
//! A [`ContentState`] wraps a synthetic root container whose children are the
//! document's top-level blocks, together with the selection before and after
//! the change that produced it. Every operation here forwards to the root
//! [`Block`]; new states share all untouched blocks with the old one.

use crate::block::{Block, BlockField};
use crate::core::BlockMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub mod import;
pub mod rich_text;
pub mod selection;

pub use import::{
    DefaultSanitizer, Delimiter, ImportConfig, KeyGenerator, RandomKeys, Sanitizer,
    SequentialKeys,
};
pub use rich_text::{
    BlockData, ContentBlock, ContentField, RICH_TEXT_TYPE, RichText, UNSTYLED_TYPE, text_length,
};
pub use selection::SelectionState;

pub const CONTAINER_TYPE: &str = "plain-container";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContentError {
    #[error("cannot create a document from an empty block array")]
    EmptyBlockArray,
    #[error("block key must not be empty")]
    EmptyKey,
    #[error("character list has {characters} entries but text has {text} characters")]
    CharacterListMismatch { text: usize, characters: usize },
    #[error("selection points at unknown block {0:?}")]
    UnknownSelectionKey(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawContentState")]
pub struct ContentState {
    root_block: ContentBlock,
    selection_before: SelectionState,
    selection_after: SelectionState,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawContentState {
    root_block: ContentBlock,
    selection_before: SelectionState,
    selection_after: SelectionState,
}

impl TryFrom<RawContentState> for ContentState {
    type Error = ContentError;

    /// Loaded documents obey the same rules as freshly built ones: at least
    /// one top-level block, no empty keys, selections inside the tree.
    fn try_from(raw: RawContentState) -> Result<Self, Self::Error> {
        let root = &raw.root_block;
        if root.is_leaf() {
            tracing::warn!("rejected loaded document without blocks");
            return Err(ContentError::EmptyBlockArray);
        }
        if root.traverse_descendant_keys(false).any(str::is_empty) {
            tracing::warn!("rejected loaded document with an empty block key");
            return Err(ContentError::EmptyKey);
        }
        for selection in [&raw.selection_before, &raw.selection_after] {
            for key in [selection.anchor_key(), selection.focus_key()] {
                if root.descendant(key).is_none() {
                    tracing::warn!(key, "rejected loaded selection");
                    return Err(ContentError::UnknownSelectionKey(key.to_string()));
                }
            }
        }

        Ok(Self {
            root_block: raw.root_block,
            selection_before: raw.selection_before,
            selection_after: raw.selection_after,
        })
    }
}

impl ContentState {
    /// Builds a document whose top-level blocks are `blocks`, in order.
    ///
    /// The root container gets a random key. Both selections start collapsed
    /// at the beginning of the first block.
    pub fn create_from_block_array<I>(blocks: I) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = ContentBlock>,
    {
        Self::create_from_block_array_with(blocks, &RandomKeys)
    }

    pub fn create_from_block_array_with<I, K>(blocks: I, keys: &K) -> Result<Self, ContentError>
    where
        I: IntoIterator<Item = ContentBlock>,
        K: KeyGenerator + ?Sized,
    {
        let block_map: BlockMap<ContentBlock> = BlockMap::from_blocks(blocks);
        let Some(first) = block_map.first() else {
            tracing::warn!("rejected document without blocks");
            return Err(ContentError::EmptyBlockArray);
        };
        if block_map.keys().any(str::is_empty) {
            tracing::warn!("rejected document with an empty block key");
            return Err(ContentError::EmptyKey);
        }

        let selection = SelectionState::create_empty(first.key());
        let root_key = keys.generate();
        if root_key.is_empty() {
            return Err(ContentError::EmptyKey);
        }

        tracing::debug!(
            blocks = block_map.len(),
            root = %root_key,
            "created content state"
        );
        let root_block =
            Block::new(root_key, CONTAINER_TYPE, BlockData::Empty).with_children(block_map);
        Ok(Self {
            root_block,
            selection_before: selection.clone(),
            selection_after: selection,
        })
    }

    /// Builds a document with one unstyled block per line of `text`.
    pub fn create_from_text(text: &str) -> Result<Self, ContentError> {
        Self::create_from_text_with(
            text,
            &ImportConfig::default(),
            &RandomKeys,
            &DefaultSanitizer,
        )
    }

    pub fn create_from_text_with<K, S>(
        text: &str,
        config: &ImportConfig,
        keys: &K,
        sanitizer: &S,
    ) -> Result<Self, ContentError>
    where
        K: KeyGenerator + ?Sized,
        S: Sanitizer + ?Sized,
    {
        let lines = config.delimiter.split(text);
        tracing::debug!(
            lines = lines.len(),
            delimiter = ?config.delimiter,
            "importing text"
        );

        let blocks: Vec<ContentBlock> = lines
            .into_iter()
            .map(|line| {
                let line = sanitizer.sanitize(line);
                Block::new(
                    keys.generate(),
                    config.block_type.as_str(),
                    BlockData::RichText(RichText::plain(line)),
                )
            })
            .collect();

        Self::create_from_block_array_with(blocks, keys)
    }

    pub fn root_block(&self) -> &ContentBlock {
        &self.root_block
    }

    pub fn block_map(&self) -> &BlockMap<ContentBlock> {
        self.root_block.children()
    }

    pub fn selection_before(&self) -> &SelectionState {
        &self.selection_before
    }

    pub fn selection_after(&self) -> &SelectionState {
        &self.selection_after
    }

    pub fn block_for_key(&self, key: &str) -> Option<&ContentBlock> {
        self.root_block.child(key)
    }

    pub fn block_after(&self, key: &str) -> Option<&ContentBlock> {
        self.root_block.child_after(key)
    }

    pub fn block_before(&self, key: &str) -> Option<&ContentBlock> {
        self.root_block.child_before(key)
    }

    pub fn key_after(&self, key: &str) -> Option<&str> {
        self.block_after(key).map(ContentBlock::key)
    }

    pub fn key_before(&self, key: &str) -> Option<&str> {
        self.block_before(key).map(ContentBlock::key)
    }

    pub fn blocks_as_vec(&self) -> Vec<Arc<ContentBlock>> {
        self.root_block.children_as_vec()
    }

    pub fn first_block(&self) -> Option<&ContentBlock> {
        self.root_block.first_child()
    }

    pub fn last_block(&self) -> Option<&ContentBlock> {
        self.root_block.last_child()
    }

    /// Text of every top-level block joined by `delimiter` (`"\n"` when
    /// `None`). Blocks without text contribute an empty string.
    pub fn plain_text(&self, delimiter: Option<&str>) -> String {
        self.block_map()
            .iter()
            .map(|block| block.text())
            .collect::<Vec<_>>()
            .join(delimiter.unwrap_or("\n"))
    }

    pub fn has_text(&self) -> bool {
        let block_map = self.block_map();
        block_map.len() > 1 || block_map.first().is_some_and(|block| block.length() > 0)
    }

    /// Replaces the top-level blocks. An empty map is accepted here so that
    /// editing code can pass through a transient empty state.
    pub fn with_block_map(&self, block_map: BlockMap<ContentBlock>) -> Self {
        Self {
            root_block: self.root_block.set(BlockField::Children(block_map)),
            ..self.clone()
        }
    }

    /// Replaces the block stored anywhere in the tree under `block`'s key.
    pub fn with_block(&self, block: ContentBlock) -> Option<Self> {
        let key = block.key().to_string();
        self.update_block(&key, |_| block)
    }

    pub fn update_block<F>(&self, key: &str, update: F) -> Option<Self>
    where
        F: FnOnce(&ContentBlock) -> ContentBlock,
    {
        let root_block = self.root_block.update_descendant(key, update)?;
        Some(Self {
            root_block,
            ..self.clone()
        })
    }

    pub fn with_selection_before(&self, selection: SelectionState) -> Self {
        Self {
            selection_before: selection,
            ..self.clone()
        }
    }

    pub fn with_selection_after(&self, selection: SelectionState) -> Self {
        Self {
            selection_after: selection,
            ..self.clone()
        }
    }
}
