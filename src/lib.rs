//! block-tree: immutable keyed block tree for rich-text editing surfaces.
//!
//! This crate provides the document model underneath an editor. It includes:
//!
//! - **Core containers** - Ordered keyed child collections, per-character
//!   formatting metadata, and contiguous-run detection
//! - **Block tree** - Immutable keyed nodes with sibling lookup, path search,
//!   document-order successor/predecessor and lazy pre-order traversal
//! - **Document model** - Rich-text blocks and a content state built from
//!   block arrays or raw text
//!
//! Nothing is ever mutated in place. Every update returns a new value that
//! shares all untouched subtrees with the old one.
//!
//! # Quick Start
//!
//! ```rust
//! use block_tree::ContentState;
//!
//! let state = ContentState::create_from_text("Hello\nWorld").unwrap();
//! assert_eq!(state.block_map().len(), 2);
//! assert_eq!(state.plain_text(None), "Hello\nWorld");
//! ```
//!
//! # Features
//!
//! - `cli` - Builds the `block-tree` inspection binary (enabled by default)

// Ordered collections, character metadata, run detection
pub mod core;

// Keyed block tree and navigation
pub mod block;

// Rich-text blocks and document state
pub mod doc;

// Re-export core types
pub use crate::core::{
    BlockMap, CharacterMetadata, InlineStyle, Keyed, collect_ranges, find_ranges,
};

// Re-export block types
pub use block::{Block, BlockField, Descendants};

// Re-export doc types
pub use doc::{
    BlockData, CONTAINER_TYPE, ContentBlock, ContentError, ContentField, ContentState,
    DefaultSanitizer, Delimiter, ImportConfig, KeyGenerator, RICH_TEXT_TYPE, RandomKeys,
    RichText, Sanitizer, SelectionState, SequentialKeys, UNSTYLED_TYPE,
};
