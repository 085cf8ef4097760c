//! Immutable keyed block tree.
//!
//! A [`Block`] owns an ordered [`BlockMap`] of children and an opaque payload.
//! Blocks never point at their parents; whenever a navigation step needs the
//! ancestry of a node, the path is rebuilt top-down with
//! [`Block::path_to_descendant`].
//!
//! "Document order" is pre-order: a node, then each child's subtree in
//! collection order.

use crate::core::{BlockMap, Keyed};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::sync::Arc;

mod traverse;

pub use traverse::Descendants;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block<D = ()> {
    key: String,
    #[serde(rename = "type")]
    block_type: String,
    data: D,
    #[serde(default)]
    children: BlockMap<Block<D>>,
}

/// A single field of a [`Block`], used for copy-on-write updates.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockField<D> {
    Key(String),
    Type(String),
    Data(D),
    Children(BlockMap<Block<D>>),
}

impl<D> Keyed for Block<D> {
    fn key(&self) -> &str {
        &self.key
    }
}

impl<D: Default> Block<D> {
    /// Untyped block with the default payload and no children.
    pub fn leaf(key: impl Into<String>) -> Self {
        Self::new(key, "", D::default())
    }
}

impl<D> Block<D> {
    pub fn new(key: impl Into<String>, block_type: impl Into<String>, data: D) -> Self {
        Self {
            key: key.into(),
            block_type: block_type.into(),
            data,
            children: BlockMap::new(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn with_type(mut self, block_type: impl Into<String>) -> Self {
        self.block_type = block_type.into();
        self
    }

    pub fn with_data(mut self, data: D) -> Self {
        self.data = data;
        self
    }

    pub fn with_children(mut self, children: BlockMap<Block<D>>) -> Self {
        self.children = children;
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn block_type(&self) -> &str {
        &self.block_type
    }

    pub fn data(&self) -> &D {
        &self.data
    }

    pub fn children(&self) -> &BlockMap<Block<D>> {
        &self.children
    }

    pub fn num_children(&self) -> usize {
        self.children.len()
    }

    pub fn children_as_vec(&self) -> Vec<Arc<Block<D>>> {
        self.children.to_vec()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    pub fn child(&self, key: &str) -> Option<&Block<D>> {
        self.children.get(key).map(Arc::as_ref)
    }

    pub fn first_child(&self) -> Option<&Block<D>> {
        self.children.first().map(Arc::as_ref)
    }

    pub fn last_child(&self) -> Option<&Block<D>> {
        self.children.last().map(Arc::as_ref)
    }

    /// Next sibling of the child stored under `key`.
    pub fn child_after(&self, key: &str) -> Option<&Block<D>> {
        self.children.after(key).map(Arc::as_ref)
    }

    /// Previous sibling of the child stored under `key`.
    pub fn child_before(&self, key: &str) -> Option<&Block<D>> {
        self.children.before(key).map(Arc::as_ref)
    }

    /// Size of the subtree rooted here, this block included.
    pub fn num_descendants(&self) -> usize {
        self.children
            .iter()
            .fold(1, |count, child| count + child.num_descendants())
    }

    /// Path from `self` down to the block with `key`, both ends included.
    ///
    /// Breadth-first: every level first tries a direct key lookup on the
    /// current block before expanding its children, which keeps wide, flat
    /// trees cheap to search.
    pub fn path_to_descendant(&self, key: &str) -> Option<Vec<&Block<D>>> {
        if self.key == key {
            return Some(vec![self]);
        }

        let mut queue: VecDeque<Vec<&Block<D>>> = VecDeque::from([vec![self]]);
        while let Some(path) = queue.pop_front() {
            let Some(&current) = path.last() else {
                continue;
            };

            if let Some(child) = current.child(key) {
                let mut found = path;
                found.push(child);
                return Some(found);
            }

            for child in current.children.iter() {
                let mut next = path.clone();
                next.push(child.as_ref());
                queue.push_back(next);
            }
        }

        None
    }

    pub fn descendant(&self, key: &str) -> Option<&Block<D>> {
        self.path_to_descendant(key)
            .and_then(|path| path.last().copied())
    }

    /// Document-order successor of the block with `key`.
    pub fn descendant_after(&self, key: &str) -> Option<&Block<D>> {
        let path = self.path_to_descendant(key)?;
        let (&target, ancestors) = path.split_last()?;
        if let Some(first) = target.first_child() {
            return Some(first);
        }

        // Climb while the current block is the last child of its parent.
        let mut current = target;
        for &parent in ancestors.iter().rev() {
            match parent.child_after(current.key()) {
                Some(next) => return Some(next),
                None => current = parent,
            }
        }

        None
    }

    /// Document-order predecessor of the block with `key`.
    pub fn descendant_before(&self, key: &str) -> Option<&Block<D>> {
        let path = self.path_to_descendant(key)?;
        let (&target, ancestors) = path.split_last()?;
        let &parent = ancestors.last()?;

        match parent.child_before(target.key()) {
            None => Some(parent),
            Some(previous) => previous.traverse_descendants(true).next(),
        }
    }

    /// Lazy pre-order walk of this subtree.
    ///
    /// Forward order yields `self` first. Reverse order is reverse document
    /// order: children last to first, each subtree before its root, `self`
    /// last.
    pub fn traverse_descendants(&self, reverse: bool) -> Descendants<'_, D> {
        Descendants::new(self, reverse)
    }

    pub fn traverse_descendant_keys(&self, reverse: bool) -> impl Iterator<Item = &str> {
        self.traverse_descendants(reverse).map(Block::key)
    }
}

impl<D: Clone> Block<D> {
    /// Returns a copy with one field replaced.
    pub fn set(&self, field: BlockField<D>) -> Self {
        let block = self.clone();
        match field {
            BlockField::Key(key) => block.with_key(key),
            BlockField::Type(block_type) => block.with_type(block_type),
            BlockField::Data(data) => block.with_data(data),
            BlockField::Children(children) => block.with_children(children),
        }
    }

    /// Returns a tree where the block with `key` is replaced by `block`.
    ///
    /// Only the ancestors of the replaced block are reallocated; every other
    /// subtree is shared with `self`.
    pub fn replace_descendant(&self, key: &str, block: Block<D>) -> Option<Self> {
        self.update_descendant(key, |_| block)
    }

    /// Like [`Block::replace_descendant`], with the replacement computed from
    /// the current block.
    pub fn update_descendant<F>(&self, key: &str, update: F) -> Option<Self>
    where
        F: FnOnce(&Block<D>) -> Block<D>,
    {
        let path = self.path_to_descendant(key)?;
        let (&target, ancestors) = path.split_last()?;

        let mut replaced = update(target);
        let mut replaced_key = target.key();
        for &ancestor in ancestors.iter().rev() {
            let children = ancestor.children.replace(replaced_key, replaced)?;
            replaced = ancestor.clone().with_children(children);
            replaced_key = ancestor.key();
        }

        tracing::trace!(key, depth = ancestors.len(), "replaced descendant");
        Some(replaced)
    }
}
