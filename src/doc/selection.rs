use serde::{Deserialize, Serialize};

/// Snapshot of a selection: an anchor and a focus, each a block key plus a
/// character offset inside that block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionState {
    anchor_key: String,
    anchor_offset: usize,
    focus_key: String,
    focus_offset: usize,
    is_backward: bool,
    has_focus: bool,
}

impl SelectionState {
    /// Collapsed selection at the start of the block with `key`.
    pub fn create_empty(key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            anchor_key: key.clone(),
            anchor_offset: 0,
            focus_key: key,
            focus_offset: 0,
            is_backward: false,
            has_focus: false,
        }
    }

    pub fn anchor_key(&self) -> &str {
        &self.anchor_key
    }

    pub fn anchor_offset(&self) -> usize {
        self.anchor_offset
    }

    pub fn focus_key(&self) -> &str {
        &self.focus_key
    }

    pub fn focus_offset(&self) -> usize {
        self.focus_offset
    }

    pub fn is_backward(&self) -> bool {
        self.is_backward
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn is_collapsed(&self) -> bool {
        self.anchor_key == self.focus_key && self.anchor_offset == self.focus_offset
    }
}
