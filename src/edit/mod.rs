//! Text edit model
//!
//! A `TextEdit` is a tree of non-overlapping `{offset, length, text}`
//! replacements over the *original* document text. Offsets always refer to
//! the original coordinate space; application proceeds from the highest
//! offset down so that every recorded offset stays valid while earlier
//! regions are still untouched. The tree is the one artifact that leaves the
//! engine, so it is serializable for persistence and diff display.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TextEdit {
    /// Replace `length` bytes at `offset` with `text`. `length == 0` inserts,
    /// empty `text` deletes.
    Replace { offset: usize, length: usize, text: String },
    /// Grouping node; children are kept sorted by offset
    Multi { children: Vec<TextEdit> },
}

impl TextEdit {
    pub fn insert(offset: usize, text: impl Into<String>) -> Self {
        Self::Replace { offset, length: 0, text: text.into() }
    }

    pub fn delete(offset: usize, length: usize) -> Self {
        Self::Replace { offset, length, text: String::new() }
    }

    pub fn replace(offset: usize, length: usize, text: impl Into<String>) -> Self {
        Self::Replace { offset, length, text: text.into() }
    }

    /// An empty group; the canonical no-op edit
    pub fn empty() -> Self {
        Self::Multi { children: Vec::new() }
    }

    /// Group a list of edits, sorted by offset
    pub fn multi(mut children: Vec<TextEdit>) -> Self {
        children.sort_by_key(TextEdit::start_offset);
        Self::Multi { children }
    }

    pub fn add_child(&mut self, child: TextEdit) {
        match self {
            Self::Multi { children } => {
                children.push(child);
                children.sort_by_key(TextEdit::start_offset);
            }
            Self::Replace { .. } => {
                let existing = std::mem::replace(self, Self::empty());
                *self = Self::multi(vec![existing, child]);
            }
        }
    }

    fn start_offset(&self) -> usize {
        match self {
            Self::Replace { offset, .. } => *offset,
            Self::Multi { children } => {
                children.iter().map(TextEdit::start_offset).min().unwrap_or(0)
            }
        }
    }

    /// True when applying the edit would leave any document unchanged
    pub fn is_noop(&self) -> bool {
        match self {
            Self::Replace { length, text, .. } => *length == 0 && text.is_empty(),
            Self::Multi { children } => children.iter().all(TextEdit::is_noop),
        }
    }

    /// Flatten the tree into leaf replacements sorted by offset
    pub fn leaves(&self) -> Vec<(usize, usize, &str)> {
        let mut out = Vec::new();
        self.collect_leaves(&mut out);
        out.sort_by_key(|(offset, _, _)| *offset);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<(usize, usize, &'a str)>) {
        match self {
            Self::Replace { offset, length, text } => out.push((*offset, *length, text)),
            Self::Multi { children } => {
                for child in children {
                    child.collect_leaves(out);
                }
            }
        }
    }

    /// Apply the edit to the original document text
    ///
    /// Replacements are applied from the highest offset down; for zero-length
    /// inserts at the same offset, the edit appearing earlier in the tree
    /// ends up earlier in the output.
    pub fn apply(&self, source: &str) -> Result<String> {
        let leaves = self.leaves();
        for window in leaves.windows(2) {
            let (a_off, a_len, _) = window[0];
            let (b_off, _, _) = window[1];
            if a_off + a_len > b_off {
                return Err(Error::invalid_edit(format!(
                    "overlapping edits at offsets {a_off} and {b_off}"
                )));
            }
        }
        if let Some(&(offset, length, _)) = leaves.last() {
            if offset + length > source.len() {
                return Err(Error::invalid_edit(format!(
                    "edit [{}..{}) exceeds document length {}",
                    offset,
                    offset + length,
                    source.len()
                )));
            }
        }
        let mut result = source.to_string();
        for &(offset, length, text) in leaves.iter().rev() {
            result.replace_range(offset..offset + length, text);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_edit_is_noop() {
        let edit = TextEdit::empty();
        assert!(edit.is_noop());
        assert_eq!(edit.apply("hello").unwrap(), "hello");
    }

    #[test]
    fn applies_out_of_order_children() {
        let edit = TextEdit::multi(vec![
            TextEdit::replace(6, 5, "earth"),
            TextEdit::delete(0, 1),
            TextEdit::insert(5, ","),
        ]);
        assert_eq!(edit.apply("Hello world").unwrap(), "ello, earth");
    }

    #[test]
    fn rejects_overlap() {
        let edit = TextEdit::multi(vec![TextEdit::delete(0, 5), TextEdit::replace(3, 2, "x")]);
        assert!(matches!(edit.apply("abcdef"), Err(Error::InvalidEdit { .. })));
    }

    #[test]
    fn rejects_out_of_bounds() {
        let edit = TextEdit::delete(4, 10);
        assert!(edit.apply("abc").is_err());
    }

    #[test]
    fn serializes_to_json() {
        let edit = TextEdit::multi(vec![TextEdit::insert(3, "abc")]);
        let json = serde_json::to_string(&edit).unwrap();
        let back: TextEdit = serde_json::from_str(&json).unwrap();
        assert_eq!(edit, back);
    }
}
