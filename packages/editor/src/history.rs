//! # Undo/Redo History
//!
//! Tracks previous element trees and enables undo/redo.
//!
//! ## Design
//!
//! - Trees share structure, so a history entry is just the previous root
//! - Undo swaps the current root for the last entry and keeps the current one for redo
//! - New changes clear the redo stack
//! - Batches group several changes (a drag gesture, a preset insertion) into one step
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut history = History::new();
//!
//! history.record(&before, Some("ADD_ELEMENT"));
//! let restored = history.undo(&current);
//! let again = history.redo(&restored.unwrap());
//! ```

use pagecraft_model::Element;
use std::sync::Arc;

/// One undo step
#[derive(Debug, Clone)]
pub struct HistoryEntry {
    /// Tree as it was before the step
    pub elements: Arc<Element>,

    pub description: Option<String>,
}

#[derive(Debug)]
pub struct History {
    /// Most recent last
    undo_stack: Vec<HistoryEntry>,

    /// Most recent last
    redo_stack: Vec<HistoryEntry>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    /// Tree at the start of the open batch
    current_batch: Option<HistoryEntry>,
}

impl History {
    /// History with the default of 100 levels
    pub fn new() -> Self {
        Self::with_max_levels(100)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            current_batch: None,
        }
    }

    /// Record the tree as it was before a change
    ///
    /// Inside a batch this is a no-op; the batch already holds the tree from
    /// before its first change.
    pub fn record(&mut self, before: &Arc<Element>, description: Option<&str>) {
        if self.current_batch.is_some() {
            return;
        }

        self.push_entry(HistoryEntry {
            elements: before.clone(),
            description: description.map(str::to_string),
        });
    }

    /// Start grouping changes into one undo step
    pub fn begin_batch(&mut self, before: &Arc<Element>, description: impl Into<String>) {
        if self.current_batch.is_none() {
            self.current_batch = Some(HistoryEntry {
                elements: before.clone(),
                description: Some(description.into()),
            });
        }
    }

    /// Close the open batch; it is kept only if the tree changed during it
    pub fn end_batch(&mut self, current: &Arc<Element>) {
        if let Some(batch) = self.current_batch.take() {
            if !Arc::ptr_eq(&batch.elements, current) {
                self.push_entry(batch);
            }
        }
    }

    pub fn in_batch(&self) -> bool {
        self.current_batch.is_some()
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.undo_stack.push(entry);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            self.undo_stack.remove(0);
        }

        // New change invalidates the redo future
        self.redo_stack.clear();
    }

    /// Step back; returns the tree to restore
    pub fn undo(&mut self, current: &Arc<Element>) -> Option<Arc<Element>> {
        let entry = self.undo_stack.pop()?;
        self.redo_stack.push(HistoryEntry {
            elements: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.elements)
    }

    /// Step forward again; returns the tree to restore
    pub fn redo(&mut self, current: &Arc<Element>) -> Option<Arc<Element>> {
        let entry = self.redo_stack.pop()?;
        self.undo_stack.push(HistoryEntry {
            elements: current.clone(),
            description: entry.description.clone(),
        });
        Some(entry.elements)
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack.last().and_then(|entry| entry.description.as_deref())
    }

    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack.last().and_then(|entry| entry.description.as_deref())
    }

    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{ElementType, BODY_ID};

    fn root_with(children: usize) -> Arc<Element> {
        let mut body = Element::body(BODY_ID);
        for i in 0..children {
            body = body.with_child(Element::new(format!("t{}", i), ElementType::Text));
        }
        Arc::new(body)
    }

    #[test]
    fn test_history_creation() {
        let history = History::new();
        assert_eq!(history.undo_levels(), 0);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn test_undo_and_redo() {
        let mut history = History::new();
        let first = root_with(0);
        let second = root_with(1);

        history.record(&first, Some("ADD_ELEMENT"));
        assert_eq!(history.undo_description(), Some("ADD_ELEMENT"));

        let restored = history.undo(&second).unwrap();
        assert!(Arc::ptr_eq(&restored, &first));
        assert!(history.can_redo());

        let again = history.redo(&restored).unwrap();
        assert!(Arc::ptr_eq(&again, &second));
        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.redo_levels(), 0);
    }

    #[test]
    fn test_new_change_clears_redo() {
        let mut history = History::new();
        let first = root_with(0);
        let second = root_with(1);

        history.record(&first, None);
        history.undo(&second);
        assert!(history.can_redo());

        history.record(&first, None);
        assert!(!history.can_redo());
    }

    #[test]
    fn test_batch_is_one_step() {
        let mut history = History::new();
        let start = root_with(0);
        let middle = root_with(1);
        let end = root_with(2);

        history.begin_batch(&start, "drag");
        history.record(&start, None);
        history.record(&middle, None);
        history.end_batch(&end);

        assert_eq!(history.undo_levels(), 1);
        assert_eq!(history.undo_description(), Some("drag"));
        assert!(Arc::ptr_eq(&history.undo(&end).unwrap(), &start));
    }

    #[test]
    fn test_unchanged_batch_is_dropped() {
        let mut history = History::new();
        let start = root_with(0);

        history.begin_batch(&start, "click");
        history.end_batch(&start);
        assert_eq!(history.undo_levels(), 0);
    }

    #[test]
    fn test_max_levels() {
        let mut history = History::with_max_levels(2);
        for i in 0..5 {
            history.record(&root_with(i), None);
        }
        assert_eq!(history.undo_levels(), 2);
    }
}
