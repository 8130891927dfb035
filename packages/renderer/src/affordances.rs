//! Editing affordances
//!
//! Controls rendered around elements never touch the tree themselves; they
//! turn user input into [`Action`]s for the editor to dispatch.

use crate::render::RenderContext;
use pagecraft_editor::{Action, Selection};
use pagecraft_model::{Element, ElementType, LeafContent};
use std::sync::Arc;

/// Click on an element's surface
pub fn click_action(element: &Element, ctx: &RenderContext) -> Option<Action> {
    if !ctx.editing || ctx.selected == Some(element.id.as_str()) {
        return None;
    }
    Some(Action::ChangeClickedElement {
        selection: Selection::element(element.id.as_str()),
    })
}

/// Click on the delete control of a selected element
pub fn delete_action(element: &Element, ctx: &RenderContext) -> Option<Action> {
    if !ctx.is_selected(element) || element.is_body() {
        return None;
    }
    Some(Action::DeleteElement {
        element_id: element.id.clone(),
    })
}

/// In-place text editing of a text or link element
///
/// Keystrokes only touch the local buffer; the tree changes once, on
/// [`InlineEdit::commit`].
#[derive(Debug, Clone)]
pub struct InlineEdit {
    element: Arc<Element>,
    buffer: String,
}

impl InlineEdit {
    /// Start editing; `None` unless the element is selected text in editing mode
    pub fn begin(element: &Arc<Element>, ctx: &RenderContext) -> Option<Self> {
        if !matches!(element.kind, ElementType::Text | ElementType::Link) {
            return None;
        }
        if !ctx.is_selected(element) {
            return None;
        }

        Some(Self {
            element: element.clone(),
            buffer: original_text(element).to_string(),
        })
    }

    pub fn element_id(&self) -> &str {
        &self.element.id
    }

    pub fn text(&self) -> &str {
        &self.buffer
    }

    pub fn insert(&mut self, text: &str) {
        self.buffer.push_str(text);
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.buffer = text.into();
    }

    pub fn is_changed(&self) -> bool {
        self.buffer != original_text(&self.element)
    }

    /// Blur: the update to dispatch, if the text changed
    pub fn commit(self) -> Option<Action> {
        if !self.is_changed() {
            return None;
        }

        let mut updated = (*self.element).clone();
        let leaf = updated.leaf().cloned().unwrap_or_default();
        updated = updated.with_leaf(LeafContent {
            inner_text: Some(self.buffer),
            ..leaf
        });

        Some(Action::UpdateElement {
            element: Arc::new(updated),
        })
    }
}

fn original_text(element: &Element) -> &str {
    element
        .leaf()
        .and_then(|leaf| leaf.inner_text.as_deref())
        .unwrap_or_default()
}
