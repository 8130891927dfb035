//! # Editor State
//!
//! Everything one mounted editor holds: the element tree, the selection and
//! the rendering flags. State values are immutable; the reducer produces a
//! new one per action, sharing the tree wherever it did not change.

use pagecraft_model::{empty_document, tree, Element};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Selected element, by id
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "camelCase")]
pub enum Selection {
    /// Nothing selected
    #[default]
    Empty,
    Element(String),
}

impl Selection {
    pub fn element(id: impl Into<String>) -> Self {
        Selection::Element(id.into())
    }

    pub fn id(&self) -> Option<&str> {
        match self {
            Selection::Empty => None,
            Selection::Element(id) => Some(id),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Selection::Empty)
    }
}

/// Target device; affects render width only
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Device {
    #[default]
    Desktop,
    Tablet,
    Mobile,
}

impl std::str::FromStr for Device {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "desktop" => Ok(Device::Desktop),
            "tablet" => Ok(Device::Tablet),
            "mobile" => Ok(Device::Mobile),
            other => Err(format!("Unknown device: {}. Use: desktop, tablet, or mobile", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EditorState {
    pub elements: Arc<Element>,
    pub selected: Selection,
    pub preview_mode: bool,
    pub live_mode: bool,
    pub device: Device,
}

impl EditorState {
    pub fn new(elements: Arc<Element>) -> Self {
        Self {
            elements,
            selected: Selection::Empty,
            preview_mode: false,
            live_mode: false,
            device: Device::Desktop,
        }
    }

    /// Whether editing affordances are disabled
    pub fn is_read_only(&self) -> bool {
        self.preview_mode || self.live_mode
    }

    pub fn find(&self, id: &str) -> Option<&Arc<Element>> {
        tree::find(&self.elements, id)
    }

    /// The selected element, if the selection resolves in the current tree
    pub fn selected_element(&self) -> Option<&Arc<Element>> {
        self.selected.id().and_then(|id| self.find(id))
    }
}

impl Default for EditorState {
    fn default() -> Self {
        Self::new(empty_document())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::BODY_ID;

    #[test]
    fn test_default_state() {
        let state = EditorState::default();
        assert!(state.elements.is_body());
        assert!(state.selected.is_empty());
        assert!(!state.is_read_only());
        assert_eq!(state.device, Device::Desktop);
    }

    #[test]
    fn test_selected_element_resolves_by_id() {
        let mut state = EditorState::default();
        state.selected = Selection::element(BODY_ID);
        assert_eq!(state.selected_element().map(|e| e.id.as_str()), Some(BODY_ID));

        state.selected = Selection::element("gone");
        assert!(state.selected_element().is_none());
    }

    #[test]
    fn test_device_from_str() {
        assert_eq!("Tablet".parse::<Device>(), Ok(Device::Tablet));
        assert!("watch".parse::<Device>().is_err());
    }
}
