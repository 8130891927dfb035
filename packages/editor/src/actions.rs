//! # Editor Actions
//!
//! Typed actions and the reducer that applies them.
//!
//! [`reduce`] is the single authority for structural and stylistic changes.
//! It is pure: it takes the current state and an action and returns a new
//! state, leaving the input untouched. Every action either succeeds or
//! reports why it could not be applied; callers that keep the old state on
//! error get the "nothing happened" behavior with the reason attached.
//!
//! ## Semantics
//!
//! ### AddElement
//! - Appends to the end of the container's children
//! - Fails if the container is missing or is a leaf
//! - Fails if any id of the inserted subtree already exists
//!
//! ### UpdateElement
//! - Replaces the node with the same id, keeping its position
//! - The root stays a body; no other node may become one
//!
//! Subtrees entering the tree through add, update or load get legacy pixel
//! styles moved into geometry, and geometry must be finite.
//!
//! ### DeleteElement
//! - Detaches the node and all descendants
//! - The root is never deleted
//! - Clears the selection when it pointed into the removed subtree

use crate::state::{Device, EditorState, Selection};
use pagecraft_model::{
    collect_ids, normalize_geometry, normalize_node, tree, validate_document, validate_subtree,
    Element, ElementType, ModelError, TreeError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Append an element to a container
    AddElement {
        container_id: String,
        element: Arc<Element>,
    },

    /// Replace an element (matched by id) with new details
    UpdateElement { element: Arc<Element> },

    /// Remove an element and its subtree
    DeleteElement { element_id: String },

    /// Change the selection; pure state change
    ChangeClickedElement { selection: Selection },

    TogglePreviewMode,

    ToggleLiveMode,

    /// Replace the whole tree, optionally seeding live mode
    LoadData {
        elements: Arc<Element>,
        with_live: bool,
    },

    SetDevice { device: Device },
}

impl Action {
    /// Whether applying this action can change the element tree
    pub fn changes_tree(&self) -> bool {
        matches!(
            self,
            Action::AddElement { .. }
                | Action::UpdateElement { .. }
                | Action::DeleteElement { .. }
                | Action::LoadData { .. }
        )
    }

    /// Debug name for logging
    pub fn name(&self) -> &'static str {
        match self {
            Action::AddElement { .. } => "ADD_ELEMENT",
            Action::UpdateElement { .. } => "UPDATE_ELEMENT",
            Action::DeleteElement { .. } => "DELETE_ELEMENT",
            Action::ChangeClickedElement { .. } => "CHANGE_CLICKED_ELEMENT",
            Action::TogglePreviewMode => "TOGGLE_PREVIEW_MODE",
            Action::ToggleLiveMode => "TOGGLE_LIVE_MODE",
            Action::LoadData { .. } => "LOAD_DATA",
            Action::SetDevice { .. } => "SET_DEVICE",
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ActionError {
    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("Element {0} cannot have children")]
    NotAContainer(String),

    #[error("Duplicate element id: {0}")]
    DuplicateId(String),

    #[error("The body element cannot be deleted")]
    RootImmutable,

    #[error("A body element can only be the document root")]
    RootNotAllowed,

    #[error("The body element {0} must keep its type")]
    TypeChanged(String),

    #[error("Element {id} of type {kind} has content of the wrong shape")]
    ContentMismatch { id: String, kind: ElementType },

    #[error("Element {0} has a position or size that is not a finite number")]
    InvalidGeometry(String),

    #[error("Invalid document: {0}")]
    InvalidDocument(String),
}

impl From<TreeError> for ActionError {
    fn from(e: TreeError) -> Self {
        match e {
            TreeError::NotFound(id) => ActionError::NotFound(id),
            TreeError::NotAContainer(id) => ActionError::NotAContainer(id),
            TreeError::RootImmutable => ActionError::RootImmutable,
        }
    }
}

impl From<ModelError> for ActionError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::ContentMismatch { id, kind } => ActionError::ContentMismatch { id, kind },
            ModelError::DuplicateId(id) => ActionError::DuplicateId(id),
            ModelError::NestedBody(_) => ActionError::RootNotAllowed,
            ModelError::InvalidGeometry(id) => ActionError::InvalidGeometry(id),
            other => ActionError::InvalidDocument(other.to_string()),
        }
    }
}

/// Apply an action to a state, producing the next state
pub fn reduce(state: &EditorState, action: &Action) -> Result<EditorState, ActionError> {
    match action {
        Action::AddElement {
            container_id,
            element,
        } => reduce_add(state, container_id, element),

        Action::UpdateElement { element } => reduce_update(state, element),

        Action::DeleteElement { element_id } => reduce_delete(state, element_id),

        Action::ChangeClickedElement { selection } => {
            if let Selection::Element(id) = selection {
                if state.find(id).is_none() {
                    return Err(ActionError::NotFound(id.clone()));
                }
            }

            Ok(EditorState {
                selected: selection.clone(),
                ..state.clone()
            })
        }

        Action::TogglePreviewMode => Ok(EditorState {
            preview_mode: !state.preview_mode,
            ..state.clone()
        }),

        Action::ToggleLiveMode => Ok(EditorState {
            live_mode: !state.live_mode,
            ..state.clone()
        }),

        Action::LoadData {
            elements,
            with_live,
        } => {
            let elements = normalize_geometry(elements);
            validate_document(&elements)?;

            Ok(EditorState {
                elements,
                selected: Selection::Empty,
                live_mode: *with_live,
                ..state.clone()
            })
        }

        Action::SetDevice { device } => Ok(EditorState {
            device: *device,
            ..state.clone()
        }),
    }
}

fn reduce_add(
    state: &EditorState,
    container_id: &str,
    element: &Arc<Element>,
) -> Result<EditorState, ActionError> {
    let element = &normalize_geometry(element);
    validate_subtree(element, false)?;

    let existing = collect_ids(&state.elements).ids;
    let incoming = collect_ids(element).ids;
    if let Some(duplicate) = incoming.iter().find(|id| existing.contains(*id)) {
        return Err(ActionError::DuplicateId(duplicate.clone()));
    }

    let elements = tree::insert_child(&state.elements, container_id, element.clone())?;

    Ok(EditorState {
        elements,
        ..state.clone()
    })
}

fn reduce_update(state: &EditorState, element: &Arc<Element>) -> Result<EditorState, ActionError> {
    let current = state
        .find(&element.id)
        .ok_or_else(|| ActionError::NotFound(element.id.clone()))?;

    let is_root = Arc::ptr_eq(current, &state.elements);
    if is_root && !element.is_body() {
        return Err(ActionError::TypeChanged(element.id.clone()));
    }

    let shared = shares_children(current, element);
    let element = &if shared {
        normalize_node(element)
    } else {
        normalize_geometry(element)
    };

    if !shared {
        validate_subtree(element, is_root)?;

        // Ids that were not under the replaced node must be new to the whole tree
        let replaced = collect_ids(current).ids;
        let existing = collect_ids(&state.elements).ids;
        let introduced = collect_ids(element).ids;
        if let Some(duplicate) = introduced
            .iter()
            .find(|id| !replaced.contains(*id) && existing.contains(*id))
        {
            return Err(ActionError::DuplicateId(duplicate.clone()));
        }
    } else if !element.content_matches_type() {
        return Err(ActionError::ContentMismatch {
            id: element.id.clone(),
            kind: element.kind,
        });
    } else if element.is_body() && !is_root {
        return Err(ActionError::RootNotAllowed);
    } else if !element.geometry.is_finite() {
        return Err(ActionError::InvalidGeometry(element.id.clone()));
    }

    let elements = tree::replace(&state.elements, element.clone())?;

    Ok(EditorState {
        elements,
        ..state.clone()
    })
}

/// True when both nodes are leaves or hold the very same child nodes, so the
/// replacement cannot introduce ids from below
fn shares_children(current: &Element, replacement: &Element) -> bool {
    match (current.children(), replacement.children()) {
        (None, None) => true,
        (Some(old), Some(new)) => {
            old.len() == new.len() && old.iter().zip(new).all(|(a, b)| Arc::ptr_eq(a, b))
        }
        _ => false,
    }
}

fn reduce_delete(state: &EditorState, element_id: &str) -> Result<EditorState, ActionError> {
    let (elements, removed) = tree::remove(&state.elements, element_id)?;

    let selected = match state.selected.id() {
        Some(id) if tree::contains(&removed, id) => Selection::Empty,
        _ => state.selected.clone(),
    };

    Ok(EditorState {
        elements,
        selected,
        ..state.clone()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::{parse_document, serialize_document, Geometry, LeafContent, BODY_ID};

    fn text(id: &str, inner_text: &str) -> Arc<Element> {
        Arc::new(Element::new(id, ElementType::Text).with_leaf(LeafContent::text(inner_text)))
    }

    fn container(id: &str) -> Arc<Element> {
        Arc::new(Element::new(id, ElementType::Container))
    }

    fn add(state: &EditorState, container_id: &str, element: Arc<Element>) -> EditorState {
        reduce(
            state,
            &Action::AddElement {
                container_id: container_id.to_string(),
                element,
            },
        )
        .unwrap()
    }

    #[test]
    fn test_action_serialization() {
        let action = Action::DeleteElement {
            element_id: "t1".to_string(),
        };

        let json = serde_json::to_string(&action).unwrap();
        assert!(json.contains("\"DELETE_ELEMENT\""));

        let deserialized: Action = serde_json::from_str(&json).unwrap();
        assert_eq!(action, deserialized);
    }

    #[test]
    fn test_add_appends_last() {
        let state = EditorState::default();
        let state = add(&state, BODY_ID, text("a", "first"));
        let state = add(&state, BODY_ID, text("b", "second"));

        let ids: Vec<_> = state.elements.children().unwrap().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_add_rejects_duplicate_ids() {
        let state = add(&EditorState::default(), BODY_ID, text("a", "first"));
        let result = reduce(
            &state,
            &Action::AddElement {
                container_id: BODY_ID.to_string(),
                element: text("a", "again"),
            },
        );
        assert_eq!(result, Err(ActionError::DuplicateId("a".to_string())));
    }

    #[test]
    fn test_add_rejects_body_and_leaf_targets() {
        let state = add(&EditorState::default(), BODY_ID, text("a", "first"));

        let nested_body = reduce(
            &state,
            &Action::AddElement {
                container_id: BODY_ID.to_string(),
                element: Arc::new(Element::body("other")),
            },
        );
        assert_eq!(nested_body, Err(ActionError::RootNotAllowed));

        let into_leaf = reduce(
            &state,
            &Action::AddElement {
                container_id: "a".to_string(),
                element: text("b", "x"),
            },
        );
        assert_eq!(into_leaf, Err(ActionError::NotAContainer("a".to_string())));
    }

    #[test]
    fn test_update_preserves_position() {
        let state = add(&EditorState::default(), BODY_ID, text("a", "first"));
        let state = add(&state, BODY_ID, text("b", "second"));

        let state = reduce(
            &state,
            &Action::UpdateElement {
                element: text("a", "changed"),
            },
        )
        .unwrap();

        let children = state.elements.children().unwrap();
        assert_eq!(children[0].leaf().unwrap().inner_text.as_deref(), Some("changed"));
        assert_eq!(children[1].id, "b");
    }

    #[test]
    fn test_update_root_must_stay_body() {
        let state = EditorState::default();
        let result = reduce(
            &state,
            &Action::UpdateElement {
                element: container(BODY_ID),
            },
        );
        assert_eq!(result, Err(ActionError::TypeChanged(BODY_ID.to_string())));
    }

    #[test]
    fn test_update_rejects_content_mismatch() {
        let state = add(&EditorState::default(), BODY_ID, text("a", "first"));
        let mut broken = Element::new("a", ElementType::Text);
        broken.content = pagecraft_model::ElementContent::empty_children();

        let result = reduce(
            &state,
            &Action::UpdateElement {
                element: Arc::new(broken),
            },
        );
        assert!(matches!(result, Err(ActionError::ContentMismatch { .. })));
    }

    #[test]
    fn test_non_finite_geometry_is_rejected() {
        let state = add(&EditorState::default(), BODY_ID, text("a", "first"));

        let moved = Element::clone(&state.elements.children().unwrap()[0])
            .with_geometry(Geometry::at(f64::NAN, 0.0));
        let result = reduce(
            &state,
            &Action::UpdateElement {
                element: Arc::new(moved),
            },
        );
        assert_eq!(result, Err(ActionError::InvalidGeometry("a".to_string())));

        let sized = Element::new("b", ElementType::Image)
            .with_geometry(Geometry::default().with_size(f64::INFINITY, 10.0));
        let result = reduce(
            &state,
            &Action::AddElement {
                container_id: BODY_ID.to_string(),
                element: Arc::new(sized),
            },
        );
        assert_eq!(result, Err(ActionError::InvalidGeometry("b".to_string())));
    }

    #[test]
    fn test_pixel_styles_become_geometry_on_entry() {
        let state = add(&EditorState::default(), BODY_ID, text("a", "first"));

        let styled = Element::clone(&state.elements.children().unwrap()[0])
            .with_style("width", "200px")
            .with_style("transform", "translate(5px, 5px) rotate(45deg)");
        let state = reduce(
            &state,
            &Action::UpdateElement {
                element: Arc::new(styled),
            },
        )
        .unwrap();

        let a = state.find("a").unwrap();
        assert_eq!(a.geometry.width, Some(200.0));
        assert!(!a.styles.contains_key("width"));
        assert_eq!(
            a.styles.get("transform").map(String::as_str),
            Some("translate(5px, 5px) rotate(45deg)")
        );

        let json = serialize_document(&state.elements, false).unwrap();
        assert_eq!(parse_document(&json).unwrap(), state.elements);
    }

    #[test]
    fn test_update_rejects_ids_from_elsewhere() {
        let state = add(&EditorState::default(), BODY_ID, container("c1"));
        let state = add(&state, BODY_ID, text("t1", "hi"));

        let grabbing = Element::new("c1", ElementType::Container).with_child(Element::new("t1", ElementType::Text));
        let result = reduce(
            &state,
            &Action::UpdateElement {
                element: Arc::new(grabbing),
            },
        );
        assert_eq!(result, Err(ActionError::DuplicateId("t1".to_string())));
    }

    #[test]
    fn test_delete_clears_selection_inside_removed_subtree() {
        let state = add(&EditorState::default(), BODY_ID, container("c1"));
        let state = add(&state, "c1", text("t1", "hi"));
        let state = reduce(
            &state,
            &Action::ChangeClickedElement {
                selection: Selection::element("t1"),
            },
        )
        .unwrap();

        let state = reduce(
            &state,
            &Action::DeleteElement {
                element_id: "c1".to_string(),
            },
        )
        .unwrap();

        assert!(state.selected.is_empty());
        assert!(state.find("t1").is_none());
    }

    #[test]
    fn test_delete_root_is_rejected() {
        let state = EditorState::default();
        let result = reduce(
            &state,
            &Action::DeleteElement {
                element_id: BODY_ID.to_string(),
            },
        );
        assert_eq!(result, Err(ActionError::RootImmutable));
    }

    #[test]
    fn test_select_missing_element_fails() {
        let result = reduce(
            &EditorState::default(),
            &Action::ChangeClickedElement {
                selection: Selection::element("missing"),
            },
        );
        assert_eq!(result, Err(ActionError::NotFound("missing".to_string())));
    }

    #[test]
    fn test_toggles_keep_tree_and_selection() {
        let state = EditorState {
            selected: Selection::element(BODY_ID),
            ..EditorState::default()
        };

        let previewing = reduce(&state, &Action::TogglePreviewMode).unwrap();
        assert!(previewing.preview_mode);
        assert!(previewing.is_read_only());
        assert_eq!(previewing.selected, state.selected);
        assert!(Arc::ptr_eq(&previewing.elements, &state.elements));

        let live = reduce(&previewing, &Action::ToggleLiveMode).unwrap();
        assert!(live.live_mode);
        let back = reduce(&live, &Action::ToggleLiveMode).unwrap();
        assert!(!back.live_mode);
    }

    #[test]
    fn test_load_data_seeds_live_mode() {
        let state = EditorState {
            selected: Selection::element(BODY_ID),
            ..EditorState::default()
        };
        let loaded = Arc::new(Element::body(BODY_ID).with_child(Element::new("x", ElementType::Video)));

        let next = reduce(
            &state,
            &Action::LoadData {
                elements: loaded.clone(),
                with_live: true,
            },
        )
        .unwrap();

        assert!(next.live_mode);
        assert!(next.selected.is_empty());
        assert!(Arc::ptr_eq(&next.elements, &loaded));
    }

    #[test]
    fn test_load_data_rejects_invalid_tree() {
        let result = reduce(
            &EditorState::default(),
            &Action::LoadData {
                elements: container("not-a-body"),
                with_live: false,
            },
        );
        assert!(matches!(result, Err(ActionError::InvalidDocument(_))));
    }

    #[test]
    fn test_set_device() {
        let next = reduce(
            &EditorState::default(),
            &Action::SetDevice {
                device: Device::Mobile,
            },
        )
        .unwrap();
        assert_eq!(next.device, Device::Mobile);
    }
}
