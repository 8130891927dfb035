//! # Drag-and-Drop Insertion
//!
//! A drag from the palette carries a single string tag (see
//! [`ComponentTag::as_str`]). Dropping it on a container builds the complete
//! element up front and turns the gesture into exactly one `AddElement`
//! action, so a section preset lands whole or not at all.

use crate::actions::Action;
use crate::presets::{build_component, ComponentTag};
use crate::state::EditorState;
use crate::storage::AssetPicker;
use pagecraft_model::{ElementType, IdGenerator};
use std::sync::Arc;
use thiserror::Error;

/// Drag data: the palette tag of the dragged component
pub type DragPayload<'a> = &'a str;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DropError {
    #[error("Unrecognized drag payload: {0:?}")]
    UnrecognizedPayload(String),

    #[error("A body element cannot be dropped into a document")]
    RootNotAllowed,

    #[error("Drop target not found: {0}")]
    TargetNotFound(String),

    #[error("Drop target {0} cannot have children")]
    NotAContainer(String),

    #[error("Dropping is disabled in preview and live mode")]
    ReadOnly,
}

/// Whether `target_id` currently accepts drops
pub fn accepts_drop(state: &EditorState, target_id: &str) -> bool {
    !state.is_read_only()
        && state
            .find(target_id)
            .is_some_and(|target| target.kind.accepts_children())
}

/// Turn a drop of `payload` onto `target_id` into an insertion
pub fn drop_component(
    state: &EditorState,
    target_id: &str,
    payload: DragPayload<'_>,
    ids: &mut IdGenerator,
    assets: Option<&dyn AssetPicker>,
) -> Result<Action, DropError> {
    if state.is_read_only() {
        return Err(DropError::ReadOnly);
    }

    let tag = ComponentTag::from_payload(payload).ok_or_else(|| {
        if payload.trim() == ElementType::Body.tag() {
            DropError::RootNotAllowed
        } else {
            DropError::UnrecognizedPayload(payload.to_string())
        }
    })?;

    let target = state
        .find(target_id)
        .ok_or_else(|| DropError::TargetNotFound(target_id.to_string()))?;
    if !target.kind.accepts_children() {
        return Err(DropError::NotAContainer(target_id.to_string()));
    }

    let element = build_component(tag, ids, assets);

    Ok(Action::AddElement {
        container_id: target.id.clone(),
        element: Arc::new(element),
    })
}
