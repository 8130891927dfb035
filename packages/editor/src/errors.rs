//! Error types for the editor

use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("Action rejected: {0}")]
    Action(#[from] crate::actions::ActionError),

    #[error("Drop rejected: {0}")]
    Drop(#[from] crate::dnd::DropError),

    #[error("Gesture error: {0}")]
    Gesture(#[from] crate::gesture::GestureError),

    #[error("Document error: {0}")]
    Model(#[from] pagecraft_model::ModelError),

    #[error("Storage error: {0}")]
    Store(#[from] crate::storage::StoreError),
}
