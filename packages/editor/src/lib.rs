//! # Pagecraft Editor
//!
//! Editing engine for Pagecraft pages.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: element tree, codec, tree edits      │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: state + actions                     │
//! │  - Pure reducer over immutable states       │
//! │  - Undo/redo history                        │
//! │  - Palette drops and section presets        │
//! │  - Drag/resize geometry gestures            │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer: state → VNode → HTML              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **States are values**: every accepted action yields a new [`EditorState`]
//! 2. **Structural sharing**: untouched subtrees are the same `Arc`
//! 3. **Rejected actions are no-ops**: the caller keeps the previous state
//!
//! ## Usage
//!
//! ```rust,ignore
//! use pagecraft_editor::{Action, Editor};
//! use pagecraft_model::BODY_ID;
//!
//! let mut editor = Editor::new("landing");
//! editor.drop_component(BODY_ID, "hero")?;
//! editor.dispatch(Action::TogglePreviewMode)?;
//! println!("{}", editor.to_json(true)?);
//! ```

pub mod actions;
pub mod dnd;
pub mod editor;
pub mod errors;
pub mod gesture;
pub mod history;
pub mod presets;
pub mod state;
pub mod storage;

pub use actions::{reduce, Action, ActionError};
pub use dnd::{accepts_drop, drop_component, DragPayload, DropError};
pub use editor::{Editor, SubscriptionId};
pub use errors::EditorError;
pub use gesture::{
    Gesture, GestureController, GestureError, GeometryConfig, Interaction, Measured, ResizeHandle,
};
pub use history::{History, HistoryEntry};
pub use presets::{build_component, palette, ComponentTag, PaletteEntry, PaletteGroup};
pub use state::{Device, EditorState, Selection};
pub use storage::{AssetPicker, DocumentStore, FileStore, MemoryStore, StaticAssetPicker, StoreError};
