//! # Editor Handle
//!
//! One mounted editor: the current [`EditorState`], the reducer wired to
//! history, the gesture state machine and a list of subscribers that are told
//! about every new state.
//!
//! ## Lifecycle
//!
//! ```text
//! open/hydrate → dispatch/drop/gesture … → save
//!      ↓                 ↓                    ↓
//!    JSON          new state values         JSON
//! ```

use crate::actions::{reduce, Action};
use crate::dnd;
use crate::errors::EditorError;
use crate::gesture::{Gesture, GestureController, GeometryConfig, Interaction, Measured};
use crate::history::History;
use crate::state::{EditorState, Selection};
use crate::storage::{AssetPicker, DocumentStore, StoreError};
use pagecraft_model::{empty_document, parse_document, serialize_document, IdGenerator};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

pub type SubscriptionId = usize;

type Subscriber = Box<dyn Fn(&EditorState)>;

pub struct Editor {
    document_id: String,

    state: EditorState,

    /// Increments on every accepted action
    version: u64,

    /// Unsaved tree changes
    dirty: bool,

    history: History,
    ids: IdGenerator,
    gestures: GestureController,
    assets: Option<Box<dyn AssetPicker>>,

    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: SubscriptionId,
}

impl Editor {
    /// Editor over an empty document
    pub fn new(document_id: impl Into<String>) -> Self {
        Self::with_config(document_id, GeometryConfig::default())
    }

    pub fn with_config(document_id: impl Into<String>, config: GeometryConfig) -> Self {
        let document_id = document_id.into();
        Self {
            ids: IdGenerator::new(&document_id),
            document_id,
            state: EditorState::new(empty_document()),
            version: 0,
            dirty: false,
            history: History::new(),
            gestures: GestureController::new(config),
            assets: None,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    /// Open a document from a store
    ///
    /// A missing document starts empty. A malformed one is logged and also
    /// starts empty; only storage failures are returned.
    pub fn open(
        store: &dyn DocumentStore,
        document_id: &str,
        config: GeometryConfig,
    ) -> Result<Self, EditorError> {
        let mut editor = Self::with_config(document_id, config);

        match store.load(document_id) {
            Ok(json) => {
                // Failure is logged by hydrate; the editor keeps its empty tree
                let _ = editor.hydrate(&json, false);
            }
            Err(StoreError::NotFound(_)) => {
                info!(document_id, "Document not found, starting empty");
            }
            Err(e) => return Err(e.into()),
        }

        Ok(editor)
    }

    /// Replace the tree with a persisted document
    ///
    /// On a parse or validation failure the current state is kept and the
    /// error is returned after being logged.
    #[instrument(skip(self, json), fields(document_id = %self.document_id))]
    pub fn hydrate(&mut self, json: &str, with_live: bool) -> Result<(), EditorError> {
        let elements = match parse_document(json) {
            Ok(elements) => elements,
            Err(e) => {
                warn!(error = %e, "Failed to load document, keeping current tree");
                return Err(e.into());
            }
        };

        let next = reduce(
            &self.state,
            &Action::LoadData {
                elements,
                with_live,
            },
        )?;

        self.ids = IdGenerator::resume(&self.document_id, &next.elements);
        self.history.clear();
        self.dirty = false;
        self.commit(next);

        info!(version = self.version, "Document hydrated");
        Ok(())
    }

    /// Serialize the current tree and hand it to the store
    pub fn save(&mut self, store: &dyn DocumentStore) -> Result<(), EditorError> {
        let json = serialize_document(&self.state.elements, true)?;
        store.save(&self.document_id, &json)?;
        self.dirty = false;
        info!(document_id = %self.document_id, version = self.version, "Document saved");
        Ok(())
    }

    pub fn to_json(&self, pretty: bool) -> Result<String, EditorError> {
        Ok(serialize_document(&self.state.elements, pretty)?)
    }

    /// Apply an action; returns the new version
    ///
    /// A rejected action leaves the state untouched.
    pub fn dispatch(&mut self, action: Action) -> Result<u64, EditorError> {
        let next = match reduce(&self.state, &action) {
            Ok(next) => next,
            Err(e) => {
                debug!(action = action.name(), error = %e, "Action rejected");
                return Err(e.into());
            }
        };

        if action.changes_tree() && !Arc::ptr_eq(&next.elements, &self.state.elements) {
            self.history.record(&self.state.elements, Some(action.name()));
            self.dirty = true;
        }

        debug!(action = action.name(), "Action applied");
        self.commit(next);
        Ok(self.version)
    }

    /// Select an element, or clear the selection with `None`
    pub fn select(&mut self, id: Option<&str>) -> Result<u64, EditorError> {
        let selection = id.map(Selection::element).unwrap_or_default();
        self.dispatch(Action::ChangeClickedElement { selection })
    }

    /// Insert the palette component named by `payload` into `target_id`
    pub fn drop_component(&mut self, target_id: &str, payload: &str) -> Result<u64, EditorError> {
        let action = dnd::drop_component(
            &self.state,
            target_id,
            payload,
            &mut self.ids,
            self.assets.as_deref(),
        )?;
        self.dispatch(action)
    }

    pub fn set_asset_picker(&mut self, picker: Box<dyn AssetPicker>) {
        self.assets = Some(picker);
    }

    /// Fresh element id for this document
    pub fn new_id(&mut self) -> String {
        self.ids.new_id()
    }

    /// Pointer pressed on the selected element
    ///
    /// `measured` carries the rendered boxes of the element and its parent.
    pub fn begin_gesture(&mut self, gesture: Gesture, measured: Measured) -> Result<(), EditorError> {
        self.gestures.begin(&self.state, gesture, measured)?;

        let description = match gesture {
            Gesture::Drag => "DRAG",
            Gesture::Resize(_) => "RESIZE",
        };
        self.history.begin_batch(&self.state.elements, description);
        Ok(())
    }

    /// Pointer moved during a gesture
    pub fn move_gesture(&mut self, dx: f64, dy: f64) -> Result<u64, EditorError> {
        let action = match self.gestures.update(&self.state, dx, dy) {
            Ok(action) => action,
            Err(e) => {
                self.close_gesture_batch();
                return Err(e.into());
            }
        };
        self.dispatch(action)
    }

    /// Pointer released
    pub fn end_gesture(&mut self) -> Result<(), EditorError> {
        let result = self.gestures.end();
        self.close_gesture_batch();
        result?;
        Ok(())
    }

    fn close_gesture_batch(&mut self) {
        if self.history.in_batch() && !self.gestures.interaction().is_interacting() {
            self.history.end_batch(&self.state.elements);
        }
    }

    /// Step back one change; false if there is nothing to undo
    pub fn undo(&mut self) -> bool {
        if self.gestures.interaction().is_interacting() {
            return false;
        }
        match self.history.undo(&self.state.elements) {
            Some(elements) => {
                self.restore(elements);
                true
            }
            None => false,
        }
    }

    /// Re-apply an undone change; false if there is nothing to redo
    pub fn redo(&mut self) -> bool {
        if self.gestures.interaction().is_interacting() {
            return false;
        }
        match self.history.redo(&self.state.elements) {
            Some(elements) => {
                self.restore(elements);
                true
            }
            None => false,
        }
    }

    fn restore(&mut self, elements: Arc<pagecraft_model::Element>) {
        let selected = match self.state.selected.id() {
            Some(id) if pagecraft_model::tree::contains(&elements, id) => self.state.selected.clone(),
            _ => Selection::Empty,
        };

        let next = EditorState {
            elements,
            selected,
            ..self.state.clone()
        };
        self.dirty = true;
        self.commit(next);
    }

    fn commit(&mut self, next: EditorState) {
        self.state = next;
        self.version += 1;
        self.gestures.sync(&self.state);
        self.close_gesture_batch();

        for (_, subscriber) in &self.subscribers {
            subscriber(&self.state);
        }
    }

    /// Call `subscriber` with every new state
    pub fn subscribe(&mut self, subscriber: Box<dyn Fn(&EditorState)>) -> SubscriptionId {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.subscribers.push((id, subscriber));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(subscription, _)| *subscription != id);
        self.subscribers.len() != before
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn document_id(&self) -> &str {
        &self.document_id
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn interaction(&self) -> &Interaction {
        self.gestures.interaction()
    }
}
