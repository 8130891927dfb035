//! # Drag and Resize Gestures
//!
//! Turns pointer gestures on the selected element into geometry updates.
//!
//! ## Interaction states
//!
//! ```text
//! Idle ──select──▶ Selected ──press──▶ Interacting
//!  ▲                  ▲                    │
//!  │                  └──────release───────┘
//!  └──── preview/live mode (from any state)
//! ```
//!
//! Each move tick reports the pointer delta since the previous tick. The
//! controller accumulates it from the geometry the element had when the
//! gesture started, applies grid snapping, the minimum size and the parent
//! bounds, and yields an `UpdateElement` action for the dispatcher.

use crate::actions::Action;
use crate::state::{EditorState, Selection};
use pagecraft_model::{tree, Element, Geometry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

/// Constraints applied to every gesture tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeometryConfig {
    /// Smallest width and height a resize can produce
    #[serde(default = "default_min_size")]
    pub min_size: f64,

    /// Grid positions and sizes snap to; 0 disables snapping
    #[serde(default = "default_grid_pitch")]
    pub grid_pitch: f64,

    /// Keep elements inside the box of their parent
    #[serde(default = "default_clamp")]
    pub clamp_to_parent: bool,
}

fn default_min_size() -> f64 {
    50.0
}

fn default_grid_pitch() -> f64 {
    1.0
}

fn default_clamp() -> bool {
    true
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            min_size: default_min_size(),
            grid_pitch: default_grid_pitch(),
            clamp_to_parent: default_clamp(),
        }
    }
}

impl GeometryConfig {
    fn snap(&self, value: f64) -> f64 {
        if self.grid_pitch > 0.0 {
            (value / self.grid_pitch).round() * self.grid_pitch
        } else {
            value
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResizeHandle {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeHandle {
    /// Horizontal edge moved: -1 west, 1 east, 0 none
    fn horizontal(self) -> i8 {
        match self {
            ResizeHandle::East | ResizeHandle::NorthEast | ResizeHandle::SouthEast => 1,
            ResizeHandle::West | ResizeHandle::NorthWest | ResizeHandle::SouthWest => -1,
            ResizeHandle::North | ResizeHandle::South => 0,
        }
    }

    /// Vertical edge moved: -1 north, 1 south, 0 none
    fn vertical(self) -> i8 {
        match self {
            ResizeHandle::South | ResizeHandle::SouthEast | ResizeHandle::SouthWest => 1,
            ResizeHandle::North | ResizeHandle::NorthEast | ResizeHandle::NorthWest => -1,
            ResizeHandle::East | ResizeHandle::West => 0,
        }
    }
}

impl std::str::FromStr for ResizeHandle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "n" | "north" => Ok(ResizeHandle::North),
            "s" | "south" => Ok(ResizeHandle::South),
            "e" | "east" => Ok(ResizeHandle::East),
            "w" | "west" => Ok(ResizeHandle::West),
            "ne" => Ok(ResizeHandle::NorthEast),
            "nw" => Ok(ResizeHandle::NorthWest),
            "se" => Ok(ResizeHandle::SouthEast),
            "sw" => Ok(ResizeHandle::SouthWest),
            other => Err(format!("Unknown resize handle: {}", other)),
        }
    }
}

/// Rendered sizes reported by the view when a gesture starts
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Measured {
    /// The element's box, used when it has no fixed size
    pub element: Option<(f64, f64)>,
    /// The parent's box, used for clamping when the parent has no fixed size
    pub parent: Option<(f64, f64)>,
}

impl Measured {
    pub fn element(width: f64, height: f64) -> Self {
        Self {
            element: Some((width, height)),
            parent: None,
        }
    }

    pub fn with_parent(mut self, width: f64, height: f64) -> Self {
        self.parent = Some((width, height));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Gesture {
    Drag,
    Resize(ResizeHandle),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Interaction {
    Idle,
    Selected {
        id: String,
    },
    Interacting {
        id: String,
        gesture: Gesture,
        /// Geometry when the gesture started
        start: Geometry,
        /// Size the gesture works from: the fixed size, else the measured one
        size: (f64, f64),
        /// Pointer movement accumulated since the gesture started
        moved: (f64, f64),
        /// Size of the parent box per axis, fixed or measured
        bounds: (Option<f64>, Option<f64>),
    },
}

impl Interaction {
    pub fn element_id(&self) -> Option<&str> {
        match self {
            Interaction::Idle => None,
            Interaction::Selected { id } | Interaction::Interacting { id, .. } => Some(id),
        }
    }

    pub fn is_interacting(&self) -> bool {
        matches!(self, Interaction::Interacting { .. })
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GestureError {
    #[error("No element is selected")]
    NothingSelected,

    #[error("Gestures are disabled in preview and live mode")]
    ReadOnly,

    #[error("Element not found: {0}")]
    NotFound(String),

    #[error("The body element cannot be moved or resized")]
    RootLocked,

    #[error("No gesture in progress")]
    NotInteracting,

    #[error("A gesture is already in progress")]
    AlreadyInteracting,

    #[error("Pointer delta ({0}, {1}) is not a finite number")]
    NonFiniteDelta(f64, f64),
}

/// Selection/interaction state machine for one editor
#[derive(Debug, Clone)]
pub struct GestureController {
    config: GeometryConfig,
    interaction: Interaction,
}

impl GestureController {
    pub fn new(config: GeometryConfig) -> Self {
        Self {
            config,
            interaction: Interaction::Idle,
        }
    }

    pub fn config(&self) -> &GeometryConfig {
        &self.config
    }

    pub fn interaction(&self) -> &Interaction {
        &self.interaction
    }

    /// Follow selection and mode changes in the editor state
    pub fn sync(&mut self, state: &EditorState) {
        if state.is_read_only() {
            self.interaction = Interaction::Idle;
            return;
        }

        self.interaction = match (&state.selected, &self.interaction) {
            (Selection::Empty, _) => Interaction::Idle,
            (Selection::Element(id), current) if current.element_id() == Some(id.as_str()) => {
                current.clone()
            }
            (Selection::Element(id), _) => Interaction::Selected { id: id.clone() },
        };
    }

    /// Pointer pressed on the selected element or one of its handles
    ///
    /// `measured` holds the rendered boxes of the element and its parent,
    /// used where the tree has no fixed size.
    pub fn begin(
        &mut self,
        state: &EditorState,
        gesture: Gesture,
        measured: Measured,
    ) -> Result<(), GestureError> {
        if state.is_read_only() {
            self.interaction = Interaction::Idle;
            return Err(GestureError::ReadOnly);
        }

        let id = match &self.interaction {
            Interaction::Idle => return Err(GestureError::NothingSelected),
            Interaction::Interacting { .. } => return Err(GestureError::AlreadyInteracting),
            Interaction::Selected { id } => id.clone(),
        };

        let element = state
            .find(&id)
            .ok_or_else(|| GestureError::NotFound(id.clone()))?;
        if element.is_body() {
            return Err(GestureError::RootLocked);
        }

        let (measured_width, measured_height) = measured
            .element
            .unwrap_or((self.config.min_size, self.config.min_size));
        let start = element.geometry;
        let size = (
            start.width.unwrap_or(measured_width),
            start.height.unwrap_or(measured_height),
        );

        let (parent_width, parent_height) = measured.parent.unzip();
        let bounds = tree::find_parent(&state.elements, &id)
            .map(|parent| {
                (
                    parent.geometry.width.or(parent_width),
                    parent.geometry.height.or(parent_height),
                )
            })
            .unwrap_or((None, None));

        self.interaction = Interaction::Interacting {
            id,
            gesture,
            start,
            size,
            moved: (0.0, 0.0),
            bounds,
        };
        Ok(())
    }

    /// Pointer moved by `(dx, dy)` since the previous tick
    pub fn update(&mut self, state: &EditorState, dx: f64, dy: f64) -> Result<Action, GestureError> {
        if state.is_read_only() {
            self.interaction = Interaction::Idle;
            return Err(GestureError::ReadOnly);
        }

        if !dx.is_finite() || !dy.is_finite() {
            return Err(GestureError::NonFiniteDelta(dx, dy));
        }

        let Interaction::Interacting {
            id,
            gesture,
            start,
            size,
            moved,
            bounds,
        } = &mut self.interaction
        else {
            return Err(GestureError::NotInteracting);
        };

        moved.0 += dx;
        moved.1 += dy;

        let geometry = match gesture {
            Gesture::Drag => drag(&self.config, *start, *size, *moved, *bounds),
            Gesture::Resize(handle) => {
                resize(&self.config, *start, *size, *moved, *handle, *bounds)
            }
        };

        let current = state
            .find(id)
            .ok_or_else(|| GestureError::NotFound(id.clone()))?;

        let mut element = Element::clone(current);
        element.geometry = geometry;

        Ok(Action::UpdateElement {
            element: Arc::new(element),
        })
    }

    /// Pointer released; returns to `Selected`
    pub fn end(&mut self) -> Result<String, GestureError> {
        match std::mem::replace(&mut self.interaction, Interaction::Idle) {
            Interaction::Interacting { id, .. } => {
                self.interaction = Interaction::Selected { id: id.clone() };
                Ok(id)
            }
            other => {
                self.interaction = other;
                Err(GestureError::NotInteracting)
            }
        }
    }
}

impl Default for GestureController {
    fn default() -> Self {
        Self::new(GeometryConfig::default())
    }
}

fn drag(
    config: &GeometryConfig,
    start: Geometry,
    size: (f64, f64),
    moved: (f64, f64),
    bounds: (Option<f64>, Option<f64>),
) -> Geometry {
    let mut x = config.snap(start.x + moved.0);
    let mut y = config.snap(start.y + moved.1);

    if config.clamp_to_parent {
        x = clamp_offset(x, size.0, bounds.0);
        y = clamp_offset(y, size.1, bounds.1);
    }

    Geometry { x, y, ..start }
}

fn resize(
    config: &GeometryConfig,
    start: Geometry,
    size: (f64, f64),
    moved: (f64, f64),
    handle: ResizeHandle,
    bounds: (Option<f64>, Option<f64>),
) -> Geometry {
    let (x, width) = resize_axis(
        config,
        start.x,
        size.0,
        moved.0,
        handle.horizontal(),
        bounds.0,
    );
    let (y, height) = resize_axis(
        config,
        start.y,
        size.1,
        moved.1,
        handle.vertical(),
        bounds.1,
    );

    Geometry {
        x,
        y,
        width: Some(width),
        height: Some(height),
    }
}

/// Resize one axis; `edge` is -1 for the leading edge, 1 for the trailing
/// edge and 0 when the handle leaves this axis alone
fn resize_axis(
    config: &GeometryConfig,
    offset: f64,
    size: f64,
    delta: f64,
    edge: i8,
    bound: Option<f64>,
) -> (f64, f64) {
    if edge == 0 {
        return (offset, size);
    }

    let far_edge = offset + size;
    let (mut offset, mut size) = if edge > 0 {
        (offset, config.snap(size + delta))
    } else {
        let moved_offset = config.snap(offset + delta);
        (moved_offset, far_edge - moved_offset)
    };

    if size < config.min_size {
        size = config.min_size;
        if edge < 0 {
            offset = far_edge - size;
        }
    }

    if config.clamp_to_parent {
        if offset < 0.0 {
            size += offset;
            offset = 0.0;
        }
        if let Some(bound) = bound {
            if offset + size > bound {
                size = bound - offset;
            }
        }
        size = size.max(config.min_size);
    }

    (offset, size)
}

/// Keep `[offset, offset + size]` inside `[0, bound]` when it fits; with an
/// unknown bound only the leading edge is held
fn clamp_offset(offset: f64, size: f64, bound: Option<f64>) -> f64 {
    match bound {
        Some(bound) => offset.clamp(0.0, (bound - size).max(0.0)),
        None => offset.max(0.0),
    }
}
