//! # Pagecraft Renderer
//!
//! Turns editor state into a virtual DOM and the virtual DOM into HTML.
//!
//! ```text
//! EditorState → render_document → VNode → to_html → String
//! ```
//!
//! Rendering never mutates the tree. Interactive controls are described by
//! the [`affordances`] module as actions for the editor to dispatch.

pub mod affordances;
pub mod html;
pub mod render;
pub mod vnode;

pub use affordances::{click_action, delete_action, InlineEdit};
pub use html::{escape_html, to_html, HtmlOptions};
pub use render::{
    css_property, device_width, render_document, render_element, render_selection,
    RenderContext,
};
pub use vnode::VNode;
