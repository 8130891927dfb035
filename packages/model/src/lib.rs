//! # Pagecraft Model
//!
//! The document model edited by the page/email builder: a recursive tree of
//! [`Element`]s rooted at a single body element, shared through `Arc` so that
//! edits can rebuild only the path they touch.

pub mod codec;
pub mod element;
pub mod error;
pub mod geometry;
pub mod id_generator;
pub mod tree;
pub mod visitor;

pub use codec::{
    empty_document, normalize_geometry, normalize_node, parse_document, serialize_document,
    validate_document, validate_subtree,
};
pub use element::{Element, ElementContent, ElementType, LeafContent, BODY_ID};
pub use error::{ModelError, ModelResult, TreeError};
pub use geometry::{parse_length, parse_translate, try_parse_translate, Geometry};
pub use id_generator::{get_document_seed, IdGenerator};
pub use visitor::{collect_ids, count_elements, outline, walk_element, Visitor};
