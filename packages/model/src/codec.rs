//! # Document Codec
//!
//! Converts between element trees and the persisted JSON blob.
//!
//! The blob is an array holding the body root (a bare root object is accepted
//! too). Loading validates the structural invariants and moves legacy
//! geometry stored as `transform`/`width`/`height` style strings into the
//! numeric [`Geometry`](crate::Geometry) fields.
//!
//! That move only touches elements without geometry, and the editor applies
//! it to every subtree entering the tree, so a saved tree loads back equal.

use crate::element::{Element, ElementContent, BODY_ID};
use crate::error::{ModelError, ModelResult};
use crate::geometry::{parse_length, try_parse_translate};
use crate::visitor::{walk_element, Visitor};
use serde_json::Value;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

/// Fresh document: a body root with no children
pub fn empty_document() -> Arc<Element> {
    Arc::new(Element::body(BODY_ID))
}

/// Parse and validate a persisted document
pub fn parse_document(json: &str) -> ModelResult<Arc<Element>> {
    let root: Arc<Element> = match serde_json::from_str::<Value>(json)? {
        Value::Array(mut roots) => match roots.len() {
            0 => return Err(ModelError::MissingRoot),
            1 => serde_json::from_value(roots.remove(0))?,
            n => return Err(ModelError::MultipleRoots(n)),
        },
        root @ Value::Object(_) => serde_json::from_value(root)?,
        other => return Err(ModelError::NotADocument(value_kind(&other))),
    };

    let root = normalize_geometry(&root);
    validate_document(&root)?;

    debug!(root_id = %root.id, "Parsed document");
    Ok(root)
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Serialize a document to its persisted form
pub fn serialize_document(root: &Arc<Element>, pretty: bool) -> ModelResult<String> {
    let document = [root];
    let json = if pretty {
        serde_json::to_string_pretty(&document)?
    } else {
        serde_json::to_string(&document)?
    };
    Ok(json)
}

/// Check every document invariant: body root, content shapes, unique ids, finite geometry
pub fn validate_document(root: &Arc<Element>) -> ModelResult<()> {
    if !root.is_body() {
        return Err(ModelError::RootNotBody {
            id: root.id.clone(),
            kind: root.kind,
        });
    }

    validate_subtree(root, true)
}

/// Check a subtree that is about to enter a document
///
/// With `allow_body_root` false the subtree must not contain a body at all.
pub fn validate_subtree(element: &Arc<Element>, allow_body_root: bool) -> ModelResult<()> {
    let mut validator = Validator {
        seen: HashSet::new(),
        allow_body_root,
        error: None,
    };
    validator.visit_element(element, 0);

    match validator.error {
        Some(error) => Err(error),
        None => Ok(()),
    }
}

struct Validator {
    seen: HashSet<String>,
    allow_body_root: bool,
    error: Option<ModelError>,
}

impl Visitor for Validator {
    fn visit_element(&mut self, element: &Arc<Element>, depth: usize) {
        if self.error.is_some() {
            return;
        }

        if !element.content_matches_type() {
            self.error = Some(ModelError::ContentMismatch {
                id: element.id.clone(),
                kind: element.kind,
            });
            return;
        }

        if element.is_body() && (depth > 0 || !self.allow_body_root) {
            self.error = Some(ModelError::NestedBody(element.id.clone()));
            return;
        }

        if !element.geometry.is_finite() {
            self.error = Some(ModelError::InvalidGeometry(element.id.clone()));
            return;
        }

        if !self.seen.insert(element.id.clone()) {
            self.error = Some(ModelError::DuplicateId(element.id.clone()));
            return;
        }

        walk_element(self, element, depth);
    }
}

/// Move pixel geometry out of `styles` into the numeric fields, for the
/// whole subtree
///
/// Nodes that need no change are shared with the input, so a subtree without
/// legacy styles comes back as the same `Arc`.
pub fn normalize_geometry(element: &Arc<Element>) -> Arc<Element> {
    let migrated = migrate_node(element);

    let children = element.children().map(|children| {
        let normalized: Vec<_> = children.iter().map(normalize_geometry).collect();
        let changed = normalized
            .iter()
            .zip(children)
            .any(|(new, old)| !Arc::ptr_eq(new, old));
        (normalized, changed)
    });

    match (migrated, children) {
        (None, None) | (None, Some((_, false))) => element.clone(),
        (Some(node), None) | (Some(node), Some((_, false))) => Arc::new(node),
        (node, Some((normalized, true))) => {
            let mut node = node.unwrap_or_else(|| Element::clone(element));
            node.content = ElementContent::Children(normalized);
            Arc::new(node)
        }
    }
}

/// Like [`normalize_geometry`] for a single node; children are left alone
pub fn normalize_node(element: &Arc<Element>) -> Arc<Element> {
    match migrate_node(element) {
        Some(node) => Arc::new(node),
        None => element.clone(),
    }
}

/// Migrated copy of a node that has no geometry yet but carries a plain
/// `translate(..)` or pixel sizes in its styles
fn migrate_node(element: &Element) -> Option<Element> {
    if element.is_body() || !element.geometry.is_unset() {
        return None;
    }

    let translate = element
        .styles
        .get("transform")
        .and_then(|t| try_parse_translate(t));
    let width = element.styles.get("width").and_then(|v| parse_length(v));
    let height = element.styles.get("height").and_then(|v| parse_length(v));

    if translate.is_none() && width.is_none() && height.is_none() {
        return None;
    }

    let mut node = element.clone();
    if let Some((x, y)) = translate {
        node.geometry.x = x;
        node.geometry.y = y;
        node.styles.remove("transform");
    }
    if width.is_some() {
        node.geometry.width = width;
        node.styles.remove("width");
    }
    if height.is_some() {
        node.geometry.height = height;
        node.styles.remove("height");
    }
    Some(node)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::{ElementType, LeafContent};
    use crate::geometry::Geometry;

    #[test]
    fn test_round_trip() {
        let root = Arc::new(
            Element::body(BODY_ID).with_child(
                Element::new("c1", ElementType::Container)
                    .with_style("padding", "8px")
                    .with_geometry(Geometry::at(4.0, 2.0).with_size(120.0, 80.0))
                    .with_child(Element::new("t1", ElementType::Text).with_leaf(LeafContent::text("hi"))),
            ),
        );

        let json = serialize_document(&root, false).unwrap();
        let parsed = parse_document(&json).unwrap();
        assert_eq!(parsed, root);
    }

    #[test]
    fn test_accepts_bare_root_object() {
        let json = r#"{ "id": "__body", "type": "__body", "name": "Body", "content": [] }"#;
        let root = parse_document(json).unwrap();
        assert!(root.is_body());
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(parse_document("[{"), Err(ModelError::Json(_))));
        assert!(matches!(parse_document("[]"), Err(ModelError::MissingRoot)));
    }

    #[test]
    fn test_rejects_non_body_root() {
        let json = r#"[{ "id": "c", "type": "container", "name": "C", "content": [] }]"#;
        assert!(matches!(parse_document(json), Err(ModelError::RootNotBody { .. })));
    }

    #[test]
    fn test_rejects_content_mismatch() {
        let json = r#"[{ "id": "__body", "type": "__body", "name": "Body", "content": [
            { "id": "t", "type": "text", "name": "Text", "content": [] }
        ]}]"#;
        assert!(matches!(parse_document(json), Err(ModelError::ContentMismatch { .. })));
    }

    #[test]
    fn test_rejects_duplicate_ids_and_nested_body() {
        let duplicate = r#"[{ "id": "__body", "type": "__body", "name": "Body", "content": [
            { "id": "x", "type": "text", "name": "Text", "content": {} },
            { "id": "x", "type": "image", "name": "Image", "content": {} }
        ]}]"#;
        assert!(matches!(parse_document(duplicate), Err(ModelError::DuplicateId(id)) if id == "x"));

        let nested = r#"[{ "id": "__body", "type": "__body", "name": "Body", "content": [
            { "id": "inner", "type": "__body", "name": "Body", "content": [] }
        ]}]"#;
        assert!(matches!(parse_document(nested), Err(ModelError::NestedBody(_))));
    }

    #[test]
    fn test_migrates_legacy_geometry() {
        let json = r#"[{ "id": "__body", "type": "__body", "name": "Body", "content": [
            { "id": "img", "type": "image", "name": "Image",
              "styles": { "transform": "translate(40px, 10px)", "width": "200px", "height": "100%" },
              "content": { "src": "a.png" } }
        ]}]"#;

        let root = parse_document(json).unwrap();
        let image = &root.children().unwrap()[0];

        assert_eq!(image.geometry.x, 40.0);
        assert_eq!(image.geometry.y, 10.0);
        assert_eq!(image.geometry.width, Some(200.0));
        assert_eq!(image.geometry.height, None);
        assert!(!image.styles.contains_key("transform"));
        assert_eq!(image.styles.get("height").map(String::as_str), Some("100%"));
    }

    #[test]
    fn test_round_trip_keeps_style_geometry_and_composite_transforms() {
        let text = Element::new("t1", ElementType::Text)
            .with_leaf(LeafContent::text("tilted"))
            .with_style("width", "200px")
            .with_style("transform", "translate(5px, 5px) rotate(45deg)");
        let root = normalize_geometry(&Arc::new(Element::body(BODY_ID).with_child(text)));

        let json = serialize_document(&root, true).unwrap();
        let parsed = parse_document(&json).unwrap();
        assert_eq!(parsed, root);

        let text = &parsed.children().unwrap()[0];
        assert_eq!(
            text.styles.get("transform").map(String::as_str),
            Some("translate(5px, 5px) rotate(45deg)")
        );
        assert_eq!(text.geometry.width, Some(200.0));
        assert_eq!((text.geometry.x, text.geometry.y), (0.0, 0.0));
    }

    #[test]
    fn test_styles_stay_when_geometry_is_set() {
        let root = Arc::new(
            Element::body(BODY_ID).with_child(
                Element::new("c1", ElementType::Container)
                    .with_style("width", "640px")
                    .with_geometry(Geometry::at(10.0, 0.0)),
            ),
        );

        let parsed = parse_document(&serialize_document(&root, false).unwrap()).unwrap();
        assert_eq!(parsed, root);
        assert!(Arc::ptr_eq(&normalize_geometry(&root), &root));
    }

    #[test]
    fn test_rejects_non_finite_geometry() {
        let root = Arc::new(
            Element::body(BODY_ID).with_child(
                Element::new("box", ElementType::Container).with_geometry(Geometry::at(f64::NAN, 0.0)),
            ),
        );
        assert!(matches!(validate_document(&root), Err(ModelError::InvalidGeometry(id)) if id == "box"));
    }

    #[test]
    fn test_parse_errors_name_the_broken_field() {
        let missing_content = r#"[{ "id": "__body", "type": "__body", "name": "Body" }]"#;
        let error = parse_document(missing_content).unwrap_err().to_string();
        assert!(error.contains("missing field `content`"), "{}", error);

        let nested = r#"[{ "id": "__body", "type": "__body", "name": "Body", "content": [
            { "id": "t", "name": "Text", "content": {} }
        ]}]"#;
        let error = parse_document(nested).unwrap_err().to_string();
        assert!(error.contains("missing field `type`"), "{}", error);

        assert!(matches!(parse_document("42"), Err(ModelError::NotADocument("a number"))));
    }

    #[test]
    fn test_serializes_array_form() {
        let json = serialize_document(&empty_document(), false).unwrap();
        assert!(json.starts_with('['));
    }
}
