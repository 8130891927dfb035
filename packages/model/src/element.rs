use crate::geometry::Geometry;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Id used for the body root of freshly created documents
pub const BODY_ID: &str = "__body";

/// Closed set of element kinds
///
/// The serialized tags match the persisted document format; the kebab-case
/// spellings are accepted as aliases on load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementType {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "container")]
    Container,
    #[serde(rename = "2Col", alias = "two-column")]
    TwoColumn,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "contactForm", alias = "contact-form")]
    ContactForm,
    #[serde(rename = "paymentForm", alias = "payment-form")]
    PaymentForm,
    #[serde(rename = "__body", alias = "body")]
    Body,
}

impl ElementType {
    pub const ALL: [ElementType; 9] = [
        ElementType::Text,
        ElementType::Link,
        ElementType::Image,
        ElementType::Container,
        ElementType::TwoColumn,
        ElementType::Video,
        ElementType::ContactForm,
        ElementType::PaymentForm,
        ElementType::Body,
    ];

    /// Whether `content` holds a child sequence for this kind
    pub fn accepts_children(self) -> bool {
        matches!(
            self,
            ElementType::Container | ElementType::TwoColumn | ElementType::Body
        )
    }

    /// Persisted tag
    pub fn tag(self) -> &'static str {
        match self {
            ElementType::Text => "text",
            ElementType::Link => "link",
            ElementType::Image => "image",
            ElementType::Container => "container",
            ElementType::TwoColumn => "2Col",
            ElementType::Video => "video",
            ElementType::ContactForm => "contactForm",
            ElementType::PaymentForm => "paymentForm",
            ElementType::Body => "__body",
        }
    }

    /// Label shown in badges and layer lists
    pub fn display_name(self) -> &'static str {
        match self {
            ElementType::Text => "Text",
            ElementType::Link => "Link",
            ElementType::Image => "Image",
            ElementType::Container => "Container",
            ElementType::TwoColumn => "Two Columns",
            ElementType::Video => "Video",
            ElementType::ContactForm => "Contact Form",
            ElementType::PaymentForm => "Payment Form",
            ElementType::Body => "Body",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.tag())
    }
}

/// Payload of a leaf element
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeafContent {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inner_text: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl LeafContent {
    pub fn text(inner_text: impl Into<String>) -> Self {
        Self {
            inner_text: Some(inner_text.into()),
            ..Self::default()
        }
    }

    pub fn link(inner_text: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            inner_text: Some(inner_text.into()),
            href: Some(href.into()),
            src: None,
        }
    }

    pub fn source(src: impl Into<String>) -> Self {
        Self {
            src: Some(src.into()),
            ..Self::default()
        }
    }
}

/// Element content: a child sequence or a leaf payload, discriminated by type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ElementContent {
    Children(Vec<Arc<Element>>),
    Leaf(LeafContent),
}

// Arrays are children and objects are leaves. Picking the shape first keeps
// the error of a broken descendant instead of a generic "no variant matched".
impl<'de> Deserialize<'de> for ElementContent {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match serde_json::Value::deserialize(deserializer)? {
            value @ serde_json::Value::Array(_) => Vec::<Arc<Element>>::deserialize(value)
                .map(ElementContent::Children)
                .map_err(de::Error::custom),
            value @ serde_json::Value::Object(_) => LeafContent::deserialize(value)
                .map(ElementContent::Leaf)
                .map_err(de::Error::custom),
            other => Err(de::Error::custom(format!(
                "content must be a child array or a leaf object, found {}",
                other
            ))),
        }
    }
}

impl ElementContent {
    pub fn empty_children() -> Self {
        ElementContent::Children(Vec::new())
    }

    pub fn is_children(&self) -> bool {
        matches!(self, ElementContent::Children(_))
    }
}

/// Node of the document tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub id: String,

    #[serde(rename = "type")]
    pub kind: ElementType,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub styles: BTreeMap<String, String>,

    pub content: ElementContent,

    #[serde(default, skip_serializing_if = "Geometry::is_unset")]
    pub geometry: Geometry,
}

impl Element {
    /// Create an element with empty, type-appropriate content
    pub fn new(id: impl Into<String>, kind: ElementType) -> Self {
        let content = if kind.accepts_children() {
            ElementContent::empty_children()
        } else {
            ElementContent::Leaf(LeafContent::default())
        };

        Self {
            id: id.into(),
            kind,
            name: kind.display_name().to_string(),
            styles: BTreeMap::new(),
            content,
            geometry: Geometry::default(),
        }
    }

    /// Empty body root
    pub fn body(id: impl Into<String>) -> Self {
        Self::new(id, ElementType::Body).with_style("backgroundColor", "white")
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_style(mut self, property: impl Into<String>, value: impl Into<String>) -> Self {
        self.styles.insert(property.into(), value.into());
        self
    }

    pub fn with_leaf(mut self, leaf: LeafContent) -> Self {
        self.content = ElementContent::Leaf(leaf);
        self
    }

    pub fn with_child(mut self, child: Element) -> Self {
        match &mut self.content {
            ElementContent::Children(children) => children.push(Arc::new(child)),
            ElementContent::Leaf(_) => {
                self.content = ElementContent::Children(vec![Arc::new(child)]);
            }
        }
        self
    }

    pub fn with_geometry(mut self, geometry: Geometry) -> Self {
        self.geometry = geometry;
        self
    }

    pub fn children(&self) -> Option<&[Arc<Element>]> {
        match &self.content {
            ElementContent::Children(children) => Some(children),
            ElementContent::Leaf(_) => None,
        }
    }

    pub fn leaf(&self) -> Option<&LeafContent> {
        match &self.content {
            ElementContent::Leaf(leaf) => Some(leaf),
            ElementContent::Children(_) => None,
        }
    }

    pub fn is_body(&self) -> bool {
        self.kind == ElementType::Body
    }

    /// Whether the content shape agrees with the element type
    pub fn content_matches_type(&self) -> bool {
        self.content.is_children() == self.kind.accepts_children()
    }

    /// Shallow copy with a different child sequence; the children are shared
    pub fn with_children_replaced(&self, children: Vec<Arc<Element>>) -> Element {
        Element {
            id: self.id.clone(),
            kind: self.kind,
            name: self.name.clone(),
            styles: self.styles.clone(),
            content: ElementContent::Children(children),
            geometry: self.geometry,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_element_content_follows_type() {
        assert!(Element::new("c", ElementType::Container).content.is_children());
        assert!(Element::new("c", ElementType::TwoColumn).content.is_children());
        assert!(!Element::new("t", ElementType::Text).content.is_children());
        assert!(Element::new("t", ElementType::Video).content_matches_type());
    }

    #[test]
    fn test_type_tags_serialize() {
        let json = serde_json::to_string(&ElementType::TwoColumn).unwrap();
        assert_eq!(json, "\"2Col\"");

        let parsed: ElementType = serde_json::from_str("\"two-column\"").unwrap();
        assert_eq!(parsed, ElementType::TwoColumn);

        let body: ElementType = serde_json::from_str("\"__body\"").unwrap();
        assert_eq!(body, ElementType::Body);
    }

    #[test]
    fn test_leaf_content_uses_camel_case() {
        let element = Element::new("t1", ElementType::Text).with_leaf(LeafContent::text("hi"));
        let json = serde_json::to_value(&element).unwrap();

        assert_eq!(json["content"]["innerText"], "hi");
        assert!(json.get("geometry").is_none());
    }

    #[test]
    fn test_children_content_deserializes_as_sequence() {
        let json = r#"{
            "id": "c1",
            "type": "container",
            "name": "Container",
            "styles": {},
            "content": [
                { "id": "t1", "type": "text", "name": "Text", "content": { "innerText": "hi" } }
            ]
        }"#;

        let element: Element = serde_json::from_str(json).unwrap();
        let children = element.children().unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].leaf().unwrap().inner_text.as_deref(), Some("hi"));
    }

    #[test]
    fn test_content_of_other_shape_is_rejected() {
        let json = r#"{ "id": "t1", "type": "text", "name": "Text", "content": "hi" }"#;
        let error = serde_json::from_str::<Element>(json).unwrap_err().to_string();
        assert!(error.contains("child array or a leaf object"), "{}", error);
    }
}
