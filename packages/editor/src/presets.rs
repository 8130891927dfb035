//! # Component Palette
//!
//! The components a user can drag onto the page, and the fully formed
//! elements (fresh ids, default styles and content) each one expands into.
//! Section presets expand into a small subtree that is inserted in one go.

use crate::storage::AssetPicker;
use pagecraft_model::{Element, ElementType, Geometry, IdGenerator, LeafContent};
use serde::{Deserialize, Serialize};

pub const PLACEHOLDER_VIDEO_SRC: &str = "https://www.youtube.com/embed/A3l6YYkXzzg";
pub const PLACEHOLDER_IMAGE_SRC: &str = "/assets/placeholder.png";

/// Palette entry identity, carried as the drag payload
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ComponentTag {
    #[serde(rename = "text")]
    Text,
    #[serde(rename = "link")]
    Link,
    #[serde(rename = "image")]
    Image,
    #[serde(rename = "video")]
    Video,
    #[serde(rename = "container")]
    Container,
    #[serde(rename = "2Col")]
    TwoColumn,
    #[serde(rename = "contactForm")]
    ContactForm,
    #[serde(rename = "paymentForm")]
    PaymentForm,
    #[serde(rename = "header")]
    Header,
    #[serde(rename = "hero")]
    Hero,
    #[serde(rename = "footer")]
    Footer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaletteGroup {
    Elements,
    Layout,
    Sections,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaletteEntry {
    pub tag: ComponentTag,
    pub label: &'static str,
    pub group: PaletteGroup,
}

impl ComponentTag {
    pub const ALL: [ComponentTag; 11] = [
        ComponentTag::Text,
        ComponentTag::Link,
        ComponentTag::Image,
        ComponentTag::Video,
        ComponentTag::ContactForm,
        ComponentTag::PaymentForm,
        ComponentTag::Container,
        ComponentTag::TwoColumn,
        ComponentTag::Header,
        ComponentTag::Hero,
        ComponentTag::Footer,
    ];

    /// Drag payload string
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentTag::Text => "text",
            ComponentTag::Link => "link",
            ComponentTag::Image => "image",
            ComponentTag::Video => "video",
            ComponentTag::Container => "container",
            ComponentTag::TwoColumn => "2Col",
            ComponentTag::ContactForm => "contactForm",
            ComponentTag::PaymentForm => "paymentForm",
            ComponentTag::Header => "header",
            ComponentTag::Hero => "hero",
            ComponentTag::Footer => "footer",
        }
    }

    /// Recognize a drag payload; `None` for anything not on the palette
    pub fn from_payload(payload: &str) -> Option<Self> {
        ComponentTag::ALL
            .into_iter()
            .find(|tag| tag.as_str() == payload.trim())
    }

    pub fn label(self) -> &'static str {
        match self {
            ComponentTag::Header => "Header",
            ComponentTag::Hero => "Hero",
            ComponentTag::Footer => "Footer",
            other => other.element_type().display_name(),
        }
    }

    pub fn group(self) -> PaletteGroup {
        match self {
            ComponentTag::Container | ComponentTag::TwoColumn => PaletteGroup::Layout,
            ComponentTag::Header | ComponentTag::Hero | ComponentTag::Footer => PaletteGroup::Sections,
            _ => PaletteGroup::Elements,
        }
    }

    /// Type of the element at the top of the expansion
    pub fn element_type(self) -> ElementType {
        match self {
            ComponentTag::Text => ElementType::Text,
            ComponentTag::Link => ElementType::Link,
            ComponentTag::Image => ElementType::Image,
            ComponentTag::Video => ElementType::Video,
            ComponentTag::ContactForm => ElementType::ContactForm,
            ComponentTag::PaymentForm => ElementType::PaymentForm,
            ComponentTag::TwoColumn => ElementType::TwoColumn,
            ComponentTag::Container
            | ComponentTag::Header
            | ComponentTag::Hero
            | ComponentTag::Footer => ElementType::Container,
        }
    }
}

impl std::str::FromStr for ComponentTag {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        ComponentTag::from_payload(value).ok_or_else(|| format!("Unknown component: {}", value))
    }
}

impl std::fmt::Display for ComponentTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything that can be dragged, in display order
pub fn palette() -> Vec<PaletteEntry> {
    ComponentTag::ALL
        .into_iter()
        .map(|tag| PaletteEntry {
            tag,
            label: tag.label(),
            group: tag.group(),
        })
        .collect()
}

/// Expand a palette entry into a complete element with fresh ids
///
/// Images take their source from `assets` when a picker is given.
pub fn build_component(
    tag: ComponentTag,
    ids: &mut IdGenerator,
    assets: Option<&dyn AssetPicker>,
) -> Element {
    match tag {
        ComponentTag::Text => text(ids, "Text Element"),
        ComponentTag::Link => Element::new(ids.new_id(), ElementType::Link)
            .with_style("color", "black")
            .with_leaf(LeafContent::link("Link Element", "#")),
        ComponentTag::Image => {
            let src = assets
                .and_then(|picker| picker.pick_asset())
                .unwrap_or_else(|| PLACEHOLDER_IMAGE_SRC.to_string());
            Element::new(ids.new_id(), ElementType::Image)
                .with_style("width", "100%")
                .with_leaf(LeafContent::source(src))
        }
        ComponentTag::Video => Element::new(ids.new_id(), ElementType::Video)
            .with_geometry(Geometry::default().with_size(560.0, 315.0))
            .with_leaf(LeafContent::source(PLACEHOLDER_VIDEO_SRC)),
        ComponentTag::ContactForm => Element::new(ids.new_id(), ElementType::ContactForm),
        ComponentTag::PaymentForm => Element::new(ids.new_id(), ElementType::PaymentForm),
        ComponentTag::Container => container(ids),
        ComponentTag::TwoColumn => Element::new(ids.new_id(), ElementType::TwoColumn)
            .with_style("display", "flex")
            .with_child(container(ids).with_style("width", "100%"))
            .with_child(container(ids).with_style("width", "100%")),
        ComponentTag::Header => container(ids)
            .with_name("Header")
            .with_style("display", "flex")
            .with_style("justifyContent", "space-between")
            .with_style("alignItems", "center")
            .with_style("padding", "16px 24px")
            .with_child(text(ids, "Brand").with_style("fontWeight", "700"))
            .with_child(
                Element::new(ids.new_id(), ElementType::Link)
                    .with_style("color", "black")
                    .with_leaf(LeafContent::link("Get started", "#")),
            ),
        ComponentTag::Hero => container(ids)
            .with_name("Hero")
            .with_style("display", "flex")
            .with_style("flexDirection", "column")
            .with_style("alignItems", "center")
            .with_style("padding", "64px 24px")
            .with_child(text(ids, "A headline that sells").with_style("fontSize", "48px"))
            .with_child(text(ids, "One sentence on why it matters.").with_style("fontSize", "18px"))
            .with_child(
                Element::new(ids.new_id(), ElementType::Link)
                    .with_style("color", "white")
                    .with_style("backgroundColor", "black")
                    .with_style("padding", "12px 20px")
                    .with_leaf(LeafContent::link("Call to action", "#")),
            ),
        ComponentTag::Footer => container(ids)
            .with_name("Footer")
            .with_style("padding", "24px")
            .with_style("textAlign", "center")
            .with_child(text(ids, "© Your Company").with_style("fontSize", "12px")),
    }
}

fn text(ids: &mut IdGenerator, inner_text: &str) -> Element {
    Element::new(ids.new_id(), ElementType::Text)
        .with_style("color", "black")
        .with_leaf(LeafContent::text(inner_text))
}

fn container(ids: &mut IdGenerator) -> Element {
    Element::new(ids.new_id(), ElementType::Container)
        .with_style("width", "100%")
        .with_style("padding", "8px")
}
