//! # Element Renderer
//!
//! Maps each page element to a [`VNode`] with an exhaustive match over
//! [`ElementType`], recursing into children for container-like types.
//!
//! Editing chrome (selection badge, delete control, content-editable text) is
//! only emitted while editing. Preview and live mode render the bare page.

use crate::vnode::VNode;
use pagecraft_editor::{Device, EditorState};
use pagecraft_model::{Element, ElementType};
use tracing::debug;

pub const SELECTED_CLASS: &str = "pagecraft-selected";
pub const BADGE_CLASS: &str = "pagecraft-badge";
pub const DELETE_CLASS: &str = "pagecraft-delete";

/// Attribute carrying the page element id on every rendered element
pub const ELEMENT_ID_ATTR: &str = "data-element-id";

/// Attribute naming the action a control triggers
pub const ACTION_ATTR: &str = "data-action";

/// Everything the renderer needs besides the element itself
#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    pub selected: Option<&'a str>,
    /// False in preview and live mode
    pub editing: bool,
    pub device: Device,
}

impl<'a> RenderContext<'a> {
    pub fn from_state(state: &'a EditorState) -> Self {
        Self {
            selected: state.selected.id(),
            editing: !state.is_read_only(),
            device: state.device,
        }
    }

    /// Plain page output with no editing chrome
    pub fn published(device: Device) -> Self {
        Self {
            selected: None,
            editing: false,
            device,
        }
    }

    pub fn is_selected(&self, element: &Element) -> bool {
        self.editing && self.selected == Some(element.id.as_str())
    }
}

/// Canvas width for a device
pub fn device_width(device: Device) -> &'static str {
    match device {
        Device::Desktop => "100%",
        Device::Tablet => "850px",
        Device::Mobile => "420px",
    }
}

/// Render the whole page inside a device-sized frame
pub fn render_document(state: &EditorState) -> VNode {
    let ctx = RenderContext::from_state(state);
    debug!(
        device = ?ctx.device,
        editing = ctx.editing,
        selected = ?ctx.selected,
        "Rendering document"
    );

    VNode::element("div")
        .with_attr("class", "pagecraft-canvas")
        .with_style("width", device_width(ctx.device))
        .with_style("margin", "0 auto")
        .with_child(render_element(&state.elements, &ctx))
}

/// Render the selected element on its own
///
/// `None` when nothing is selected or the selection no longer resolves.
pub fn render_selection(state: &EditorState) -> Option<VNode> {
    let element = state.selected_element()?;
    Some(render_element(element, &RenderContext::from_state(state)))
}

pub fn render_element(element: &Element, ctx: &RenderContext) -> VNode {
    let node = match element.kind {
        ElementType::Text => render_text(element, ctx),
        ElementType::Link => render_link(element, ctx),
        ElementType::Image => render_image(element),
        ElementType::Video => render_video(element),
        ElementType::Container => render_children(VNode::element("div"), element, ctx),
        ElementType::TwoColumn => render_children(
            VNode::element("div").with_style("display", "flex"),
            element,
            ctx,
        ),
        ElementType::Body => render_children(
            VNode::element("div").with_attr("data-root", "true"),
            element,
            ctx,
        ),
        ElementType::ContactForm => render_contact_form(),
        ElementType::PaymentForm => render_payment_form(),
    };

    decorate(node, element, ctx)
}

fn render_children(node: VNode, element: &Element, ctx: &RenderContext) -> VNode {
    let children = element
        .children()
        .unwrap_or_default()
        .iter()
        .map(|child| render_element(child, ctx))
        .collect();
    node.with_children(children)
}

fn inner_text(element: &Element) -> &str {
    element
        .leaf()
        .and_then(|leaf| leaf.inner_text.as_deref())
        .unwrap_or_default()
}

fn render_text(element: &Element, ctx: &RenderContext) -> VNode {
    let node = VNode::element("div").with_child(VNode::text(inner_text(element)));
    editable(node, element, ctx)
}

fn render_link(element: &Element, ctx: &RenderContext) -> VNode {
    let href = element
        .leaf()
        .and_then(|leaf| leaf.href.as_deref())
        .unwrap_or("#");

    let node = VNode::element("a")
        .with_attr("href", href)
        .with_child(VNode::text(inner_text(element)));
    editable(node, element, ctx)
}

fn editable(node: VNode, element: &Element, ctx: &RenderContext) -> VNode {
    if ctx.is_selected(element) {
        node.with_attr("contenteditable", "true")
    } else {
        node
    }
}

fn render_image(element: &Element) -> VNode {
    let src = element
        .leaf()
        .and_then(|leaf| leaf.src.as_deref())
        .unwrap_or_default();
    VNode::element("img")
        .with_attr("src", src)
        .with_attr("alt", element.name.as_str())
}

fn render_video(element: &Element) -> VNode {
    let src = element
        .leaf()
        .and_then(|leaf| leaf.src.as_deref())
        .unwrap_or_default();
    VNode::element("iframe")
        .with_attr("src", src)
        .with_attr("title", element.name.as_str())
        .with_attr("frameborder", "0")
        .with_attr(
            "allow",
            "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture",
        )
        .with_attr("allowfullscreen", "true")
}

fn form_field(label: &str, name: &str, input_type: &str) -> VNode {
    VNode::element("label")
        .with_style("display", "block")
        .with_child(VNode::text(label))
        .with_child(
            VNode::element("input")
                .with_attr("type", input_type)
                .with_attr("name", name),
        )
}

fn render_contact_form() -> VNode {
    VNode::element("form")
        .with_attr("class", "pagecraft-contact-form")
        .with_child(form_field("Name", "name", "text"))
        .with_child(form_field("Email", "email", "email"))
        .with_child(
            VNode::element("button")
                .with_attr("type", "submit")
                .with_child(VNode::text("Get a free quote")),
        )
}

fn render_payment_form() -> VNode {
    VNode::element("form")
        .with_attr("class", "pagecraft-payment-form")
        .with_child(form_field("Card number", "card", "text"))
        .with_child(form_field("Expiry", "expiry", "text"))
        .with_child(
            VNode::element("button")
                .with_attr("type", "submit")
                .with_child(VNode::text("Pay")),
        )
}

/// Convert a camelCase style key to its CSS property name
pub fn css_property(key: &str) -> String {
    if key.starts_with("--") {
        return key.to_string();
    }

    let mut property = String::with_capacity(key.len() + 4);
    for c in key.chars() {
        if c.is_ascii_uppercase() {
            property.push('-');
            property.push(c.to_ascii_lowercase());
        } else {
            property.push(c);
        }
    }
    property
}

/// Element styles, geometry, identity and editing chrome
fn decorate(node: VNode, element: &Element, ctx: &RenderContext) -> VNode {
    let mut node = node
        .with_element_id(element.id.as_str())
        .with_attr(ELEMENT_ID_ATTR, element.id.as_str())
        .with_attr("data-element-type", element.kind.tag());

    for (key, value) in &element.styles {
        node = node.with_style(css_property(key), value.as_str());
    }
    for (property, value) in element.geometry.css_declarations() {
        // A transform kept in styles (rotate, scale) applies after the offset
        let value = match (property, element.styles.get("transform")) {
            ("transform", Some(kept)) => format!("{} {}", value, kept),
            _ => value,
        };
        node = node.with_style(property, value);
    }

    if !ctx.is_selected(element) {
        return node;
    }

    let class = match node.attr("class") {
        Some(existing) => format!("{} {}", existing, SELECTED_CLASS),
        None => SELECTED_CLASS.to_string(),
    };
    let mut node = node
        .with_attr("class", class)
        .with_child(selection_badge(element));

    if !element.is_body() {
        node = node.with_child(delete_control(element));
    }
    node
}

fn selection_badge(element: &Element) -> VNode {
    VNode::element("span")
        .with_attr("class", BADGE_CLASS)
        .with_child(VNode::text(element.name.as_str()))
}

fn delete_control(element: &Element) -> VNode {
    VNode::element("button")
        .with_attr("class", DELETE_CLASS)
        .with_attr("type", "button")
        .with_attr(ACTION_ATTR, "delete-element")
        .with_attr("data-target", element.id.as_str())
        .with_child(VNode::text("Delete"))
}
