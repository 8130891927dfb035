//! Numeric element geometry
//!
//! Position and size live on the element as numbers. CSS strings such as
//! `transform: translate(40px, 10px)` are only produced when rendering, and
//! only parsed when migrating documents that stored geometry in `styles`.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

/// Offset and optional fixed size of an element, in CSS pixels
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(default)]
    pub x: f64,

    #[serde(default)]
    pub y: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
}

impl Geometry {
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            x,
            y,
            ..Self::default()
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// True when the element sits at the origin with an automatic size
    pub fn is_unset(&self) -> bool {
        self.x == 0.0 && self.y == 0.0 && self.width.is_none() && self.height.is_none()
    }

    /// False when any field is NaN or infinite; JSON cannot hold such values
    pub fn is_finite(&self) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.map_or(true, f64::is_finite)
            && self.height.map_or(true, f64::is_finite)
    }

    /// Offset translated by a delta
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// CSS transform for the offset
    pub fn transform(&self) -> String {
        format!("translate({}px, {}px)", self.x, self.y)
    }

    /// Style declarations derived from the geometry
    pub fn css_declarations(&self) -> Vec<(&'static str, String)> {
        let mut declarations = Vec::new();
        if self.x != 0.0 || self.y != 0.0 {
            declarations.push(("transform", self.transform()));
        }
        if let Some(width) = self.width {
            declarations.push(("width", format!("{}px", width)));
        }
        if let Some(height) = self.height {
            declarations.push(("height", format!("{}px", height)));
        }
        declarations
    }
}

fn translate_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(
                r"^\s*translate\(\s*(-?\d+(?:\.\d+)?)(?:px)?\s*,\s*(-?\d+(?:\.\d+)?)(?:px)?\s*\)\s*$",
            )
            .ok()
        })
        .as_ref()
}

/// Recover the `(x, y)` offset of a transform that is a single `translate(..)`
///
/// Composite transforms such as `translate(5px, 5px) rotate(45deg)` yield `None`.
pub fn try_parse_translate(transform: &str) -> Option<(f64, f64)> {
    let captures = translate_pattern()?.captures(transform)?;
    let x = captures.get(1)?.as_str().parse().ok()?;
    let y = captures.get(2)?.as_str().parse().ok()?;
    Some((x, y))
}

/// Like [`try_parse_translate`], defaulting to the origin
pub fn parse_translate(transform: &str) -> (f64, f64) {
    try_parse_translate(transform).unwrap_or((0.0, 0.0))
}

/// Parse a pixel length such as `120px` or `120`; percentages and keywords yield `None`
pub fn parse_length(value: &str) -> Option<f64> {
    let value = value.trim();
    let number = value.strip_suffix("px").unwrap_or(value).trim();
    number.parse::<f64>().ok().filter(|n| n.is_finite())
}
