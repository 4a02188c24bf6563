//! Canvas elements: rectangles, circles and text boxes.
//!
//! Elements are flat value records. The wire format is camelCase JSON so that
//! documents written by the web front-end load unchanged.

use crate::color::FillColor;
use kurbo::{Affine, Point, Rect, Vec2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for elements.
///
/// Ids coming from imported documents are arbitrary strings, so this is not a
/// `Uuid` even though freshly created elements use one.
pub type ElementId = String;

/// Generate a fresh element id.
pub fn new_element_id() -> ElementId {
    Uuid::new_v4().to_string()
}

/// The primitive an element draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ElementKind {
    Rectangle,
    Circle,
    Text,
}

impl ElementKind {
    /// Get display name for UI.
    pub fn display_name(&self) -> &'static str {
        match self {
            ElementKind::Rectangle => "Rectangle",
            ElementKind::Circle => "Circle",
            ElementKind::Text => "Text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Toggle between normal and bold.
    pub fn toggled(self) -> Self {
        match self {
            FontWeight::Normal => FontWeight::Bold,
            FontWeight::Bold => FontWeight::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    /// Toggle between normal and italic.
    pub fn toggled(self) -> Self {
        match self {
            FontStyle::Normal => FontStyle::Italic,
            FontStyle::Italic => FontStyle::Normal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    LineThrough,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
    Justify,
}

/// A design object on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Element {
    pub(crate) id: ElementId,
    #[serde(rename = "type")]
    pub(crate) kind: ElementKind,
    /// Left edge in canvas coordinates.
    pub x: f64,
    /// Top edge in canvas coordinates.
    pub y: f64,
    pub width: f64,
    pub height: f64,
    /// Fill color, usually a hex string.
    pub fill: String,
    /// Opacity percentage, 0-100.
    pub opacity: u8,
    /// Rotation in degrees around the center. Not normalized.
    pub rotation: f64,
    /// Uniform scale multiplier around the center.
    pub scale: f64,
    /// Paint order; higher paints on top.
    pub z_index: i64,

    // Text-only attributes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

impl Element {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    pub fn is_text(&self) -> bool {
        self.kind == ElementKind::Text
    }

    /// Axis-aligned box before rotation and scale are applied.
    pub fn bounds(&self) -> Rect {
        Rect::new(self.x, self.y, self.x + self.width, self.y + self.height)
    }

    pub fn center(&self) -> Point {
        self.bounds().center()
    }

    /// Transform from the untransformed box to canvas space: scale, then
    /// rotate, both around the center.
    pub fn transform(&self) -> Affine {
        let center = self.center().to_vec2();
        Affine::translate(center)
            * Affine::rotate(self.rotation.to_radians())
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }

    /// Check if a canvas point lands on this element.
    pub fn hit_test(&self, point: Point) -> bool {
        let transform = self.transform();
        if transform.determinant().abs() < f64::EPSILON {
            return false;
        }
        let local = transform.inverse() * point;

        match self.kind {
            ElementKind::Rectangle | ElementKind::Text => self.bounds().contains(local),
            ElementKind::Circle => {
                let rx = self.width / 2.0;
                let ry = self.height / 2.0;
                if rx <= 0.0 || ry <= 0.0 {
                    return false;
                }
                let d = local - self.center();
                (d.x / rx).powi(2) + (d.y / ry).powi(2) <= 1.0
            }
        }
    }

    /// Parsed fill color, if `fill` is a hex color.
    pub fn fill_color(&self) -> Option<FillColor> {
        FillColor::parse(&self.fill)
    }

    fn clear_text_attributes(&mut self) {
        self.text = None;
        self.font_size = None;
        self.font_family = None;
        self.font_weight = None;
        self.font_style = None;
        self.text_decoration = None;
        self.text_align = None;
        self.line_height = None;
        self.letter_spacing = None;
    }

    pub(crate) fn translate(&mut self, offset: Vec2) {
        self.x += offset.x;
        self.y += offset.y;
    }

    /// Short label for a layers list, e.g. `Text: Double-click to...`.
    pub fn label(&self) -> String {
        const MAX_CHARS: usize = 15;
        let name = self.kind.display_name();
        match self.text.as_deref() {
            Some(text) if self.is_text() && !text.is_empty() => {
                let mut preview: String = text.chars().take(MAX_CHARS).collect();
                if text.chars().count() > MAX_CHARS {
                    preview.push_str("...");
                }
                format!("{}: {}", name, preview)
            }
            _ => name.to_string(),
        }
    }
}

/// An element that has not been added to a document yet.
///
/// The store assigns the id and z-index on insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewElement {
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub fill: String,
    pub opacity: u8,
    pub rotation: f64,
    pub scale: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<FontWeight>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<FontStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_decoration: Option<TextDecoration>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_align: Option<TextAlign>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line_height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub letter_spacing: Option<f64>,
}

impl NewElement {
    /// Default fill for new shapes.
    pub const DEFAULT_FILL: &'static str = "#FFFFFF";
    /// Default text content.
    pub const DEFAULT_TEXT: &'static str = "Double-click to edit";
    /// Default font size in pixels.
    pub const DEFAULT_FONT_SIZE: f64 = 24.0;
    /// Default font family.
    pub const DEFAULT_FONT_FAMILY: &'static str = "Arial";
    /// Default line height multiplier.
    pub const DEFAULT_LINE_HEIGHT: f64 = 1.2;

    fn shape(kind: ElementKind, x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            kind,
            x,
            y,
            width,
            height,
            fill: Self::DEFAULT_FILL.to_string(),
            opacity: 100,
            rotation: 0.0,
            scale: 1.0,
            text: None,
            font_size: None,
            font_family: None,
            font_weight: None,
            font_style: None,
            text_decoration: None,
            text_align: None,
            line_height: None,
            letter_spacing: None,
        }
    }

    /// A 200x150 rectangle.
    pub fn rectangle(x: f64, y: f64) -> Self {
        Self::shape(ElementKind::Rectangle, x, y, 200.0, 150.0)
    }

    /// A 150x150 circle.
    pub fn circle(x: f64, y: f64) -> Self {
        Self::shape(ElementKind::Circle, x, y, 150.0, 150.0)
    }

    /// A 250x50 black text box with every text attribute set to its default.
    pub fn text(x: f64, y: f64, content: impl Into<String>) -> Self {
        Self {
            fill: "#000000".to_string(),
            text: Some(content.into()),
            font_size: Some(Self::DEFAULT_FONT_SIZE),
            font_family: Some(Self::DEFAULT_FONT_FAMILY.to_string()),
            font_weight: Some(FontWeight::default()),
            font_style: Some(FontStyle::default()),
            text_decoration: Some(TextDecoration::default()),
            text_align: Some(TextAlign::default()),
            line_height: Some(Self::DEFAULT_LINE_HEIGHT),
            letter_spacing: Some(0.0),
            ..Self::shape(ElementKind::Text, x, y, 250.0, 50.0)
        }
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_opacity(mut self, opacity: u8) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Build the element with a given id and z-index. Text attributes are
    /// dropped for non-text kinds.
    pub fn into_element(self, id: ElementId, z_index: i64) -> Element {
        let mut element = Element {
            id,
            kind: self.kind,
            x: self.x,
            y: self.y,
            width: self.width,
            height: self.height,
            fill: self.fill,
            opacity: self.opacity,
            rotation: self.rotation,
            scale: self.scale,
            z_index,
            text: self.text,
            font_size: self.font_size,
            font_family: self.font_family,
            font_weight: self.font_weight,
            font_style: self.font_style,
            text_decoration: self.text_decoration,
            text_align: self.text_align,
            line_height: self.line_height,
            letter_spacing: self.letter_spacing,
        };
        if !element.is_text() {
            element.clear_text_attributes();
        }
        element
    }
}

/// A partial update merged into an existing element.
///
/// `None` leaves a field untouched. Id and kind cannot be patched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ElementPatch {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub fill: Option<String>,
    pub opacity: Option<u8>,
    pub rotation: Option<f64>,
    pub scale: Option<f64>,
    pub z_index: Option<i64>,
    pub text: Option<String>,
    pub font_size: Option<f64>,
    pub font_family: Option<String>,
    pub font_weight: Option<FontWeight>,
    pub font_style: Option<FontStyle>,
    pub text_decoration: Option<TextDecoration>,
    pub text_align: Option<TextAlign>,
    pub line_height: Option<f64>,
    pub letter_spacing: Option<f64>,
}

impl ElementPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn position(x: f64, y: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            ..Self::default()
        }
    }

    pub fn size(width: f64, height: f64) -> Self {
        Self {
            width: Some(width),
            height: Some(height),
            ..Self::default()
        }
    }

    pub fn fill(fill: impl Into<String>) -> Self {
        Self {
            fill: Some(fill.into()),
            ..Self::default()
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    /// Check if the patch sets no field at all.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge into `element`. Text attributes are ignored unless the element
    /// is a text element.
    pub fn apply(self, element: &mut Element) {
        macro_rules! merge {
            ($patch:ident => $target:ident: $($field:ident),* $(,)?) => {
                $(if let Some(value) = $patch.$field {
                    $target.$field = value;
                })*
            };
        }
        macro_rules! merge_text {
            ($patch:ident => $target:ident: $($field:ident),* $(,)?) => {
                $(if let Some(value) = $patch.$field {
                    $target.$field = Some(value);
                })*
            };
        }

        let patch = self;
        merge!(patch => element: x, y, width, height, fill, opacity, rotation, scale, z_index);

        if element.is_text() {
            merge_text!(
                patch => element:
                text,
                font_size,
                font_family,
                font_weight,
                font_style,
                text_decoration,
                text_align,
                line_height,
                letter_spacing,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect() -> Element {
        NewElement::rectangle(0.0, 0.0)
            .with_size(100.0, 50.0)
            .into_element("r".to_string(), 1)
    }

    #[test]
    fn test_rectangle_defaults() {
        let el = NewElement::rectangle(400.0, 300.0).into_element("a".into(), 1);
        assert_eq!(el.kind(), ElementKind::Rectangle);
        assert!((el.width - 200.0).abs() < f64::EPSILON);
        assert!((el.height - 150.0).abs() < f64::EPSILON);
        assert_eq!(el.opacity, 100);
        assert!((el.scale - 1.0).abs() < f64::EPSILON);
        assert!(el.text.is_none());
    }

    #[test]
    fn test_text_defaults() {
        let el = NewElement::text(0.0, 0.0, "Hello").into_element("t".into(), 1);
        assert!(el.is_text());
        assert_eq!(el.text.as_deref(), Some("Hello"));
        assert_eq!(el.font_size, Some(24.0));
        assert_eq!(el.font_family.as_deref(), Some("Arial"));
        assert_eq!(el.text_align, Some(TextAlign::Center));
        assert_eq!(el.fill, "#000000");
    }

    #[test]
    fn test_text_attributes_dropped_for_shapes() {
        let mut circle = NewElement::circle(0.0, 0.0);
        circle.text = Some("ignored".into());
        circle.font_size = Some(12.0);
        let el = circle.into_element("c".into(), 1);
        assert!(el.text.is_none());
        assert!(el.font_size.is_none());
    }

    #[test]
    fn test_patch_merges_only_given_fields() {
        let mut el = rect();
        ElementPatch::position(10.0, 20.0).apply(&mut el);
        assert!((el.x - 10.0).abs() < f64::EPSILON);
        assert!((el.y - 20.0).abs() < f64::EPSILON);
        assert!((el.width - 100.0).abs() < f64::EPSILON);
        assert_eq!(el.fill, NewElement::DEFAULT_FILL);
        assert_eq!(el.id(), "r");
    }

    #[test]
    fn test_patch_ignores_text_fields_on_shapes() {
        let mut el = rect();
        ElementPatch::text("nope").apply(&mut el);
        assert!(el.text.is_none());

        let mut text = NewElement::text(0.0, 0.0, "a").into_element("t".into(), 1);
        ElementPatch {
            font_weight: Some(FontWeight::Bold),
            ..ElementPatch::text("b")
        }
        .apply(&mut text);
        assert_eq!(text.text.as_deref(), Some("b"));
        assert_eq!(text.font_weight, Some(FontWeight::Bold));
    }

    #[test]
    fn test_empty_patch() {
        assert!(ElementPatch::new().is_empty());
        assert!(!ElementPatch::fill("#000").is_empty());
    }

    #[test]
    fn test_hit_test_rectangle() {
        let el = rect();
        assert!(el.hit_test(Point::new(50.0, 25.0)));
        assert!(!el.hit_test(Point::new(150.0, 25.0)));
    }

    #[test]
    fn test_hit_test_rotated() {
        let el = NewElement::rectangle(0.0, 0.0)
            .with_size(100.0, 50.0)
            .with_rotation(90.0)
            .into_element("r".to_string(), 1);
        // Rotated a quarter turn around (50, 25) the box spans x 25..75, y -25..75.
        assert!(el.hit_test(Point::new(50.0, 70.0)));
        assert!(!el.hit_test(Point::new(90.0, 25.0)));
    }

    #[test]
    fn test_hit_test_scaled() {
        let mut el = rect();
        el.scale = 2.0;
        assert!(el.hit_test(Point::new(-40.0, 25.0)));
        el.scale = 0.0;
        assert!(!el.hit_test(Point::new(50.0, 25.0)));
    }

    #[test]
    fn test_hit_test_circle() {
        let el = NewElement::circle(0.0, 0.0)
            .with_size(100.0, 100.0)
            .into_element("c".into(), 1);
        assert!(el.hit_test(Point::new(50.0, 50.0)));
        // Inside the bounding box but outside the circle.
        assert!(!el.hit_test(Point::new(2.0, 2.0)));
    }

    #[test]
    fn test_label() {
        let el = NewElement::text(0.0, 0.0, "Double-click to edit").into_element("t".into(), 1);
        assert_eq!(el.label(), "Text: Double-click to...");
        assert_eq!(rect().label(), "Rectangle");
    }

    #[test]
    fn test_wire_format() {
        let json = r##"{
            "id": "rect1",
            "type": "rectangle",
            "x": 400, "y": 180, "width": 300, "height": 180,
            "fill": "#FFFFFF", "opacity": 100, "rotation": 0, "scale": 1,
            "zIndex": 1
        }"##;
        let el: Element = serde_json::from_str(json).unwrap();
        assert_eq!(el.id(), "rect1");
        assert_eq!(el.z_index, 1);
        assert_eq!(el.fill_color(), Some(FillColor::white()));

        let value = serde_json::to_value(&el).unwrap();
        assert_eq!(value["type"], "rectangle");
        assert_eq!(value["zIndex"], 1);
        assert!(value.get("text").is_none());
    }

    #[test]
    fn test_text_decoration_wire_name() {
        let json = serde_json::to_string(&TextDecoration::LineThrough).unwrap();
        assert_eq!(json, "\"line-through\"");
    }
}
