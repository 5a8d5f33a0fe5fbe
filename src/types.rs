//! Shared boundary types for the estate-motion video engine.
//!
//! This module defines the two key data contracts:
//! - Engine → Renderer (in-memory): `FrameTree` containing a `VisualNode` tree
//! - Renderer → render driver (file): `RenderManifest` containing `ManifestFrame`s

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Discrete time unit. Every visual property is a pure function of this value.
pub type Frame = i64;

// ---------------------------------------------------------------------------
// Shared style primitives
// ---------------------------------------------------------------------------

/// An sRGB colour with straight alpha.
///
/// Serialized as `"#rrggbb"` (opaque) or `"#rrggbbaa"`. Deserializes from
/// either hex form or from an `{r, g, b, a}` object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f64,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const TRANSPARENT: Color = Color { r: 0, g: 0, b: 0, a: 0.0 };

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 1.0 }
    }

    pub fn with_alpha(self, a: f64) -> Self {
        Color {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }

    /// Linear blend towards `other`; `t` is clamped to `[0, 1]`.
    pub fn mix(self, other: Color, t: f64) -> Self {
        let t = t.clamp(0.0, 1.0);
        let channel = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: channel(self.r, other.r),
            g: channel(self.g, other.g),
            b: channel(self.b, other.b),
            a: self.a + (other.a - self.a) * t,
        }
    }

    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa`.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.strip_prefix('#')?;
        let byte = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
        match hex.len() {
            3 => {
                let nibble = |i: usize| {
                    let v = u8::from_str_radix(hex.get(i..i + 1)?, 16).ok()?;
                    Some(v * 17)
                };
                Some(Color::rgb(nibble(0)?, nibble(1)?, nibble(2)?))
            }
            6 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?)),
            8 => Some(Color::rgb(byte(0)?, byte(2)?, byte(4)?).with_alpha(byte(6)? as f64 / 255.0)),
            _ => None,
        }
    }

    pub fn to_hex(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            let alpha = (self.a.clamp(0.0, 1.0) * 255.0).round() as u8;
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, alpha)
        }
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Color, D::Error> {
        use serde::de::{Error, MapAccess, Visitor};

        #[derive(Deserialize)]
        struct Rgba {
            r: u8,
            g: u8,
            b: u8,
            #[serde(default = "opaque")]
            a: f64,
        }

        fn opaque() -> f64 {
            1.0
        }

        struct ColorVisitor;

        impl<'de> Visitor<'de> for ColorVisitor {
            type Value = Color;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a hex colour string or an {r, g, b, a} object")
            }

            fn visit_str<E: Error>(self, v: &str) -> Result<Color, E> {
                Color::parse_hex(v).ok_or_else(|| E::custom(format!("invalid colour {v:?}")))
            }

            fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Color, A::Error> {
                let c = Rgba::deserialize(serde::de::value::MapAccessDeserializer::new(map))?;
                Ok(Color::rgb(c.r, c.g, c.b).with_alpha(c.a))
            }
        }

        d.deserialize_any(ColorVisitor)
    }
}

fn is_false(b: &bool) -> bool {
    !*b
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}

/// Clip region applied to a node and its subtree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Clip {
    /// CSS-style `inset()` clip; every edge is a percentage of the node's box.
    Inset {
        top: f64,
        right: f64,
        bottom: f64,
        left: f64,
    },
    /// `overflow: hidden` on a fixed-size box.
    Bounds { width: f64, height: f64 },
}

/// Per-node compositing state: everything an animation is allowed to touch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub opacity: f64,
    #[serde(default)]
    pub translate_x: f64,
    #[serde(default)]
    pub translate_y: f64,
    pub scale: f64,
    #[serde(default)]
    pub blur: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clip: Option<Clip>,
}

impl Default for Layer {
    fn default() -> Self {
        Layer {
            opacity: 1.0,
            translate_x: 0.0,
            translate_y: 0.0,
            scale: 1.0,
            blur: 0.0,
            clip: None,
        }
    }
}

impl Layer {
    pub fn is_identity(&self) -> bool {
        *self == Layer::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Align {
    Start,
    #[default]
    Center,
}

/// How a group arranges its children. Only `Stack` honours child offsets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Layout {
    Stack,
    Column { gap: f64, align: Align },
    Row { gap: f64, align: Align },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientStop {
    pub offset: f64,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Paint {
    Solid {
        color: Color,
    },
    LinearGradient {
        angle: f64,
        stops: Vec<GradientStop>,
    },
    /// Centre and radius are percentages of the shape's box.
    RadialGradient {
        center_x: f64,
        center_y: f64,
        radius: f64,
        stops: Vec<GradientStop>,
    },
    DotPattern {
        spacing: f64,
        dot_radius: f64,
        color: Color,
    },
    LinePattern {
        spacing: f64,
        angle: f64,
        line_width: f64,
        color: Color,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    pub width: f64,
    pub color: Color,
}

// ---------------------------------------------------------------------------
// Engine → Renderer boundary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextNode {
    pub content: String,
    pub font_family: String,
    pub size: f64,
    pub weight: u16,
    pub color: Color,
    #[serde(default)]
    pub letter_spacing: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub strike: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageFit {
    Cover,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageNode {
    pub src: String,
    pub width: f64,
    pub height: f64,
    pub fit: ImageFit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShapeNode {
    pub width: f64,
    pub height: f64,
    #[serde(default)]
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<Paint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<Stroke>,
}

/// Turbulence noise overlay; the driver feeds `seed` to its noise filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrainNode {
    pub width: f64,
    pub height: f64,
    pub seed: u32,
    pub base_frequency: f64,
    pub octaves: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NodeKind {
    Group {
        layout: Layout,
        children: Vec<VisualNode>,
    },
    Text(TextNode),
    Image(ImageNode),
    Shape(ShapeNode),
    Grain(GrainNode),
}

/// One node of the declarative visual tree produced for a single frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualNode {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Point::is_zero")]
    pub offset: Point,
    #[serde(default, skip_serializing_if = "Layer::is_identity")]
    pub layer: Layer,
    pub kind: NodeKind,
}

impl VisualNode {
    pub fn new(kind: NodeKind) -> Self {
        VisualNode {
            name: None,
            offset: Point::default(),
            layer: Layer::default(),
            kind,
        }
    }

    pub fn group(layout: Layout, children: Vec<VisualNode>) -> Self {
        Self::new(NodeKind::Group { layout, children })
    }

    pub fn stack(children: Vec<VisualNode>) -> Self {
        Self::group(Layout::Stack, children)
    }

    pub fn column(gap: f64, children: Vec<VisualNode>) -> Self {
        Self::group(
            Layout::Column {
                gap,
                align: Align::Center,
            },
            children,
        )
    }

    /// Column whose children line up on their leading edge.
    pub fn column_start(gap: f64, children: Vec<VisualNode>) -> Self {
        Self::group(
            Layout::Column {
                gap,
                align: Align::Start,
            },
            children,
        )
    }

    pub fn row(gap: f64, children: Vec<VisualNode>) -> Self {
        Self::group(
            Layout::Row {
                gap,
                align: Align::Center,
            },
            children,
        )
    }

    pub fn text(text: TextNode) -> Self {
        Self::new(NodeKind::Text(text))
    }

    pub fn shape(shape: ShapeNode) -> Self {
        Self::new(NodeKind::Shape(shape))
    }

    pub fn image(image: ImageNode) -> Self {
        Self::new(NodeKind::Image(image))
    }

    /// A filled rectangle with no stroke.
    pub fn rect(width: f64, height: f64, radius: f64, fill: Paint) -> Self {
        Self::shape(ShapeNode {
            width,
            height,
            radius,
            fill: Some(fill),
            stroke: None,
        })
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.offset = Point { x, y };
        self
    }

    pub fn with_layer(mut self, layer: Layer) -> Self {
        self.layer = layer;
        self
    }

    /// Multiply this node's opacity by `factor`.
    pub fn fade_by(mut self, factor: f64) -> Self {
        self.layer.opacity *= factor;
        self
    }

    pub fn children(&self) -> &[VisualNode] {
        match &self.kind {
            NodeKind::Group { children, .. } => children,
            _ => &[],
        }
    }

    /// Visit every node depth-first together with its effective opacity
    /// (its own opacity multiplied by all ancestors').
    pub fn walk<F: FnMut(&VisualNode, f64)>(&self, f: &mut F) {
        self.walk_inner(1.0, f);
    }

    fn walk_inner<F: FnMut(&VisualNode, f64)>(&self, parent_opacity: f64, f: &mut F) {
        let opacity = parent_opacity * self.layer.opacity;
        f(self, opacity);
        for child in self.children() {
            child.walk_inner(opacity, f);
        }
    }

    /// First node (depth-first) carrying `name`.
    pub fn find(&self, name: &str) -> Option<&VisualNode> {
        self.find_with_opacity(name).map(|(node, _)| node)
    }

    /// First node carrying `name` and its effective opacity.
    pub fn find_with_opacity(&self, name: &str) -> Option<(&VisualNode, f64)> {
        self.find_inner(name, 1.0)
    }

    fn find_inner(&self, name: &str, parent_opacity: f64) -> Option<(&VisualNode, f64)> {
        let opacity = parent_opacity * self.layer.opacity;
        if self.name.as_deref() == Some(name) {
            return Some((self, opacity));
        }
        self.children()
            .iter()
            .find_map(|child| child.find_inner(name, opacity))
    }

    /// Concatenated content of every text node in this subtree.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.walk(&mut |node, _| {
            if let NodeKind::Text(t) = &node.kind {
                out.push_str(&t.content);
            }
        });
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameTree {
    pub composition: String,
    pub frame: Frame,
    pub width: u32,
    pub height: u32,
    pub root: VisualNode,
}

// ---------------------------------------------------------------------------
// Renderer → render driver boundary (serialized to the manifest file)
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ManifestFrame {
    Full { root: VisualNode },
    /// Identical to the previous frame in the manifest.
    Hold,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderManifest {
    pub composition: String,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub duration_in_frames: Frame,
    /// Global frame number of `frames[0]`.
    pub first_frame: Frame,
    pub frames: Vec<ManifestFrame>,
}
