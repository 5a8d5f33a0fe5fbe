//! Palette and typography shared by every composition.
//!
//! Threaded explicitly into each scene through `SceneContext`; never a
//! mutable global.

use serde::{Deserialize, Serialize};

use crate::types::{Color, GradientStop, Paint, TextNode};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    pub background: Color,
    pub surface: Color,
    pub gold: Color,
    pub gold_soft: Color,
    pub text: Color,
    pub muted: Color,
    pub danger: Color,
    pub success: Color,
    pub display_font: String,
    pub body_font: String,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            background: Color::rgb(0x0b, 0x0b, 0x0d),
            surface: Color::rgb(0x17, 0x16, 0x1a),
            gold: Color::rgb(0xc9, 0xa9, 0x6e),
            gold_soft: Color::rgb(0xe8, 0xd5, 0xa8),
            text: Color::rgb(0xf5, 0xf1, 0xea),
            muted: Color::rgb(0x9a, 0x96, 0x8e),
            danger: Color::rgb(0xe0, 0x5a, 0x4f),
            success: Color::rgb(0x5f, 0xb5, 0x8a),
            display_font: "Playfair Display".into(),
            body_font: "Inter".into(),
        }
    }
}

impl Theme {
    /// Serif headline text.
    pub fn display(&self, content: impl Into<String>, size: f64, color: Color) -> TextNode {
        TextNode {
            content: content.into(),
            font_family: self.display_font.clone(),
            size,
            weight: 600,
            color,
            letter_spacing: -0.01,
            strike: false,
        }
    }

    /// Sans-serif copy text.
    pub fn body(&self, content: impl Into<String>, size: f64, color: Color) -> TextNode {
        TextNode {
            content: content.into(),
            font_family: self.body_font.clone(),
            size,
            weight: 400,
            color,
            letter_spacing: 0.0,
            strike: false,
        }
    }

    /// Uppercase tracked label used on pills and kickers.
    pub fn label(&self, content: &str, size: f64, color: Color) -> TextNode {
        TextNode {
            content: content.to_uppercase(),
            font_family: self.body_font.clone(),
            size,
            weight: 600,
            color,
            letter_spacing: 0.18,
            strike: false,
        }
    }

    pub fn gold_gradient(&self) -> Paint {
        Paint::LinearGradient {
            angle: 135.0,
            stops: vec![
                GradientStop {
                    offset: 0.0,
                    color: self.gold_soft,
                },
                GradientStop {
                    offset: 1.0,
                    color: self.gold,
                },
            ],
        }
    }
}
