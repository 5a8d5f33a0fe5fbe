use crate::types::{Frame, Layer, ShapeNode, TextNode, VisualNode};

use super::super::source::TimelineWindow;
use super::super::timing::{lerp, progress, Easing};
use super::Resolve;

/// Width of a literal space, relative to the font size.
const SPACE_WIDTH: f64 = 0.28;

/// Left-to-right staggered reveal: every character rises, un-blurs and fades
/// in on its own window.
///
/// Character `i` runs over `[start + i * char_delay, .. + char_duration)`,
/// so the whole string is in place by
/// `start + (len - 1) * char_delay + char_duration`. Spaces are fixed-width
/// gaps and never animate.
#[derive(Debug, Clone)]
pub struct CharacterReveal {
    pub text: TextNode,
    pub start: Frame,
    pub char_delay: Frame,
    pub char_duration: Frame,
    pub rise: f64,
    pub max_blur: f64,
}

impl CharacterReveal {
    pub fn new(text: TextNode, start: Frame) -> Self {
        let rise = text.size * 0.35;
        let max_blur = text.size * 0.12;
        CharacterReveal {
            text,
            start,
            char_delay: 2,
            char_duration: 14,
            rise,
            max_blur,
        }
    }

    pub fn with_timing(mut self, char_delay: Frame, char_duration: Frame) -> Self {
        self.char_delay = char_delay.max(0);
        self.char_duration = char_duration.max(0);
        self
    }

    /// Frame from which every character is fully revealed.
    pub fn end(&self) -> Frame {
        let count = self.text.content.chars().count() as Frame;
        if count == 0 {
            return self.start;
        }
        self.start + (count - 1) * self.char_delay + self.char_duration
    }

    fn window_for(&self, index: usize) -> TimelineWindow {
        TimelineWindow::new(
            self.start + index as Frame * self.char_delay,
            self.char_duration,
        )
    }
}

impl Resolve for CharacterReveal {
    fn resolve(&self, frame: Frame) -> VisualNode {
        let glyphs = self
            .text
            .content
            .chars()
            .enumerate()
            .map(|(i, ch)| {
                if ch == ' ' {
                    return VisualNode::shape(ShapeNode {
                        width: self.text.size * SPACE_WIDTH,
                        height: self.text.size,
                        radius: 0.0,
                        fill: None,
                        stroke: None,
                    });
                }
                let p = progress(frame, self.window_for(i), Easing::ExpOut);
                VisualNode::text(TextNode {
                    content: ch.to_string(),
                    ..self.text.clone()
                })
                .with_layer(Layer {
                    opacity: p,
                    translate_y: lerp(p, (self.rise, 0.0)),
                    blur: lerp(p, (self.max_blur, 0.0)),
                    ..Layer::default()
                })
            })
            .collect();
        VisualNode::row(0.0, glyphs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::theme::Theme;
    use crate::types::NodeKind;

    fn reveal(text: &str) -> CharacterReveal {
        let theme = Theme::default();
        CharacterReveal::new(theme.display(text, 100.0, theme.text), 10).with_timing(3, 12)
    }

    #[test]
    fn end_frame_follows_stagger_formula() {
        let r = reveal("Casa");
        assert_eq!(r.end(), 10 + 3 * 3 + 12);
        assert_eq!(reveal("A").end(), 22);
        assert_eq!(reveal("").end(), 10);
    }

    #[test]
    fn every_glyph_is_settled_at_end() {
        let r = reveal("Tu casa");
        let node = r.resolve(r.end());
        for child in node.children() {
            assert_eq!(child.layer.opacity, 1.0);
            assert_eq!(child.layer.blur, 0.0);
            assert_eq!(child.layer.translate_y, 0.0);
        }
    }

    #[test]
    fn spaces_are_unstyled_gaps() {
        let r = reveal("a b");
        let node = r.resolve(r.start);
        let gap = &node.children()[1];
        assert!(matches!(gap.kind, NodeKind::Shape(_)));
        assert!(gap.layer.is_identity());
        assert_eq!(node.children()[0].layer.opacity, 0.0);
    }

    #[test]
    fn later_glyphs_lag_earlier_ones() {
        let r = reveal("abc");
        let node = r.resolve(16);
        let first = node.children()[0].layer.opacity;
        let last = node.children()[2].layer.opacity;
        assert!(first > last);
    }
}
