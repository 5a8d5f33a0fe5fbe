use crate::types::{Clip, Frame, Layer, VisualNode};

use super::super::source::TimelineWindow;
use super::super::timing::{lerp, progress, Easing};
use super::Reveal;

/// Content slides up from behind a fixed-size mask edge instead of fading.
#[derive(Debug, Clone, Copy)]
pub struct MaskedReveal {
    pub window: TimelineWindow,
    pub width: f64,
    pub height: f64,
    /// Starting offset of the inner content; usually the mask height.
    pub distance: f64,
}

impl MaskedReveal {
    pub fn new(start: Frame, duration: Frame, width: f64, height: f64) -> Self {
        MaskedReveal {
            window: TimelineWindow::new(start, duration),
            width,
            height,
            distance: height,
        }
    }
}

impl Reveal for MaskedReveal {
    fn reveal(&self, frame: Frame, mut content: VisualNode) -> VisualNode {
        let p = progress(frame, self.window, Easing::ExpOut);
        content.layer.translate_y += lerp(p, (self.distance, 0.0));
        VisualNode::stack(vec![content]).with_layer(Layer {
            clip: Some(Clip::Bounds {
                width: self.width,
                height: self.height,
            }),
            ..Layer::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Paint};

    fn line() -> VisualNode {
        VisualNode::rect(300.0, 60.0, 0.0, Paint::Solid { color: Color::WHITE })
    }

    #[test]
    fn inner_content_starts_below_mask() {
        let mask = MaskedReveal::new(10, 20, 300.0, 60.0);
        let node = mask.reveal(0, line());
        assert_eq!(node.children()[0].layer.translate_y, 60.0);
        assert_eq!(node.layer.opacity, 1.0);
        assert!(matches!(node.layer.clip, Some(Clip::Bounds { .. })));
    }

    #[test]
    fn inner_content_lands_at_zero() {
        let mask = MaskedReveal::new(10, 20, 300.0, 60.0);
        assert_eq!(mask.reveal(30, line()).children()[0].layer.translate_y, 0.0);
    }
}
