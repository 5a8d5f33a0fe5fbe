use crate::types::{Frame, VisualNode};

use super::super::source::TimelineWindow;
use super::super::timing::{progress, Easing};
use super::Reveal;

/// Opacity follows window progress. No transform.
#[derive(Debug, Clone, Copy)]
pub struct Fade {
    pub window: TimelineWindow,
    pub easing: Easing,
}

impl Fade {
    pub fn new(start: Frame, duration: Frame) -> Self {
        Fade {
            window: TimelineWindow::new(start, duration),
            easing: Easing::Linear,
        }
    }

    /// Inverse fade: fully visible before the window, gone after it.
    pub fn out(&self, frame: Frame, content: VisualNode) -> VisualNode {
        content.fade_by(1.0 - progress(frame, self.window, self.easing))
    }
}

impl Reveal for Fade {
    fn reveal(&self, frame: Frame, content: VisualNode) -> VisualNode {
        content.fade_by(progress(frame, self.window, self.easing))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Paint, Color};

    fn dot() -> VisualNode {
        VisualNode::rect(10.0, 10.0, 0.0, Paint::Solid { color: Color::WHITE })
    }

    #[test]
    fn fades_in_linearly() {
        let fade = Fade::new(10, 20);
        assert_eq!(fade.reveal(0, dot()).layer.opacity, 0.0);
        assert_eq!(fade.reveal(20, dot()).layer.opacity, 0.5);
        assert_eq!(fade.reveal(30, dot()).layer.opacity, 1.0);
    }

    #[test]
    fn fade_out_mirrors_fade_in() {
        let fade = Fade::new(10, 20);
        assert_eq!(fade.out(0, dot()).layer.opacity, 1.0);
        assert_eq!(fade.out(40, dot()).layer.opacity, 0.0);
    }

    #[test]
    fn leaves_transform_untouched() {
        let node = Fade::new(0, 10).reveal(5, dot().at(3.0, 4.0));
        assert_eq!(node.layer.translate_y, 0.0);
        assert_eq!(node.layer.scale, 1.0);
        assert_eq!(node.offset.x, 3.0);
    }
}
