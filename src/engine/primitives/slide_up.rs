use crate::types::{Frame, VisualNode};

use super::super::source::{SpringConfig, TimelineWindow};
use super::super::timing::{lerp, progress, spring_progress, Easing};
use super::{entrance_spring, Reveal, DEFAULT_FADE_FRAMES};

/// Fade in on a fixed schedule while rising into place on a spring.
///
/// Opacity and position use separate time sources: the fade completes after
/// `fade_frames`, the spring settles on its own physics.
#[derive(Debug, Clone, Copy)]
pub struct SlideUp {
    pub start: Frame,
    /// Extra frames between `start` and the spring release.
    pub delay: Frame,
    pub fade_frames: Frame,
    pub distance: f64,
    pub fps: u32,
    pub spring: SpringConfig,
}

impl SlideUp {
    pub fn new(start: Frame, distance: f64, fps: u32) -> Self {
        SlideUp {
            start,
            delay: 0,
            fade_frames: DEFAULT_FADE_FRAMES,
            distance,
            fps,
            spring: entrance_spring(),
        }
    }

    pub fn with_delay(mut self, delay: Frame) -> Self {
        self.delay = delay;
        self
    }
}

impl Reveal for SlideUp {
    fn reveal(&self, frame: Frame, mut content: VisualNode) -> VisualNode {
        let opacity = progress(
            frame,
            TimelineWindow::new(self.start, self.fade_frames),
            Easing::Linear,
        );
        let elapsed = (frame - self.start - self.delay) as f64;
        let settle = spring_progress(elapsed, self.fps, &self.spring);
        content.layer.opacity *= opacity;
        content.layer.translate_y += lerp(settle, (self.distance, 0.0));
        content
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Color, Paint};

    fn card() -> VisualNode {
        VisualNode::rect(100.0, 40.0, 8.0, Paint::Solid { color: Color::WHITE })
    }

    #[test]
    fn hidden_and_lowered_before_start() {
        let node = SlideUp::new(20, 40.0, 30).reveal(10, card());
        assert_eq!(node.layer.opacity, 0.0);
        assert_eq!(node.layer.translate_y, 40.0);
    }

    #[test]
    fn settles_in_place() {
        let node = SlideUp::new(20, 40.0, 30).reveal(140, card());
        assert_eq!(node.layer.opacity, 1.0);
        assert!(node.layer.translate_y.abs() < 0.5);
    }

    #[test]
    fn delay_holds_motion_but_not_fade() {
        let slide = SlideUp::new(0, 40.0, 30).with_delay(20);
        let node = slide.reveal(15, card());
        assert_eq!(node.layer.opacity, 1.0);
        assert_eq!(node.layer.translate_y, 40.0);
    }
}
