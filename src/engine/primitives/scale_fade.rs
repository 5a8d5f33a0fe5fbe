use crate::types::{Frame, VisualNode};

use super::super::source::{SpringConfig, TimelineWindow};
use super::super::timing::{lerp, progress, spring_progress, Easing};
use super::{entrance_spring, Reveal, DEFAULT_FADE_FRAMES};

/// Like `SlideUp`, but the spring drives scale instead of translation.
#[derive(Debug, Clone, Copy)]
pub struct ScaleFade {
    pub start: Frame,
    pub fade_frames: Frame,
    pub from_scale: f64,
    pub fps: u32,
    pub spring: SpringConfig,
}

impl ScaleFade {
    pub fn new(start: Frame, fps: u32) -> Self {
        ScaleFade {
            start,
            fade_frames: DEFAULT_FADE_FRAMES,
            from_scale: 0.7,
            fps,
            spring: entrance_spring(),
        }
    }

    /// Deeper pop used for logos.
    pub fn logo(start: Frame, fps: u32) -> Self {
        ScaleFade {
            from_scale: 0.55,
            ..Self::new(start, fps)
        }
    }
}

impl Reveal for ScaleFade {
    fn reveal(&self, frame: Frame, mut content: VisualNode) -> VisualNode {
        let opacity = progress(
            frame,
            TimelineWindow::new(self.start, self.fade_frames),
            Easing::Linear,
        );
        let settle = spring_progress((frame - self.start) as f64, self.fps, &self.spring);
        content.layer.opacity *= opacity;
        content.layer.scale *= lerp(settle, (self.from_scale, 1.0));
        content
    }
}
