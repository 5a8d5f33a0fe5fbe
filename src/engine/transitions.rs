//! Transition descriptors: how two adjacent scenes hand over.
//!
//! Timing (how progress advances) and presentation (what progress looks
//! like) are independent; any timing pairs with any presentation.

use serde::{Deserialize, Serialize};

use crate::types::{Clip, Frame, Layer};

use super::source::{Canvas, SpringConfig};
use super::timing::{measure_spring, spring_progress};

/// Residual distance at which a spring transition counts as settled.
const SPRING_SETTLE_THRESHOLD: f64 = 0.005;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Direction {
    FromLeft,
    FromRight,
    FromTop,
    FromBottom,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Timing {
    Linear { duration: Frame },
    /// The spring is stretched so that it settles exactly at `duration`.
    Spring { config: SpringConfig, duration: Frame },
}

impl Timing {
    pub fn duration(&self) -> Frame {
        match *self {
            Timing::Linear { duration } | Timing::Spring { duration, .. } => duration.max(0),
        }
    }

    fn with_duration(self, duration: Frame) -> Self {
        match self {
            Timing::Linear { .. } => Timing::Linear { duration },
            Timing::Spring { config, .. } => Timing::Spring { config, duration },
        }
    }

    /// Frames the spring needs to settle at its own pace; 1 for linear
    /// timing. Measured by simulation, so callers evaluating many frames
    /// should measure once and use `progress_settling_in`.
    pub fn settle_frames(&self, fps: u32) -> Frame {
        match self {
            Timing::Linear { .. } => 1,
            Timing::Spring { config, .. } => {
                measure_spring(fps, config, SPRING_SETTLE_THRESHOLD).max(1)
            }
        }
    }

    /// Progress `elapsed` frames into the transition. Exactly 1 once the
    /// transition is over; a spring may overshoot before that.
    pub fn progress(&self, elapsed: Frame, fps: u32) -> f64 {
        self.progress_settling_in(elapsed, fps, self.settle_frames(fps))
    }

    /// `progress` with the spring's settle time already measured.
    pub fn progress_settling_in(&self, elapsed: Frame, fps: u32, settle: Frame) -> f64 {
        let duration = self.duration();
        if elapsed <= 0 {
            return if duration == 0 { 1.0 } else { 0.0 };
        }
        if elapsed >= duration {
            return 1.0;
        }
        match self {
            Timing::Linear { .. } => elapsed as f64 / duration as f64,
            Timing::Spring { config, .. } => {
                let stretched = elapsed as f64 * settle.max(1) as f64 / duration as f64;
                spring_progress(stretched, fps, config)
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "direction", rename_all = "snake_case")]
pub enum Presentation {
    /// Cross-dissolve.
    Fade,
    /// The entering scene is revealed by a moving clip edge.
    Wipe(Direction),
    /// Both scenes travel together; the entering one pushes the other out.
    Slide(Direction),
}

/// Layer changes for the outgoing and incoming scene at one instant.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Handover {
    pub exiting: Layer,
    pub entering: Layer,
}

impl Presentation {
    pub fn handover(&self, progress: f64, canvas: Canvas) -> Handover {
        match *self {
            Presentation::Fade => {
                let p = progress.clamp(0.0, 1.0);
                Handover {
                    exiting: Layer {
                        opacity: 1.0 - p,
                        ..Layer::default()
                    },
                    entering: Layer {
                        opacity: p,
                        ..Layer::default()
                    },
                }
            }
            Presentation::Wipe(direction) => {
                let hidden = 100.0 * (1.0 - progress.clamp(0.0, 1.0));
                let (mut top, mut right, mut bottom, mut left) = (0.0, 0.0, 0.0, 0.0);
                match direction {
                    Direction::FromLeft => right = hidden,
                    Direction::FromRight => left = hidden,
                    Direction::FromTop => bottom = hidden,
                    Direction::FromBottom => top = hidden,
                }
                Handover {
                    exiting: Layer::default(),
                    entering: Layer {
                        clip: Some(Clip::Inset {
                            top,
                            right,
                            bottom,
                            left,
                        }),
                        ..Layer::default()
                    },
                }
            }
            Presentation::Slide(direction) => {
                let (w, h) = (canvas.width_f(), canvas.height_f());
                // Offset of the entering scene at progress 0.
                let (dx, dy) = match direction {
                    Direction::FromLeft => (-w, 0.0),
                    Direction::FromRight => (w, 0.0),
                    Direction::FromTop => (0.0, -h),
                    Direction::FromBottom => (0.0, h),
                };
                Handover {
                    exiting: Layer {
                        translate_x: -dx * progress,
                        translate_y: -dy * progress,
                        ..Layer::default()
                    },
                    entering: Layer {
                        translate_x: dx * (1.0 - progress),
                        translate_y: dy * (1.0 - progress),
                        ..Layer::default()
                    },
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    pub timing: Timing,
    pub presentation: Presentation,
}

impl Transition {
    pub fn fade(timing: Timing) -> Self {
        Transition {
            timing,
            presentation: Presentation::Fade,
        }
    }

    pub fn wipe(direction: Direction, timing: Timing) -> Self {
        Transition {
            timing,
            presentation: Presentation::Wipe(direction),
        }
    }

    pub fn slide(direction: Direction, timing: Timing) -> Self {
        Transition {
            timing,
            presentation: Presentation::Slide(direction),
        }
    }

    pub fn duration(&self) -> Frame {
        self.timing.duration()
    }

    /// Shortened copy that fits within `max` frames.
    pub fn clamped(self, max: Frame) -> Self {
        Transition {
            timing: self.timing.with_duration(self.duration().min(max.max(0))),
            ..self
        }
    }
}

pub fn linear(duration: Frame) -> Timing {
    Timing::Linear { duration }
}

pub fn spring(config: SpringConfig, duration: Frame) -> Timing {
    Timing::Spring { config, duration }
}
