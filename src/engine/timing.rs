//! Interpolation, easing and spring progress.
//!
//! Everything here maps a frame number onto a normalized progress value and
//! remaps progress onto a target range. Pure math: no state, no failure modes.

use serde::{Deserialize, Serialize};

use crate::types::Frame;

use super::source::{SpringConfig, TimelineWindow};

/// Overshoot factor used by `Easing::back_out()`.
pub const DEFAULT_BACK_OVERSHOOT: f64 = 1.70158;

/// A named curve `[0, 1] → [0, 1]` with `curve(0) == 0` and `curve(1) == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Easing {
    Linear,
    ExpOut,
    QuadInOut,
    BackOut { overshoot: f64 },
}

impl Easing {
    pub fn back_out() -> Self {
        Easing::BackOut {
            overshoot: DEFAULT_BACK_OVERSHOOT,
        }
    }

    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match *self {
            Easing::Linear => t,
            Easing::ExpOut => 1.0 - 2f64.powf(-10.0 * t),
            Easing::QuadInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - 2.0 * (1.0 - t) * (1.0 - t)
                }
            }
            Easing::BackOut { overshoot } => {
                let u = 1.0 - t;
                1.0 - u * u * ((overshoot + 1.0) * u - overshoot)
            }
        }
    }
}

/// Clamped, eased progress of `frame` through `window`.
///
/// Before the window: 0. After it: 1. A zero-length window is a step at
/// `window.start`.
pub fn progress(frame: Frame, window: TimelineWindow, easing: Easing) -> f64 {
    let duration = window.duration.max(0);
    if frame < window.start {
        return 0.0;
    }
    if duration == 0 || frame >= window.start + duration {
        return 1.0;
    }
    let linear = (frame - window.start) as f64 / duration as f64;
    easing.apply(linear)
}

/// Map `value` from `from` onto `to` without clamping.
pub fn remap(value: f64, from: (f64, f64), to: (f64, f64)) -> f64 {
    let span = from.1 - from.0;
    if span == 0.0 {
        return if value >= from.1 { to.1 } else { to.0 };
    }
    to.0 + (value - from.0) / span * (to.1 - to.0)
}

/// `remap` from the unit range.
pub fn lerp(t: f64, to: (f64, f64)) -> f64 {
    remap(t, (0.0, 1.0), to)
}

/// Progress of a spring released at elapsed frame 0, moving from 0 to 1.
///
/// Closed-form damped harmonic oscillator with zero initial velocity. The
/// result may exceed 1 before settling unless `overshoot_clamping` is set.
pub fn spring_progress(elapsed: f64, fps: u32, config: &SpringConfig) -> f64 {
    if elapsed <= 0.0 || fps == 0 {
        return 0.0;
    }
    let t = elapsed / fps as f64;
    let mass = config.mass.max(1e-4);
    let stiffness = config.stiffness.max(1e-4);
    let damping = config.damping.max(0.0);

    let omega = (stiffness / mass).sqrt();
    let zeta = damping / (2.0 * (stiffness * mass).sqrt());

    let value = if zeta < 1.0 {
        let omega_d = omega * (1.0 - zeta * zeta).sqrt();
        let envelope = (-zeta * omega * t).exp();
        1.0 - envelope * ((omega_d * t).cos() + (zeta * omega / omega_d) * (omega_d * t).sin())
    } else if zeta == 1.0 {
        1.0 - (-omega * t).exp() * (1.0 + omega * t)
    } else {
        let root = (zeta * zeta - 1.0).sqrt();
        let r1 = -omega * (zeta - root);
        let r2 = -omega * (zeta + root);
        1.0 - (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r2 - r1)
    };

    if config.overshoot_clamping {
        value.min(1.0)
    } else {
        value
    }
}

/// Frames until the spring stays within `threshold` of its rest value.
///
/// Bounded search; a spring that never settles inside ten seconds reports
/// that bound.
pub fn measure_spring(fps: u32, config: &SpringConfig, threshold: f64) -> Frame {
    let limit = (fps.max(1) as Frame) * 10;
    let mut settled_since: Option<Frame> = None;
    for frame in 0..=limit {
        let off = (spring_progress(frame as f64, fps, config) - 1.0).abs();
        if off <= threshold {
            settled_since.get_or_insert(frame);
        } else {
            settled_since = None;
        }
    }
    settled_since.unwrap_or(limit)
}

/// Floor of `progress` remapped onto `[from, to]`, used by counting numbers.
pub fn count(progress: f64, from: f64, to: f64) -> i64 {
    lerp(progress, (from, to)).floor() as i64
}
