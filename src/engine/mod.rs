//! Engine: the frame evaluator.
//!
//! Turns a `Composition` (authored timeline plus bound props) and a frame
//! number into a `FrameTree` (a concrete visual tree), one per frame.
//!
//! The engine understands time, easing, springs, layout intent and
//! transitions. It never deals with pixels, terminals or files.

pub mod atmosphere;
pub mod card;
pub mod primitives;
pub mod registry;
pub mod scenes;
pub mod sequencer;
pub mod sizing;
pub mod source;
pub mod theme;
pub mod timing;
pub mod transitions;

use std::ops::Range;

use crate::types::{Frame, FrameTree};
use registry::Composition;

pub struct Engine;

impl Engine {
    /// Evaluate a single frame. Frames never depend on each other, so any
    /// frame can be asked for in any order.
    pub fn evaluate(composition: &Composition, frame: Frame) -> FrameTree {
        let frame = composition.clamp_frame(frame);
        let config = composition.config();
        FrameTree {
            composition: config.id.clone(),
            frame,
            width: config.canvas.width,
            height: config.canvas.height,
            root: composition.evaluate(frame),
        }
    }

    /// Evaluate every frame in `frames`, clipped to the composition.
    pub fn compile(composition: &Composition, frames: Range<Frame>) -> Vec<FrameTree> {
        let frames = frames.start.max(0)..frames.end.min(composition.duration());
        frames
            .map(|frame| Self::evaluate(composition, frame))
            .collect()
    }
}
