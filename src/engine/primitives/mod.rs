//! Reveal primitives and their frame-driven implementations.
//!
//! Each primitive lives in its own module with its struct definition and
//! trait implementation side by side. Every primitive takes the current
//! frame as an explicit input; none owns a timer.

mod bloom;
mod character;
mod fade;
mod masked;
mod scale_fade;
mod sequence;
mod slide_up;

pub use bloom::BloomText;
pub use character::CharacterReveal;
pub use fade::Fade;
pub use masked::MaskedReveal;
pub use scale_fade::ScaleFade;
pub use sequence::Sequence;
pub use slide_up::SlideUp;

use crate::types::{Frame, VisualNode};

use super::source::SpringConfig;

/// Apply a time-driven effect to `content` as it looks at `frame`.
pub trait Reveal {
    fn reveal(&self, frame: Frame, content: VisualNode) -> VisualNode;
}

/// Produce a node from authored parameters as it looks at `frame`.
pub trait Resolve {
    fn resolve(&self, frame: Frame) -> VisualNode;
}

/// Frames over which spring-driven primitives fade their opacity in.
pub const DEFAULT_FADE_FRAMES: Frame = 15;

/// Spring used by entrance motion: settles quickly with a slight overshoot.
pub fn entrance_spring() -> SpringConfig {
    SpringConfig {
        damping: 16.0,
        stiffness: 120.0,
        mass: 1.0,
        overshoot_clamping: false,
    }
}
