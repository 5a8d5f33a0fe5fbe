use crate::types::{Frame, VisualNode};

/// Mounts content only while active and hands it a frame relative to `from`.
///
/// Content built inside a sequence never sees the outer timeline, so its own
/// schedule always starts at local frame 0.
#[derive(Debug, Clone, Copy)]
pub struct Sequence {
    pub from: Frame,
    pub duration: Option<Frame>,
}

impl Sequence {
    pub fn from(from: Frame) -> Self {
        Sequence {
            from,
            duration: None,
        }
    }

    pub fn with_duration(mut self, duration: Frame) -> Self {
        self.duration = Some(duration.max(0));
        self
    }

    pub fn local(&self, frame: Frame) -> Option<Frame> {
        let local = frame - self.from;
        if local < 0 {
            return None;
        }
        match self.duration {
            Some(d) if local >= d => None,
            _ => Some(local),
        }
    }

    pub fn render<F>(&self, frame: Frame, content: F) -> Option<VisualNode>
    where
        F: FnOnce(Frame) -> VisualNode,
    {
        self.local(frame).map(content)
    }
}
