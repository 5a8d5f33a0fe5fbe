//! Renderer: the deterministic frame-range driver.
//!
//! Evaluates a range of frames of a `Composition` and packs them into a
//! `RenderManifest` (serializable, for an external rasterizer).
//!
//! The renderer is pure and stateless. Given the same composition and
//! range, it always produces the same manifest, whether the range was
//! evaluated on one thread or many.

use std::ops::Range;
use std::thread;

use log::debug;

use crate::engine::registry::Composition;
use crate::engine::Engine;
use crate::types::{Frame, ManifestFrame, RenderManifest, VisualNode};

pub struct Renderer;

impl Renderer {
    /// Render `frames` (clipped to the composition) on the calling thread.
    ///
    /// The first frame is always a full frame. Later frames are holds when
    /// they are identical to the frame before them.
    pub fn render(composition: &Composition, frames: Range<Frame>) -> RenderManifest {
        let frames = Self::clip(composition, frames);
        let roots = frames
            .clone()
            .map(|frame| Engine::evaluate(composition, frame).root)
            .collect();
        Self::pack(composition, frames.start, roots)
    }

    /// Same output as `render`, with the range split into contiguous chunks
    /// evaluated on up to `jobs` scoped threads. `jobs == 0` uses the
    /// available parallelism.
    pub fn render_parallel(
        composition: &Composition,
        frames: Range<Frame>,
        jobs: usize,
    ) -> RenderManifest {
        let frames = Self::clip(composition, frames);
        let jobs = match jobs {
            0 => thread::available_parallelism().map_or(1, |n| n.get()),
            n => n,
        };
        let len = (frames.end - frames.start).max(0) as usize;
        if jobs <= 1 || len < 2 {
            return Self::render(composition, frames);
        }

        let chunk = len.div_ceil(jobs) as Frame;
        let chunks: Vec<Range<Frame>> = (frames.start..frames.end)
            .step_by(chunk as usize)
            .map(|start| start..(start + chunk).min(frames.end))
            .collect();

        let roots: Vec<VisualNode> = thread::scope(|scope| {
            let handles: Vec<_> = chunks
                .into_iter()
                .map(|range| {
                    scope.spawn(move || {
                        debug!("rendering {} frames {:?}", composition.id(), range);
                        range
                            .map(|frame| Engine::evaluate(composition, frame).root)
                            .collect::<Vec<_>>()
                    })
                })
                .collect();
            handles
                .into_iter()
                .flat_map(|h| match h.join() {
                    Ok(roots) => roots,
                    Err(panic) => std::panic::resume_unwind(panic),
                })
                .collect()
        });

        Self::pack(composition, frames.start, roots)
    }

    /// The tree of manifest frame `index`, following holds back to the
    /// full frame they repeat.
    pub fn resolve(manifest: &RenderManifest, index: usize) -> Option<&VisualNode> {
        manifest.frames.get(..=index)?.iter().rev().find_map(|f| match f {
            ManifestFrame::Full { root } => Some(root),
            ManifestFrame::Hold => None,
        })
    }

    fn clip(composition: &Composition, frames: Range<Frame>) -> Range<Frame> {
        let end = frames.end.min(composition.duration());
        let start = frames.start.clamp(0, end.max(0));
        start..end.max(start)
    }

    fn pack(composition: &Composition, first_frame: Frame, roots: Vec<VisualNode>) -> RenderManifest {
        let mut frames = Vec::with_capacity(roots.len());
        let mut prev: Option<&VisualNode> = None;
        for root in &roots {
            frames.push(match prev {
                Some(p) if p == root => ManifestFrame::Hold,
                _ => ManifestFrame::Full { root: root.clone() },
            });
            prev = Some(root);
        }

        let config = composition.config();
        RenderManifest {
            composition: config.id.clone(),
            width: config.canvas.width,
            height: config.canvas.height,
            fps: config.fps,
            duration_in_frames: config.duration_in_frames,
            first_frame,
            frames,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::theme::Theme;

    fn build(id: &str) -> Composition {
        Composition::build(id, None, Theme::default()).unwrap()
    }

    #[test]
    fn parallel_matches_sequential() {
        let video = build("SalesVideo30DiasVertical");
        let seq = Renderer::render(&video, 60..130);
        for jobs in [2, 3, 8] {
            assert_eq!(Renderer::render_parallel(&video, 60..130, jobs), seq, "jobs {jobs}");
        }
    }

    #[test]
    fn first_frame_is_full() {
        let card = build("PropertyCard");
        let manifest = Renderer::render(&card, 250..260);
        assert_eq!(manifest.first_frame, 250);
        assert_eq!(manifest.frames.len(), 10);
        assert!(matches!(manifest.frames[0], ManifestFrame::Full { .. }));
    }

    #[test]
    fn range_is_clipped_to_the_composition() {
        let card = build("PropertyCard");
        let manifest = Renderer::render(&card, 260..999);
        assert_eq!(manifest.frames.len(), 10);
        assert!(Renderer::render(&card, 400..500).frames.is_empty());
        assert_eq!(Renderer::render(&card, -10..2).first_frame, 0);
    }

    #[test]
    fn holds_resolve_to_the_repeated_frame() {
        let manifest = RenderManifest {
            composition: "test".into(),
            width: 10,
            height: 10,
            fps: 30,
            duration_in_frames: 3,
            first_frame: 0,
            frames: vec![
                ManifestFrame::Full {
                    root: VisualNode::stack(vec![]).named("a"),
                },
                ManifestFrame::Hold,
                ManifestFrame::Full {
                    root: VisualNode::stack(vec![]).named("b"),
                },
            ],
        };
        assert_eq!(Renderer::resolve(&manifest, 1).unwrap().name.as_deref(), Some("a"));
        assert_eq!(Renderer::resolve(&manifest, 2).unwrap().name.as_deref(), Some("b"));
        assert!(Renderer::resolve(&manifest, 3).is_none());
    }
}
