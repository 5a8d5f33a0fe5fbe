//! The seven narrative beats of the sales video.
//!
//! A scene is a pure render function of its local frame and a
//! `SceneContext`. Reveal offsets inside a scene are content constants
//! relative to the scene's own frame 0; the sequencer does the remapping.

mod before_after;
mod cta;
mod hook;
mod pain;
mod process;
mod promise;
mod stats;

pub use before_after::BeforeAfter;
pub use cta::CallToAction;
pub use hook::Hook;
pub use pain::Pain;
pub use process::Process;
pub use promise::Promise;
pub use stats::Stats;

use crate::types::{Color, Frame, GradientStop, Paint, ShapeNode, Stroke, TextNode, VisualNode};

use super::atmosphere::{Aurora, DotGrid};
use super::primitives::Resolve;
use super::sizing::{compute_sizes, Sizes};
use super::source::Canvas;
use super::theme::Theme;

/// Read-only inputs shared by every scene of a render.
#[derive(Debug, Clone)]
pub struct SceneContext {
    pub canvas: Canvas,
    pub fps: u32,
    pub sizes: Sizes,
    pub theme: Theme,
}

impl SceneContext {
    pub fn new(canvas: Canvas, fps: u32, theme: Theme) -> Self {
        SceneContext {
            canvas,
            fps,
            sizes: compute_sizes(canvas),
            theme,
        }
    }
}

pub trait Scene: Send + Sync {
    fn name(&self) -> &'static str;

    fn duration(&self) -> Frame;

    /// The scene as it looks at `frame`, counted from the scene's own start.
    fn render(&self, frame: Frame, ctx: &SceneContext) -> VisualNode;
}

// ---------------------------------------------------------------------------
// Shared building blocks
// ---------------------------------------------------------------------------

/// Approximate advance width of `text`, used only to size boxes around it.
/// The render driver shapes the real glyphs.
pub fn estimate_width(text: &TextNode) -> f64 {
    let chars = text.content.chars().count() as f64;
    chars * text.size * (0.56 + text.letter_spacing)
}

/// Opaque base every scene paints first, so wipes and slides never show
/// the scene underneath through it.
pub fn backdrop(frame: Frame, ctx: &SceneContext) -> VisualNode {
    let canvas = ctx.canvas;
    let theme = &ctx.theme;
    VisualNode::stack(vec![
        VisualNode::rect(
            canvas.width_f(),
            canvas.height_f(),
            0.0,
            Paint::LinearGradient {
                angle: 160.0,
                stops: vec![
                    GradientStop {
                        offset: 0.0,
                        color: theme.surface,
                    },
                    GradientStop {
                        offset: 1.0,
                        color: theme.background,
                    },
                ],
            },
        ),
        Aurora {
            canvas,
            primary: theme.gold,
            secondary: theme.surface.mix(theme.text, 0.15),
        }
        .resolve(frame),
        DotGrid {
            canvas,
            spacing: ctx.sizes.gap_large,
            color: theme.text.with_alpha(0.05),
        }
        .resolve(frame),
    ])
    .named("backdrop")
}

/// Rounded uppercase label with a fill and a hairline border.
pub fn pill(ctx: &SceneContext, text: &str, color: Color, fill: Paint) -> VisualNode {
    pill_around(ctx, ctx.theme.label(text, ctx.sizes.pill_font, color), fill)
}

/// Pill for quantities with units. The text keeps its case so `m²` stays
/// a unit.
pub fn stat_pill(ctx: &SceneContext, text: &str, color: Color, fill: Paint) -> VisualNode {
    let label = TextNode {
        weight: 600,
        ..ctx.theme.body(text, ctx.sizes.pill_font, color)
    };
    pill_around(ctx, label, fill)
}

fn pill_around(ctx: &SceneContext, label: TextNode, fill: Paint) -> VisualNode {
    let s = &ctx.sizes;
    let pad_x = s.pill_font * 1.4;
    let height = s.pill_font * 2.6;
    let width = estimate_width(&label) + pad_x * 2.0;
    VisualNode::stack(vec![
        VisualNode::shape(ShapeNode {
            width,
            height,
            radius: height / 2.0,
            fill: Some(fill),
            stroke: Some(Stroke {
                width: s.hairline,
                color: ctx.theme.gold.with_alpha(0.45),
            }),
        }),
        VisualNode::text(label).at(pad_x, (height - s.pill_font) / 2.0),
    ])
}

/// Small uppercase gold heading above a scene's headline.
pub fn kicker(ctx: &SceneContext, text: &str) -> VisualNode {
    VisualNode::text(ctx.theme.label(text, ctx.sizes.tag_font, ctx.theme.gold))
}

/// Horizontal accent rule.
pub fn rule(ctx: &SceneContext, width: f64) -> VisualNode {
    let thickness = ctx.sizes.rule;
    VisualNode::rect(width, thickness, thickness / 2.0, ctx.theme.gold_gradient())
}

/// A scene frame: backdrop underneath, content column centred on top.
pub fn compose(frame: Frame, ctx: &SceneContext, name: &str, content: Vec<VisualNode>) -> VisualNode {
    VisualNode::stack(vec![
        backdrop(frame, ctx),
        VisualNode::column(ctx.sizes.gap_medium, content),
    ])
    .named(name)
}
