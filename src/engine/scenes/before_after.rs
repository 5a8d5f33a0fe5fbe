use crate::types::{Clip, Frame, ImageFit, ImageNode, Layer, Paint, ShapeNode, Stroke, VisualNode};

use super::super::primitives::{Fade, Reveal, ScaleFade, SlideUp};
use super::super::source::TimelineWindow;
use super::super::timing::{lerp, progress, Easing};
use super::{compose, Scene, SceneContext};

pub const WIPE: TimelineWindow = TimelineWindow {
    start: 20,
    duration: 60,
};
const PANEL_AT: Frame = 8;
const LABELS_AT: Frame = 12;

/// Before/after comparison: the "after" photo wipes across the "before" one.
#[derive(Debug, Clone)]
pub struct BeforeAfter {
    pub before_image: String,
    pub after_image: String,
}

impl BeforeAfter {
    /// Frame at which half of the "after" image is showing.
    pub const WIPE_MIDPOINT: Frame = WIPE.start + WIPE.duration / 2;

    /// Share of the panel showing the "after" image, 0..=100.
    pub fn wipe_percent(frame: Frame) -> f64 {
        lerp(progress(frame, WIPE, Easing::QuadInOut), (0.0, 100.0))
    }

    pub fn panel_size(ctx: &SceneContext) -> (f64, f64) {
        let w = ctx.sizes.max_content_width;
        (w, w * 9.0 / 16.0)
    }

    fn panel(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;
        let (w, h) = Self::panel_size(ctx);
        let wipe = Self::wipe_percent(frame);
        let boundary = w * wipe / 100.0;
        let line_w = s.rule;
        let knob = s.icon * 1.4;

        let image = |src: &str| {
            VisualNode::image(ImageNode {
                src: src.to_string(),
                width: w,
                height: h,
                fit: ImageFit::Cover,
            })
        };

        // Both the clip edge and the divider come from the same `wipe`.
        let after = image(&self.after_image)
            .named("before_after.after")
            .with_layer(Layer {
                clip: Some(Clip::Inset {
                    top: 0.0,
                    right: 100.0 - wipe,
                    bottom: 0.0,
                    left: 0.0,
                }),
                ..Layer::default()
            });

        let divider = VisualNode::stack(vec![
            VisualNode::rect(line_w, h, 0.0, Paint::Solid { color: theme.text }),
            VisualNode::shape(ShapeNode {
                width: knob,
                height: knob,
                radius: knob / 2.0,
                fill: Some(Paint::Solid { color: theme.text }),
                stroke: Some(Stroke {
                    width: s.stroke,
                    color: theme.gold,
                }),
            })
            .at((line_w - knob) / 2.0, (h - knob) / 2.0),
        ])
        .named("before_after.divider")
        .at(boundary - line_w / 2.0, 0.0);

        let labels_fade = Fade::new(LABELS_AT, 12);
        let tag = |text: &str| VisualNode::text(theme.label(text, s.tag_font, theme.text));
        let labels = VisualNode::stack(vec![
            labels_fade.reveal(frame, tag("Antes").at(s.gap_medium, s.gap_medium)),
            labels_fade.reveal(
                frame,
                tag("Después").at(w - s.gap_medium - s.tag_font * 6.0, s.gap_medium),
            ),
        ]);

        VisualNode::stack(vec![
            image(&self.before_image).named("before_after.before"),
            after,
            divider,
            labels,
        ])
        .named("before_after.panel")
        .with_layer(Layer {
            clip: Some(Clip::Bounds {
                width: w,
                height: h,
            }),
            ..Layer::default()
        })
    }
}

impl Scene for BeforeAfter {
    fn name(&self) -> &'static str {
        "before_after"
    }

    fn duration(&self) -> Frame {
        120
    }

    fn render(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;

        let title = SlideUp::new(0, s.gap_large, ctx.fps).reveal(
            frame,
            VisualNode::text(theme.display("Antes / Después", s.h1, theme.text)),
        );
        let panel = ScaleFade::new(PANEL_AT, ctx.fps).reveal(frame, self.panel(frame, ctx));
        let caption = VisualNode::text(theme.body(
            "La misma propiedad, presentada como merece.",
            s.body_font,
            theme.muted,
        ));

        compose(frame, ctx, "before_after", vec![title, panel, caption])
    }
}
