use crate::types::{Frame, Paint, VisualNode};

use super::super::primitives::{CharacterReveal, Fade, Reveal, Resolve, ScaleFade};
use super::super::source::TimelineWindow;
use super::super::timing::{count, progress, Easing};
use super::{compose, kicker, pill, Scene, SceneContext};

const DAYS: TimelineWindow = TimelineWindow {
    start: 10,
    duration: 40,
};
const DAYS_TARGET: f64 = 30.0;
const HEADLINE_AT: Frame = 20;
const GUARANTEE_AT: Frame = 70;

/// The promise: a thirty-day counter and the guarantee.
#[derive(Debug, Clone, Copy, Default)]
pub struct Promise;

impl Promise {
    pub fn days_at(frame: Frame) -> i64 {
        count(progress(frame, DAYS, Easing::ExpOut), 0.0, DAYS_TARGET)
    }
}

impl Scene for Promise {
    fn name(&self) -> &'static str {
        "promise"
    }

    fn duration(&self) -> Frame {
        120
    }

    fn render(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;

        let label = Fade::new(0, 12).reveal(frame, kicker(ctx, "La promesa"));

        let days = ScaleFade::new(DAYS.start, ctx.fps).reveal(
            frame,
            VisualNode::row(
                s.gap_small,
                vec![
                    VisualNode::text(theme.display(
                        Self::days_at(frame).to_string(),
                        s.display_font * 1.4,
                        theme.gold,
                    ))
                    .named("promise.days"),
                    VisualNode::text(theme.display("días", s.h2, theme.gold_soft)),
                ],
            ),
        );

        let headline = CharacterReveal::new(
            theme.display("Tu propiedad, vendida.", s.h1, theme.text),
            HEADLINE_AT,
        )
        .resolve(frame)
        .named("promise.headline");

        let guarantee = ScaleFade::new(GUARANTEE_AT, ctx.fps).reveal(
            frame,
            pill(ctx, "Garantía por contrato", theme.text, Paint::Solid {
                color: theme.success.with_alpha(0.18),
            })
            .named("promise.guarantee"),
        );

        compose(frame, ctx, "promise", vec![label, days, headline, guarantee])
    }
}
