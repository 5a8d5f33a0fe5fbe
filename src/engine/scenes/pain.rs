use crate::types::{Frame, VisualNode};

use super::super::primitives::{Fade, MaskedReveal, Reveal, SlideUp};
use super::super::source::TimelineWindow;
use super::super::timing::{count, progress, Easing};
use super::{compose, kicker, Scene, SceneContext};

const MONTHS: TimelineWindow = TimelineWindow {
    start: 4,
    duration: 30,
};
const MONTHS_TARGET: f64 = 6.0;
const HEADLINE_AT: Frame = 6;
const ROWS_AT: Frame = 40;
const ROW_STAGGER: Frame = 12;

const CONTRAST_ROWS: [&str; 3] = [
    "Fotos sacadas con el celular",
    "Publicaciones que nadie ve",
    "Visitas que nunca ofertan",
];

/// The problem: months on the market and everything that is not working.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pain;

impl Pain {
    pub fn months_at(frame: Frame) -> i64 {
        count(progress(frame, MONTHS, Easing::ExpOut), 0.0, MONTHS_TARGET)
    }
}

impl Scene for Pain {
    fn name(&self) -> &'static str {
        "pain"
    }

    fn duration(&self) -> Frame {
        120
    }

    fn render(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;

        let label = Fade::new(0, 12).reveal(frame, kicker(ctx, "El problema"));

        let line_h = s.h1 * 1.25;
        let headline = VisualNode::column(
            0.0,
            ["¿Tu propiedad lleva", "meses sin venderse?"]
                .iter()
                .enumerate()
                .map(|(i, line)| {
                    MaskedReveal::new(HEADLINE_AT + i as Frame * 6, 24, s.max_content_width, line_h)
                        .reveal(frame, VisualNode::text(theme.display(*line, s.h1, theme.text)))
                })
                .collect(),
        )
        .named("pain.headline");

        let months = Fade::new(MONTHS.start, 10).reveal(
            frame,
            VisualNode::row(
                s.gap_small,
                vec![
                    VisualNode::text(theme.display(
                        Self::months_at(frame).to_string(),
                        s.stat_font,
                        theme.danger,
                    ))
                    .named("pain.months"),
                    VisualNode::text(theme.body("meses promedio en el mercado", s.body_font, theme.muted)),
                ],
            ),
        );

        let rows = CONTRAST_ROWS
            .iter()
            .enumerate()
            .map(|(i, row)| {
                let start = ROWS_AT + i as Frame * ROW_STAGGER;
                let mut text = theme.body(*row, s.body_font, theme.muted);
                text.strike = true;
                SlideUp::new(start, s.gap_medium, ctx.fps).reveal(
                    frame,
                    VisualNode::row(
                        s.gap_small,
                        vec![
                            VisualNode::text(theme.body("✕", s.body_font, theme.danger)),
                            VisualNode::text(text),
                        ],
                    ),
                )
            })
            .collect();

        compose(
            frame,
            ctx,
            "pain",
            vec![label, headline, months, VisualNode::column(s.gap_small, rows)],
        )
    }
}
