use crate::types::{Frame, Paint, Stroke, ShapeNode, VisualNode};

use super::super::primitives::{MaskedReveal, Reveal, ScaleFade, SlideUp};
use super::{compose, rule, Scene, SceneContext};

const STEPS_AT: Frame = 18;
const STEP_STAGGER: Frame = 22;
/// Step labels start rising this long after their card pops in.
const LABEL_LAG: Frame = 6;

const STEPS: [(&str, &str); 4] = [
    ("Tasación con datos", "Valor de mercado real, no de deseo."),
    ("Producción premium", "Fotos, video y recorrido 360°."),
    ("Difusión segmentada", "Anuncios a compradores calificados."),
    ("Negociación y cierre", "Te acompañamos hasta la escritura."),
];

/// How it works: four numbered steps popping in one after another.
#[derive(Debug, Clone, Copy, Default)]
pub struct Process;

impl Process {
    pub fn step_start(index: usize) -> Frame {
        STEPS_AT + index as Frame * STEP_STAGGER
    }

    fn step(&self, index: usize, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;
        let (title, detail) = STEPS[index];
        let start = Self::step_start(index);

        let badge = VisualNode::stack(vec![
            VisualNode::shape(ShapeNode {
                width: s.logo_box,
                height: s.logo_box,
                radius: s.logo_box / 2.0,
                fill: Some(Paint::Solid {
                    color: theme.gold.with_alpha(0.12),
                }),
                stroke: Some(Stroke {
                    width: s.stroke,
                    color: theme.gold,
                }),
            }),
            VisualNode::text(theme.display(format!("{:02}", index + 1), s.h3, theme.gold))
                .at(s.logo_box * 0.25, (s.logo_box - s.h3) / 2.0),
        ]);

        let title_h = s.h3 * 1.3;
        let copy = VisualNode::column(
            s.gap_small / 2.0,
            vec![
                MaskedReveal::new(start + LABEL_LAG, 18, s.max_content_width, title_h)
                    .reveal(frame, VisualNode::text(theme.display(title, s.h3, theme.text))),
                VisualNode::text(theme.body(detail, s.body_font, theme.muted)),
            ],
        );

        ScaleFade::new(start, ctx.fps).reveal(
            frame,
            VisualNode::row(s.gap_medium, vec![badge, copy]).named(format!("process.step.{}", index + 1)),
        )
    }
}

impl Scene for Process {
    fn name(&self) -> &'static str {
        "process"
    }

    fn duration(&self) -> Frame {
        150
    }

    fn render(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;

        let title = SlideUp::new(0, s.gap_large, ctx.fps).reveal(
            frame,
            VisualNode::column(
                s.gap_small,
                vec![
                    VisualNode::text(theme.display("Cómo lo hacemos", s.h1, theme.text)),
                    rule(ctx, s.logo_box * 1.5),
                ],
            ),
        );

        let steps = (0..STEPS.len()).map(|i| self.step(i, frame, ctx)).collect();

        compose(
            frame,
            ctx,
            "process",
            vec![title, VisualNode::column(s.gap_medium, steps)],
        )
    }
}
