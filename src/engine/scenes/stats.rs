use crate::types::{Frame, Paint, ShapeNode, Stroke, VisualNode};

use super::super::primitives::{Reveal, SlideUp};
use super::super::source::TimelineWindow;
use super::super::timing::{count, progress, Easing};
use super::{compose, Scene, SceneContext};

const COUNT_FRAMES: Frame = 40;

struct Counter {
    name: &'static str,
    target: f64,
    suffix: &'static str,
    caption: &'static str,
    start: Frame,
}

const COUNTERS: [Counter; 3] = [
    Counter {
        name: "stats.days",
        target: 22.0,
        suffix: " días",
        caption: "promedio de venta",
        start: 14,
    },
    Counter {
        name: "stats.price",
        target: 98.0,
        suffix: "%",
        caption: "del precio publicado",
        start: 24,
    },
    Counter {
        name: "stats.sold",
        target: 50.0,
        suffix: "+",
        caption: "propiedades vendidas",
        start: 34,
    },
];

/// Proof: three counters on staggered windows.
#[derive(Debug, Clone, Copy, Default)]
pub struct Stats;

impl Stats {
    /// Displayed value of counter `index` at `frame`.
    pub fn value_at(index: usize, frame: Frame) -> i64 {
        let c = &COUNTERS[index];
        let window = TimelineWindow::new(c.start, COUNT_FRAMES);
        count(progress(frame, window, Easing::ExpOut), 0.0, c.target)
    }
}

impl Scene for Stats {
    fn name(&self) -> &'static str {
        "stats"
    }

    fn duration(&self) -> Frame {
        120
    }

    fn render(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;

        let title = SlideUp::new(0, s.gap_large, ctx.fps).reveal(
            frame,
            VisualNode::text(theme.display("Resultados que hablan", s.h1, theme.text)),
        );

        let card_w = s.max_content_width / 3.0 - s.gap_medium;
        let cards = COUNTERS
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let value = format!("{}{}", Self::value_at(i, frame), c.suffix);
                let card = VisualNode::stack(vec![
                    VisualNode::shape(ShapeNode {
                        width: card_w,
                        height: s.stat_font * 2.4,
                        radius: s.gap_small,
                        fill: Some(Paint::Solid {
                            color: theme.surface.with_alpha(0.7),
                        }),
                        stroke: Some(Stroke {
                            width: s.hairline,
                            color: theme.gold.with_alpha(0.25),
                        }),
                    }),
                    VisualNode::column(
                        s.gap_small,
                        vec![
                            VisualNode::text(theme.display(value, s.stat_font, theme.gold)).named(c.name),
                            VisualNode::text(theme.body(c.caption, s.small_font, theme.muted)),
                        ],
                    ),
                ]);
                SlideUp::new(c.start, s.gap_large, ctx.fps).reveal(frame, card)
            })
            .collect();

        compose(
            frame,
            ctx,
            "stats",
            vec![title, VisualNode::row(s.gap_medium, cards)],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scenes::testing::landscape;

    #[test]
    fn counters_start_staggered() {
        assert!(Stats::value_at(0, 24) > 0);
        assert_eq!(Stats::value_at(1, 24), 0);
        assert_eq!(Stats::value_at(2, 24), 0);
    }

    #[test]
    fn counters_land_on_targets() {
        let node = Stats.render(119, &landscape());
        assert_eq!(node.find("stats.days").unwrap().text_content(), "22 días");
        assert_eq!(node.find("stats.price").unwrap().text_content(), "98%");
        assert_eq!(node.find("stats.sold").unwrap().text_content(), "50+");
    }

    #[test]
    fn counters_never_exceed_target() {
        for f in 0..120 {
            assert!(Stats::value_at(0, f) <= 22);
            assert!(Stats::value_at(1, f) <= 98);
            assert!(Stats::value_at(2, f) <= 50);
        }
    }
}
