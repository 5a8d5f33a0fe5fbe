use crate::types::{Color, Frame, Layer, Paint, VisualNode};

use super::super::primitives::{BloomText, CharacterReveal, Reveal, Resolve, ScaleFade, SlideUp};
use super::super::source::TimelineWindow;
use super::super::timing::{progress, Easing};
use super::{backdrop, pill, Scene, SceneContext};

const BARS_RETRACT: TimelineWindow = TimelineWindow {
    start: 60,
    duration: 24,
};
const PILL_AT: Frame = 0;
const BADGE_AT: Frame = 8;
const HEADLINE_AT: Frame = 16;
const HEADLINE_SECOND_LINE_AT: Frame = 30;
const SUBTEXT_AT: Frame = 56;

/// Opening beat: letterbox bars, brand pill and the headline promise.
#[derive(Debug, Clone)]
pub struct Hook {
    pub tagline: String,
}

impl Hook {
    fn bars(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let (w, h) = (ctx.canvas.width_f(), ctx.canvas.height_f());
        let bar_h = ctx.sizes.padding * 1.1;
        let retract = progress(frame, BARS_RETRACT, Easing::ExpOut) * bar_h;
        let bar = |name: &str, y: f64, shift: f64| {
            VisualNode::rect(w, bar_h, 0.0, Paint::Solid { color: Color::BLACK })
                .named(name)
                .at(0.0, y)
                .with_layer(Layer {
                    translate_y: shift,
                    ..Layer::default()
                })
        };
        VisualNode::stack(vec![
            bar("hook.bar.top", 0.0, -retract),
            bar("hook.bar.bottom", h - bar_h, retract),
        ])
    }
}

impl Scene for Hook {
    fn name(&self) -> &'static str {
        "hook"
    }

    fn duration(&self) -> Frame {
        90
    }

    fn render(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;
        let fps = ctx.fps;

        let tag = SlideUp::new(PILL_AT, s.gap_medium, fps).reveal(
            frame,
            pill(ctx, &self.tagline, theme.gold, Paint::Solid {
                color: theme.gold.with_alpha(0.08),
            })
            .named("hook.pill"),
        );

        let badge = ScaleFade::new(BADGE_AT, fps).reveal(
            frame,
            VisualNode::text(theme.label("★ 30 días", s.small_font, theme.gold_soft)).named("hook.badge"),
        );

        let first = CharacterReveal::new(
            theme.display("Vendemos tu propiedad", s.display_font, theme.text),
            HEADLINE_AT,
        );
        let second = CharacterReveal::new(
            theme.display("en 30 días.", s.display_font, theme.gold),
            HEADLINE_SECOND_LINE_AT,
        );
        let headline = BloomText::new(theme.gold, s.display_font)
            .render(VisualNode::column(
                s.gap_small,
                vec![first.resolve(frame), second.resolve(frame)],
            ))
            .named("hook.headline");

        let subtext = SlideUp::new(SUBTEXT_AT, s.gap_large, fps).reveal(
            frame,
            VisualNode::text(theme.body(
                "Estrategia, diseño y datos para vender más rápido y al mejor precio.",
                s.body_font,
                theme.muted,
            ))
            .named("hook.subtext"),
        );

        VisualNode::stack(vec![
            backdrop(frame, ctx),
            VisualNode::column(s.gap_medium, vec![tag, badge, headline, subtext]),
            self.bars(frame, ctx),
        ])
        .named("hook")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scenes::testing::{landscape, opacity_of};

    fn hook() -> Hook {
        Hook {
            tagline: "Inmobiliaria boutique".into(),
        }
    }

    #[test]
    fn first_frame_shows_bars_only() {
        let node = hook().render(0, &landscape());
        assert_eq!(opacity_of(&node, "hook.bar.top"), 1.0);
        assert_eq!(opacity_of(&node, "hook.bar.bottom"), 1.0);
        assert_eq!(opacity_of(&node, "hook.pill"), 0.0);
        assert_eq!(opacity_of(&node, "hook.badge"), 0.0);
        assert_eq!(opacity_of(&node, "hook.subtext"), 0.0);
    }

    #[test]
    fn headline_is_readable_before_scene_ends() {
        let ctx = landscape();
        let node = hook().render(89, &ctx);
        let headline = node.find("hook.headline").unwrap();
        assert!(headline.text_content().contains("Vendemos"));
        // The sharp copy sits last in the bloom stack.
        let sharp = headline.children().last().unwrap();
        let mut min_opacity = f64::MAX;
        sharp.walk(&mut |n, o| {
            if matches!(n.kind, crate::types::NodeKind::Text(_)) {
                min_opacity = min_opacity.min(o);
            }
        });
        assert_eq!(min_opacity, 1.0);
    }

    #[test]
    fn bars_retract_off_canvas() {
        let ctx = landscape();
        let node = hook().render(89, &ctx);
        let top = node.find("hook.bar.top").unwrap();
        assert!(top.layer.translate_y <= -ctx.sizes.padding * 1.1 + 1.0);
    }
}
