use crate::types::{Frame, Paint, ShapeNode, Stroke, VisualNode};

use super::super::atmosphere::ParticleField;
use super::super::primitives::{BloomText, CharacterReveal, Reveal, Resolve, ScaleFade, SlideUp};
use super::{backdrop, pill, SceneContext, Scene};

const LOGO_AT: Frame = 0;
const HEADLINE_AT: Frame = 14;
const BUTTON_AT: Frame = 50;
const CONTACT_AT: Frame = 66;

/// Closing beat: logo, headline and the booking button.
#[derive(Debug, Clone)]
pub struct CallToAction {
    pub brand: String,
    pub contact: String,
}

impl CallToAction {
    /// Up to two initials of the brand name for the logo mark.
    pub fn initials(&self) -> String {
        self.brand
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }

    fn logo(&self, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;
        VisualNode::stack(vec![
            VisualNode::shape(ShapeNode {
                width: s.logo_box,
                height: s.logo_box,
                radius: s.logo_box * 0.22,
                fill: Some(theme.gold_gradient()),
                stroke: Some(Stroke {
                    width: s.hairline,
                    color: theme.gold_soft,
                }),
            }),
            VisualNode::text(theme.display(self.initials(), s.h3, theme.background))
                .at(s.logo_box * 0.2, (s.logo_box - s.h3) / 2.0),
        ])
        .named("cta.logo")
    }
}

impl Scene for CallToAction {
    fn name(&self) -> &'static str {
        "cta"
    }

    fn duration(&self) -> Frame {
        120
    }

    fn render(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;
        let fps = ctx.fps;

        let logo = ScaleFade::logo(LOGO_AT, fps).reveal(frame, self.logo(ctx));

        let brand = SlideUp::new(LOGO_AT + 6, s.gap_medium, fps).reveal(
            frame,
            VisualNode::text(theme.label(&self.brand, s.small_font, theme.gold_soft)),
        );

        let headline = BloomText::new(theme.gold, s.h1).render(
            CharacterReveal::new(theme.display("Vendamos tu propiedad.", s.h1, theme.text), HEADLINE_AT)
                .resolve(frame),
        )
        .named("cta.headline");

        let button = ScaleFade::new(BUTTON_AT, fps).reveal(
            frame,
            pill(ctx, "Agendá tu tasación gratuita", theme.background, theme.gold_gradient())
                .named("cta.button"),
        );

        let contact = SlideUp::new(CONTACT_AT, s.gap_medium, fps).reveal(
            frame,
            VisualNode::text(theme.body(self.contact.clone(), s.body_font, theme.muted)).named("cta.contact"),
        );

        let particles = ParticleField::new(ctx.canvas, theme.gold_soft, s.gap_small / 2.0).resolve(frame);

        VisualNode::stack(vec![
            backdrop(frame, ctx),
            particles,
            VisualNode::column(s.gap_medium, vec![logo, brand, headline, button, contact]),
            VisualNode::rect(
                ctx.canvas.width_f(),
                s.gap_small / 2.0,
                0.0,
                Paint::Solid {
                    color: theme.gold.with_alpha(0.6),
                },
            )
            .at(0.0, ctx.canvas.height_f() - s.gap_small / 2.0),
        ])
        .named("cta")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scenes::testing::{landscape, opacity_of};

    fn cta() -> CallToAction {
        CallToAction {
            brand: "Aurea Propiedades".into(),
            contact: "aureapropiedades.com".into(),
        }
    }

    #[test]
    fn initials_from_brand() {
        assert_eq!(cta().initials(), "AP");
        let single = CallToAction {
            brand: "casa".into(),
            contact: String::new(),
        };
        assert_eq!(single.initials(), "C");
    }

    #[test]
    fn logo_pops_before_button() {
        let ctx = landscape();
        let node = cta().render(20, &ctx);
        assert_eq!(opacity_of(&node, "cta.logo"), 1.0);
        assert_eq!(opacity_of(&node, "cta.button"), 0.0);
        let node = cta().render(119, &ctx);
        assert_eq!(opacity_of(&node, "cta.button"), 1.0);
        assert_eq!(opacity_of(&node, "cta.contact"), 1.0);
    }

    #[test]
    fn logo_scale_starts_deep() {
        let node = cta().render(0, &landscape());
        assert_eq!(node.find("cta.logo").unwrap().layer.scale, 0.55);
    }
}
