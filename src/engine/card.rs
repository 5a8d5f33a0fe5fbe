//! PropertyCard: a single listing bound into the reveal vocabulary.
//!
//! Unlike the sales video, every visible string here comes from a
//! `PropertyRecord`. Missing optional fields have a designed fallback:
//! no cover photo paints a procedural placeholder, a null area or
//! neighborhood drops that element, zero parking drops its pill.

use crate::types::{Frame, GradientStop, ImageFit, ImageNode, Layer, Clip, Paint, VisualNode};

use super::atmosphere::{Aurora, DiagonalLines, DotGrid};
use super::primitives::{CharacterReveal, Fade, Resolve, Reveal, ScaleFade, Sequence, SlideUp};
use super::scenes::{pill, stat_pill, Scene, SceneContext};
use super::source::{OperationType, PropertyRecord, TimelineWindow};
use super::timing::{count, lerp, progress, Easing};

pub const CARD_FRAMES: Frame = 270;

const LOGO_IN: Frame = 30;
const LOGO_OUT: TimelineWindow = TimelineWindow {
    start: 45,
    duration: 15,
};
const BACKGROUND_AT: Frame = 40;
const KEN_BURNS_TO: f64 = 1.12;
const TAG_AT: Frame = 70;
const TITLE_AT: Frame = 80;
const LOCATION_AT: Frame = 120;
const PRICE_AT: Frame = 160;
const PRICE_COUNT_FRAMES: Frame = 50;
const PILLS_AT: Frame = 200;
const PILL_STAGGER: Frame = 8;
const FOOTER_AT: Frame = 230;

/// Compact price label: `$4.8M`, `$5M`, `$950K`, `$500`.
pub fn format_price(amount: u64) -> String {
    const MILLION: u64 = 1_000_000;
    if amount >= MILLION {
        if amount % MILLION == 0 {
            format!("${}M", amount / MILLION)
        } else {
            format!("${:.1}M", amount as f64 / MILLION as f64)
        }
    } else if amount >= 1_000 {
        format!("${}K", amount / 1_000)
    } else {
        format!("${}", group_thousands(amount))
    }
}

/// `1234567` → `1,234,567`.
pub fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[derive(Debug, Clone)]
pub struct PropertyCard {
    pub record: PropertyRecord,
    pub brand: String,
}

impl PropertyCard {
    pub fn new(record: PropertyRecord, brand: impl Into<String>) -> Self {
        PropertyCard {
            record,
            brand: brand.into(),
        }
    }

    /// Price shown at `frame`: counts up from zero over the price window.
    pub fn displayed_price(&self, frame: Frame) -> Option<String> {
        Sequence::from(PRICE_AT).local(frame).map(|local| {
            let p = progress(local, TimelineWindow::new(0, PRICE_COUNT_FRAMES), Easing::ExpOut);
            let value = count(p, 0.0, self.record.price as f64).max(0) as u64;
            match self.record.operation_type {
                OperationType::Sale => format_price(value),
                OperationType::Rent => format!("{}/mes", format_price(value)),
            }
        })
    }

    pub fn operation_label(&self) -> &'static str {
        match self.record.operation_type {
            OperationType::Sale => "En venta",
            OperationType::Rent => "En alquiler",
        }
    }

    pub fn location(&self) -> String {
        match &self.record.neighborhood {
            Some(n) if !n.trim().is_empty() => format!("{n}, {}", self.record.city),
            _ => self.record.city.clone(),
        }
    }

    /// Stat pill labels in display order, keyed by node name.
    pub fn stat_labels(&self) -> Vec<(&'static str, String)> {
        let r = &self.record;
        let mut labels = vec![
            ("card.pill.bedrooms", format!("{} dorm.", r.bedrooms)),
            ("card.pill.bathrooms", format!("{} baños", r.bathrooms)),
        ];
        if let Some(area) = r.area_m2.filter(|a| a.is_finite() && *a > 0.0) {
            labels.push(("card.pill.area", format!("{} m²", group_thousands(area.round() as u64))));
        }
        if r.parking_spaces > 0 {
            let noun = if r.parking_spaces == 1 { "cochera" } else { "cocheras" };
            labels.push(("card.pill.parking", format!("{} {noun}", r.parking_spaces)));
        }
        labels
    }

    /// Unmounted once its fade-out is over.
    fn logo(&self, frame: Frame, ctx: &SceneContext) -> Option<VisualNode> {
        Sequence::from(0)
            .with_duration(LOGO_OUT.end())
            .render(frame, |local| self.logo_mark(local, ctx))
    }

    fn logo_mark(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;
        let size = s.logo_box * 1.6;
        let mark = VisualNode::column(
            s.gap_small,
            vec![
                VisualNode::rect(size, size, size * 0.22, theme.gold_gradient()),
                VisualNode::text(theme.label(&self.brand, s.small_font, theme.gold_soft)),
            ],
        )
        .named("card.logo");
        let intro = ScaleFade {
            fade_frames: LOGO_IN,
            ..ScaleFade::logo(0, ctx.fps)
        };
        let out = Fade {
            window: LOGO_OUT,
            easing: Easing::Linear,
        };
        out.out(frame, intro.reveal(frame, mark))
    }

    fn background(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let canvas = ctx.canvas;
        let theme = &ctx.theme;
        let (w, h) = (canvas.width_f(), canvas.height_f());

        // Peaks on the last rendered frame.
        let zoom_window = TimelineWindow::between(BACKGROUND_AT, CARD_FRAMES - 1);
        let zoom = lerp(progress(frame, zoom_window, Easing::Linear), (1.0, KEN_BURNS_TO));
        let ken_burns = Layer {
            scale: zoom,
            ..Layer::default()
        };

        let picture = match self.record.cover_photo_url.as_deref().map(str::trim) {
            Some(src) if !src.is_empty() => VisualNode::image(ImageNode {
                src: src.to_string(),
                width: w,
                height: h,
                fit: ImageFit::Cover,
            })
            .named("card.background.photo"),
            _ => VisualNode::stack(vec![
                VisualNode::rect(
                    w,
                    h,
                    0.0,
                    Paint::LinearGradient {
                        angle: 135.0,
                        stops: vec![
                            GradientStop {
                                offset: 0.0,
                                color: theme.surface.mix(theme.gold, 0.12),
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
                    secondary: theme.surface,
                }
                .resolve(frame),
                DiagonalLines {
                    canvas,
                    spacing: ctx.sizes.gap_large,
                    line_width: ctx.sizes.hairline,
                    color: theme.gold.with_alpha(0.06),
                }
                .resolve(frame),
                DotGrid {
                    canvas,
                    spacing: ctx.sizes.gap_large * 2.0,
                    color: theme.text.with_alpha(0.04),
                }
                .resolve(frame),
            ])
            .named("card.background.placeholder"),
        };

        // Darken the lower half so copy stays legible over any photo.
        let scrim = VisualNode::rect(
            w,
            h,
            0.0,
            Paint::LinearGradient {
                angle: 180.0,
                stops: vec![
                    GradientStop {
                        offset: 0.35,
                        color: theme.background.with_alpha(0.0),
                    },
                    GradientStop {
                        offset: 1.0,
                        color: theme.background.with_alpha(0.92),
                    },
                ],
            },
        );

        let layers = VisualNode::stack(vec![
            VisualNode::stack(vec![picture]).with_layer(ken_burns),
            scrim,
        ])
        .named("card.background")
        .with_layer(Layer {
            clip: Some(Clip::Bounds {
                width: w,
                height: h,
            }),
            ..Layer::default()
        });
        Fade::new(BACKGROUND_AT, 20).reveal(frame, layers)
    }

    fn details(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let s = &ctx.sizes;
        let theme = &ctx.theme;
        let fps = ctx.fps;

        let tag = SlideUp::new(TAG_AT, s.gap_medium, fps).reveal(
            frame,
            pill(
                ctx,
                self.operation_label(),
                theme.background,
                theme.gold_gradient(),
            )
            .named("card.tag"),
        );

        let mut rows = vec![tag];

        rows.extend(Sequence::from(TITLE_AT).render(frame, |local| {
            let title = theme.display(self.record.title.clone(), s.card_title_font, theme.text);
            CharacterReveal::new(title, 0)
                .resolve(local)
                .named("card.title")
        }));

        rows.extend(Sequence::from(LOCATION_AT).render(frame, |local| {
            SlideUp::new(0, s.gap_medium, fps).reveal(
                local,
                VisualNode::text(theme.body(self.location(), s.body_font, theme.muted))
                    .named("card.location"),
            )
        }));

        if let Some(price) = self.displayed_price(frame) {
            rows.push(
                VisualNode::text(theme.display(price, s.stat_font, theme.gold)).named("card.price"),
            );
        }

        rows.extend(Sequence::from(PILLS_AT).render(frame, |local| {
            let pills = self
                .stat_labels()
                .into_iter()
                .enumerate()
                .map(|(i, (name, label))| {
                    SlideUp::new(i as Frame * PILL_STAGGER, s.gap_medium, fps).reveal(
                        local,
                        stat_pill(
                            ctx,
                            &label,
                            theme.text,
                            Paint::Solid {
                                color: theme.surface.with_alpha(0.8),
                            },
                        )
                        .named(name),
                    )
                })
                .collect();
            VisualNode::row(s.gap_small, pills).named("card.pills")
        }));

        rows.push(
            SlideUp::new(FOOTER_AT, s.gap_medium, fps).reveal(
                frame,
                VisualNode::row(
                    s.gap_medium,
                    vec![
                        VisualNode::text(theme.label(&self.brand, s.small_font, theme.gold_soft)),
                        VisualNode::text(theme.body(
                            self.record.property_type.clone(),
                            s.small_font,
                            theme.muted,
                        )),
                    ],
                )
                .named("card.footer"),
            ),
        );

        VisualNode::column_start(s.gap_medium, rows)
            .named("card.details")
            .at(s.padding, s.padding)
    }
}

impl Scene for PropertyCard {
    fn name(&self) -> &'static str {
        "property_card"
    }

    fn duration(&self) -> Frame {
        CARD_FRAMES
    }

    fn render(&self, frame: Frame, ctx: &SceneContext) -> VisualNode {
        let mut layers = vec![
            VisualNode::rect(
                ctx.canvas.width_f(),
                ctx.canvas.height_f(),
                0.0,
                Paint::Solid {
                    color: ctx.theme.background,
                },
            ),
            self.background(frame, ctx),
            self.details(frame, ctx),
        ];
        layers.extend(self.logo(frame, ctx));
        VisualNode::stack(layers).named("card")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::scenes::testing::{landscape, opacity_of, portrait};
    use crate::types::{Align, Layout, NodeKind};

    fn card(record: PropertyRecord) -> PropertyCard {
        PropertyCard::new(record, "Aurea Propiedades")
    }

    #[test]
    fn price_formatting() {
        assert_eq!(format_price(4_800_000), "$4.8M");
        assert_eq!(format_price(5_000_000), "$5M");
        assert_eq!(format_price(950_000), "$950K");
        assert_eq!(format_price(999_999), "$999K");
        assert_eq!(format_price(1_000), "$1K");
        assert_eq!(format_price(500), "$500");
        assert_eq!(format_price(0), "$0");
    }

    #[test]
    fn thousands_grouping() {
        assert_eq!(group_thousands(7), "7");
        assert_eq!(group_thousands(1_250), "1,250");
        assert_eq!(group_thousands(12_345_678), "12,345,678");
    }

    #[test]
    fn price_counts_up_then_lands() {
        let c = card(PropertyRecord::default());
        assert_eq!(c.displayed_price(159), None);
        assert_eq!(c.displayed_price(PRICE_AT).as_deref(), Some("$0"));
        assert_eq!(c.displayed_price(210).as_deref(), Some("$4.8M"));
        assert_eq!(c.displayed_price(269).as_deref(), Some("$4.8M"));
    }

    #[test]
    fn rent_listings_show_monthly_price() {
        let c = card(PropertyRecord {
            price: 950_000,
            operation_type: OperationType::Rent,
            ..PropertyRecord::default()
        });
        assert_eq!(c.displayed_price(240).as_deref(), Some("$950K/mes"));
        assert_eq!(c.operation_label(), "En alquiler");
    }

    #[test]
    fn first_frame_is_logo_intro_only() {
        let node = card(PropertyRecord::default()).render(0, &portrait());
        let logo = node.find("card.logo").unwrap();
        assert!(logo.layer.scale < 1.0);
        assert_eq!(opacity_of(&node, "card.logo"), 0.0);
        assert!(node.find("card.title").is_none());
        assert!(node.find("card.price").is_none());
    }

    #[test]
    fn missing_photo_paints_placeholder() {
        let ctx = portrait();
        let node = card(PropertyRecord::default()).render(200, &ctx);
        assert!(node.find("card.background.placeholder").is_some());
        assert!(node.find("card.background.photo").is_none());

        let with_photo = card(PropertyRecord {
            cover_photo_url: Some("https://cdn.example/cover.jpg".into()),
            ..PropertyRecord::default()
        })
        .render(200, &ctx);
        assert!(with_photo.find("card.background.photo").is_some());

        let blank = card(PropertyRecord {
            cover_photo_url: Some("  ".into()),
            ..PropertyRecord::default()
        })
        .render(200, &ctx);
        assert!(blank.find("card.background.placeholder").is_some());
    }

    #[test]
    fn ken_burns_zooms_across_the_active_window() {
        let ctx = portrait();
        let scale_at = |frame| {
            let node = card(PropertyRecord::default()).render(frame, &ctx);
            node.find("card.background").unwrap().children()[0].layer.scale
        };
        assert_eq!(scale_at(40), 1.0);
        assert!(scale_at(150) > 1.0 && scale_at(150) < KEN_BURNS_TO);
        assert!((scale_at(CARD_FRAMES - 1) - KEN_BURNS_TO).abs() < 1e-9);
    }

    #[test]
    fn optional_stats_are_dropped() {
        let c = card(PropertyRecord {
            area_m2: None,
            parking_spaces: 0,
            neighborhood: None,
            ..PropertyRecord::default()
        });
        let names: Vec<_> = c.stat_labels().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["card.pill.bedrooms", "card.pill.bathrooms"]);
        assert_eq!(c.location(), "Tigre");

        let node = c.render(260, &portrait());
        assert!(node.find("card.pill.area").is_none());
        assert!(node.find("card.pill.parking").is_none());
        assert_eq!(node.find("card.location").unwrap().text_content(), "Tigre");
    }

    #[test]
    fn pills_are_staggered() {
        let node = card(PropertyRecord::default()).render(PILLS_AT + 4, &portrait());
        assert!(opacity_of(&node, "card.pill.bedrooms") > 0.0);
        assert_eq!(opacity_of(&node, "card.pill.area"), 0.0);
        let full = card(PropertyRecord::default()).render(269, &portrait());
        assert_eq!(
            full.find("card.pill.area").unwrap().text_content(),
            "320 m²"
        );
        assert_eq!(
            full.find("card.pill.bathrooms").unwrap().text_content(),
            "3 baños"
        );
    }

    #[test]
    fn title_size_comes_from_sizing() {
        for ctx in [landscape(), portrait()] {
            let node = card(PropertyRecord::default()).render(CARD_FRAMES - 1, &ctx);
            let title = node.find("card.title").unwrap();
            let mut sizes = Vec::new();
            title.walk(&mut |n, _| {
                if let NodeKind::Text(t) = &n.kind {
                    sizes.push(t.size);
                }
            });
            assert!(!sizes.is_empty());
            assert!(sizes.iter().all(|&size| size == ctx.sizes.card_title_font));
        }
    }

    #[test]
    fn details_are_left_aligned() {
        let node = card(PropertyRecord::default()).render(CARD_FRAMES - 1, &landscape());
        let details = node.find("card.details").unwrap();
        assert!(matches!(
            &details.kind,
            NodeKind::Group {
                layout: Layout::Column {
                    align: Align::Start,
                    ..
                },
                ..
            }
        ));
    }

    #[test]
    fn logo_unmounts_after_fading_out() {
        let c = card(PropertyRecord::default());
        assert!(c.render(LOGO_OUT.end() - 1, &portrait()).find("card.logo").is_some());
        assert!(c.render(LOGO_OUT.end(), &portrait()).find("card.logo").is_none());
    }
}
