//! Responsive sizing: the only orientation-aware code in the engine.
//!
//! Every size is a fraction of the canvas width. Portrait canvases are
//! narrower, so their fractions are larger to keep text legible.

use serde::Serialize;

use super::source::Canvas;

/// Pixel dimensions every scene lays itself out with.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sizes {
    pub padding: f64,
    pub gap_small: f64,
    pub gap_medium: f64,
    pub gap_large: f64,
    pub display_font: f64,
    pub h1: f64,
    pub h2: f64,
    pub h3: f64,
    pub card_title_font: f64,
    pub stat_font: f64,
    pub body_font: f64,
    pub small_font: f64,
    pub tag_font: f64,
    pub pill_font: f64,
    pub icon: f64,
    pub logo_box: f64,
    pub max_content_width: f64,
    /// Borders on pills, cards and badges.
    pub hairline: f64,
    /// Emphasized outlines such as the process ring and the wipe knob.
    pub stroke: f64,
    /// Thickness of accent rules and the before/after divider.
    pub rule: f64,
}

struct Fractions {
    padding: f64,
    gap_small: f64,
    gap_medium: f64,
    gap_large: f64,
    display_font: f64,
    h1: f64,
    h2: f64,
    h3: f64,
    card_title_font: f64,
    stat_font: f64,
    body_font: f64,
    small_font: f64,
    tag_font: f64,
    pill_font: f64,
    icon: f64,
    logo_box: f64,
    max_content_width: f64,
    hairline: f64,
    stroke: f64,
    rule: f64,
}

const LANDSCAPE: Fractions = Fractions {
    padding: 0.05,
    gap_small: 0.008,
    gap_medium: 0.016,
    gap_large: 0.03,
    display_font: 0.075,
    h1: 0.052,
    h2: 0.036,
    h3: 0.024,
    card_title_font: 0.036,
    stat_font: 0.07,
    body_font: 0.017,
    small_font: 0.012,
    tag_font: 0.0095,
    pill_font: 0.011,
    icon: 0.022,
    logo_box: 0.045,
    max_content_width: 0.72,
    hairline: 0.0006,
    stroke: 0.001,
    rule: 0.002,
};

const PORTRAIT: Fractions = Fractions {
    padding: 0.07,
    gap_small: 0.014,
    gap_medium: 0.026,
    gap_large: 0.05,
    display_font: 0.115,
    h1: 0.085,
    h2: 0.06,
    h3: 0.04,
    card_title_font: 0.085,
    stat_font: 0.12,
    body_font: 0.032,
    small_font: 0.024,
    tag_font: 0.019,
    pill_font: 0.022,
    icon: 0.04,
    logo_box: 0.09,
    max_content_width: 0.88,
    hairline: 0.001,
    stroke: 0.0018,
    rule: 0.0035,
};

pub fn compute_sizes(canvas: Canvas) -> Sizes {
    let f = if canvas.is_portrait() { &PORTRAIT } else { &LANDSCAPE };
    let w = canvas.width_f();
    let px = |fraction: f64| (w * fraction).round();
    // Lines never vanish on small canvases.
    let line = |fraction: f64| px(fraction).max(1.0);
    Sizes {
        padding: px(f.padding),
        gap_small: px(f.gap_small),
        gap_medium: px(f.gap_medium),
        gap_large: px(f.gap_large),
        display_font: px(f.display_font),
        h1: px(f.h1),
        h2: px(f.h2),
        h3: px(f.h3),
        card_title_font: px(f.card_title_font),
        stat_font: px(f.stat_font),
        body_font: px(f.body_font),
        small_font: px(f.small_font),
        tag_font: px(f.tag_font),
        pill_font: px(f.pill_font),
        icon: px(f.icon),
        logo_box: px(f.logo_box),
        max_content_width: px(f.max_content_width),
        hairline: line(f.hairline),
        stroke: line(f.stroke),
        rule: line(f.rule),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canvas(width: u32, height: u32) -> Canvas {
        Canvas { width, height }
    }

    #[test]
    fn landscape_full_hd() {
        let s = compute_sizes(canvas(1920, 1080));
        assert_eq!(s.padding, 96.0);
        assert_eq!(s.display_font, 144.0);
        assert_eq!(s.max_content_width, 1382.0);
    }

    #[test]
    fn portrait_uses_larger_fractions() {
        let landscape = compute_sizes(canvas(1920, 1080));
        let portrait = compute_sizes(canvas(1080, 1920));
        assert!(portrait.h1 / 1080.0 > landscape.h1 / 1920.0);
        assert!(portrait.body_font / 1080.0 > landscape.body_font / 1920.0);
    }

    #[test]
    fn sizes_scale_with_width() {
        let base = compute_sizes(canvas(1920, 1080));
        let double = compute_sizes(canvas(3840, 2160));
        assert_eq!(double.padding, base.padding * 2.0);
        assert_eq!(double.h2, base.h2 * 2.0);
        // Rounding happens per canvas, so allow one pixel.
        assert!((double.logo_box - base.logo_box * 2.0).abs() <= 1.0);
    }

    #[test]
    fn square_canvas_is_landscape() {
        let square = compute_sizes(canvas(1080, 1080));
        assert_eq!(square.card_title_font, (1080.0 * LANDSCAPE.card_title_font).round());
    }

    #[test]
    fn card_title_font_is_chosen_here() {
        assert_eq!(compute_sizes(canvas(1080, 1080)).card_title_font, 39.0);
        assert_eq!(compute_sizes(canvas(1080, 1920)).card_title_font, 92.0);
    }

    #[test]
    fn line_weights_never_vanish() {
        for (w, h) in [(1920, 1080), (1080, 1920), (1080, 1080), (320, 180)] {
            let s = compute_sizes(canvas(w, h));
            assert!(s.hairline >= 1.0 && s.stroke >= s.hairline && s.rule >= s.stroke, "{w}x{h}");
        }
    }
}
