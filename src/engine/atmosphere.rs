//! Procedural background and overlay layers.
//!
//! Every generator is re-derived from the frame number and fixed constants.
//! Nothing carries state between frames, so any frame can be rendered on any
//! worker without having seen the frames before it.

use std::f64::consts::TAU;

use crate::types::{Color, Frame, GradientStop, GrainNode, Layer, Paint, VisualNode};

use super::primitives::Resolve;
use super::source::Canvas;

/// Grain seeds repeat on this cycle.
pub const GRAIN_CYCLE: Frame = 200;

/// Fractional part of the golden ratio; spreads particle phases evenly.
const GOLDEN: f64 = 0.618_033_988_749_895;

// ---------------------------------------------------------------------------
// Noise
// ---------------------------------------------------------------------------

fn fnv1a(key: &str) -> u64 {
    key.bytes().fold(0xcbf2_9ce4_8422_2325, |hash, b| {
        (hash ^ b as u64).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

fn splitmix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    x = (x ^ (x >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    x ^ (x >> 31)
}

fn lattice_gradient(seed: u64, ix: i64, iy: i64) -> (f64, f64) {
    let h = splitmix(seed ^ splitmix(ix as u64 ^ splitmix(iy as u64)));
    let angle = (h >> 11) as f64 / (1u64 << 53) as f64 * TAU;
    (angle.cos(), angle.sin())
}

fn fade_curve(t: f64) -> f64 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// Smooth 2D gradient noise in roughly `[-1, 1]`, keyed by a named seed.
pub fn noise2d(seed: &str, x: f64, y: f64) -> f64 {
    let seed = fnv1a(seed);
    let (x0, y0) = (x.floor(), y.floor());
    let (fx, fy) = (x - x0, y - y0);
    let (ix, iy) = (x0 as i64, y0 as i64);

    let dot = |cx: i64, cy: i64, dx: f64, dy: f64| {
        let (gx, gy) = lattice_gradient(seed, cx, cy);
        gx * dx + gy * dy
    };
    let n00 = dot(ix, iy, fx, fy);
    let n10 = dot(ix + 1, iy, fx - 1.0, fy);
    let n01 = dot(ix, iy + 1, fx, fy - 1.0);
    let n11 = dot(ix + 1, iy + 1, fx - 1.0, fy - 1.0);

    let (u, v) = (fade_curve(fx), fade_curve(fy));
    let top = n00 + (n10 - n00) * u;
    let bottom = n01 + (n11 - n01) * u;
    ((top + (bottom - top) * v) * std::f64::consts::SQRT_2).clamp(-1.0, 1.0)
}

fn fract(x: f64) -> f64 {
    x - x.floor()
}

fn full_rect(canvas: Canvas, fill: Paint) -> VisualNode {
    VisualNode::rect(canvas.width_f(), canvas.height_f(), 0.0, fill)
}

// ---------------------------------------------------------------------------
// Time-driven layers
// ---------------------------------------------------------------------------

/// Film grain re-seeded every frame on a short repeating cycle.
#[derive(Debug, Clone, Copy)]
pub struct FilmGrain {
    pub canvas: Canvas,
    pub intensity: f64,
}

impl FilmGrain {
    pub fn seed_for(frame: Frame) -> u32 {
        frame.rem_euclid(GRAIN_CYCLE) as u32
    }
}

impl Resolve for FilmGrain {
    fn resolve(&self, frame: Frame) -> VisualNode {
        VisualNode::new(crate::types::NodeKind::Grain(GrainNode {
            width: self.canvas.width_f(),
            height: self.canvas.height_f(),
            seed: Self::seed_for(frame),
            base_frequency: 0.85,
            octaves: 4,
        }))
        .named("atmosphere.grain")
        .with_layer(Layer {
            opacity: self.intensity,
            ..Layer::default()
        })
    }
}

#[derive(Debug, Clone, Copy)]
struct Blob {
    key: &'static str,
    base_x: f64,
    base_y: f64,
    radius: f64,
    drift: f64,
    speed: f64,
    opacity: f64,
}

const BLOBS: [Blob; 3] = [
    Blob {
        key: "aurora-a",
        base_x: 22.0,
        base_y: 28.0,
        radius: 55.0,
        drift: 14.0,
        speed: 0.006,
        opacity: 0.32,
    },
    Blob {
        key: "aurora-b",
        base_x: 78.0,
        base_y: 64.0,
        radius: 48.0,
        drift: 12.0,
        speed: 0.005,
        opacity: 0.24,
    },
    Blob {
        key: "aurora-c",
        base_x: 50.0,
        base_y: 92.0,
        radius: 40.0,
        drift: 10.0,
        speed: 0.008,
        opacity: 0.18,
    },
];

/// Soft radial blobs drifting on noise instead of keyframes.
#[derive(Debug, Clone, Copy)]
pub struct Aurora {
    pub canvas: Canvas,
    pub primary: Color,
    pub secondary: Color,
}

impl Resolve for Aurora {
    fn resolve(&self, frame: Frame) -> VisualNode {
        let t = frame as f64;
        let blobs = BLOBS
            .iter()
            .enumerate()
            .map(|(i, blob)| {
                let color = if i % 2 == 0 { self.primary } else { self.secondary };
                let sample = |axis: &str| {
                    noise2d(&format!("{}-{axis}", blob.key), t * blob.speed, 0.0)
                };
                let opacity = (blob.opacity + sample("o") * 0.08).clamp(0.0, 1.0);
                full_rect(
                    self.canvas,
                    Paint::RadialGradient {
                        center_x: blob.base_x + sample("x") * blob.drift,
                        center_y: blob.base_y + sample("y") * blob.drift,
                        radius: blob.radius,
                        stops: vec![
                            GradientStop {
                                offset: 0.0,
                                color,
                            },
                            GradientStop {
                                offset: 1.0,
                                color: color.with_alpha(0.0),
                            },
                        ],
                    },
                )
                .with_layer(Layer {
                    opacity,
                    ..Layer::default()
                })
            })
            .collect();
        VisualNode::stack(blobs).named("atmosphere.aurora")
    }
}

/// Fixed-count particles rising slowly; each phase comes from its index.
#[derive(Debug, Clone, Copy)]
pub struct ParticleField {
    pub canvas: Canvas,
    pub count: usize,
    pub color: Color,
    pub size: f64,
}

impl ParticleField {
    pub fn new(canvas: Canvas, color: Color, size: f64) -> Self {
        ParticleField {
            canvas,
            count: 32,
            color,
            size,
        }
    }

    pub fn phase(index: usize) -> f64 {
        fract(index as f64 * GOLDEN)
    }
}

impl Resolve for ParticleField {
    fn resolve(&self, frame: Frame) -> VisualNode {
        let (w, h) = (self.canvas.width_f(), self.canvas.height_f());
        let t = frame as f64;
        let particles = (0..self.count)
            .map(|i| {
                let phase = Self::phase(i);
                let x = fract(phase * 7.0 + i as f64 * 0.013) * w;
                let speed = 0.04 + phase * 0.08;
                // Wraps a little past the edges so particles never pop.
                let travel = fract(phase + t * speed / 110.0) * 1.1;
                let y = (1.05 - travel) * h;
                let twinkle = 0.5 + 0.5 * (t * 0.06 + phase * TAU).sin();
                let size = self.size * (0.6 + phase * 0.8);
                VisualNode::rect(size, size, size / 2.0, Paint::Solid { color: self.color })
                    .at(x, y)
                    .with_layer(Layer {
                        opacity: 0.12 + 0.38 * twinkle,
                        ..Layer::default()
                    })
            })
            .collect();
        VisualNode::stack(particles).named("atmosphere.particles")
    }
}

// ---------------------------------------------------------------------------
// Static layers
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy)]
pub struct DotGrid {
    pub canvas: Canvas,
    pub spacing: f64,
    pub color: Color,
}

impl Resolve for DotGrid {
    fn resolve(&self, _frame: Frame) -> VisualNode {
        full_rect(
            self.canvas,
            Paint::DotPattern {
                spacing: self.spacing,
                dot_radius: (self.spacing * 0.06).max(1.0),
                color: self.color,
            },
        )
        .named("atmosphere.dots")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct DiagonalLines {
    pub canvas: Canvas,
    pub spacing: f64,
    pub line_width: f64,
    pub color: Color,
}

impl Resolve for DiagonalLines {
    fn resolve(&self, _frame: Frame) -> VisualNode {
        full_rect(
            self.canvas,
            Paint::LinePattern {
                spacing: self.spacing,
                angle: 45.0,
                line_width: self.line_width,
                color: self.color,
            },
        )
        .named("atmosphere.lines")
    }
}

#[derive(Debug, Clone, Copy)]
pub struct Vignette {
    pub canvas: Canvas,
    pub strength: f64,
}

impl Resolve for Vignette {
    fn resolve(&self, _frame: Frame) -> VisualNode {
        full_rect(
            self.canvas,
            Paint::RadialGradient {
                center_x: 50.0,
                center_y: 50.0,
                radius: 75.0,
                stops: vec![
                    GradientStop {
                        offset: 0.55,
                        color: Color::TRANSPARENT,
                    },
                    GradientStop {
                        offset: 1.0,
                        color: Color::BLACK.with_alpha(self.strength),
                    },
                ],
            },
        )
        .named("atmosphere.vignette")
    }
}
