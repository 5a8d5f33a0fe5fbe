//! Composition registry: the render targets a driver can ask for.
//!
//! Each target is an id, a canvas and a way to build its timeline from
//! (optional) JSON props. The two sales video targets and the two card
//! targets share all scene logic and differ only in canvas.

use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::types::{Frame, VisualNode};

use super::atmosphere::{FilmGrain, Vignette};
use super::card::{PropertyCard, CARD_FRAMES};
use super::primitives::Resolve;
use super::scenes::{
    BeforeAfter, CallToAction, Hook, Pain, Process, Promise, Scene, SceneContext, Stats,
};
use super::sequencer::Series;
use super::source::{
    Canvas, CompositionConfig, PropertyRecord, SalesVideoProps, SpringConfig, DEFAULT_BRAND,
};
use super::theme::Theme;
use super::transitions::{linear, spring, Direction, Transition};

pub const FPS: u32 = 30;

const GRAIN_INTENSITY: f64 = 0.07;
const VIGNETTE_STRENGTH: f64 = 0.55;
/// Damping of the spring-timed scene transitions: fast, no overshoot.
const TRANSITION_DAMPING: f64 = 200.0;

const LANDSCAPE: Canvas = Canvas {
    width: 1920,
    height: 1080,
};
const PORTRAIT: Canvas = Canvas {
    width: 1080,
    height: 1920,
};
const SQUARE: Canvas = Canvas {
    width: 1080,
    height: 1080,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    SalesVideo,
    PropertyCard,
}

#[derive(Debug, Clone, Copy)]
pub struct Registration {
    pub id: &'static str,
    pub canvas: Canvas,
    pub kind: Kind,
}

pub const REGISTRY: [Registration; 4] = [
    Registration {
        id: "SalesVideo30Dias",
        canvas: LANDSCAPE,
        kind: Kind::SalesVideo,
    },
    Registration {
        id: "SalesVideo30DiasVertical",
        canvas: PORTRAIT,
        kind: Kind::SalesVideo,
    },
    Registration {
        id: "PropertyCard",
        canvas: SQUARE,
        kind: Kind::PropertyCard,
    },
    Registration {
        id: "PropertyCardStory",
        canvas: PORTRAIT,
        kind: Kind::PropertyCard,
    },
];

pub fn lookup(id: &str) -> Result<&'static Registration> {
    REGISTRY
        .iter()
        .find(|r| r.id == id)
        .ok_or_else(|| Error::UnknownComposition(id.to_string()))
}

/// The seven-beat sales video timeline.
pub fn sales_series(props: &SalesVideoProps) -> Series {
    let settle = || spring(SpringConfig::damped(TRANSITION_DAMPING), 20);
    Series::new(FPS)
        .scene(Hook {
            tagline: props.tagline.clone(),
        })
        .transition(Transition::fade(linear(15)))
        .scene(Pain)
        .transition(Transition::wipe(Direction::FromLeft, settle()))
        .scene(Promise)
        .transition(Transition::slide(Direction::FromRight, linear(20)))
        .scene(Process)
        .transition(Transition::fade(settle()))
        .scene(Stats)
        .transition(Transition::slide(Direction::FromBottom, linear(20)))
        .scene(BeforeAfter {
            before_image: props.before_image.clone(),
            after_image: props.after_image.clone(),
        })
        .transition(Transition::wipe(Direction::FromBottom, linear(20)))
        .scene(CallToAction {
            brand: props.brand.clone(),
            contact: props.contact.clone(),
        })
}

enum Body {
    SalesVideo(Series),
    PropertyCard(PropertyCard),
}

/// A fully bound render target. Immutable once built; every frame is a pure
/// function of the frame number.
pub struct Composition {
    config: CompositionConfig,
    ctx: SceneContext,
    body: Body,
}

impl Composition {
    /// Build `id` with the given props (defaults when `None`).
    pub fn build(id: &str, props: Option<Value>, theme: Theme) -> Result<Self> {
        let reg = lookup(id)?;
        let body = match reg.kind {
            Kind::SalesVideo => {
                let props: SalesVideoProps = bind_props(id, props)?;
                Body::SalesVideo(sales_series(&props))
            }
            Kind::PropertyCard => {
                let record: PropertyRecord = bind_props(id, props)?;
                Body::PropertyCard(PropertyCard::new(record, DEFAULT_BRAND))
            }
        };
        let duration_in_frames = match &body {
            Body::SalesVideo(series) => series.total_duration(),
            Body::PropertyCard(_) => CARD_FRAMES,
        };
        debug!("built {id}: {}x{}, {duration_in_frames} frames", reg.canvas.width, reg.canvas.height);
        Ok(Composition {
            config: CompositionConfig {
                id: reg.id.to_string(),
                canvas: reg.canvas,
                fps: FPS,
                duration_in_frames,
            },
            ctx: SceneContext::new(reg.canvas, FPS, theme),
            body,
        })
    }

    /// Every registered target built with default props.
    pub fn all(theme: &Theme) -> Result<Vec<Self>> {
        REGISTRY
            .iter()
            .map(|r| Self::build(r.id, None, theme.clone()))
            .collect()
    }

    pub fn config(&self) -> &CompositionConfig {
        &self.config
    }

    pub fn id(&self) -> &str {
        &self.config.id
    }

    pub fn duration(&self) -> Frame {
        self.config.duration_in_frames
    }

    /// Out-of-range frames are clamped into the composition.
    pub fn clamp_frame(&self, frame: Frame) -> Frame {
        frame.clamp(0, (self.duration() - 1).max(0))
    }

    /// Scenes mounted at `frame` with their local frames.
    pub fn locate(&self, frame: Frame) -> Vec<(&'static str, Frame)> {
        let frame = self.clamp_frame(frame);
        match &self.body {
            Body::SalesVideo(series) => series.locate(frame),
            Body::PropertyCard(card) => vec![(card.name(), frame)],
        }
    }

    pub fn evaluate(&self, frame: Frame) -> VisualNode {
        let frame = self.clamp_frame(frame);
        let canvas = self.ctx.canvas;
        match &self.body {
            Body::SalesVideo(series) => VisualNode::stack(vec![
                series.evaluate(frame, &self.ctx),
                FilmGrain {
                    canvas,
                    intensity: GRAIN_INTENSITY,
                }
                .resolve(frame),
                Vignette {
                    canvas,
                    strength: VIGNETTE_STRENGTH,
                }
                .resolve(frame),
            ])
            .named("sales_video"),
            Body::PropertyCard(card) => card.render(frame, &self.ctx),
        }
    }
}

/// Deserialize props, warning about every field left at its default.
fn bind_props<T>(id: &str, props: Option<Value>) -> Result<T>
where
    T: DeserializeOwned + Default + Serialize,
{
    let Some(value) = props else {
        return Ok(T::default());
    };
    if let (Value::Object(given), Ok(Value::Object(defaults))) =
        (&value, serde_json::to_value(T::default()))
    {
        for key in defaults.keys().filter(|k| !given.contains_key(*k)) {
            warn!("{id}: props omit '{key}', using the default");
        }
    }
    serde_json::from_value(value).map_err(|source| Error::InvalidProps {
        id: id.to_string(),
        source,
    })
}
