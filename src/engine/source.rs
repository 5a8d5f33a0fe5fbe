//! Source types: the authored, immutable inputs of a render.
//!
//! These types describe *when* things happen and *what data* a composition
//! binds, never how a frame looks. Everything here is built once at
//! registration time and read-only for the life of a render.

use serde::{Deserialize, Serialize};

pub use crate::types::Frame;

/// When an effect is active: progress is 0 before `start` and 1 from
/// `start + duration` on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimelineWindow {
    pub start: Frame,
    pub duration: Frame,
}

impl TimelineWindow {
    /// Build a window; negative durations collapse to an instantaneous step.
    pub fn new(start: Frame, duration: Frame) -> Self {
        TimelineWindow {
            start,
            duration: duration.max(0),
        }
    }

    /// Window covering `[start, end)`.
    pub fn between(start: Frame, end: Frame) -> Self {
        Self::new(start, end - start)
    }

    pub fn end(&self) -> Frame {
        self.start + self.duration.max(0)
    }
}

/// Physical parameters of a spring-driven progress value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpringConfig {
    pub damping: f64,
    pub stiffness: f64,
    pub mass: f64,
    pub overshoot_clamping: bool,
}

impl Default for SpringConfig {
    fn default() -> Self {
        SpringConfig {
            damping: 10.0,
            stiffness: 100.0,
            mass: 1.0,
            overshoot_clamping: false,
        }
    }
}

impl SpringConfig {
    pub fn damped(damping: f64) -> Self {
        SpringConfig {
            damping,
            ..Self::default()
        }
    }
}

/// Output pixel dimensions of a render target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    pub fn width_f(&self) -> f64 {
        self.width as f64
    }

    pub fn height_f(&self) -> f64 {
        self.height as f64
    }
}

/// Registration data of one render target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositionConfig {
    pub id: String,
    pub canvas: Canvas,
    pub fps: u32,
    pub duration_in_frames: Frame,
}

// ---------------------------------------------------------------------------
// Bound data
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OperationType {
    Sale,
    Rent,
}

/// A listing as served by the property API. Read-only input to the card.
///
/// Fields absent from the JSON take the sample listing's values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PropertyRecord {
    pub title: String,
    pub price: u64,
    pub operation_type: OperationType,
    pub property_type: String,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area_m2: Option<f64>,
    pub parking_spaces: u32,
    pub neighborhood: Option<String>,
    pub city: String,
    pub cover_photo_url: Option<String>,
}

impl Default for PropertyRecord {
    fn default() -> Self {
        PropertyRecord {
            title: "Casa moderna con jardín".into(),
            price: 4_800_000,
            operation_type: OperationType::Sale,
            property_type: "Casa".into(),
            bedrooms: 4,
            bathrooms: 3,
            area_m2: Some(320.0),
            parking_spaces: 2,
            neighborhood: Some("Nordelta".into()),
            city: "Tigre".into(),
            cover_photo_url: None,
        }
    }
}

pub const DEFAULT_BRAND: &str = "Aurea Propiedades";

/// Brand and asset inputs of the sales video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SalesVideoProps {
    pub brand: String,
    pub tagline: String,
    pub contact: String,
    pub before_image: String,
    pub after_image: String,
}

impl Default for SalesVideoProps {
    fn default() -> Self {
        SalesVideoProps {
            brand: DEFAULT_BRAND.into(),
            tagline: "Inmobiliaria boutique".into(),
            contact: "aureapropiedades.com · +54 11 5555 0130".into(),
            before_image: "assets/before.jpg".into(),
            after_image: "assets/after.jpg".into(),
        }
    }
}
