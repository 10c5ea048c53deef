use serde::{Deserialize, Serialize};

use redline_types::Vec3;

/// Errors from the geometry provider boundary.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeomError {
    #[error("anchor '{name}' not found on {family} shape")]
    AnchorNotFound { name: String, family: &'static str },

    #[error("degenerate anchor direction on {family} shape")]
    DegenerateAnchor { family: &'static str },

    #[error("provider rejected primitive: {reason}")]
    EmitRejected { reason: String },
}

/// Measured footprint of a rendered text block.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// A block of text to be meshed by the geometry engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBlock {
    pub content: String,
    pub font_size: f64,
    pub thickness: f64,
    pub at: Vec3,
    pub color: Option<String>,
    pub alpha: f64,
}

impl TextBlock {
    pub fn new(content: impl Into<String>, font_size: f64, at: Vec3) -> Self {
        Self {
            content: content.into(),
            font_size,
            thickness: 0.5,
            at,
            color: None,
            alpha: 1.0,
        }
    }
}

/// A polyline stroke, optionally dashed, with optional arrowheads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokePath {
    pub points: Vec<Vec3>,
    pub width: f64,
    pub dashed: bool,
    pub arrow_start: bool,
    pub arrow_end: bool,
}

impl StrokePath {
    pub fn line(points: Vec<Vec3>, width: f64) -> Self {
        Self {
            points,
            width,
            dashed: false,
            arrow_start: false,
            arrow_end: false,
        }
    }

    pub fn with_arrows(mut self, start: bool, end: bool) -> Self {
        self.arrow_start = start;
        self.arrow_end = end;
        self
    }

    pub fn dashed(mut self) -> Self {
        self.dashed = true;
        self
    }
}

/// Extents of an attachable region handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RegionSize {
    Cuboid { size: Vec3 },
    Cylinder { r: f64, h: f64 },
}

/// A placed attachable region: target rings, flyout backing plates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttachableRegion {
    pub at: Vec3,
    pub size: RegionSize,
    pub alpha: f64,
}
