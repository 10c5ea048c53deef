use serde::{Deserialize, Serialize};

use crate::anchor::Placement;
use crate::vec3::Vec3;

/// One measurement or call-out attached to a shape.
///
/// The magnitude is required unless the record is a pure flyout target.
/// The text/arrow layout style is derived from available space at render
/// time and never stored here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionRecord {
    /// Measured value. None only for pure flyout targets.
    pub magnitude: Option<f64>,
    /// Free-text qualifier shown after the value ("bore", "stroke", ...).
    pub context: Option<String>,
    /// Symmetric tolerance, rendered as ` (±v)`.
    pub tolerance: Option<f64>,
    pub units: Option<String>,
    pub is_diameter: bool,
    pub is_radius: bool,
    pub is_degrees: bool,
    /// Flyout records get a bent leader instead of a dimension line.
    pub is_flyout: bool,
    /// Base distance of the dimension line from the shape surface.
    pub extension: Option<f64>,
    pub placement: Placement,
    pub font_size: f64,
    pub font_thickness: f64,
    pub color: Option<String>,
    /// Absolute position override for flyout targets.
    pub position: Option<Vec3>,
}

impl DimensionRecord {
    /// A plain linear measurement.
    pub fn linear(magnitude: f64, placement: Placement) -> Self {
        Self {
            magnitude: Some(magnitude),
            context: None,
            tolerance: None,
            units: None,
            is_diameter: false,
            is_radius: false,
            is_degrees: false,
            is_flyout: false,
            extension: None,
            placement,
            font_size: 4.0,
            font_thickness: 0.5,
            color: None,
            position: None,
        }
    }

    /// A diameter measurement (Ø prefix).
    pub fn diameter(magnitude: f64, placement: Placement) -> Self {
        Self {
            is_diameter: true,
            ..Self::linear(magnitude, placement)
        }
    }

    /// A radius measurement (R prefix).
    pub fn radius(magnitude: f64, placement: Placement) -> Self {
        Self {
            is_radius: true,
            ..Self::linear(magnitude, placement)
        }
    }

    /// An angular measurement (° suffix).
    pub fn degrees(magnitude: f64, placement: Placement) -> Self {
        Self {
            is_degrees: true,
            ..Self::linear(magnitude, placement)
        }
    }

    /// A flyout call-out with no measured value of its own.
    pub fn flyout(placement: Placement) -> Self {
        Self {
            magnitude: None,
            is_flyout: true,
            ..Self::linear(0.0, placement)
        }
    }

    pub fn with_context(&self, context: impl Into<String>) -> Self {
        Self {
            context: Some(context.into()),
            ..self.clone()
        }
    }

    pub fn with_tolerance(&self, tolerance: f64) -> Self {
        Self {
            tolerance: Some(tolerance),
            ..self.clone()
        }
    }

    pub fn with_units(&self, units: impl Into<String>) -> Self {
        Self {
            units: Some(units.into()),
            ..self.clone()
        }
    }

    pub fn with_extension(&self, extension: f64) -> Self {
        Self {
            extension: Some(extension),
            ..self.clone()
        }
    }

    pub fn with_font_size(&self, font_size: f64) -> Self {
        Self {
            font_size,
            ..self.clone()
        }
    }

    pub fn with_position(&self, position: Vec3) -> Self {
        Self {
            position: Some(position),
            ..self.clone()
        }
    }

    pub fn as_flyout(&self) -> Self {
        Self {
            is_flyout: true,
            ..self.clone()
        }
    }
}
