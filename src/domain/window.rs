use serde::{Deserialize, Serialize};
use validator::Validate;

use super::Orientation;
use crate::error::{ensure_finite, EnvelopeError};

/// Raw window description as entered by the user or read from a project file.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct WindowSpec {
    #[validate(length(min = 1))]
    pub id: String,
    /// Free-form façade label; unknown labels fall back to the most
    /// restrictive orientation
    pub orientation: String,
    /// Window width (m)
    #[validate(range(exclusive_min = 0.0))]
    pub width_m: f64,
    /// Window height (m)
    #[validate(range(exclusive_min = 0.0))]
    pub height_m: f64,
    /// Total façade area including the window (m²)
    #[validate(range(exclusive_min = 0.0))]
    pub facade_area_m2: f64,
    /// Window transmittance (W/(m²K))
    #[validate(range(exclusive_min = 0.0))]
    pub window_u: f64,
    /// Opaque wall transmittance (W/(m²K))
    #[validate(range(exclusive_min = 0.0))]
    pub wall_u: f64,
}

/// A validated window on a façade.
///
/// The façade area is never smaller than the window area.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowUnit {
    id: String,
    orientation: Orientation,
    width_m: f64,
    height_m: f64,
    facade_area_m2: f64,
    window_u: f64,
    wall_u: f64,
}

impl TryFrom<WindowSpec> for WindowUnit {
    type Error = EnvelopeError;

    fn try_from(spec: WindowSpec) -> Result<Self, Self::Error> {
        ensure_finite("width_m", spec.width_m)?;
        ensure_finite("height_m", spec.height_m)?;
        ensure_finite("facade_area_m2", spec.facade_area_m2)?;
        ensure_finite("window_u", spec.window_u)?;
        ensure_finite("wall_u", spec.wall_u)?;
        spec.validate()?;

        let window_area = spec.width_m * spec.height_m;
        if exceeds_facade(window_area, spec.facade_area_m2) {
            return Err(EnvelopeError::InvalidInput(format!(
                "window '{}': facade area {:.2} m² is smaller than window area {:.2} m²",
                spec.id, spec.facade_area_m2, window_area
            )));
        }

        Ok(Self {
            orientation: Orientation::from_label(&spec.orientation),
            id: spec.id,
            width_m: spec.width_m,
            height_m: spec.height_m,
            facade_area_m2: spec.facade_area_m2,
            window_u: spec.window_u,
            wall_u: spec.wall_u,
        })
    }
}

/// Relative slack for `width × height` rounding above an equal façade area.
const AREA_TOLERANCE: f64 = 4.0 * f64::EPSILON;

fn exceeds_facade(window_area: f64, facade_area: f64) -> bool {
    window_area - facade_area > AREA_TOLERANCE * facade_area.max(1.0)
}

impl WindowUnit {
    /// Validates and builds a window; see [`WindowSpec`] for the units.
    pub fn new(
        id: impl Into<String>,
        orientation: Orientation,
        width_m: f64,
        height_m: f64,
        facade_area_m2: f64,
        window_u: f64,
        wall_u: f64,
    ) -> Result<Self, EnvelopeError> {
        WindowSpec {
            id: id.into(),
            orientation: orientation.to_string(),
            width_m,
            height_m,
            facade_area_m2,
            window_u,
            wall_u,
        }
        .try_into()
    }

    /// Caller-supplied identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Façade orientation after label fallback
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Window width (m)
    pub fn width_m(&self) -> f64 {
        self.width_m
    }

    /// Window height (m)
    pub fn height_m(&self) -> f64 {
        self.height_m
    }

    /// Glazed area, width × height (m²)
    pub fn window_area_m2(&self) -> f64 {
        self.width_m * self.height_m
    }

    /// Total façade area including the window (m²)
    pub fn facade_area_m2(&self) -> f64 {
        self.facade_area_m2
    }

    /// Façade area not covered by the window (m²), never negative
    pub fn opaque_area_m2(&self) -> f64 {
        (self.facade_area_m2 - self.window_area_m2()).max(0.0)
    }

    /// Window transmittance (W/(m²K))
    pub fn window_u(&self) -> f64 {
        self.window_u
    }

    /// Opaque wall transmittance (W/(m²K))
    pub fn wall_u(&self) -> f64 {
        self.wall_u
    }

    /// Heat loss coefficient of the whole façade (W/K)
    pub fn facade_loss_w_k(&self) -> f64 {
        self.window_u * self.window_area_m2() + self.wall_u * self.opaque_area_m2()
    }
}

/// Append-only list of windows for one project.
///
/// Entries can be appended or the whole ledger cleared; individual entries
/// are never edited in place.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WindowLedger {
    units: Vec<WindowUnit>,
}

impl WindowLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a window at the end and returns it.
    pub fn append(&mut self, unit: WindowUnit) -> &WindowUnit {
        self.units.push(unit);
        &self.units[self.units.len() - 1]
    }

    /// Removes every window.
    pub fn clear(&mut self) {
        self.units.clear();
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Windows in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, WindowUnit> {
        self.units.iter()
    }

    pub fn as_slice(&self) -> &[WindowUnit] {
        &self.units
    }
}

impl FromIterator<WindowUnit> for WindowLedger {
    fn from_iter<T: IntoIterator<Item = WindowUnit>>(iter: T) -> Self {
        Self {
            units: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a WindowLedger {
    type Item = &'a WindowUnit;
    type IntoIter = std::slice::Iter<'a, WindowUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
