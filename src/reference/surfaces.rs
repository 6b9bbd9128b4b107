use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::ElementKind;
use crate::error::EnvelopeError;

/// Interior/exterior surface resistances of one element kind (m²K/W).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceResistance {
    pub interior: f64,
    pub exterior: f64,
}

impl SurfaceResistance {
    pub const fn new(interior: f64, exterior: f64) -> Self {
        Self { interior, exterior }
    }

    pub fn total(&self) -> f64 {
        self.interior + self.exterior
    }
}

/// Horizontal heat flow through walls and doors
pub const WALL_SURFACES: SurfaceResistance = SurfaceResistance::new(0.13, 0.04);
/// Upward heat flow through roofs
pub const ROOF_SURFACES: SurfaceResistance = SurfaceResistance::new(0.10, 0.04);
/// Downward heat flow through ventilated floors
pub const FLOOR_SURFACES: SurfaceResistance = SurfaceResistance::new(0.17, 0.04);

/// Surface resistances per element kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceResistances {
    by_kind: BTreeMap<ElementKind, SurfaceResistance>,
}

impl Default for SurfaceResistances {
    fn default() -> Self {
        Self {
            by_kind: BTreeMap::from([
                (ElementKind::Wall, WALL_SURFACES),
                (ElementKind::Roof, ROOF_SURFACES),
                (ElementKind::VentilatedFloor, FLOOR_SURFACES),
                (ElementKind::Door, WALL_SURFACES),
            ]),
        }
    }
}

impl SurfaceResistances {
    /// Replaces the resistances of one kind; values must be finite and non-negative.
    pub fn with_kind(
        mut self,
        kind: ElementKind,
        surfaces: SurfaceResistance,
    ) -> Result<Self, EnvelopeError> {
        if !surfaces.interior.is_finite()
            || !surfaces.exterior.is_finite()
            || surfaces.interior < 0.0
            || surfaces.exterior < 0.0
        {
            return Err(EnvelopeError::Configuration(format!(
                "surface resistances for {} must be non-negative: {:?}",
                kind, surfaces
            )));
        }
        self.by_kind.insert(kind, surfaces);
        Ok(self)
    }

    /// Overrides the defaults with the rows of a reference file.
    pub fn from_raw(raw: BTreeMap<String, SurfaceResistance>) -> Result<Self, EnvelopeError> {
        raw.into_iter().try_fold(Self::default(), |table, (code, surfaces)| {
            let kind: ElementKind = code.parse().map_err(|_| {
                EnvelopeError::Configuration(format!(
                    "unknown element kind '{}' in surface resistances",
                    code
                ))
            })?;
            table.with_kind(kind, surfaces)
        })
    }

    pub fn for_kind(&self, kind: ElementKind) -> Result<SurfaceResistance, EnvelopeError> {
        self.by_kind.get(&kind).copied().ok_or_else(|| {
            EnvelopeError::Configuration(format!("no surface resistances configured for {}", kind))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_follow_heat_flow_direction() {
        let table = SurfaceResistances::default();
        assert_eq!(table.for_kind(ElementKind::Wall).unwrap().interior, 0.13);
        assert_eq!(table.for_kind(ElementKind::Roof).unwrap().interior, 0.10);
        assert_eq!(table.for_kind(ElementKind::VentilatedFloor).unwrap().interior, 0.17);
        assert_eq!(table.for_kind(ElementKind::Door).unwrap().exterior, 0.04);
    }

    #[test]
    fn test_override_from_raw() {
        let raw = BTreeMap::from([("roof".to_string(), SurfaceResistance::new(0.09, 0.05))]);
        let table = SurfaceResistances::from_raw(raw).unwrap();
        assert_eq!(table.for_kind(ElementKind::Roof).unwrap(), SurfaceResistance::new(0.09, 0.05));
        assert_eq!(table.for_kind(ElementKind::Wall).unwrap(), WALL_SURFACES);
    }

    #[test]
    fn test_negative_resistance_rejected() {
        let result = SurfaceResistances::default()
            .with_kind(ElementKind::Wall, SurfaceResistance::new(-0.1, 0.04));
        assert!(matches!(result, Err(EnvelopeError::Configuration(_))));
    }
}
