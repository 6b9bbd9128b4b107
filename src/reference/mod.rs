//! # Normative reference data
//!
//! Static tables the engine evaluates against, loaded once and never mutated:
//!
//! - **Zones**: commune → climate zone, with optional high-altitude override
//! - **Limits**: maximum U-value per zone and element kind
//! - **Window rules**: maximum glazing percentage per zone and orientation
//! - **Surface resistances**: Rsi/Rse per element kind
//!
//! The bundled data set (`config/reference.toml`) is compiled in; a complete
//! table can be supplied at runtime with [`ReferenceData::from_file`].

pub mod limits;
pub mod surfaces;
pub mod window_rules;
pub mod zones;

pub use limits::TransmittanceLimitTable;
pub use surfaces::{SurfaceResistance, SurfaceResistances};
pub use window_rules::{OrientationCaps, RawWindowRules, WindowCap, WindowRuleTable};
pub use zones::ZoneTable;

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

use crate::domain::ZoneRecord;
use crate::error::EnvelopeError;

const BUNDLED_REFERENCE: &str = include_str!("../../config/reference.toml");

/// Reference file layout before validation.
#[derive(Debug, Clone, Deserialize)]
struct RawReferenceData {
    zones: Vec<ZoneRecord>,
    limits: BTreeMap<String, BTreeMap<String, f64>>,
    window_rules: RawWindowRules,
    #[serde(default)]
    surface_resistances: BTreeMap<String, SurfaceResistance>,
}

/// All normative tables, validated.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    pub zones: ZoneTable,
    pub limits: TransmittanceLimitTable,
    pub window_rules: WindowRuleTable,
    pub surfaces: SurfaceResistances,
}

impl ReferenceData {
    /// The data set shipped with the crate.
    pub fn builtin() -> Result<Self, EnvelopeError> {
        Self::from_toml_str(BUNDLED_REFERENCE)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EnvelopeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            EnvelopeError::Configuration(format!("cannot read {}: {}", path.display(), e))
        })?;
        let data = Self::from_toml_str(&text)?;
        info!(path = %path.display(), communes = data.zones.len(), "loaded reference data");
        Ok(data)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, EnvelopeError> {
        let raw: RawReferenceData = toml::from_str(text)?;
        Ok(Self {
            zones: ZoneTable::new(raw.zones)?,
            limits: TransmittanceLimitTable::from_raw(raw.limits)?,
            window_rules: WindowRuleTable::from_raw(raw.window_rules)?,
            surfaces: SurfaceResistances::from_raw(raw.surface_resistances)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ClimateZone, ElementKind, Orientation};
    use strum::IntoEnumIterator;

    #[test]
    fn test_builtin_data_loads() {
        let data = ReferenceData::builtin().unwrap();
        assert_eq!(data.zones.len(), 14);
        assert_eq!(data.limits.limit(ClimateZone::D, ElementKind::Roof), Some(0.38));
        assert_eq!(data.limits.limit(ClimateZone::A, ElementKind::Door), None);
        assert_eq!(data.window_rules.high_loss_threshold_u(), 3.6);
    }

    #[test]
    fn test_builtin_has_wall_limit_for_every_zone() {
        let data = ReferenceData::builtin().unwrap();
        for zone in ClimateZone::iter() {
            assert!(data.limits.limit(zone, ElementKind::Wall).is_some(), "zone {}", zone);
        }
    }

    #[test]
    fn test_builtin_window_caps() {
        let rules = ReferenceData::builtin().unwrap().window_rules;
        assert_eq!(rules.max_percentage(ClimateZone::D, Orientation::North, 3.6), 77.0);
        assert_eq!(rules.max_percentage(ClimateZone::D, Orientation::East, 3.6), 53.0);
        assert_eq!(rules.max_percentage(ClimateZone::D, Orientation::South, 5.8), 10.0);
        assert_eq!(rules.max_percentage(ClimateZone::B, Orientation::South, 5.8), 80.0);
        assert_eq!(rules.max_percentage(ClimateZone::I, Orientation::North, 2.0), 30.0);
    }

    #[test]
    fn test_threshold_without_high_zone_is_configuration_error() {
        let text = r#"
            [[zones]]
            region = "Metropolitana"
            commune = "Santiago"
            base_zone = "D"
            altitude_threshold = 2000.0

            [limits.D]
            wall = 0.8

            [window_rules.default]
            south = { standard = 40.0, high_loss = 10.0 }
        "#;
        assert!(matches!(
            ReferenceData::from_toml_str(text),
            Err(EnvelopeError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_toml_is_configuration_error() {
        assert!(matches!(
            ReferenceData::from_toml_str("zones = 3"),
            Err(EnvelopeError::Configuration(_))
        ));
    }

    #[test]
    fn test_missing_file_is_configuration_error() {
        assert!(matches!(
            ReferenceData::from_file("/nonexistent/reference.toml"),
            Err(EnvelopeError::Configuration(_))
        ));
    }
}
