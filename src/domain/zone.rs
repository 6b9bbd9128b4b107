use serde::{Deserialize, Serialize};

use super::ClimateZone;
use crate::error::EnvelopeError;

/// One row of the thermal zoning table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneRecord {
    pub region: String,
    pub commune: String,
    pub base_zone: ClimateZone,
    /// Altitude (m above sea level) from which the high-altitude zone applies
    #[serde(default)]
    pub altitude_threshold: Option<f64>,
    #[serde(default)]
    pub high_altitude_zone: Option<ClimateZone>,
}

impl ZoneRecord {
    /// Checks that an altitude threshold always comes with its zone.
    pub fn validate(&self) -> Result<(), EnvelopeError> {
        match (self.altitude_threshold, self.high_altitude_zone) {
            (Some(threshold), _) if !threshold.is_finite() => Err(EnvelopeError::Configuration(
                format!("commune '{}' has a non-finite altitude threshold", self.commune),
            )),
            (Some(_), None) => Err(EnvelopeError::Configuration(format!(
                "commune '{}' defines an altitude threshold without a high-altitude zone",
                self.commune
            ))),
            _ => Ok(()),
        }
    }

    /// Zone that applies at the given altitude.
    pub fn zone_at(&self, altitude_m: f64) -> ClimateZone {
        match (self.altitude_threshold, self.high_altitude_zone) {
            (Some(threshold), Some(high)) if altitude_m >= threshold => high,
            _ => self.base_zone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn santiago() -> ZoneRecord {
        ZoneRecord {
            region: "Metropolitana".to_string(),
            commune: "Santiago".to_string(),
            base_zone: ClimateZone::D,
            altitude_threshold: Some(2000.0),
            high_altitude_zone: Some(ClimateZone::H),
        }
    }

    #[test]
    fn test_zone_at_threshold_is_inclusive() {
        let record = santiago();
        assert_eq!(record.zone_at(1999.9), ClimateZone::D);
        assert_eq!(record.zone_at(2000.0), ClimateZone::H);
        assert_eq!(record.zone_at(3500.0), ClimateZone::H);
    }

    #[test]
    fn test_record_without_threshold_ignores_altitude() {
        let record = ZoneRecord {
            altitude_threshold: None,
            high_altitude_zone: None,
            ..santiago()
        };
        assert_eq!(record.zone_at(5000.0), ClimateZone::D);
        assert!(record.validate().is_ok());
    }

    #[test]
    fn test_threshold_requires_high_zone() {
        let record = ZoneRecord {
            high_altitude_zone: None,
            ..santiago()
        };
        assert!(matches!(
            record.validate(),
            Err(EnvelopeError::Configuration(_))
        ));
    }
}
