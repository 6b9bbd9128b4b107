use serde::Serialize;
use tracing::debug;

use crate::domain::ClimateZone;
use crate::error::{ensure_finite, EnvelopeError};
use crate::reference::ZoneTable;

/// Outcome of a zone lookup, with the data needed to explain it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ZoneResolution {
    pub zone: ClimateZone,
    pub base_zone: ClimateZone,
    pub altitude_threshold: Option<f64>,
    /// True when the project altitude pushed the commune into its
    /// high-altitude zone
    pub high_altitude_applied: bool,
}

/// Maps a commune and project altitude to its climate zone.
pub struct ZoneResolver<'a> {
    table: &'a ZoneTable,
}

impl<'a> ZoneResolver<'a> {
    pub fn new(table: &'a ZoneTable) -> Self {
        Self { table }
    }

    /// Climate zone of `commune` at `altitude_m`.
    ///
    /// The commune must be listed under `region`; a commune found under a
    /// different region is [`EnvelopeError::NotFound`].
    pub fn resolve(
        &self,
        region: &str,
        commune: &str,
        altitude_m: f64,
    ) -> Result<ClimateZone, EnvelopeError> {
        self.resolve_detailed(region, commune, altitude_m).map(|r| r.zone)
    }

    /// Same lookup as [`Self::resolve`], keeping the base zone and threshold.
    pub fn resolve_detailed(
        &self,
        region: &str,
        commune: &str,
        altitude_m: f64,
    ) -> Result<ZoneResolution, EnvelopeError> {
        ensure_finite("altitude_m", altitude_m)?;

        let record = self
            .table
            .find(commune)
            .ok_or_else(|| EnvelopeError::NotFound(format!("commune '{}'", commune)))?;
        if record.region != region {
            return Err(EnvelopeError::NotFound(format!(
                "commune '{}' in region '{}'",
                commune, region
            )));
        }

        let zone = record.zone_at(altitude_m);
        let resolution = ZoneResolution {
            zone,
            base_zone: record.base_zone,
            altitude_threshold: record.altitude_threshold,
            high_altitude_applied: zone != record.base_zone,
        };
        debug!(region, commune, altitude_m, zone = %zone, "resolved climate zone");
        Ok(resolution)
    }

    /// Regions in table order, without duplicates
    pub fn regions(&self) -> Vec<&'a str> {
        self.table.regions()
    }

    /// Communes listed under `region`
    pub fn communes(&self, region: &str) -> Vec<&'a str> {
        self.table.communes(region)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::ReferenceData;

    #[test]
    fn test_resolve_base_zone() {
        let data = ReferenceData::builtin().unwrap();
        let resolver = ZoneResolver::new(&data.zones);
        assert_eq!(resolver.resolve("Biobío", "Concepción", 10.0).unwrap(), ClimateZone::E);
        assert_eq!(resolver.resolve("Magallanes", "Punta Arenas", 0.0).unwrap(), ClimateZone::I);
    }

    #[test]
    fn test_resolve_high_altitude() {
        let data = ReferenceData::builtin().unwrap();
        let resolver = ZoneResolver::new(&data.zones);

        let low = resolver.resolve_detailed("Metropolitana", "Santiago", 520.0).unwrap();
        assert_eq!(low.zone, ClimateZone::D);
        assert!(!low.high_altitude_applied);

        let high = resolver.resolve_detailed("Metropolitana", "Santiago", 2000.0).unwrap();
        assert_eq!(high.zone, ClimateZone::H);
        assert_eq!(high.base_zone, ClimateZone::D);
        assert_eq!(high.altitude_threshold, Some(2000.0));
        assert!(high.high_altitude_applied);
    }

    #[test]
    fn test_no_threshold_ignores_altitude() {
        let data = ReferenceData::builtin().unwrap();
        let resolver = ZoneResolver::new(&data.zones);
        assert_eq!(resolver.resolve("Valparaíso", "Valparaíso", 4000.0).unwrap(), ClimateZone::C);
    }

    #[test]
    fn test_unknown_commune() {
        let data = ReferenceData::builtin().unwrap();
        let resolver = ZoneResolver::new(&data.zones);
        assert!(matches!(
            resolver.resolve("Metropolitana", "Atlantis", 0.0),
            Err(EnvelopeError::NotFound(_))
        ));
    }

    #[test]
    fn test_commune_in_wrong_region() {
        let data = ReferenceData::builtin().unwrap();
        let resolver = ZoneResolver::new(&data.zones);
        assert!(matches!(
            resolver.resolve("Biobío", "Santiago", 0.0),
            Err(EnvelopeError::NotFound(_))
        ));
    }

    #[test]
    fn test_region_listing() {
        let data = ReferenceData::builtin().unwrap();
        let resolver = ZoneResolver::new(&data.zones);
        let regions = resolver.regions();
        assert_eq!(regions.first(), Some(&"Metropolitana"));
        assert_eq!(regions.len(), 7);
        assert_eq!(resolver.communes("Antofagasta"), vec!["Antofagasta", "Calama"]);
    }
}
