use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{ClimateZone, ElementKind};
use crate::error::EnvelopeError;

/// Maximum U-value (W/(m²K)) per zone and element kind.
///
/// A missing entry means the simplified table sets no numeric cap for that
/// combination (doors in zone `A`, for instance). This is a known gap with
/// respect to the full regulation and is reported as "unconstrained", never
/// as an error.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TransmittanceLimitTable {
    limits: BTreeMap<ClimateZone, BTreeMap<ElementKind, f64>>,
}

impl TransmittanceLimitTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert; the value must be positive and finite.
    pub fn with_limit(
        mut self,
        zone: ClimateZone,
        kind: ElementKind,
        max_u: f64,
    ) -> Result<Self, EnvelopeError> {
        if !max_u.is_finite() || max_u <= 0.0 {
            return Err(EnvelopeError::Configuration(format!(
                "limit for zone {} / {} must be positive, got {}",
                zone, kind, max_u
            )));
        }
        self.limits.entry(zone).or_default().insert(kind, max_u);
        Ok(self)
    }

    /// Builds the table from the raw `zone code -> element code -> value`
    /// mapping of a reference file.
    pub fn from_raw(raw: BTreeMap<String, BTreeMap<String, f64>>) -> Result<Self, EnvelopeError> {
        raw.into_iter().try_fold(Self::new(), |table, (zone_code, row)| {
            let zone: ClimateZone = zone_code.parse().map_err(|_| {
                EnvelopeError::Configuration(format!("unknown zone code '{}'", zone_code))
            })?;
            row.into_iter().try_fold(table, |table, (kind_code, max_u)| {
                let kind: ElementKind = kind_code.parse().map_err(|_| {
                    EnvelopeError::Configuration(format!(
                        "unknown element kind '{}' under zone {}",
                        kind_code, zone
                    ))
                })?;
                table.with_limit(zone, kind, max_u)
            })
        })
    }

    pub fn limit(&self, zone: ClimateZone, kind: ElementKind) -> Option<f64> {
        self.limits.get(&zone).and_then(|row| row.get(&kind)).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.limits.is_empty()
    }
}
