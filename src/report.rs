//! Flat result records for export sinks.
//!
//! Sinks (the spreadsheet exporter, for one) consume ordered field/value
//! maps: a summary sheet with project totals and a detail sheet with one row
//! per window.

use chrono::{DateTime, Utc};
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{json, Value};

use crate::domain::ClimateZone;
use crate::engine::{AssemblyAssessment, CondensationReading, WindowComplianceResult};

/// Ordered field/value pairs; serializes as a JSON object in field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMap(Vec<(&'static str, Value)>);

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field(mut self, name: &'static str, value: impl Into<Value>) -> Self {
        self.0.push((name, value.into()));
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.iter().find(|(n, _)| *n == name).map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|(n, _)| *n)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for FieldMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, value) in &self.0 {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

pub trait ToFieldMap {
    fn to_field_map(&self) -> FieldMap;
}

impl ToFieldMap for WindowComplianceResult {
    fn to_field_map(&self) -> FieldMap {
        let weighted_u = self.weighted.map(|w| w.weighted_u);
        let weighted_limit = self.weighted.and_then(|w| w.estimated_limit);
        FieldMap::new()
            .field("window_id", self.window_id.clone())
            .field("orientation", self.orientation.to_string())
            .field("zone", self.zone.to_string())
            .field("window_area_m2", self.window_area_m2)
            .field("facade_area_m2", self.facade_area_m2)
            .field("window_u", self.window_u)
            .field("wall_u", self.wall_u)
            .field("real_percent", self.real_percent)
            .field("max_percent", self.max_percent)
            .field("percentage_passed", self.percentage_passed)
            .field("weighted_u", json!(weighted_u))
            .field("weighted_limit_estimated", json!(weighted_limit))
            .field("verdict", json!(self.verdict))
            .field("passed", self.passed())
    }
}

impl ToFieldMap for AssemblyAssessment {
    fn to_field_map(&self) -> FieldMap {
        let advisories: Vec<String> = self.advisories.iter().map(|a| a.to_string()).collect();
        FieldMap::new()
            .field("element_kind", self.performance.element_kind.to_string())
            .field("zone", self.compliance.zone.to_string())
            .field("layers", self.performance.layer_resistances.len())
            .field("resistance", self.performance.resistance)
            .field("transmittance", self.performance.transmittance)
            .field("limit", json!(self.compliance.limit_value))
            .field("passed", self.compliance.passed)
            .field("remediation_delta_r", json!(self.compliance.remediation_delta))
            .field("advisories", advisories)
    }
}

impl ToFieldMap for CondensationReading {
    fn to_field_map(&self) -> FieldMap {
        FieldMap::new()
            .field("interior_surface_temp_c", self.interior_surface_temp_c)
            .field("dew_point_temp_c", self.dew_point_temp_c)
            .field("margin_c", self.margin_c)
            .field("risk", self.risk)
            .field("recommendation", json!(self.recommendation()))
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ProjectMetadata {
    pub name: String,
    pub region: String,
    pub commune: String,
    pub zone: ClimateZone,
}

/// Finished result set of one project run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ProjectReport {
    pub metadata: ProjectMetadata,
    pub generated_at: DateTime<Utc>,
    pub high_altitude_applied: bool,
    pub assemblies: Vec<AssemblyAssessment>,
    pub windows: Vec<WindowComplianceResult>,
    /// Informational façade average over every window, not a gate
    pub aggregate_weighted_u: Option<f64>,
    pub condensation: Option<CondensationReading>,
}

impl ProjectReport {
    pub fn all_passed(&self) -> bool {
        self.assemblies.iter().all(|a| a.compliance.passed)
            && self.windows.iter().all(|w| w.passed())
            && !self.condensation.map_or(false, |c| c.risk)
    }

    /// Summary sheet: one row of project totals.
    pub fn summary(&self) -> FieldMap {
        let windows_failed = self.windows.iter().filter(|w| !w.passed()).count();
        let assemblies_failed = self.assemblies.iter().filter(|a| !a.compliance.passed).count();
        FieldMap::new()
            .field("project", self.metadata.name.clone())
            .field("region", self.metadata.region.clone())
            .field("commune", self.metadata.commune.clone())
            .field("zone", self.metadata.zone.to_string())
            .field("generated_at", self.generated_at.to_rfc3339())
            .field("assemblies", self.assemblies.len())
            .field("assemblies_failed", assemblies_failed)
            .field("windows", self.windows.len())
            .field("windows_failed", windows_failed)
            .field("aggregate_weighted_u", json!(self.aggregate_weighted_u))
            .field("condensation_risk", json!(self.condensation.map(|c| c.risk)))
            .field("all_passed", self.all_passed())
    }

    /// Detail sheet: one row per window, in ledger order.
    pub fn detail(&self) -> Vec<FieldMap> {
        self.windows.iter().map(|w| w.to_field_map()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Orientation, WindowUnit};
    use crate::engine::EnvelopeEngine;
    use crate::reference::ReferenceData;

    #[test]
    fn test_field_map_serializes_in_order() {
        let map = FieldMap::new().field("b", 1).field("a", "x");
        let text = serde_json::to_string(&map).unwrap();
        assert_eq!(text, r#"{"b":1,"a":"x"}"#);
        assert_eq!(map.get("a"), Some(&json!("x")));
    }

    #[test]
    fn test_window_row_fields() {
        let data = ReferenceData::builtin().unwrap();
        let engine = EnvelopeEngine::new(&data);
        let unit = WindowUnit::new("w1", Orientation::North, 1.2, 1.2, 10.0, 3.6, 0.8).unwrap();
        let row = engine.evaluate_window(&unit, ClimateZone::D).to_field_map();

        assert_eq!(row.get("window_id"), Some(&json!("w1")));
        assert_eq!(row.get("orientation"), Some(&json!("north")));
        assert_eq!(row.get("weighted_u"), Some(&Value::Null));
        assert_eq!(row.get("verdict"), Some(&json!("passed_by_percentage")));
        assert_eq!(row.names().next(), Some("window_id"));
    }

    #[test]
    fn test_condensation_row() {
        let reading = crate::engine::condensation::analyze(19.0, 75.0, 0.0, 5.8).unwrap();
        let row = reading.to_field_map();
        assert_eq!(row.get("risk"), Some(&json!(true)));
        assert!(row.get("recommendation").unwrap().is_string());
    }
}
