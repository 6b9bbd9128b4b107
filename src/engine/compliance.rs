use serde::Serialize;
use std::fmt;
use tracing::debug;

use super::thermal::{AssemblyThermalCalculator, ThermalPerformance};
use crate::domain::{Assembly, ClimateZone, ElementKind};
use crate::error::EnvelopeError;
use crate::reference::TransmittanceLimitTable;

/// Outcome of comparing a U-value against the zone limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComplianceResult {
    pub zone: ClimateZone,
    pub element_kind: ElementKind,
    /// Evaluated U-value (W/(m²K))
    pub computed_value: f64,
    /// `None` when the table sets no cap for this zone/element
    pub limit_value: Option<f64>,
    pub passed: bool,
    /// Extra resistance needed to reach the limit (m²K/W), failures only
    pub remediation_delta: Option<f64>,
}

impl ComplianceResult {
    pub fn is_unconstrained(&self) -> bool {
        self.limit_value.is_none()
    }
}

/// Non-blocking reminders attached to an assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Advisory {
    /// Foundation walls need their own insulation check
    FoundationInsulation,
    /// No numeric cap exists for this element in the zone
    NoNormativeCeiling,
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::FoundationInsulation => write!(
                f,
                "check foundation wall insulation (minimum R100 for the zone)"
            ),
            Advisory::NoNormativeCeiling => {
                write!(f, "the simplified limit table sets no maximum U for this element")
            }
        }
    }
}

/// Thermal calculation and compliance check of one assembly.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssemblyAssessment {
    pub performance: ThermalPerformance,
    pub compliance: ComplianceResult,
    pub advisories: Vec<Advisory>,
}

/// Compares U-values against the zone limit table.
pub struct ComplianceEvaluator<'a> {
    limits: &'a TransmittanceLimitTable,
}

impl<'a> ComplianceEvaluator<'a> {
    pub fn new(limits: &'a TransmittanceLimitTable) -> Self {
        Self { limits }
    }

    /// `passed` is inclusive at the limit. A missing limit passes with no
    /// ceiling rather than failing.
    pub fn evaluate(
        &self,
        computed_u: f64,
        zone: ClimateZone,
        kind: ElementKind,
    ) -> Result<ComplianceResult, EnvelopeError> {
        if !computed_u.is_finite() || computed_u <= 0.0 {
            return Err(EnvelopeError::InvalidInput(format!(
                "U-value must be positive and finite, got {}",
                computed_u
            )));
        }

        let limit_value = self.limits.limit(zone, kind);
        let passed = limit_value.map_or(true, |limit| computed_u <= limit);
        let remediation_delta = match limit_value {
            Some(limit) if !passed && limit > 0.0 => Some(1.0 / limit - 1.0 / computed_u),
            _ => None,
        };

        debug!(%zone, %kind, computed_u, ?limit_value, passed, "evaluated transmittance limit");

        Ok(ComplianceResult {
            zone,
            element_kind: kind,
            computed_value: computed_u,
            limit_value,
            passed,
            remediation_delta,
        })
    }

    /// Runs the thermal calculation and the limit check for an assembly.
    pub fn evaluate_assembly(
        &self,
        calculator: &AssemblyThermalCalculator<'_>,
        assembly: &Assembly,
        zone: ClimateZone,
    ) -> Result<AssemblyAssessment, EnvelopeError> {
        let performance = calculator.compute_transmittance(assembly)?;
        let compliance = self.evaluate(performance.transmittance, zone, assembly.kind())?;

        let mut advisories = Vec::new();
        if compliance.is_unconstrained() {
            advisories.push(Advisory::NoNormativeCeiling);
        }
        if assembly.kind().needs_foundation_check() {
            advisories.push(Advisory::FoundationInsulation);
        }

        Ok(AssemblyAssessment {
            performance,
            compliance,
            advisories,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MaterialLayer;
    use crate::reference::{ReferenceData, SurfaceResistances};
    use rstest::rstest;

    fn limits() -> TransmittanceLimitTable {
        ReferenceData::builtin().unwrap().limits
    }

    #[test]
    fn test_limit_is_inclusive() {
        let limits = limits();
        let evaluator = ComplianceEvaluator::new(&limits);
        let result = evaluator.evaluate(0.38, ClimateZone::D, ElementKind::Roof).unwrap();
        assert!(result.passed);
        assert_eq!(result.limit_value, Some(0.38));
        assert_eq!(result.remediation_delta, None);
    }

    #[test]
    fn test_failure_reports_resistance_shortfall() {
        let limits = limits();
        let evaluator = ComplianceEvaluator::new(&limits);
        let u = 1.0 / 1.42;
        let result = evaluator.evaluate(u, ClimateZone::D, ElementKind::Roof).unwrap();
        assert!(!result.passed);
        let delta = result.remediation_delta.unwrap();
        assert!((delta - (1.0 / 0.38 - 1.42)).abs() < 1e-9);
        assert!(delta > 0.0);
    }

    #[test]
    fn test_missing_limit_is_unconstrained() {
        let limits = limits();
        let evaluator = ComplianceEvaluator::new(&limits);
        let result = evaluator.evaluate(6.0, ClimateZone::A, ElementKind::Door).unwrap();
        assert!(result.passed);
        assert!(result.is_unconstrained());
        assert_eq!(result.remediation_delta, None);
    }

    #[test]
    fn test_rejects_non_positive_u() {
        let limits = limits();
        let evaluator = ComplianceEvaluator::new(&limits);
        assert!(matches!(
            evaluator.evaluate(0.0, ClimateZone::D, ElementKind::Wall),
            Err(EnvelopeError::InvalidInput(_))
        ));
        assert!(evaluator.evaluate(f64::NAN, ClimateZone::D, ElementKind::Wall).is_err());
    }

    #[rstest]
    #[case(ClimateZone::A, ElementKind::Wall, 2.10)]
    #[case(ClimateZone::D, ElementKind::Wall, 0.80)]
    #[case(ClimateZone::F, ElementKind::VentilatedFloor, 0.39)]
    #[case(ClimateZone::I, ElementKind::Roof, 0.25)]
    #[case(ClimateZone::B, ElementKind::Door, 1.7)]
    fn test_boundary_passes_for_every_tabulated_limit(
        #[case] zone: ClimateZone,
        #[case] kind: ElementKind,
        #[case] limit: f64,
    ) {
        let limits = limits();
        let evaluator = ComplianceEvaluator::new(&limits);
        assert!(evaluator.evaluate(limit, zone, kind).unwrap().passed);
        assert!(!evaluator.evaluate(limit + 0.01, zone, kind).unwrap().passed);
    }

    #[test]
    fn test_assembly_assessment_advisories() {
        let limits = limits();
        let surfaces = SurfaceResistances::default();
        let evaluator = ComplianceEvaluator::new(&limits);
        let calculator = AssemblyThermalCalculator::new(&surfaces);

        let wall = Assembly::new(
            ElementKind::Wall,
            vec![
                MaterialLayer::named("Brick", 0.14, 0.46).unwrap(),
                MaterialLayer::named("EPS", 0.05, 0.038).unwrap(),
            ],
        )
        .unwrap();
        let assessment = evaluator.evaluate_assembly(&calculator, &wall, ClimateZone::D).unwrap();
        assert!(assessment.compliance.passed);
        assert_eq!(assessment.advisories, vec![Advisory::FoundationInsulation]);

        let layers = vec![MaterialLayer::new(0.02, 0.13).unwrap()];
        let roof = Assembly::new(ElementKind::Roof, layers).unwrap();
        let assessment = evaluator.evaluate_assembly(&calculator, &roof, ClimateZone::D).unwrap();
        assert!(!assessment.compliance.passed);
        assert!(assessment.advisories.is_empty());
    }
}
