//! # Normative calculation engine
//!
//! Pure, synchronous evaluation of envelope elements against the reference
//! tables. Nothing here holds mutable state; every call is a function of its
//! arguments and the read-only [`ReferenceData`].
//!
//! ## Components
//!
//! - **ZoneResolver**: commune + altitude → climate zone
//! - **AssemblyThermalCalculator**: layered assembly → Rt and U
//! - **ComplianceEvaluator**: U vs. the zone limit for the element kind
//! - **WindowComplianceEngine**: glazing percentage, then weighted façade U
//! - **condensation**: interior surface temperature vs. dew point
//!
//! ## Usage
//!
//! ```rust
//! use envelope_compliance::domain::{Assembly, ElementKind, MaterialLayer};
//! use envelope_compliance::engine::EnvelopeEngine;
//! use envelope_compliance::reference::ReferenceData;
//!
//! let data = ReferenceData::builtin().unwrap();
//! let engine = EnvelopeEngine::new(&data);
//!
//! let zone = engine.resolve_zone("Metropolitana", "Santiago", 520.0).unwrap();
//! let roof = Assembly::new(
//!     ElementKind::Roof,
//!     vec![
//!         MaterialLayer::new(0.015, 0.5).unwrap(),
//!         MaterialLayer::new(0.05, 0.04).unwrap(),
//!     ],
//! )
//! .unwrap();
//!
//! let assessment = engine.assess_assembly(&roof, zone).unwrap();
//! assert!(!assessment.compliance.passed);
//! ```

pub mod compliance;
pub mod condensation;
pub mod thermal;
pub mod window;
pub mod zoning;

pub use compliance::{Advisory, AssemblyAssessment, ComplianceEvaluator, ComplianceResult};
pub use condensation::{CondensationDefaults, CondensationReading};
pub use thermal::{AssemblyThermalCalculator, ThermalPerformance};
pub use window::{
    aggregate_weighted_u, WeightedAverageCheck, WindowComplianceEngine, WindowComplianceResult,
    WindowVerdict,
};
pub use zoning::{ZoneResolution, ZoneResolver};

use crate::domain::{Assembly, ClimateZone, ElementKind, WindowLedger, WindowUnit};
use crate::error::EnvelopeError;
use crate::reference::ReferenceData;

/// Entry point bundling every component over one set of reference tables.
#[derive(Clone, Copy)]
pub struct EnvelopeEngine<'a> {
    reference: &'a ReferenceData,
}

impl<'a> EnvelopeEngine<'a> {
    pub fn new(reference: &'a ReferenceData) -> Self {
        Self { reference }
    }

    /// Tables every component reads from
    pub fn reference(&self) -> &'a ReferenceData {
        self.reference
    }

    /// Commune and altitude lookup
    pub fn zone_resolver(&self) -> ZoneResolver<'a> {
        ZoneResolver::new(&self.reference.zones)
    }

    /// U-value calculator using the configured surface resistances
    pub fn thermal_calculator(&self) -> AssemblyThermalCalculator<'a> {
        AssemblyThermalCalculator::new(&self.reference.surfaces)
    }

    /// U-value check against the limit table
    pub fn compliance_evaluator(&self) -> ComplianceEvaluator<'a> {
        ComplianceEvaluator::new(&self.reference.limits)
    }

    /// Two-tier glazing check
    pub fn window_engine(&self) -> WindowComplianceEngine<'a> {
        WindowComplianceEngine::new(&self.reference.window_rules, &self.reference.limits)
    }

    /// Climate zone of a commune at the project altitude.
    pub fn resolve_zone(
        &self,
        region: &str,
        commune: &str,
        altitude_m: f64,
    ) -> Result<ClimateZone, EnvelopeError> {
        self.zone_resolver().resolve(region, commune, altitude_m)
    }

    /// Rt and U of an assembly.
    pub fn compute_transmittance(
        &self,
        assembly: &Assembly,
    ) -> Result<ThermalPerformance, EnvelopeError> {
        self.thermal_calculator().compute_transmittance(assembly)
    }

    /// Checks an already computed U against the zone limit.
    pub fn evaluate_u(
        &self,
        computed_u: f64,
        zone: ClimateZone,
        kind: ElementKind,
    ) -> Result<ComplianceResult, EnvelopeError> {
        self.compliance_evaluator().evaluate(computed_u, zone, kind)
    }

    /// Computes U for an assembly and checks it, with advisories.
    pub fn assess_assembly(
        &self,
        assembly: &Assembly,
        zone: ClimateZone,
    ) -> Result<AssemblyAssessment, EnvelopeError> {
        self.compliance_evaluator()
            .evaluate_assembly(&self.thermal_calculator(), assembly, zone)
    }

    /// Glazing check of one window.
    pub fn evaluate_window(
        &self,
        window: &WindowUnit,
        zone: ClimateZone,
    ) -> WindowComplianceResult {
        self.window_engine().evaluate(window, zone)
    }

    /// Glazing check of every window in the ledger, in order.
    pub fn evaluate_windows(
        &self,
        ledger: &WindowLedger,
        zone: ClimateZone,
    ) -> Vec<WindowComplianceResult> {
        self.window_engine().evaluate_all(ledger, zone)
    }

    /// Surface condensation risk for one set of climate conditions.
    pub fn analyze_condensation(
        &self,
        interior_temp_c: f64,
        interior_rh_percent: f64,
        exterior_temp_c: f64,
        element_u: f64,
    ) -> Result<CondensationReading, EnvelopeError> {
        condensation::analyze(interior_temp_c, interior_rh_percent, exterior_temp_c, element_u)
    }
}
