use serde::Serialize;
use tracing::debug;

use crate::domain::{Assembly, ElementKind};
use crate::error::EnvelopeError;
use crate::reference::{SurfaceResistance, SurfaceResistances};

/// Steady-state thermal performance of an assembly.
///
/// Values are unrounded; display precision is left to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ThermalPerformance {
    pub element_kind: ElementKind,
    pub surfaces: SurfaceResistance,
    /// Resistance of each layer, interior first (m²K/W)
    pub layer_resistances: Vec<f64>,
    /// Sum of layer resistances without surfaces (m²K/W)
    pub layer_resistance: f64,
    /// Total resistance Rt including both surfaces (m²K/W)
    pub resistance: f64,
    /// U = 1/Rt (W/(m²K))
    pub transmittance: f64,
}

/// Computes Rt = Rsi + Σ(e/λ) + Rse and U = 1/Rt.
pub struct AssemblyThermalCalculator<'a> {
    surfaces: &'a SurfaceResistances,
}

impl<'a> AssemblyThermalCalculator<'a> {
    pub fn new(surfaces: &'a SurfaceResistances) -> Self {
        Self { surfaces }
    }

    /// Total resistance and transmittance of `assembly`.
    ///
    /// Fails with [`EnvelopeError::InvalidAssembly`] when Rt is not a
    /// positive finite value; U is never reported as zero.
    pub fn compute_transmittance(
        &self,
        assembly: &Assembly,
    ) -> Result<ThermalPerformance, EnvelopeError> {
        let surfaces = self.surfaces.for_kind(assembly.kind())?;

        let layer_resistances: Vec<f64> =
            assembly.layers().iter().map(|l| l.resistance()).collect();
        let layer_resistance: f64 = layer_resistances.iter().sum();
        let resistance = surfaces.interior + layer_resistance + surfaces.exterior;

        // Layers are individually finite; their sum may still overflow.
        if !resistance.is_finite() || resistance <= 0.0 {
            return Err(EnvelopeError::InvalidAssembly(format!(
                "total resistance {} is not a positive finite value",
                resistance
            )));
        }
        let transmittance = 1.0 / resistance;

        debug!(
            kind = %assembly.kind(),
            layers = layer_resistances.len(),
            resistance,
            transmittance,
            "computed assembly transmittance"
        );

        Ok(ThermalPerformance {
            element_kind: assembly.kind(),
            surfaces,
            layer_resistances,
            layer_resistance,
            resistance,
            transmittance,
        })
    }
}
