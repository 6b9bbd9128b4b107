use serde::{Deserialize, Serialize};
use validator::Validate;

use super::ElementKind;
use crate::error::{ensure_finite, EnvelopeError};

/// One homogeneous layer of an envelope element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct MaterialLayer {
    /// Material label, informational only
    #[serde(default)]
    pub name: Option<String>,
    /// Layer thickness (m)
    #[validate(range(exclusive_min = 0.0))]
    pub thickness_m: f64,
    /// Thermal conductivity (W/(m·K))
    #[validate(range(exclusive_min = 0.0))]
    pub conductivity_w_mk: f64,
}

impl MaterialLayer {
    pub fn new(thickness_m: f64, conductivity_w_mk: f64) -> Result<Self, EnvelopeError> {
        let layer = Self {
            name: None,
            thickness_m,
            conductivity_w_mk,
        };
        layer.check()?;
        Ok(layer)
    }

    pub fn named(
        name: impl Into<String>,
        thickness_m: f64,
        conductivity_w_mk: f64,
    ) -> Result<Self, EnvelopeError> {
        let mut layer = Self::new(thickness_m, conductivity_w_mk)?;
        layer.name = Some(name.into());
        Ok(layer)
    }

    /// Thermal resistance of the layer alone (m²K/W)
    pub fn resistance(&self) -> f64 {
        self.thickness_m / self.conductivity_w_mk
    }

    fn check(&self) -> Result<(), EnvelopeError> {
        ensure_finite("thickness_m", self.thickness_m)?;
        ensure_finite("conductivity_w_mk", self.conductivity_w_mk)?;
        self.validate()?;
        let resistance = self.resistance();
        if !resistance.is_finite() || resistance <= 0.0 {
            return Err(EnvelopeError::InvalidInput(format!(
                "layer resistance {} is not a positive finite value",
                resistance
            )));
        }
        Ok(())
    }
}

/// Layered envelope element, layers ordered from interior to exterior.
///
/// Construction guarantees at least one layer and that every layer has a
/// positive, finite thickness, conductivity and resistance.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assembly {
    kind: ElementKind,
    layers: Vec<MaterialLayer>,
}

impl Assembly {
    pub fn new(kind: ElementKind, layers: Vec<MaterialLayer>) -> Result<Self, EnvelopeError> {
        if layers.is_empty() {
            return Err(EnvelopeError::InvalidAssembly(format!(
                "{} assembly has no layers",
                kind
            )));
        }
        for (index, layer) in layers.iter().enumerate() {
            layer.check().map_err(|e| {
                EnvelopeError::InvalidAssembly(format!("layer {}: {}", index + 1, e))
            })?;
        }
        Ok(Self { kind, layers })
    }

    pub fn kind(&self) -> ElementKind {
        self.kind
    }

    /// Layers, interior first
    pub fn layers(&self) -> &[MaterialLayer] {
        &self.layers
    }
}
