use serde::{Deserialize, Serialize};

use crate::domain::{ElementKind, MaterialLayer};
use crate::error::EnvelopeError;

/// Element a catalog material is meant for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntendedUse {
    Wall,
    Roof,
    Floor,
    General,
}

impl From<ElementKind> for IntendedUse {
    fn from(kind: ElementKind) -> Self {
        match kind {
            ElementKind::Wall => IntendedUse::Wall,
            ElementKind::Roof => IntendedUse::Roof,
            ElementKind::VentilatedFloor => IntendedUse::Floor,
            ElementKind::Door => IntendedUse::General,
        }
    }
}

/// Clean numeric material entry supplied by a material database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRecord {
    pub category: String,
    pub commercial_name: String,
    /// W/(m·K)
    pub conductivity_w_mk: f64,
    /// m
    pub default_thickness_m: f64,
    pub intended_use: IntendedUse,
}

impl MaterialRecord {
    /// Layer with the record's conductivity and either the given or the
    /// default thickness.
    pub fn to_layer(&self, thickness_m: Option<f64>) -> Result<MaterialLayer, EnvelopeError> {
        MaterialLayer::named(
            self.commercial_name.clone(),
            thickness_m.unwrap_or(self.default_thickness_m),
            self.conductivity_w_mk,
        )
    }
}

/// Source of candidate materials.
pub trait MaterialCatalog {
    fn materials(&self) -> &[MaterialRecord];

    /// Materials suited for an element: its own use plus general ones.
    fn for_element(&self, kind: ElementKind) -> Vec<&MaterialRecord> {
        let wanted = IntendedUse::from(kind);
        self.materials()
            .iter()
            .filter(|m| m.intended_use == wanted || m.intended_use == IntendedUse::General)
            .collect()
    }

    fn find(&self, commercial_name: &str) -> Option<&MaterialRecord> {
        self.materials()
            .iter()
            .find(|m| m.commercial_name.eq_ignore_ascii_case(commercial_name))
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalog {
    records: Vec<MaterialRecord>,
}

impl InMemoryCatalog {
    pub fn new(records: Vec<MaterialRecord>) -> Self {
        Self { records }
    }
}

impl MaterialCatalog for InMemoryCatalog {
    fn materials(&self) -> &[MaterialRecord] {
        &self.records
    }
}
