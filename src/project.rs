use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{info, warn};

use crate::domain::{Assembly, ElementKind, MaterialLayer, WindowLedger, WindowSpec, WindowUnit};
use crate::engine::{aggregate_weighted_u, CondensationDefaults, EnvelopeEngine};
use crate::error::EnvelopeError;
use crate::report::{ProjectMetadata, ProjectReport};

/// Assembly as written in a project file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssemblyInput {
    pub kind: ElementKind,
    pub layers: Vec<MaterialLayer>,
}

/// Climate inputs of the surface condensation check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CondensationInput {
    /// Defaults to the normative interior temperature
    #[serde(default)]
    pub interior_temp_c: Option<f64>,
    /// Defaults to the normative interior humidity
    #[serde(default)]
    pub interior_rh_percent: Option<f64>,
    pub exterior_temp_c: f64,
    pub element_u: f64,
}

/// One project run: location, assemblies, windows and condensation case.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectInput {
    pub name: String,
    pub region: String,
    pub commune: String,
    #[serde(default)]
    pub altitude_m: f64,
    #[serde(default)]
    pub assemblies: Vec<AssemblyInput>,
    #[serde(default)]
    pub windows: Vec<WindowSpec>,
    #[serde(default)]
    pub condensation: Option<CondensationInput>,
}

impl ProjectInput {
    pub fn from_toml_str(text: &str) -> Result<Self, EnvelopeError> {
        toml::from_str(text)
            .map_err(|e| EnvelopeError::InvalidInput(format!("malformed project: {}", e)))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, EnvelopeError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            EnvelopeError::InvalidInput(format!("cannot read {}: {}", path.display(), e))
        })?;
        Self::from_toml_str(&text)
    }

    /// Validated windows, in file order.
    pub fn window_ledger(&self) -> Result<WindowLedger, EnvelopeError> {
        let mut ledger = WindowLedger::new();
        for spec in &self.windows {
            ledger.append(WindowUnit::try_from(spec.clone())?);
        }
        Ok(ledger)
    }
}

/// Runs every check of a project and collects the report.
pub fn evaluate_project(
    engine: &EnvelopeEngine<'_>,
    input: &ProjectInput,
) -> Result<ProjectReport, EnvelopeError> {
    let resolution = engine
        .zone_resolver()
        .resolve_detailed(&input.region, &input.commune, input.altitude_m)?;
    let zone = resolution.zone;
    if resolution.high_altitude_applied {
        info!(
            commune = %input.commune,
            altitude_m = input.altitude_m,
            zone = %zone,
            "altitude above threshold, high-altitude zone applies"
        );
    }

    let assemblies = input
        .assemblies
        .iter()
        .map(|a| {
            let assembly = Assembly::new(a.kind, a.layers.clone())?;
            engine.assess_assembly(&assembly, zone)
        })
        .collect::<Result<Vec<_>, _>>()?;

    let ledger = input.window_ledger()?;
    let windows = engine.evaluate_windows(&ledger, zone);
    let aggregate = aggregate_weighted_u(&ledger);

    let condensation = match &input.condensation {
        Some(case) => {
            let defaults = CondensationDefaults::default();
            let reading = engine.analyze_condensation(
                case.interior_temp_c.unwrap_or(defaults.interior_temp_c),
                case.interior_rh_percent.unwrap_or(defaults.interior_rh_percent),
                case.exterior_temp_c,
                case.element_u,
            )?;
            if reading.risk {
                warn!(margin_c = reading.margin_c, "surface condensation risk");
            }
            Some(reading)
        }
        None => None,
    };

    Ok(ProjectReport {
        metadata: ProjectMetadata {
            name: input.name.clone(),
            region: input.region.clone(),
            commune: input.commune.clone(),
            zone,
        },
        generated_at: Utc::now(),
        high_altitude_applied: resolution.high_altitude_applied,
        assemblies,
        windows,
        aggregate_weighted_u: aggregate,
        condensation,
    })
}
