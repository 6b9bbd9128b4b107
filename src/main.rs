use anyhow::{Context, Result};
use envelope_compliance::{config, engine::EnvelopeEngine, project, report::ToFieldMap, telemetry};
use config::Config;
use std::path::PathBuf;
use telemetry::init_tracing;
use tracing::{info, warn};

fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing();

    let cfg = Config::load()?;
    let reference = cfg.reference.load()?;
    let engine = EnvelopeEngine::new(&reference);

    let project_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| cfg.project.path.clone());
    info!(path = %project_path.display(), "evaluating project");

    let input = project::ProjectInput::from_file(&project_path)
        .with_context(|| format!("reading project {}", project_path.display()))?;
    let report = project::evaluate_project(&engine, &input)?;

    for assessment in &report.assemblies {
        info!(row = %serde_json::to_string(&assessment.to_field_map())?, "assembly");
    }
    if !report.all_passed() {
        warn!(project = %report.metadata.name, "project does not comply");
    }

    let sheets = serde_json::json!({
        "summary": report.summary(),
        "detail": report.detail(),
        "report": report,
    });
    let output = if cfg.output.pretty {
        serde_json::to_string_pretty(&sheets)?
    } else {
        serde_json::to_string(&sheets)?
    };
    println!("{}", output);
    Ok(())
}
