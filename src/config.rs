use anyhow::{Context, Result};
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::path::PathBuf;

use crate::reference::ReferenceData;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub reference: ReferenceConfig,
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Where the normative tables come from; the bundled set when unset.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReferenceConfig {
    pub path: Option<PathBuf>,
}

impl ReferenceConfig {
    pub fn load(&self) -> Result<ReferenceData> {
        match &self.path {
            Some(path) => ReferenceData::from_file(path)
                .with_context(|| format!("loading reference data from {}", path.display())),
            None => ReferenceData::builtin().context("loading bundled reference data"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    pub path: PathBuf,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("project.toml"),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub pretty: bool,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::from_figment(Figment::new().merge(Toml::file("config/default.toml")))
    }

    fn from_figment(figment: Figment) -> Result<Self> {
        let figment = figment.merge(Env::prefixed("ENVELOPE__").split("__"));
        figment.extract().context("invalid configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_toml() {
        figment::Jail::expect_with(|jail| {
            jail.create_file(
                "envelope.toml",
                r#"
                    [project]
                    path = "demos/casa.toml"

                    [output]
                    pretty = true
                "#,
            )?;
            let config = Config::from_figment(Figment::new().merge(Toml::file("envelope.toml")))
                .map_err(|e| e.to_string())?;
            assert_eq!(config.project.path, PathBuf::from("demos/casa.toml"));
            assert!(config.output.pretty);
            assert!(config.reference.path.is_none());
            Ok(())
        });
    }

    #[test]
    fn test_env_overrides_file() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("ENVELOPE__PROJECT__PATH", "other.toml");
            let config = Config::from_figment(Figment::new()).map_err(|e| e.to_string())?;
            assert_eq!(config.project.path, PathBuf::from("other.toml"));
            Ok(())
        });
    }

    #[test]
    fn test_builtin_reference_when_no_path() {
        let reference = ReferenceConfig::default().load().unwrap();
        assert!(!reference.zones.is_empty());
    }
}
