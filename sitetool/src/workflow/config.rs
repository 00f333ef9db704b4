use anyhow::Context;
use gnsscore::catalog::DEFAULT_ORIGIN;
use gnsscore::plot::PlotKind;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Manifest job settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default = "default_origin")]
    pub origin: String,
    #[serde(default)]
    pub plot_kind: PlotKind,
    /// Restrict the manifest to these site identifiers.
    #[serde(default)]
    pub sites: Option<Vec<String>>,
}

fn default_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

impl JobConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading job config {}", path_ref.display()))?;
        let config: JobConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing job config {}", path_ref.display()))?;
        Ok(config)
    }

    pub fn from_plot_type(plot_type: &str) -> anyhow::Result<Self> {
        let plot_kind = plot_type
            .parse::<PlotKind>()
            .context("parsing --plot-type")?;
        Ok(Self {
            origin: default_origin(),
            plot_kind,
            sites: None,
        })
    }
}
