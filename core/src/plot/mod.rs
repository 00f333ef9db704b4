//! Time-series plot selection and image loading.

pub mod request;
pub mod tracker;

pub use request::{plot_header_title, plot_image_path, plot_image_urls};
pub use tracker::PlotLoadTracker;

use serde::{Deserialize, Serialize};

use crate::prelude::WidgetError;

/// Plot family chosen with the radio control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlotKind {
    #[default]
    Displacement,
    Multipath,
}

impl PlotKind {
    /// Plot-variable codes requested for this family.
    pub fn variable_codes(&self) -> &'static [&'static str] {
        match self {
            PlotKind::Displacement => &["e", "n", "u"],
            PlotKind::Multipath => &["mp1", "mp2"],
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PlotKind::Displacement => "Displacement",
            PlotKind::Multipath => "Multipath",
        }
    }
}

impl std::str::FromStr for PlotKind {
    type Err = WidgetError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "displacement" => Ok(PlotKind::Displacement),
            "multipath" => Ok(PlotKind::Multipath),
            other => Err(WidgetError::InvalidInput(format!(
                "unknown plot type: {other}"
            ))),
        }
    }
}
