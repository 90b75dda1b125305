//! Viewer configuration file

use std::path::Path;

use anyhow::{ensure, Context, Result};
use dc_core::{Facet, FacetRegistry, SortSpec};
use dc_data::LoadConfig;
use dc_views::FIXED_BOX_HEIGHT;
use serde::{Deserialize, Serialize};

/// Settings read from the optional `--config` JSON file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Filterable fields, in display order
    pub facets: Vec<Facet>,

    /// Initial sort
    pub sort: SortSpec,

    /// Display height of the tallest device's box
    pub box_height: f64,

    /// How the CSV is split into fields
    pub load: LoadConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            facets: FacetRegistry::default().iter().cloned().collect(),
            sort: SortSpec::default(),
            box_height: FIXED_BOX_HEIGHT,
            load: LoadConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Read a configuration file; missing keys take their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {:?}", path))?;
        let config: Self = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {:?}", path))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.box_height.is_finite() && self.box_height > 0.0,
            "box_height must be a positive number, got {}",
            self.box_height
        );
        Ok(())
    }

    pub fn registry(&self) -> FacetRegistry {
        FacetRegistry::new(self.facets.clone())
    }
}
