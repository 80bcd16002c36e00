//! Configuration structures for the composition pipeline.

use serde::{Deserialize, Serialize};

use crate::layout::FitPolicy;

/// Main configuration for the sheaf pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SheafConfig {
    /// Ingestion boundary configuration.
    pub ingest: IngestConfig,

    /// Reference output page configuration.
    pub page: PageConfig,

    /// Layout configuration.
    pub layout: LayoutConfig,
}

/// Ingestion boundary configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Maximum number of files accepted in one batch.
    pub max_batch_size: usize,

    /// Longer-side cap for generated preview copies, in pixels.
    pub preview_max_dimension: u32,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            max_batch_size: 80,
            preview_max_dimension: 600,
        }
    }
}

/// Reference page size in points, used by every fit policy except
/// `FitToImage` (which resizes the page per image).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// Page width in points.
    pub width: f64,

    /// Page height in points.
    pub height: f64,
}

impl Default for PageConfig {
    fn default() -> Self {
        // A4-like portrait page at 72 dpi-equivalent points.
        Self {
            width: 595.0,
            height: 842.0,
        }
    }
}

/// Layout configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Fit policy applied when the caller does not select one.
    pub fit_policy: FitPolicy,
}

impl SheafConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
        std::fs::write(path, content)
    }
}
