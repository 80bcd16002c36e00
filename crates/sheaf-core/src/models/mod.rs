//! Data models: image records and pipeline configuration.

pub mod config;
pub mod image;

pub use config::{IngestConfig, LayoutConfig, PageConfig, SheafConfig};
pub use image::{ImageEntry, ImageKind, ResolvedImage};
