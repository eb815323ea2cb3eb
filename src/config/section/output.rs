//! `[output]` section.
//!
//! # Example
//!
//! ```toml
//! [output]
//! dir = "exports"
//! optimize = true
//! dpi = 96.0
//! ```

use super::template::expand_path;
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Root directory for exported pages.
    pub dir: PathBuf,

    /// Run each page through the SVG optimizer before writing.
    pub optimize: bool,

    /// DPI used by the optimizer when resolving units.
    pub dpi: f32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("exports"),
            optimize: false,
            dpi: 96.0,
        }
    }
}

pub struct OutputFields {
    pub dir: FieldPath,
    pub optimize: FieldPath,
    pub dpi: FieldPath,
}

impl OutputConfig {
    pub const FIELDS: OutputFields = OutputFields {
        dir: FieldPath::new("output.dir"),
        optimize: FieldPath::new("output.optimize"),
        dpi: FieldPath::new("output.dpi"),
    };

    pub fn normalize(&mut self, root: &Path) {
        self.dir = expand_path(&self.dir, root);
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if !(self.dpi.is_finite() && self.dpi > 0.0) {
            diag.error_with_hint(
                Self::FIELDS.dpi,
                format!("dpi must be positive, got {}", self.dpi),
                format!("set {} = 96.0", Self::FIELDS.dpi),
            );
        }
    }
}
