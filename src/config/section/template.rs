//! `[template]` section: background template lookup.
//!
//! # Example
//!
//! ```toml
//! [template]
//! dir = "~/remarkable/templates"
//! grid = "gray"
//! blank = "Blank"
//! ```

use super::palette::validate_color;
use crate::config::{ConfigDiagnostics, FieldPath};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// Directory holding `<name>.svg` templates.
    ///
    /// Tilde-expanded and resolved against the config root on load.
    pub dir: PathBuf,

    /// Color substituted for black strokes in template styles.
    pub grid: String,

    /// Template name treated as "no template" (case-insensitive).
    pub blank: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
            grid: "gray".into(),
            blank: "Blank".into(),
        }
    }
}

pub struct TemplateFields {
    pub dir: FieldPath,
    pub grid: FieldPath,
    pub blank: FieldPath,
}

impl TemplateConfig {
    pub const FIELDS: TemplateFields = TemplateFields {
        dir: FieldPath::new("template.dir"),
        grid: FieldPath::new("template.grid"),
        blank: FieldPath::new("template.blank"),
    };

    pub fn normalize(&mut self, root: &Path) {
        self.dir = expand_path(&self.dir, root);
    }

    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        validate_color(Self::FIELDS.grid, &self.grid, diag);
        if self.blank.trim().is_empty() {
            diag.error_with_hint(
                Self::FIELDS.blank,
                "blank template name must not be empty",
                format!("remove {} to use the default `Blank`", Self::FIELDS.blank),
            );
        }
    }
}

/// Tilde-expand `path` and make it absolute against `root`.
pub fn expand_path(path: &Path, root: &Path) -> PathBuf {
    let expanded = shellexpand::tilde(&path.to_string_lossy()).into_owned();
    let path = PathBuf::from(expanded);
    if path.is_relative() {
        root.join(path)
    } else {
        path
    }
}
