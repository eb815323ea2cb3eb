//! Export configuration management for `rmsvg.toml`.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── section/       # Configuration section definitions
//! │   ├── palette    # [palette]
//! │   ├── template   # [template]
//! │   └── output     # [output]
//! ├── types/         # Utility types
//! │   ├── error      # ConfigError, ConfigDiagnostics
//! │   └── field      # FieldPath
//! └── mod.rs         # RenderConfig (this file)
//! ```
//!
//! # Sections
//!
//! | Section      | Purpose                                        |
//! |--------------|------------------------------------------------|
//! | `[palette]`  | Stroke colors for primary/secondary/... codes  |
//! | `[template]` | Template directory, grid color, blank name     |
//! | `[output]`   | Export directory, optimizer switch, DPI        |
//!
//! The file is optional: without one every section takes its defaults and
//! paths resolve against the working directory.

pub mod section;
pub mod types;
mod util;

use util::find_config_file;

pub use section::{OutputConfig, Palette, TemplateConfig};
pub use types::{ConfigDiagnostics, ConfigError, FieldPath};

use crate::cli::{Cli, Commands, ExportArgs};
use crate::{debug, log};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing rmsvg.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Absolute path to the config file, `None` when running on defaults
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    /// Directory relative config paths resolve against
    #[serde(skip)]
    pub root: PathBuf,

    pub palette: Palette,

    pub template: TemplateConfig,

    pub output: OutputConfig,
}

impl RenderConfig {
    /// Load configuration for a CLI invocation.
    ///
    /// Searches upward from cwd for the config file. Config paths resolve
    /// against the file's directory; CLI path overrides resolve against cwd.
    pub fn load(cli: &Cli) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current working directory")?;

        let mut config = match find_config_file(&cli.config, &cwd) {
            Some(path) => {
                debug!("config"; "using {}", path.display());
                let mut config = Self::from_path(&path)?;
                config.root = path.parent().map(Path::to_path_buf).unwrap_or_default();
                config.config_path = Some(path);
                config
            }
            None => {
                debug!("config"; "{} not found, using defaults", cli.config.display());
                Self {
                    root: cwd.clone(),
                    ..Self::default()
                }
            }
        };

        config.normalize_paths();
        config.apply_command_options(cli, &cwd);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from file path with unknown field detection.
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>), ConfigError> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config = serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
            ignored.push(path.to_string());
        })?;
        Ok((config, ignored))
    }

    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {}", field);
        }
    }

    /// Resolve section paths against the config root.
    fn normalize_paths(&mut self) {
        let root = self.root.clone();
        self.template.normalize(&root);
        self.output.normalize(&root);
    }

    /// Apply command-specific configuration options.
    fn apply_command_options(&mut self, cli: &Cli, cwd: &Path) {
        match &cli.command {
            Commands::Export { args } => self.apply_export_args(args, cwd),
            Commands::Inspect { .. } => {}
        }
    }

    fn apply_export_args(&mut self, args: &ExportArgs, cwd: &Path) {
        crate::logger::set_verbose(args.verbose);

        if let Some(dir) = &args.output {
            self.output.dir = cwd.join(dir);
        }
        if let Some(dir) = &args.templates {
            self.template.dir = cwd.join(dir);
        }
        if let Some(optimize) = args.optimize {
            self.output.optimize = optimize;
        }
    }

    /// Validate every section, collecting all errors before failing.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut diag = ConfigDiagnostics::new();

        self.palette.validate(&mut diag);
        self.template.validate(&mut diag);
        self.output.validate(&mut diag);

        if !self.template.dir.is_dir() {
            diag.warn(
                TemplateConfig::FIELDS.dir,
                format!(
                    "`{}` is not a directory, pages are exported without templates",
                    self.template.dir.display()
                ),
            );
        }

        diag.print_warnings();
        diag.into_result().map_err(ConfigError::Diagnostics)
    }
}

/// Parse config and fail on unknown fields to catch typos in tests.
#[cfg(test)]
pub fn test_parse_config(content: &str) -> RenderConfig {
    let (parsed, ignored) = RenderConfig::parse_with_ignored(content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed
}
