//! Command-line interface definitions.

use clap::{ColorChoice, Parser, Subcommand};
use std::path::PathBuf;

/// Convert reMarkable notebook pages to SVG
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None, arg_required_else_help = true)]
pub struct Cli {
    /// Control colored output (auto, always, never)
    #[arg(long, global = true, default_value = "auto")]
    pub color: ColorChoice,

    /// Config file path (default: rmsvg.toml, searched upward from cwd)
    #[arg(short = 'C', long, global = true, default_value = "rmsvg.toml", value_hint = clap::ValueHint::FilePath)]
    pub config: PathBuf,

    /// subcommands
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Export notebooks from an extracted xochitl directory
    #[command(visible_alias = "e")]
    Export {
        #[command(flatten)]
        args: ExportArgs,
    },

    /// Decode a single page and print its structure
    #[command(visible_alias = "i")]
    Inspect {
        #[command(flatten)]
        args: InspectArgs,
    },
}

/// Export command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct ExportArgs {
    /// Directory holding `<id>.content`, `<id>.pagedata` and `<id>/` page folders
    #[arg(value_hint = clap::ValueHint::DirPath)]
    pub dir: PathBuf,

    /// Only export these notebook ids (repeatable). Exports all if omitted.
    #[arg(long = "id", value_name = "ID")]
    pub ids: Vec<String>,

    /// Output directory (overrides `output.dir`)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Template directory (overrides `template.dir`)
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub templates: Option<PathBuf>,

    /// Optimize each page with usvg before writing
    #[arg(long, action = clap::ArgAction::Set, num_args = 0..=1, default_missing_value = "true", require_equals = false)]
    pub optimize: Option<bool>,

    /// Enable verbose output for debugging
    #[arg(short = 'V', long)]
    pub verbose: bool,
}

/// Inspect command arguments.
#[derive(clap::Args, Debug, Clone)]
pub struct InspectArgs {
    /// Page file to decode
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Print the decoded page as JSON
    #[arg(short, long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(short, long, requires = "json")]
    pub pretty: bool,
}

impl Cli {
    pub const fn is_export(&self) -> bool {
        matches!(self.command, Commands::Export { .. })
    }
}
