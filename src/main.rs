//! rmsvg - render reMarkable notebook pages to SVG.

#![allow(dead_code)]

mod cli;
mod compose;
mod config;
mod export;
mod lines;
mod logger;
mod model;
mod notebook;
mod render;

use anyhow::Result;
use clap::{ColorChoice, Parser};
use cli::{Cli, Commands};
use config::RenderConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set global color override based on CLI option
    match cli.color {
        ColorChoice::Always => owo_colors::set_override(true),
        ColorChoice::Never => owo_colors::set_override(false),
        ColorChoice::Auto => {} // owo-colors auto-detects TTY
    }

    match &cli.command {
        Commands::Export { args } => {
            let config = RenderConfig::load(&cli)?;
            cli::export::run_export(args, &config)
        }
        Commands::Inspect { args } => cli::inspect::run_inspect(args),
    }
}
