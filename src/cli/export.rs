//! `export` command: every (or the selected) notebook of a directory to SVG.

use anyhow::{Context, Result, bail};

use super::{ExportArgs, counted};
use crate::config::RenderConfig;
use crate::export::Exporter;
use crate::log;
use crate::notebook::Library;

/// Run the export command.
///
/// Notebooks that fail to load are reported and skipped. The command fails
/// when any notebook or page could not be exported.
pub fn run_export(args: &ExportArgs, config: &RenderConfig) -> Result<()> {
    let library = Library::scan(&args.dir)
        .with_context(|| format!("Failed to read notebook directory {}", args.dir.display()))?;

    let ids = if args.ids.is_empty() {
        library.notebook_ids()?
    } else {
        args.ids.clone()
    };
    if ids.is_empty() {
        log!("export"; "no notebooks in {}", args.dir.display());
        return Ok(());
    }

    log!("export"; "{} to {}", counted(ids.len(), "notebook"), config.output.dir.display());

    let exporter = Exporter::new(config).with_progress(true);
    let mut written = 0;
    let mut failed = 0;

    for id in &ids {
        let notebook = match library.open(id) {
            Ok(notebook) => notebook,
            Err(e) => {
                log!("error"; "{}: {}", id, e);
                failed += 1;
                continue;
            }
        };

        log!("export"; "{} ({})", notebook.name, counted(notebook.pages().len(), "page"));
        let report = exporter.export(&notebook);
        written += report.written.len();
        failed += report.failures.len();
    }

    log!("export"; "wrote {}", counted(written, "page"));
    if failed > 0 {
        bail!("{} failed", counted(failed, "item"));
    }
    Ok(())
}
