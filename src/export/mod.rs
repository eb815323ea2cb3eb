//! Export pipeline: notebook pages → SVG files.
//!
//! ```text
//! Page ─► Renderer ─► Compositor (+ template) ─► [usvg] ─► Page_nnn.svg
//! ```
//!
//! Pages are processed in parallel. A failing page is recorded in the
//! [`ExportReport`] and never stops its siblings.

use crate::compose::{Compositor, Template, TemplateStore};
use crate::config::RenderConfig;
use crate::logger::ProgressLine;
use crate::model::{Notebook, Page, Warning, page_file_stem};
use crate::render::optimize::{OptimizeOptions, optimize_svg};
use crate::render::{Renderer, SvgDocument};
use crate::{debug, log};
use rayon::prelude::*;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

const SVG_EXT: &str = "svg";

/// Outcome of exporting one notebook.
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written, ordered by page number.
    pub written: Vec<PathBuf>,
    /// Page number and reason of every page that was not written.
    pub failures: Vec<(u32, String)>,
}

impl ExportReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct Exporter<'a> {
    config: &'a RenderConfig,
    templates: TemplateStore,
    progress: bool,
}

impl<'a> Exporter<'a> {
    pub fn new(config: &'a RenderConfig) -> Self {
        Self {
            config,
            templates: TemplateStore::new(&config.template),
            progress: false,
        }
    }

    /// Show a progress line while pages are written.
    pub fn with_progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// `<output>/<folders…>/<name>`
    pub fn notebook_dir(&self, notebook: &Notebook) -> PathBuf {
        let mut dir = self.config.output.dir.clone();
        for folder in &notebook.folders {
            dir.push(sanitize_name(folder));
        }
        dir.push(sanitize_name(&notebook.name));
        dir
    }

    /// Export every page of a notebook.
    pub fn export(&self, notebook: &Notebook) -> ExportReport {
        let mut report = ExportReport::default();
        if notebook.pages().is_empty() {
            debug!("export"; "{}: no pages", notebook.name);
            return report;
        }

        let dir = self.notebook_dir(notebook);
        if let Err(e) = fs::create_dir_all(&dir) {
            let message = format!("cannot create {}: {}", dir.display(), e);
            log!("error"; "{}", message);
            report.failures = notebook
                .pages()
                .iter()
                .map(|p| (p.page_number, message.clone()))
                .collect();
            return report;
        }

        let templates = self.preload_templates(notebook);
        let progress = self
            .progress
            .then(|| ProgressLine::new("export", notebook.name.as_str(), notebook.pages().len()));

        let results: Vec<(u32, Result<PathBuf, String>)> = notebook
            .pages()
            .par_iter()
            .map(|page| {
                let template = notebook
                    .template_name(page.page_number)
                    .and_then(|name| templates.get(name))
                    .and_then(Option::as_ref);
                let result = self.export_page(notebook, page, template, &dir);
                if let Some(p) = &progress {
                    p.tick(result.is_ok());
                }
                (page.page_number, result)
            })
            .collect();

        if let Some(p) = progress {
            p.finish();
        }

        for (number, result) in results {
            match result {
                Ok(path) => report.written.push(path),
                Err(message) => {
                    log!("error"; "{} page {}: {}", notebook.name, number, message);
                    report.failures.push((number, message));
                }
            }
        }
        report
    }

    /// Load each distinct template the notebook uses once.
    ///
    /// Names without a matching file map to `None`.
    fn preload_templates(&self, notebook: &Notebook) -> HashMap<String, Option<Template>> {
        let mut templates = HashMap::new();
        for page in notebook.pages() {
            let Some(name) = notebook.template_name(page.page_number) else {
                continue;
            };
            if templates.contains_key(name) {
                continue;
            }
            let template = match self.templates.load(name) {
                Ok(Some(template)) => Some(template),
                Ok(None) => {
                    log!("warning"; "{}: {}", notebook.name, Warning::MissingTemplate { name: name.to_owned() });
                    None
                }
                Err(e) => {
                    log!("warning"; "{}: {}", notebook.name, e);
                    None
                }
            };
            templates.insert(name.to_owned(), template);
        }
        templates
    }

    fn export_page(
        &self,
        notebook: &Notebook,
        page: &Page,
        template: Option<&Template>,
        dir: &Path,
    ) -> Result<PathBuf, String> {
        for warning in Renderer::unknown_codes(page) {
            log!("warning"; "{} page {}: {}", notebook.name, page.page_number, warning);
        }

        let foreground = Renderer::new(&self.config.palette).render(page, notebook.orientation);
        let title = notebook.page_title(page.page_number);

        let composited = Compositor::new(&self.config.template.grid)
            .composite(&foreground, template, &title)
            .unwrap_or_else(|e| {
                log!("warning"; "{} page {}: {}, writing page without template", notebook.name, page.page_number, e);
                foreground
            });

        let document = if self.config.output.optimize {
            self.optimize(composited, &notebook.name, page.page_number)
        } else {
            composited
        };

        let path = dir
            .join(page_file_stem(page.page_number))
            .with_extension(SVG_EXT);
        fs::write(&path, document.as_bytes())
            .map_err(|e| format!("cannot write {}: {}", path.display(), e))?;

        debug!("export"; "{}", path.display());
        Ok(path)
    }

    fn optimize(&self, document: SvgDocument, name: &str, page_number: u32) -> SvgDocument {
        let options = OptimizeOptions {
            dpi: self.config.output.dpi,
        };
        match optimize_svg(&document, &options) {
            Ok(optimized) => optimized,
            Err(e) => {
                log!("warning"; "{} page {}: {}, writing unoptimized page", name, page_number, e);
                document
            }
        }
    }
}

/// Make a visible name usable as a single path component.
pub fn sanitize_name(name: &str) -> String {
    let name: String = name
        .trim()
        .chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '\0' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect();
    match name.as_str() {
        "" | "." | ".." => "_".to_owned(),
        _ => name,
    }
}
