//! Terminal logging with colored `[module]` prefixes and a page counter.
//!
//! All output goes to stderr; stdout belongs to `inspect --json`.
//!
//! ```ignore
//! log!("export"; "{} pages from {}", count, name);
//! debug!("decode"; "page {}: {} trailing bytes", n, extra);
//!
//! let progress = ProgressLine::new("export", "Meeting", 12);
//! progress.tick(true);
//! progress.finish();
//! ```

use crossterm::{
    cursor, execute,
    terminal::{Clear, ClearType},
};
use owo_colors::OwoColorize;
use parking_lot::Mutex;
use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, AtomicUsize, Ordering},
};

static VERBOSE: AtomicBool = AtomicBool::new(false);

/// Set by a live [`ProgressLine`]; log lines then clear the row first.
static PROGRESS_ACTIVE: AtomicBool = AtomicBool::new(false);

pub fn set_verbose(verbose: bool) {
    VERBOSE.store(verbose, Ordering::Relaxed);
}

pub fn is_verbose() -> bool {
    VERBOSE.load(Ordering::Relaxed)
}

/// `log!("module"; "format {}", args)`
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        $crate::logger::log($module, &format!($($arg)*))
    }};
}

/// Like [`log!`], printed only with `--verbose`.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_verbose() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

pub fn log(module: &str, message: &str) {
    let line = format!("{} {}", colorize_prefix(module), message);
    let mut out = stderr().lock();
    if PROGRESS_ACTIVE.load(Ordering::Relaxed) {
        clear_row(&mut out);
    }
    writeln!(out, "{line}").ok();
    out.flush().ok();
}

fn clear_row(out: &mut impl Write) {
    execute!(out, cursor::MoveToColumn(0), Clear(ClearType::CurrentLine)).ok();
}

fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module {
        "error" => prefix.bright_red().bold().to_string(),
        "warning" => prefix.yellow().bold().to_string(),
        "export" | "inspect" => prefix.bright_blue().bold().to_string(),
        "config" | "notebook" | "decode" => prefix.bright_black().to_string(),
        _ => prefix.bright_yellow().bold().to_string(),
    }
}

/// In-place counter for the pages of one notebook.
///
/// Rendered as `[export] Meeting 7/12 pages, 1 failed`. Rayon workers call
/// [`tick`](Self::tick); a redraw that would block is skipped.
pub struct ProgressLine {
    prefix: &'static str,
    label: String,
    total: usize,
    done: AtomicUsize,
    failed: AtomicUsize,
    redraw: Mutex<()>,
}

impl ProgressLine {
    pub fn new(prefix: &'static str, label: impl Into<String>, total: usize) -> Self {
        PROGRESS_ACTIVE.store(true, Ordering::Relaxed);
        let progress = Self {
            prefix,
            label: label.into(),
            total,
            done: AtomicUsize::new(0),
            failed: AtomicUsize::new(0),
            redraw: Mutex::new(()),
        };
        progress.draw(false);
        progress
    }

    /// Count one finished item.
    pub fn tick(&self, ok: bool) {
        self.done.fetch_add(1, Ordering::Relaxed);
        if !ok {
            self.failed.fetch_add(1, Ordering::Relaxed);
        }
        if let Some(_guard) = self.redraw.try_lock() {
            self.draw(false);
        }
    }

    pub fn done(&self) -> usize {
        self.done.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> usize {
        self.failed.load(Ordering::Relaxed)
    }

    fn status(&self) -> String {
        let mut status = format!("{} {}/{} pages", self.label, self.done(), self.total);
        match self.failed() {
            0 => {}
            n => status.push_str(&format!(", {n} failed")),
        }
        status
    }

    fn draw(&self, final_line: bool) {
        let line = format!("{} {}", colorize_prefix(self.prefix), self.status());
        let mut out = stderr().lock();
        clear_row(&mut out);
        if final_line {
            writeln!(out, "{line}").ok();
        } else {
            write!(out, "{line}").ok();
        }
        out.flush().ok();
    }

    /// Leave the final count on screen.
    pub fn finish(self) {
        PROGRESS_ACTIVE.store(false, Ordering::Relaxed);
        let _guard = self.redraw.lock();
        self.draw(true);
    }
}
