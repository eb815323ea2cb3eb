//! Loading notebooks from an extracted device directory.
//!
//! # Layout
//!
//! ```text
//! <dir>/
//! ├── <id>.content     JSON: orientation, pageCount
//! ├── <id>.metadata    JSON: visibleName, parent, type (optional)
//! ├── <id>.pagedata    template name per page, one per line
//! └── <id>/
//!     ├── 0.rm
//!     └── 1.rm
//! ```
//!
//! Folders are `.metadata` entries of type `CollectionType`; a notebook's
//! folder chain follows `parent` ids up to the root.

mod error;
pub mod metadata;

pub use error::NotebookError;

use crate::lines::decode_page;
use crate::model::Notebook;
use crate::{debug, log};
use metadata::{ContentFile, MetadataFile, parse_pagedata, read_json};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

pub const CONTENT_EXT: &str = "content";
pub const METADATA_EXT: &str = "metadata";
pub const PAGEDATA_EXT: &str = "pagedata";
pub const PAGE_EXT: &str = "rm";

/// All `.metadata` entries of a directory, indexed by id.
#[derive(Debug, Default)]
pub struct Library {
    dir: PathBuf,
    metadata: HashMap<String, MetadataFile>,
}

impl Library {
    /// Index a directory.
    ///
    /// Unreadable `.metadata` files are skipped with a warning; they only
    /// cost their notebook its name and folders.
    pub fn scan(dir: &Path) -> Result<Self, NotebookError> {
        let mut metadata = HashMap::new();
        for path in files_with_ext(dir, METADATA_EXT)? {
            let Some(id) = file_id(&path) else { continue };
            match read_json::<MetadataFile>(&path) {
                Ok(meta) => {
                    metadata.insert(id, meta);
                }
                Err(e) => log!("warning"; "{}", e),
            }
        }
        debug!("notebook"; "{} metadata entries in {}", metadata.len(), dir.display());

        Ok(Self {
            dir: dir.to_path_buf(),
            metadata,
        })
    }

    /// Ids of exportable notebooks, sorted.
    ///
    /// Every id with a `.content` file, except folders and trashed items.
    pub fn notebook_ids(&self) -> Result<Vec<String>, NotebookError> {
        let mut ids: Vec<String> = files_with_ext(&self.dir, CONTENT_EXT)?
            .iter()
            .filter_map(|p| file_id(p))
            .filter(|id| {
                self.metadata
                    .get(id)
                    .is_none_or(|m| !m.is_folder() && !m.is_trashed())
            })
            .collect();
        ids.sort();
        Ok(ids)
    }

    /// Folder names from the root down to the notebook's parent.
    ///
    /// Stops at an empty parent, the trash, an unknown id, or an id that
    /// was already visited.
    pub fn folder_chain(&self, id: &str) -> Vec<String> {
        let mut chain = Vec::new();
        let mut visited = HashSet::from([id]);
        let mut current = self.metadata.get(id).map(|m| m.parent.as_str());

        while let Some(parent) = current {
            if parent.is_empty() || parent == metadata::TRASH || !visited.insert(parent) {
                break;
            }
            let Some(meta) = self.metadata.get(parent) else {
                break;
            };
            chain.push(meta.visible_name.clone());
            current = Some(meta.parent.as_str());
        }

        chain.reverse();
        chain
    }

    /// Load a notebook and decode its pages.
    ///
    /// Empty or undecodable pages are skipped with a warning.
    pub fn open(&self, id: &str) -> Result<Notebook, NotebookError> {
        let content_path = self.dir.join(format!("{id}.{CONTENT_EXT}"));
        if !content_path.is_file() {
            return Err(NotebookError::MissingContent(content_path));
        }
        let content: ContentFile = read_json(&content_path)?;

        let name = self
            .metadata
            .get(id)
            .map(|m| m.visible_name.trim())
            .filter(|n| !n.is_empty())
            .unwrap_or(id);

        let mut notebook = Notebook::new(id, name);
        notebook.orientation = content.orientation();
        notebook.folders = self.folder_chain(id);

        let pagedata_path = self.dir.join(format!("{id}.{PAGEDATA_EXT}"));
        if pagedata_path.is_file() {
            let pagedata = fs::read_to_string(&pagedata_path)
                .map_err(|e| NotebookError::Io(pagedata_path.clone(), e))?;
            notebook.template_names = parse_pagedata(&pagedata);
        }

        if let Some(kind) = content.file_type.as_deref().filter(|k| *k != "notebook" && !k.is_empty()) {
            debug!("notebook"; "{} is a {} document, exporting annotations only", name, kind);
        }

        let page_dir = self.dir.join(id);
        let page_files = if page_dir.is_dir() {
            page_files(&page_dir)?
        } else {
            Vec::new()
        };

        let pages: Vec<_> = page_files
            .par_iter()
            .filter_map(|(number, path)| match fs::read(path) {
                Ok(bytes) if bytes.is_empty() => {
                    log!("warning"; "{}: page file is empty, skipped", path.display());
                    None
                }
                Ok(bytes) => match decode_page(*number, &bytes) {
                    Ok(page) => Some(page),
                    Err(e) => {
                        log!("warning"; "{}: {}, skipped", path.display(), e);
                        None
                    }
                },
                Err(e) => {
                    log!("warning"; "{}: {}, skipped", path.display(), e);
                    None
                }
            })
            .collect();

        for page in pages {
            notebook.add_page(page);
        }

        if let Some(expected) = content.page_count
            && expected as usize != notebook.pages().len()
        {
            debug!("notebook"; "{}: {} pages declared, {} loaded", name, expected, notebook.pages().len());
        }

        Ok(notebook)
    }
}

impl Notebook {
    /// Load notebook `id` from an extracted directory.
    pub fn open(dir: &Path, id: &str) -> Result<Self, NotebookError> {
        Library::scan(dir)?.open(id)
    }
}

/// Ids of all exportable notebooks in `dir`.
pub fn discover(dir: &Path) -> Result<Vec<String>, NotebookError> {
    Library::scan(dir)?.notebook_ids()
}

fn files_with_ext(dir: &Path, ext: &str) -> Result<Vec<PathBuf>, NotebookError> {
    let entries = fs::read_dir(dir).map_err(|e| NotebookError::Io(dir.to_path_buf(), e))?;
    Ok(entries
        .filter_map(|e| e.ok())
        .map(|e| e.path())
        .filter(|p| p.is_file() && p.extension().is_some_and(|e| e == ext))
        .collect())
}

fn file_id(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(str::to_owned)
}

/// `(page number, path)` of every `<n>.rm` in a page directory.
fn page_files(page_dir: &Path) -> Result<Vec<(u32, PathBuf)>, NotebookError> {
    let mut pages = Vec::new();
    for path in files_with_ext(page_dir, PAGE_EXT)? {
        match file_id(&path).and_then(|stem| stem.parse::<u32>().ok()) {
            Some(number) => pages.push((number, path)),
            None => debug!("notebook"; "{}: not a numbered page, skipped", path.display()),
        }
    }
    pages.sort();
    Ok(pages)
}
