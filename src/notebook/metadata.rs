//! Sibling JSON files of a notebook.
//!
//! Only the keys the exporter needs are read; everything else in these
//! files (timestamps, sync state, tool settings) is ignored.

use super::NotebookError;
use crate::model::Orientation;
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// `.metadata` type of folders.
pub const COLLECTION_TYPE: &str = "CollectionType";

/// Parent id of trashed items.
pub const TRASH: &str = "trash";

/// `<id>.content`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContentFile {
    pub orientation: Option<String>,
    pub page_count: Option<u32>,
    pub file_type: Option<String>,
}

impl ContentFile {
    pub fn orientation(&self) -> Orientation {
        self.orientation
            .as_deref()
            .map_or(Orientation::Portrait, Orientation::parse)
    }
}

/// `<id>.metadata`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MetadataFile {
    pub visible_name: String,
    pub parent: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub deleted: bool,
}

impl MetadataFile {
    pub fn is_folder(&self) -> bool {
        self.kind == COLLECTION_TYPE
    }

    pub fn is_trashed(&self) -> bool {
        self.deleted || self.parent == TRASH
    }
}

pub fn read_json<T: for<'de> Deserialize<'de>>(path: &Path) -> Result<T, NotebookError> {
    let content = fs::read_to_string(path).map_err(|e| NotebookError::Io(path.to_path_buf(), e))?;
    // Device files are occasionally empty right after creation
    if content.trim().is_empty() {
        return serde_json::from_str("{}").map_err(|e| NotebookError::Json(path.to_path_buf(), e));
    }
    serde_json::from_str(&content).map_err(|e| NotebookError::Json(path.to_path_buf(), e))
}

/// Template names, one per line, trailing blank lines dropped.
pub fn parse_pagedata(content: &str) -> Vec<String> {
    let mut names: Vec<String> = content.lines().map(|l| l.trim().to_owned()).collect();
    while names.last().is_some_and(|n| n.is_empty()) {
        names.pop();
    }
    names
}
