//! Markdown compilation and asset processing.
//!
//! - **markdown**: Markdown → HTML with front matter, autolinks and highlighting
//! - **highlight**: Class-based syntax highlighting for fenced code
//! - **meta**: Page metadata and the page collection
//! - **template**: template loading and helper functions
//! - **pages**: Parse and render phases
//! - **assets**: Static file copying
//!
//! # Build Flow
//!
//! ```text
//! collect_markdown_files() ──► collect_pages() ──► render_pages() ──► copy_static()
//!          │                         │                   │                 │
//!          ▼                         ▼                   ▼                 ▼
//!     sorted .md paths         Pages (barrier)     HTML files (barrier)  static files
//! ```

pub mod assets;
pub mod highlight;
pub mod markdown;
pub mod meta;
pub mod pages;
pub mod template;

use crate::{config::MARKDOWN_EXT, error::BuildError};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub use assets::copy_static;
pub use pages::{collect_pages, render_pages};

/// Collect all markdown files under `dir`, sorted by file name at each level.
pub fn collect_markdown_files(dir: &Path) -> Result<Vec<PathBuf>, BuildError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|err| BuildError::Walk(dir.to_path_buf(), err))?;
        if entry.file_type().is_file()
            && entry.path().extension().is_some_and(|ext| ext == MARKDOWN_EXT)
        {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}
