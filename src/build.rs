//! Site building orchestration.
//!
//! # Architecture
//!
//! ```text
//! build_site()
//!     │
//!     ├── clean_output()            remove <out> if present
//!     ├── collect_markdown_files()  walk content root, sorted
//!     ├── collect_pages()           parallel parse   ── barrier
//!     ├── render_pages()            parallel render  ── barrier
//!     └── copy_static()             sequential copy
//! ```
//!
//! Phases run strictly in order. A failure stops the build where it is;
//! nothing already written is rolled back.

use crate::{
    compiler::{collect_markdown_files, collect_pages, copy_static, meta::Pages, render_pages},
    config::SiteConfig,
    error::BuildError,
    log,
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// Build the entire site. Returns the parsed page collection.
pub fn build_site(config: &SiteConfig) -> Result<Pages> {
    clean_output(&config.output_dir).context("clean phase failed")?;

    let files =
        collect_markdown_files(&config.content_dir).context("content discovery failed")?;
    let pages = collect_pages(&files, config).context("parse phase failed")?;
    if pages.is_empty() {
        log!("warn"; "no markdown files in {}", config.content_dir.display());
    }

    render_pages(&pages, config).context("render phase failed")?;
    let copied = copy_static(config).context("static copy failed")?;

    log!("build"; "done: {} pages, {} static files", pages.len(), copied);
    Ok(pages)
}

fn clean_output(output: &Path) -> Result<(), BuildError> {
    if !output.exists() {
        return Ok(());
    }
    log!("clean"; "{}", output.display());
    fs::remove_dir_all(output).map_err(|err| BuildError::Remove(output.to_path_buf(), err))
}
