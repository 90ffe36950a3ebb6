//! Page parsing and rendering.
//!
//! Both phases fan out over rayon's global pool. Each phase is one parallel
//! join: the first error returned by any page aborts the phase.

use super::markdown::convert;
use super::meta::{Page, PageMeta, Pages, decode_front_matter};
use super::template::Templates;
use crate::{config::SiteConfig, error::BuildError, log};
use rayon::prelude::*;
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Parse phase
// ============================================================================

/// Parse every markdown file into a page, preserving input order.
pub fn collect_pages(files: &[PathBuf], config: &SiteConfig) -> Result<Pages, BuildError> {
    let items = files
        .par_iter()
        .map(|path| parse_page(path, config))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Pages { items })
}

/// Read one markdown file and convert it into a [`Page`].
pub fn parse_page(path: &Path, config: &SiteConfig) -> Result<Page, BuildError> {
    let url = config.paths().page_url(path)?;
    log!("parse"; "{}", path.display());

    let source =
        fs::read_to_string(path).map_err(|err| BuildError::Read(path.to_path_buf(), err))?;
    let converted = convert(&source);

    let meta = match converted.front_matter {
        Some((kind, raw)) => decode_front_matter(kind, &raw)
            .map_err(|err| BuildError::FrontMatter(path.to_path_buf(), err))?,
        None => PageMeta::default(),
    };

    Ok(Page {
        path: url,
        source: path.to_path_buf(),
        content: converted.html,
        meta,
    })
}

// ============================================================================
// Render phase
// ============================================================================

/// Render every page against the full collection.
///
/// Templates and the `all_pages` listing are prepared once and shared by
/// every worker.
pub fn render_pages(pages: &Pages, config: &SiteConfig) -> Result<(), BuildError> {
    let templates = Templates::new(config, &pages.items);
    pages
        .items
        .par_iter()
        .try_for_each(|page| render_page(page, &templates, config).map(|_| ()))
}

/// Render one page to `<out><url>.html`, returning the written path.
pub fn render_page(
    page: &Page,
    templates: &Templates,
    config: &SiteConfig,
) -> Result<PathBuf, BuildError> {
    let html = templates.render(page)?;

    let dest = config.paths().html_path(&page.path);
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|err| BuildError::CreateDir(parent.to_path_buf(), err))?;
    }
    fs::write(&dest, html).map_err(|err| BuildError::Write(dest.clone(), err))?;

    log!("render"; "{} -> {}", page.source.display(), dest.display());
    Ok(dest)
}
