//! Centralized path resolution for page URLs and output locations.
//!
//! # Architecture
//!
//! ```text
//! SiteConfig
//!     │
//!     └── paths() → PathResolver
//!                       │
//!                       ├── page_url()    content/blog/post.md → /blog/post
//!                       ├── html_path()   /blog/post           → out/blog/post.html
//!                       └── asset_dest()  static/css/site.css  → out/css/site.css
//! ```

use crate::error::BuildError;
use std::path::{Component, Path, PathBuf};

/// Markdown source extension (without the dot)
pub const MARKDOWN_EXT: &str = "md";

/// Path resolver bound to one site configuration.
#[derive(Debug, Clone, Copy)]
pub struct PathResolver<'a> {
    content: &'a Path,
    statics: &'a Path,
    output: &'a Path,
}

impl<'a> PathResolver<'a> {
    #[inline]
    pub const fn new(content: &'a Path, statics: &'a Path, output: &'a Path) -> Self {
        Self {
            content,
            statics,
            output,
        }
    }

    /// Logical URL of a content file.
    ///
    /// The content root prefix and the trailing `.md` extension are removed and
    /// the remaining components are joined with `/`:
    ///
    /// ```ignore
    /// paths.page_url("content/blog/post.md") → "/blog/post"
    /// paths.page_url("content/index.md")     → "/index"
    /// ```
    pub fn page_url(&self, source: &Path) -> Result<String, BuildError> {
        let rel = source
            .strip_prefix(self.content)
            .map_err(|_| BuildError::OutsideRoot {
                path: source.to_path_buf(),
                root: self.content.to_path_buf(),
            })?;

        let rel = if rel.extension().is_some_and(|ext| ext == MARKDOWN_EXT) {
            rel.with_extension("")
        } else {
            rel.to_path_buf()
        };

        let segments: Vec<_> = rel
            .components()
            .filter_map(|c| match c {
                Component::Normal(s) => Some(s.to_string_lossy()),
                _ => None,
            })
            .collect();

        Ok(format!("/{}", segments.join("/")))
    }

    /// Output HTML file for a page URL: `<out><url>.html`.
    pub fn html_path(&self, url: &str) -> PathBuf {
        self.output
            .join(format!("{}.html", url.trim_start_matches('/')))
    }

    /// Output location of a static asset, mirroring its path under the static root.
    pub fn asset_dest(&self, source: &Path) -> Result<PathBuf, BuildError> {
        let rel = source
            .strip_prefix(self.statics)
            .map_err(|_| BuildError::OutsideRoot {
                path: source.to_path_buf(),
                root: self.statics.to_path_buf(),
            })?;
        Ok(self.output.join(rel))
    }
}
