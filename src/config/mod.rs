//! Site configuration.
//!
//! The generator has no config file: every setting comes from the command
//! line and is collected into one [`SiteConfig`] value that is passed
//! explicitly to each build phase.
//!
//! | Field          | CLI flag        | Default     |
//! |----------------|-----------------|-------------|
//! | `content_dir`  | `--contentDir`  | `content`   |
//! | `template_dir` | `--templateDir` | `templates` |
//! | `static_dir`   | `--staticDir`   | `static`    |
//! | `output_dir`   | `--out`         | `out`       |

mod error;
mod paths;

pub use error::ConfigError;
pub use paths::{MARKDOWN_EXT, PathResolver};

use crate::cli::Cli;
use anyhow::{Result, bail};
use std::path::{Path, PathBuf};

/// Shared layout template, relative to the template root
pub const MAIN_TEMPLATE: &str = "main.html";

/// Directory holding one template per page type, relative to the template root
pub const TYPES_DIR: &str = "types";

/// Resolved build configuration
#[derive(Debug, Clone)]
pub struct SiteConfig {
    /// Root of markdown sources
    pub content_dir: PathBuf,
    /// Root holding `main.html` and `types/<type>.html`
    pub template_dir: PathBuf,
    /// Root of files copied verbatim
    pub static_dir: PathBuf,
    /// Output root, deleted and recreated on every run
    pub output_dir: PathBuf,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("content"),
            template_dir: PathBuf::from("templates"),
            static_dir: PathBuf::from("static"),
            output_dir: PathBuf::from("out"),
        }
    }
}

impl SiteConfig {
    /// Build configuration from parsed CLI arguments
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            content_dir: cli.content_dir.clone(),
            template_dir: cli.template_dir.clone(),
            static_dir: cli.static_dir.clone(),
            output_dir: cli.out.clone(),
        }
    }

    /// Path resolver for page URLs and output locations
    #[inline]
    pub fn paths(&self) -> PathResolver<'_> {
        PathResolver::new(&self.content_dir, &self.static_dir, &self.output_dir)
    }

    /// Shared layout template file
    pub fn main_template(&self) -> PathBuf {
        self.template_dir.join(MAIN_TEMPLATE)
    }

    /// Template file for a page type
    pub fn type_template(&self, page_type: &str) -> PathBuf {
        self.template_dir
            .join(TYPES_DIR)
            .join(format!("{page_type}.html"))
    }

    /// Validate the configuration before anything touches the filesystem.
    ///
    /// The output directory is deleted by the clean phase, so it must not be
    /// (or contain) any of the source roots.
    pub fn validate(&self) -> Result<()> {
        Self::require_dir("contentDir", &self.content_dir)?;
        Self::require_dir("templateDir", &self.template_dir)?;

        if self.static_dir.exists() && !self.static_dir.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[staticDir] `{}` is not a directory",
                self.static_dir.display()
            )));
        }

        if !self.output_dir.exists() {
            return Ok(());
        }

        let output = canonical(&self.output_dir)?;
        for (flag, dir) in [
            ("contentDir", &self.content_dir),
            ("templateDir", &self.template_dir),
            ("staticDir", &self.static_dir),
        ] {
            if !dir.exists() {
                continue;
            }
            if canonical(dir)?.starts_with(&output) {
                bail!(ConfigError::Validation(format!(
                    "[out] `{}` would delete [{flag}] `{}`",
                    self.output_dir.display(),
                    dir.display()
                )));
            }
        }

        Ok(())
    }

    fn require_dir(flag: &str, dir: &Path) -> Result<()> {
        if !dir.exists() {
            bail!(ConfigError::Validation(format!(
                "[{flag}] `{}` not found",
                dir.display()
            )));
        }
        if !dir.is_dir() {
            bail!(ConfigError::Validation(format!(
                "[{flag}] `{}` is not a directory",
                dir.display()
            )));
        }
        Ok(())
    }
}

fn canonical(path: &Path) -> Result<PathBuf, ConfigError> {
    path.canonicalize()
        .map_err(|err| ConfigError::Io(path.to_path_buf(), err))
}
