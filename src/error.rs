//! Build error taxonomy.
//!
//! Every variant names the path (or page URL) that failed. None of them are
//! recovered: the first one to reach a phase join aborts the run.

use crate::compiler::meta::FrontMatterError;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BuildError {
    // content
    #[error("failed to read `{0}`")]
    Read(PathBuf, #[source] io::Error),

    #[error("malformed front matter in `{0}`")]
    FrontMatter(PathBuf, #[source] FrontMatterError),

    #[error("`{path}` is not inside `{root}`")]
    OutsideRoot { path: PathBuf, root: PathBuf },

    // templates
    #[error("failed to load templates for page `{url}`")]
    TemplateLoad {
        url: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("failed to render page `{url}` with `{template}`")]
    Render {
        url: String,
        template: String,
        #[source]
        source: minijinja::Error,
    },

    // filesystem
    #[error("failed to walk `{0}`")]
    Walk(PathBuf, #[source] walkdir::Error),

    #[error("failed to create directory `{0}`")]
    CreateDir(PathBuf, #[source] io::Error),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] io::Error),

    #[error("failed to copy `{0}` to `{1}`")]
    Copy(PathBuf, PathBuf, #[source] io::Error),

    #[error("failed to remove `{0}`")]
    Remove(PathBuf, #[source] io::Error),
}

impl BuildError {
    /// Whether this error comes from the template engine.
    #[cfg(test)]
    pub const fn is_template(&self) -> bool {
        matches!(self, Self::TemplateLoad { .. } | Self::Render { .. })
    }

    /// Whether this error comes from reading or decoding a content file.
    #[cfg(test)]
    pub const fn is_content(&self) -> bool {
        matches!(
            self,
            Self::Read(..) | Self::FrontMatter(..) | Self::OutsideRoot { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_display_names_path() {
        let err = BuildError::Read(
            PathBuf::from("content/a.md"),
            io::Error::new(ErrorKind::NotFound, "gone"),
        );
        assert_eq!(err.to_string(), "failed to read `content/a.md`");
        assert!(err.is_content());
        assert!(!err.is_template());
    }

    #[test]
    fn test_source_chain_is_kept() {
        let err = BuildError::Write(
            PathBuf::from("out/a.html"),
            io::Error::new(ErrorKind::PermissionDenied, "denied"),
        );
        let chain = format!("{:#}", anyhow::Error::new(err));
        assert!(chain.contains("out/a.html"));
        assert!(chain.contains("denied"));
    }

    #[test]
    fn test_template_classification() {
        let err = BuildError::TemplateLoad {
            url: "/a".into(),
            source: minijinja::Error::new(minijinja::ErrorKind::TemplateNotFound, "missing"),
        };
        assert!(err.is_template());
        assert!(!err.is_content());
    }
}
