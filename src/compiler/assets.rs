//! Static asset copying.

use crate::{config::SiteConfig, error::BuildError, log};
use std::fs;
use walkdir::WalkDir;

/// Mirror the static root into the output root, byte for byte.
///
/// Returns the number of files copied. A missing static root copies nothing.
pub fn copy_static(config: &SiteConfig) -> Result<usize, BuildError> {
    let root = &config.static_dir;
    if !root.exists() {
        log!("copy"; "no static dir at {}, skipping", root.display());
        return Ok(0);
    }

    let paths = config.paths();
    let mut copied = 0;

    for entry in WalkDir::new(root).min_depth(1).sort_by_file_name() {
        let entry = entry.map_err(|err| BuildError::Walk(root.clone(), err))?;
        let dest = paths.asset_dest(entry.path())?;

        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest).map_err(|err| BuildError::CreateDir(dest.clone(), err))?;
            continue;
        }

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(|err| BuildError::CreateDir(parent.to_path_buf(), err))?;
        }
        let bytes = fs::copy(entry.path(), &dest)
            .map_err(|err| BuildError::Copy(entry.path().to_path_buf(), dest.clone(), err))?;
        log!("copy"; "{} ({bytes} bytes)", dest.display());
        copied += 1;
    }

    Ok(copied)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn make_config(dir: &Path) -> SiteConfig {
        SiteConfig {
            content_dir: dir.join("content"),
            template_dir: dir.join("templates"),
            static_dir: dir.join("static"),
            output_dir: dir.join("out"),
        }
    }

    #[test]
    fn test_copy_nested_tree() {
        let dir = TempDir::new().unwrap();
        let config = make_config(dir.path());
        let css = config.static_dir.join("css");
        fs::create_dir_all(&css).unwrap();
        fs::create_dir_all(config.static_dir.join("empty")).unwrap();
        fs::write(css.join("site.css"), "body { margin: 0 }").unwrap();
        let blob: Vec<u8> = (0..=255u8).cycle().take(4096).collect();
        fs::write(config.static_dir.join("logo.bin"), &blob).unwrap();

        let copied = copy_static(&config).unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            fs::read(config.output_dir.join("css/site.css")).unwrap(),
            b"body { margin: 0 }"
        );
        assert_eq!(fs::read(config.output_dir.join("logo.bin")).unwrap(), blob);
        assert!(config.output_dir.join("empty").is_dir());
    }

    #[test]
    fn test_missing_static_dir_is_skipped() {
        let dir = TempDir::new().unwrap();
        let config = make_config(dir.path());
        assert_eq!(copy_static(&config).unwrap(), 0);
        assert!(!config.output_dir.exists());
    }
}
