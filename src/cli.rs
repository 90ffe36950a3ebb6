//! Command-line interface definitions.
//!
//! Every flag is optional; the defaults describe the conventional layout:
//!
//! ```text
//! content/     markdown sources
//! templates/   main.html + types/<type>.html
//! static/      copied verbatim
//! out/         generated site (deleted on every run)
//! ```

use clap::Parser;
use std::path::PathBuf;

/// mdsite static site generator CLI
#[derive(Parser, Debug, Clone)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// The directory containing content files
    #[arg(long = "contentDir", visible_alias = "content-dir", default_value = "content")]
    pub content_dir: PathBuf,

    /// The directory containing template files
    #[arg(long = "templateDir", visible_alias = "template-dir", default_value = "templates")]
    pub template_dir: PathBuf,

    /// The directory containing static files which are copied to the output
    #[arg(long = "staticDir", visible_alias = "static-dir", default_value = "static")]
    pub static_dir: PathBuf,

    /// The directory where files are generated
    #[arg(short, long = "out", default_value = "out")]
    pub out: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["mdsite"]);
        assert_eq!(cli.content_dir, PathBuf::from("content"));
        assert_eq!(cli.template_dir, PathBuf::from("templates"));
        assert_eq!(cli.static_dir, PathBuf::from("static"));
        assert_eq!(cli.out, PathBuf::from("out"));
    }

    #[test]
    fn test_camel_case_flags() {
        let cli = Cli::parse_from([
            "mdsite",
            "--contentDir",
            "pages",
            "--templateDir",
            "layouts",
            "--staticDir",
            "public",
            "--out",
            "dist",
        ]);
        assert_eq!(cli.content_dir, PathBuf::from("pages"));
        assert_eq!(cli.template_dir, PathBuf::from("layouts"));
        assert_eq!(cli.static_dir, PathBuf::from("public"));
        assert_eq!(cli.out, PathBuf::from("dist"));
    }

    #[test]
    fn test_kebab_case_aliases() {
        let cli = Cli::parse_from(["mdsite", "--content-dir", "pages", "-o", "dist"]);
        assert_eq!(cli.content_dir, PathBuf::from("pages"));
        assert_eq!(cli.out, PathBuf::from("dist"));
    }

    #[test]
    fn test_unknown_flag_rejected() {
        assert!(Cli::try_parse_from(["mdsite", "--watch"]).is_err());
    }

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
