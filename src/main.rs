//! mdsite - A static site generator for Markdown content and Jinja templates.

mod build;
mod cli;
mod compiler;
mod config;
mod error;
mod logger;
mod utils;

use anyhow::Result;
use build::build_site;
use clap::Parser;
use cli::Cli;
use config::SiteConfig;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = SiteConfig::from_cli(&cli);
    config.validate()?;
    build_site(&config)?;
    Ok(())
}
