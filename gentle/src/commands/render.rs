use std::path::PathBuf;

use clap::Args;
use codegentle_manifest::{GentleToml, Language};
use eyre::Result;

use super::UnwrapOrExit;
use crate::{
    ops::{self, RenderOptions},
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct RenderCommand {
    /// Path to gentle.toml (defaults to ./gentle.toml)
    #[arg(short, long, default_value = "gentle.toml")]
    pub config: PathBuf,

    /// Output directory (defaults to [output] dir, then the current directory)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Preview rendered files without writing to disk
    #[arg(long)]
    pub dry_run: bool,

    /// Target language (overrides gentle.toml setting)
    #[arg(short, long)]
    pub language: Option<Language>,
}

impl RenderCommand {
    pub fn run(&self) -> Result<()> {
        let gentle_toml = GentleToml::open(&self.config).unwrap_or_exit();
        let files = gentle_toml.lower(self.language).unwrap_or_exit();

        let output_dir = self
            .output
            .clone()
            .or_else(|| gentle_toml.output_dir())
            .unwrap_or_else(|| PathBuf::from("."));

        let report = ops::render(
            &files,
            RenderOptions {
                output_dir: &output_dir,
                dry_run: self.dry_run,
            },
        )?;
        report.render(&mut TerminalOutput::new());
        Ok(())
    }
}
