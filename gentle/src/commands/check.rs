use std::path::PathBuf;

use clap::Args;
use codegentle_manifest::GentleToml;
use eyre::{Context, Result};

use super::UnwrapOrExit;
use crate::{
    ops,
    reports::{Report, TerminalOutput},
};

#[derive(Args)]
pub struct CheckCommand {
    /// Path to gentle.toml (defaults to ./gentle.toml)
    #[arg(short, long, default_value = "gentle.toml")]
    pub config: PathBuf,

    /// Print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

impl CheckCommand {
    pub fn run(&self) -> Result<()> {
        let gentle_toml = GentleToml::open(&self.config).unwrap_or_exit();
        let files = gentle_toml.lower(None).unwrap_or_exit();

        let report = ops::check(gentle_toml.manifest(), &files, &self.config);
        if self.json {
            println!("{}", report.to_json().wrap_err("Failed to serialize report")?);
        } else {
            report.render(&mut TerminalOutput::new());
        }

        if !report.is_valid() {
            std::process::exit(1);
        }
        Ok(())
    }
}
