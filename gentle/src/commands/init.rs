use std::path::{Path, PathBuf};

use clap::Args;
use codegentle_manifest::{Language, Manifest};
use dialoguer::{Input, Select, theme::ColorfulTheme};
use eyre::{Context, Result, bail};

use super::UnwrapOrExit;

#[derive(Args)]
pub struct InitCommand {
    /// Directory to create gentle.toml in
    #[arg(default_value = ".")]
    pub dir: PathBuf,

    /// Target language
    #[arg(short, long)]
    pub language: Option<Language>,

    /// Package of the starter type
    #[arg(short, long)]
    pub package: Option<String>,

    /// Name of the starter type
    #[arg(short, long)]
    pub name: Option<String>,

    /// Overwrite an existing gentle.toml
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    pub fn run(&self) -> Result<()> {
        let theme = ColorfulTheme::default();
        let language = match self.language {
            Some(language) => language,
            None => Self::prompt_language(&theme)?,
        };
        let package = match &self.package {
            Some(package) => package.clone(),
            None => Self::prompt_text(&theme, "Package", "com.example")?,
        };
        let name = match &self.name {
            Some(name) => name.clone(),
            None => Self::prompt_text(&theme, "Type name", "Greeter")?,
        };

        let path = write_starter(&self.dir, language, &package, &name, self.force)?;

        println!("Created {}", path.display());
        println!();
        println!("Next steps:");
        if self.dir != Path::new(".") {
            println!("  cd {}", self.dir.display());
        }
        println!("  gentle render --dry-run");
        Ok(())
    }

    fn prompt_language(theme: &ColorfulTheme) -> Result<Language> {
        let languages = [Language::Java, Language::Kotlin];
        let labels: Vec<&str> = languages.iter().map(Language::display_name).collect();
        let selection = Select::with_theme(theme)
            .with_prompt("Select a language")
            .items(&labels)
            .default(0)
            .interact()
            .wrap_err("Failed to get language selection")?;
        Ok(languages[selection])
    }

    fn prompt_text(theme: &ColorfulTheme, prompt: &str, default: &str) -> Result<String> {
        Input::with_theme(theme)
            .with_prompt(prompt)
            .default(default.to_string())
            .interact_text()
            .wrap_err_with(|| format!("Failed to read {}", prompt.to_lowercase()))
    }
}

/// Write a starter manifest into `dir`, returning its path.
///
/// The content is parsed back before writing so that an invalid package
/// or type name is reported against the generated file.
fn write_starter(
    dir: &Path,
    language: Language,
    package: &str,
    name: &str,
    force: bool,
) -> Result<PathBuf> {
    let path = dir.join("gentle.toml");
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let content = Manifest::starter(language, package, name)
        .to_toml_string()
        .unwrap_or_exit();
    Manifest::from_str_with_filename(&content, &path.display().to_string()).unwrap_or_exit();

    std::fs::create_dir_all(dir).wrap_err_with(|| format!("Failed to create {}", dir.display()))?;
    std::fs::write(&path, content).wrap_err_with(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
