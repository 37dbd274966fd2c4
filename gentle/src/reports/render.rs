//! Render command report data structures.

use std::path::PathBuf;

use super::output::{Output, Report};

/// Report data from rendering a manifest.
#[derive(Debug)]
pub struct RenderReport {
    pub result: RenderResult,
}

#[derive(Debug)]
pub enum RenderResult {
    /// Files were written below `output_dir`.
    Written {
        output_dir: PathBuf,
        files: Vec<WrittenFile>,
    },
    /// Dry-run preview.
    Preview(Vec<PreviewFile>),
}

#[derive(Debug)]
pub struct WrittenFile {
    /// Path relative to the output directory.
    pub path: PathBuf,
    /// The file already had this content and was not touched.
    pub unchanged: bool,
}

/// A file in preview mode.
#[derive(Debug)]
pub struct PreviewFile {
    pub path: String,
    pub content: String,
}

impl Report for RenderReport {
    fn render(&self, out: &mut dyn Output) {
        match &self.result {
            RenderResult::Written { output_dir, files } => {
                out.section(&format!("Rendered into {}", output_dir.display()));
                for file in files {
                    let path = file.path.display().to_string();
                    if file.unchanged {
                        out.list_item(&format!("{path} (unchanged)"));
                    } else {
                        out.added_item(&path);
                    }
                }
            }
            RenderResult::Preview(files) => {
                for file in files {
                    out.divider(&file.path);
                    out.preformatted(&file.content);
                }
                out.divider("Summary");
                out.preformatted(&format!(
                    "{} file{} would be rendered",
                    files.len(),
                    if files.len() == 1 { "" } else { "s" }
                ));
            }
        }
    }
}
