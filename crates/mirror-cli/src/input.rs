//! Loading the two corpora from disk.

use crate::error::{CliError, Result};
use mirror_analyzer::{AnalysisError, AnalysisInput};
use mirror_extractor::{split_day_sections, LogBlock, SelfModelDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Load the self-model document and the log corpus.
pub fn load_input(self_model: &Path, logs: &Path) -> Result<AnalysisInput> {
    let document = SelfModelDocument::from_path(self_model).map_err(AnalysisError::from)?;
    let blocks = load_logs(logs)?;
    info!(
        "Loaded {} ({} bytes) and {} log block(s)",
        document.name,
        document.text.len(),
        blocks.len()
    );
    Ok(AnalysisInput::new(document, blocks))
}

/// Load log blocks from a directory of `*.md` files or a single file.
///
/// In a directory every markdown file is one block keyed by its file stem;
/// subdirectories and other extensions are ignored. A single file is split
/// on its `# YYYY-MM-DD` headers. Files are read in name order.
pub fn load_logs(path: &Path) -> Result<Vec<LogBlock>> {
    if path.is_file() {
        let label = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let text = fs::read_to_string(path)?;
        return Ok(split_day_sections(&label, &text));
    }
    if !path.is_dir() {
        return Err(CliError::InvalidInput(format!(
            "log path '{}' is neither a file nor a directory",
            path.display()
        )));
    }

    let mut files: Vec<PathBuf> = Vec::new();
    for entry in fs::read_dir(path)? {
        let entry_path = entry?.path();
        if entry_path.is_file() && is_markdown(&entry_path) {
            files.push(entry_path);
        } else {
            debug!("Ignoring {}", entry_path.display());
        }
    }
    files.sort();

    Ok(files.iter().map(|f| LogBlock::from_file(f)).collect())
}

fn is_markdown(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.eq_ignore_ascii_case("md"))
        .unwrap_or(false)
}
