use crate::core::io::fxout;
use crate::core::scan::{ScanError, fxout_files};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument, warn};

const PREVIEW_LINES: usize = 10;

#[derive(Debug, Error)]
pub enum InspectError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Structural report on one `.fxout` file, for debugging runs where
/// extraction comes back empty.
#[derive(Debug, Clone)]
pub struct FileReport {
    pub path: PathBuf,
    pub total_lines: usize,
    /// The first lines of the file, verbatim.
    pub preview: Vec<String>,
    /// Lines whose second column parses as a float, i.e. the extraction
    /// candidates.
    pub energy_lines: Vec<String>,
}

/// Walks a results tree and reports the structure of every `.fxout` file
/// found. Unreadable files are skipped with a warning.
#[instrument(skip_all, name = "inspect_workflow")]
pub fn run(root: &Path) -> Result<Vec<FileReport>, InspectError> {
    let files = fxout_files(root)?;
    info!(count = files.len(), root = %root.display(), "inspecting output files");

    let mut reports = Vec::new();
    for path in files {
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                warn!(path = %path.display(), %err, "skipping unreadable file");
                continue;
            }
        };
        let lines: Vec<&str> = content.lines().collect();
        reports.push(FileReport {
            total_lines: lines.len(),
            preview: lines
                .iter()
                .take(PREVIEW_LINES)
                .map(|line| line.to_string())
                .collect(),
            energy_lines: lines
                .iter()
                .filter(|line| fxout::data_line_energy(line).is_some())
                .map(|line| line.to_string())
                .collect(),
            path,
        });
    }
    Ok(reports)
}
