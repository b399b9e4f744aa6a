//! Scans a FoldX results tree and assembles the energy table.
//!
//! The expected layout is one run directory per mutation, named with the
//! mutation key and holding an `Average.fxout` (preferred, the mean over the
//! tool's replicate runs) or `Dif_*.fxout` files. Trees that do not follow
//! the layout are still mined via filename inference; files whose key cannot
//! be established are ignored with a diagnostic.

use crate::core::io::fxout;
use crate::core::io::keys::KeyPatterns;
use crate::core::models::energy::EnergyTable;
use crate::core::models::mutation::MutationKey;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read results directory '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Collects every `.fxout` file under `root`, depth-first with per-directory
/// sorted entries, so downstream processing is independent of file-system
/// iteration order.
pub fn fxout_files(root: &Path) -> Result<Vec<PathBuf>, ScanError> {
    let mut files = Vec::new();
    walk(root, root, &mut files)?;
    Ok(files)
}

fn walk(root: &Path, dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), ScanError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        // Only the scan root is required to be readable.
        Err(source) if dir == root => {
            return Err(ScanError::Io {
                path: dir.to_path_buf(),
                source,
            });
        }
        Err(source) => {
            warn!(path = %dir.display(), %source, "skipping unreadable directory");
            return Ok(());
        }
    };
    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .collect();
    paths.sort();
    for path in paths {
        if path.is_dir() {
            walk(root, &path, files)?;
        } else if path.extension().is_some_and(|ext| ext == "fxout") {
            files.push(path);
        }
    }
    Ok(())
}

fn is_average(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| {
            name == "Average.fxout" || (name.starts_with("Average_") && name.ends_with(".fxout"))
        })
}

/// Builds the energy table for a results tree.
///
/// Keys come from the containing directory's name when it parses as a
/// mutation key; otherwise from filename inference. Within a keyed run
/// directory the averaged output is authoritative and per-run `Dif` files
/// are skipped.
pub fn build_energy_table(root: &Path) -> Result<EnergyTable, ScanError> {
    let files = fxout_files(root)?;
    info!(
        count = files.len(),
        root = %root.display(),
        "discovered FoldX output files"
    );

    let mut by_dir: BTreeMap<PathBuf, Vec<PathBuf>> = BTreeMap::new();
    for file in files {
        let dir = file.parent().unwrap_or(root).to_path_buf();
        by_dir.entry(dir).or_default().push(file);
    }

    let patterns = KeyPatterns::new();
    let mut table = EnergyTable::new();
    for (dir, files) in &by_dir {
        let dir_key = dir
            .file_name()
            .and_then(|name| name.to_str())
            .and_then(|name| name.parse::<MutationKey>().ok());
        let prefer_average = dir_key.is_some() && files.iter().any(|f| is_average(f));

        for file in files {
            if prefer_average && !is_average(file) {
                continue;
            }
            let key = dir_key.clone().or_else(|| {
                file.file_name()
                    .and_then(|name| name.to_str())
                    .and_then(|name| patterns.infer(name))
            });
            let Some(key) = key else {
                debug!(path = %file.display(), "cannot infer mutation key; ignoring file");
                continue;
            };
            let energy = fxout::extract_energy(file);
            if energy.is_none() {
                warn!(key = %key, path = %file.display(), "no energy extracted");
            }
            table.insert(key, energy);
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn average(value: f64) -> String {
        format!("Pdb\ttotal energy\tSD\nmodel_1.pdb\t{value}\t0.05\n")
    }

    fn key(s: &str) -> MutationKey {
        s.parse().unwrap()
    }

    #[test]
    fn keyed_run_directories_feed_the_table() {
        let root = tempdir().unwrap();
        for (dir, value) in [("TP53_R175H", -12.3), ("TP53_WT", -10.0)] {
            let path = root.path().join(dir);
            fs::create_dir(&path).unwrap();
            fs::write(path.join("Average.fxout"), average(value)).unwrap();
        }

        let table = build_energy_table(root.path()).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.energy(&key("TP53_R175H")), Some(-12.3));
        assert_eq!(table.energy(&key("TP53_WT")), Some(-10.0));
    }

    #[test]
    fn average_output_is_preferred_over_per_run_dif_files() {
        let root = tempdir().unwrap();
        let run = root.path().join("KRAS_G12D");
        fs::create_dir(&run).unwrap();
        fs::write(run.join("Average.fxout"), average(2.5)).unwrap();
        fs::write(run.join("Dif_KRAS_G12D.fxout"), average(9.9)).unwrap();

        let table = build_energy_table(root.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.energy(&key("KRAS_G12D")), Some(2.5));
    }

    #[test]
    fn unkeyed_directories_fall_back_to_filename_inference() {
        let root = tempdir().unwrap();
        let misc = root.path().join("batch-output");
        fs::create_dir(&misc).unwrap();
        fs::write(misc.join("Dif_EGFR_L858R.fxout"), average(1.5)).unwrap();
        fs::write(misc.join("notes.txt"), "not an output file").unwrap();

        let table = build_energy_table(root.path()).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.energy(&key("EGFR_L858R")), Some(1.5));
    }

    #[test]
    fn unparseable_output_records_an_unknown_energy() {
        let root = tempdir().unwrap();
        let run = root.path().join("VHL_WT");
        fs::create_dir(&run).unwrap();
        fs::write(run.join("Average.fxout"), "garbled, no header\n").unwrap();

        let table = build_energy_table(root.path()).unwrap();
        assert!(table.contains(&key("VHL_WT")));
        assert_eq!(table.energy(&key("VHL_WT")), None);
    }

    #[test]
    fn missing_root_is_fatal() {
        assert!(matches!(
            build_energy_table(Path::new("/nonexistent/results")),
            Err(ScanError::Io { .. })
        ));
    }
}
