use crate::core::io::request::{self, RequestConfig, RequestError};
use crate::core::io::table::{ScanTable, TableError};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum GenerateError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Request(#[from] RequestError),
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one generation run, for operator reporting.
#[derive(Debug, Clone)]
pub struct GenerateSummary {
    pub requests_written: usize,
    pub wild_type_appends: usize,
    pub skipped_rows: usize,
    /// Unique gene symbols seen, in sorted order (the content of `genes.txt`).
    pub genes: BTreeSet<String>,
    /// Every file this run created or appended to.
    pub files: BTreeSet<PathBuf>,
}

/// Generates FoldX individual-list request files from a mutation-scan CSV.
///
/// Real mutations get one single-line file each (overwritten on re-run);
/// no-op rows (`wt == mut`) append to the per-gene wild-type reference file
/// and never produce a mutant request. Finishes by writing the sorted,
/// deduplicated `genes.txt`.
#[instrument(skip_all, name = "generate_workflow")]
pub fn run(input: &Path, config: &RequestConfig) -> Result<GenerateSummary, GenerateError> {
    // === Phase 1: Read the scan table ===
    let table = ScanTable::read(input)?;
    info!(
        rows = table.rows.len(),
        skipped = table.skipped,
        "loaded mutation table"
    );

    std::fs::create_dir_all(&config.output_dir).map_err(|source| GenerateError::Io {
        path: config.output_dir.clone(),
        source,
    })?;

    // === Phase 2: Emit request files ===
    let mut summary = GenerateSummary {
        requests_written: 0,
        wild_type_appends: 0,
        skipped_rows: table.skipped,
        genes: BTreeSet::new(),
        files: BTreeSet::new(),
    };
    for row in &table.rows {
        summary.genes.insert(row.gene.clone());
        if row.mutation.is_wild_type() {
            let path = request::append_wild_type(config, &row.gene, &row.mutation)?;
            summary.wild_type_appends += 1;
            summary.files.insert(path);
        } else {
            let path = request::write_request(config, &row.gene, &row.mutation)?;
            summary.requests_written += 1;
            summary.files.insert(path);
        }
    }

    // === Phase 3: Write the deduplicated gene list ===
    let genes_path = config.genes_path();
    let mut content = String::new();
    for gene in &summary.genes {
        content.push_str(gene);
        content.push('\n');
    }
    std::fs::write(&genes_path, content).map_err(|source| GenerateError::Io {
        path: genes_path.clone(),
        source,
    })?;
    summary.files.insert(genes_path);

    info!(
        requests = summary.requests_written,
        wild_type_appends = summary.wild_type_appends,
        genes = summary.genes.len(),
        "generation finished"
    );
    Ok(summary)
}
