use crate::core::models::mutation::Mutation;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum TableError {
    #[error("failed to read mutation table '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error(
        "unrecognized mutation table header (expected 'Gene,Mutation' or \
         'gene,position,wt_aa,mut_aa'); found columns: {found:?}"
    )]
    UnrecognizedHeader { found: Vec<String> },
}

/// Column layout of the scan CSV, detected from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableFormat {
    /// `Gene, Mutation` with compact codes such as `E1932K`.
    Simple { gene: usize, mutation: usize },
    /// `gene, position, wt_aa, mut_aa` with the code already split out.
    Detailed {
        gene: usize,
        position: usize,
        wt_aa: usize,
        mut_aa: usize,
    },
}

impl TableFormat {
    fn detect(headers: &[String]) -> Option<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        // The detailed form also carries a gene column, so probe it first.
        if let (Some(gene), Some(position), Some(wt_aa), Some(mut_aa)) = (
            find("gene"),
            find("position"),
            find("wt_aa"),
            find("mut_aa"),
        ) {
            return Some(Self::Detailed {
                gene,
                position,
                wt_aa,
                mut_aa,
            });
        }
        if let (Some(gene), Some(mutation)) = (find("gene"), find("mutation")) {
            return Some(Self::Simple { gene, mutation });
        }
        None
    }
}

/// One accepted row of the scan table.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanRow {
    /// 1-based data row number in the source file, for diagnostics.
    pub row: usize,
    pub gene: String,
    pub mutation: Mutation,
    /// Original cells in input order, echoed into the result CSV.
    pub fields: Vec<String>,
}

/// The parsed scan table: accepted rows plus enough context to reproduce the
/// input column layout on output.
#[derive(Debug, Clone)]
pub struct ScanTable {
    pub headers: Vec<String>,
    pub rows: Vec<ScanRow>,
    /// Rows dropped by per-row validation. Skips never fail the batch.
    pub skipped: usize,
}

impl ScanTable {
    /// Reads a mutation-scan CSV, detecting the column layout from the
    /// header. Malformed rows are logged and skipped; only a structurally
    /// unreadable file or an unrecognizable header is an error.
    pub fn read(path: &Path) -> Result<Self, TableError> {
        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(path)
            .map_err(|source| TableError::Csv {
                path: path.to_path_buf(),
                source,
            })?;

        let headers: Vec<String> = reader
            .headers()
            .map_err(|source| TableError::Csv {
                path: path.to_path_buf(),
                source,
            })?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();
        let format = TableFormat::detect(&headers)
            .ok_or_else(|| TableError::UnrecognizedHeader {
                found: headers.clone(),
            })?;

        let mut rows = Vec::new();
        let mut skipped = 0usize;
        for (index, record) in reader.records().enumerate() {
            let row = index + 1;
            let record = match record {
                Ok(record) => record,
                Err(err) => {
                    warn!(row, %err, "skipping unreadable row");
                    skipped += 1;
                    continue;
                }
            };
            let fields: Vec<String> = record.iter().map(|cell| cell.to_string()).collect();
            match parse_row(format, &fields) {
                Ok((gene, mutation)) => rows.push(ScanRow {
                    row,
                    gene,
                    mutation,
                    fields,
                }),
                Err(reason) => {
                    warn!(row, %reason, "skipping row");
                    skipped += 1;
                }
            }
        }
        Ok(Self {
            headers,
            rows,
            skipped,
        })
    }
}

fn parse_row(format: TableFormat, fields: &[String]) -> Result<(String, Mutation), String> {
    let cell = |index: usize| {
        fields
            .get(index)
            .map(|c| c.trim())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| format!("missing value in column {}", index + 1))
    };
    match format {
        TableFormat::Simple { gene, mutation } => {
            let gene = cell(gene)?.to_string();
            let code = cell(mutation)?;
            let mutation = code
                .parse::<Mutation>()
                .map_err(|err| format!("gene {gene}: {err}"))?;
            Ok((gene, mutation))
        }
        TableFormat::Detailed {
            gene,
            position,
            wt_aa,
            mut_aa,
        } => {
            let gene = cell(gene)?.to_string();
            let position = cell(position)?;
            let wt = single_letter(cell(wt_aa)?)?;
            let mt = single_letter(cell(mut_aa)?)?;
            let mutation =
                Mutation::new(wt, position, mt).map_err(|err| format!("gene {gene}: {err}"))?;
            Ok((gene, mutation))
        }
    }
}

fn single_letter(cell: &str) -> Result<char, String> {
    let mut chars = cell.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => Ok(c),
        _ => Err(format!("expected a single residue letter, got '{cell}'")),
    }
}
