use crate::core::io::table::{ScanRow, ScanTable, TableError};
use crate::core::models::energy::{EnergyTable, ResultRow};
use crate::core::models::mutation::MutationKey;
use crate::core::scan::{ScanError, build_energy_table};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

/// Header names appended after the original input columns.
const RESULT_COLUMNS: [&str; 3] = ["WT_energy", "mutant_energy", "ddG"];

#[derive(Debug, Error)]
pub enum DdgError {
    #[error(transparent)]
    Table(#[from] TableError),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error("failed to write results '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
    #[error("failed to write results '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Outcome of one ddG run.
#[derive(Debug, Clone, Copy)]
pub struct DdgSummary {
    pub rows: usize,
    pub computed: usize,
    pub missing_wild_type: usize,
    pub missing_mutant: usize,
}

/// Joins input rows against the energy table, in input order.
///
/// Each row resolves `{gene}_{code}` and `{gene}_WT`; the difference is
/// computed only when both energies are present, and the row is emitted
/// either way.
pub fn compute(energies: &EnergyTable, rows: &[ScanRow]) -> Vec<ResultRow> {
    rows.iter()
        .map(|row| {
            let mutant_key = MutationKey::mutant(&row.gene, row.mutation.clone());
            let wild_type_key = MutationKey::wild_type(&row.gene);
            ResultRow::compute(
                row.fields.clone(),
                energies.energy(&wild_type_key),
                energies.energy(&mutant_key),
            )
        })
        .collect()
}

/// Scans a FoldX results tree, computes ddG per input row, and writes the
/// augmented results CSV: the original columns plus
/// `WT_energy, mutant_energy, ddG` (empty cells where unknown).
#[instrument(skip_all, name = "ddg_workflow")]
pub fn run(results_root: &Path, input: &Path, output: &Path) -> Result<DdgSummary, DdgError> {
    // === Phase 1: Read the scan table ===
    let table = ScanTable::read(input)?;
    info!(
        rows = table.rows.len(),
        skipped = table.skipped,
        "loaded mutation table"
    );

    // === Phase 2: Assemble the energy table from the results tree ===
    let energies = build_energy_table(results_root)?;
    info!(keys = energies.len(), "energy table assembled");

    // === Phase 3: Compute ddG and write the results CSV ===
    let results = compute(&energies, &table.rows);
    write_results(output, &table.headers, &results)?;

    let summary = DdgSummary {
        rows: results.len(),
        computed: results.iter().filter(|r| r.ddg.is_some()).count(),
        missing_wild_type: results
            .iter()
            .filter(|r| r.wild_type_energy.is_none())
            .count(),
        missing_mutant: results.iter().filter(|r| r.mutant_energy.is_none()).count(),
    };
    info!(
        rows = summary.rows,
        computed = summary.computed,
        output = %output.display(),
        "ddG results written"
    );
    Ok(summary)
}

fn write_results(path: &Path, headers: &[String], rows: &[ResultRow]) -> Result<(), DdgError> {
    let csv_err = |source| DdgError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(csv_err)?;

    let mut header: Vec<String> = headers.to_vec();
    header.extend(RESULT_COLUMNS.iter().map(|c| c.to_string()));
    writer.write_record(&header).map_err(csv_err)?;

    for row in rows {
        let mut record = row.fields.clone();
        record.push(format_energy(row.wild_type_energy));
        record.push(format_energy(row.mutant_energy));
        record.push(format_energy(row.ddg));
        writer.write_record(&record).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| DdgError::Io {
        path: path.to_path_buf(),
        source,
    })
}

fn format_energy(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn average(value: f64) -> String {
        format!("Pdb\ttotal energy\tSD\nmodel_1.pdb\t{value}\t0.05\n")
    }

    fn seed_run(root: &Path, key: &str, value: f64) {
        let dir = root.join(key);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("Average.fxout"), average(value)).unwrap();
    }

    #[test]
    fn end_to_end_ddg_is_mutant_minus_wild_type() {
        let dir = tempdir().unwrap();
        let results = dir.path().join("results");
        seed_run(&results, "TP53_R175H", -12.3);
        seed_run(&results, "TP53_WT", -10.0);
        let input = dir.path().join("scan.csv");
        fs::write(&input, "Gene,Mutation\nTP53,R175H\n").unwrap();
        let output = dir.path().join("ddg.csv");

        let summary = run(&results, &input, &output).unwrap();
        assert_eq!(summary.rows, 1);
        assert_eq!(summary.computed, 1);

        let content = fs::read_to_string(&output).unwrap();
        let mut lines = content.lines();
        assert_eq!(lines.next(), Some("Gene,Mutation,WT_energy,mutant_energy,ddG"));
        let data = lines.next().unwrap();
        assert!(data.starts_with("TP53,R175H,-10,-12.3,"));
        let ddg: f64 = data.rsplit(',').next().unwrap().parse().unwrap();
        assert!((ddg - (-2.3)).abs() < 1e-9);
    }

    #[test]
    fn missing_energies_leave_empty_cells_and_keep_the_row() {
        let dir = tempdir().unwrap();
        let results = dir.path().join("results");
        seed_run(&results, "TP53_R175H", -12.3);
        let input = dir.path().join("scan.csv");
        fs::write(&input, "Gene,Mutation\nTP53,R175H\nEGFR,L858R\n").unwrap();
        let output = dir.path().join("ddg.csv");

        let summary = run(&results, &input, &output).unwrap();
        assert_eq!(summary.rows, 2);
        assert_eq!(summary.computed, 0);
        assert_eq!(summary.missing_wild_type, 2);
        assert_eq!(summary.missing_mutant, 1);

        let content = fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[1], "TP53,R175H,,-12.3,");
        assert_eq!(lines[2], "EGFR,L858R,,,");
    }

    #[test]
    fn row_order_follows_the_input_not_the_scan() {
        let dir = tempdir().unwrap();
        let results = dir.path().join("results");
        for (key, value) in [
            ("AAA_WT", 0.0),
            ("AAA_G12D", 1.0),
            ("ZZZ_WT", 0.0),
            ("ZZZ_A5T", 2.0),
        ] {
            seed_run(&results, key, value);
        }
        let input = dir.path().join("scan.csv");
        fs::write(&input, "Gene,Mutation\nZZZ,A5T\nAAA,G12D\n").unwrap();
        let output = dir.path().join("ddg.csv");

        run(&results, &input, &output).unwrap();
        let content = fs::read_to_string(&output).unwrap();
        let genes: Vec<&str> = content
            .lines()
            .skip(1)
            .map(|line| line.split(',').next().unwrap())
            .collect();
        assert_eq!(genes, vec!["ZZZ", "AAA"]);
    }
}
