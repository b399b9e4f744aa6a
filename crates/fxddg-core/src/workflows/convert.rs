use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{info, instrument};

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no FoldX table header found in '{}'", path.display())]
    NoHeader { path: PathBuf },
    #[error("failed to write '{}': {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct ConvertSummary {
    pub columns: usize,
    pub data_rows: usize,
}

/// How the source table is delimited, detected from its header line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableDelimiter {
    Pipe,
    Tab,
    Whitespace,
}

impl TableDelimiter {
    fn detect(header: &str) -> Self {
        if header.contains('|') {
            Self::Pipe
        } else if header.contains('\t') {
            Self::Tab
        } else {
            Self::Whitespace
        }
    }

    fn split(self, line: &str) -> Vec<String> {
        match self {
            Self::Pipe => line.split('|').map(|cell| cell.trim().to_string()).collect(),
            Self::Tab => line.split('\t').map(|cell| cell.trim().to_string()).collect(),
            Self::Whitespace => line.split_whitespace().map(|cell| cell.to_string()).collect(),
        }
    }
}

fn is_table_header(line: &str) -> bool {
    let first = if line.contains('|') {
        line.split('|').next()
    } else if line.contains('\t') {
        line.split('\t').next()
    } else {
        line.split_whitespace().next()
    };
    first.map(|t| t.trim()).is_some_and(|t| t.eq_ignore_ascii_case("Pdb"))
}

/// Converts one raw `.fxout` file into a clean CSV: the banner is dropped,
/// the header line located, and header plus data re-emitted with trimmed
/// cells.
#[instrument(skip_all, name = "convert_workflow")]
pub fn run(input: &Path, output: &Path) -> Result<ConvertSummary, ConvertError> {
    let content = std::fs::read_to_string(input).map_err(|source| ConvertError::Io {
        path: input.to_path_buf(),
        source,
    })?;

    let mut lines = content.lines().skip_while(|line| !is_table_header(line));
    let header_line = lines.next().ok_or_else(|| ConvertError::NoHeader {
        path: input.to_path_buf(),
    })?;
    let delimiter = TableDelimiter::detect(header_line);
    let header = delimiter.split(header_line);

    let csv_err = |source| ConvertError::Csv {
        path: output.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .flexible(true)
        .from_path(output)
        .map_err(csv_err)?;
    writer.write_record(&header).map_err(csv_err)?;

    let mut data_rows = 0usize;
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        writer.write_record(delimiter.split(line)).map_err(csv_err)?;
        data_rows += 1;
    }
    writer.flush().map_err(|source| ConvertError::Io {
        path: output.to_path_buf(),
        source,
    })?;

    info!(
        input = %input.display(),
        output = %output.display(),
        data_rows,
        "fxout converted"
    );
    Ok(ConvertSummary {
        columns: header.len(),
        data_rows,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn convert(content: &str) -> Result<(ConvertSummary, String), ConvertError> {
        let dir = tempdir().unwrap();
        let input = dir.path().join("raw.fxout");
        let output = dir.path().join("clean.csv");
        fs::write(&input, content).unwrap();
        let summary = run(&input, &output)?;
        Ok((summary, fs::read_to_string(&output).unwrap()))
    }

    #[test]
    fn pipe_delimited_table_becomes_clean_csv() {
        let content = "Some banner text\n\
                       Pdb| total energy | SD\n\
                       run_1.pdb| -3.45 | 0.10\n";
        let (summary, csv) = convert(content).unwrap();
        assert_eq!(summary.columns, 3);
        assert_eq!(summary.data_rows, 1);
        assert_eq!(csv, "Pdb,total energy,SD\nrun_1.pdb,-3.45,0.10\n");
    }

    #[test]
    fn tab_delimited_table_is_converted_too() {
        let content = "Pdb\ttotal energy\nrun_1.pdb\t-7.5\n";
        let (summary, csv) = convert(content).unwrap();
        assert_eq!(summary.data_rows, 1);
        assert_eq!(csv, "Pdb,total energy\nrun_1.pdb,-7.5\n");
    }

    #[test]
    fn file_without_header_is_an_error() {
        assert!(matches!(
            convert("no table in here\n"),
            Err(ConvertError::NoHeader { .. })
        ));
    }

    #[test]
    fn missing_input_is_an_error() {
        let dir = tempdir().unwrap();
        assert!(matches!(
            run(Path::new("/nonexistent/raw.fxout"), &dir.path().join("out.csv")),
            Err(ConvertError::Io { .. })
        ));
    }
}
