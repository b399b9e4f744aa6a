use std::path::Path;
use tracing::{debug, warn};

/// Decorative lines FoldX prints before the table proper. Matched by
/// case-insensitive prefix.
const BANNER_PREFIXES: &[&str] = &[
    "*",
    "#",
    "...",
    "foldx",
    "version",
    "copyright",
    "by the foldx consortium",
    "jesper",
    "output type",
];

/// Column-header tokens that mark the start of the data section.
const HEADER_TOKENS: &[&str] = &["total energy", "ddg", "sd"];

fn is_banner(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    BANNER_PREFIXES
        .iter()
        .any(|prefix| lower.starts_with(prefix))
}

fn is_header(line: &str) -> bool {
    let lower = line.to_ascii_lowercase();
    if split_columns(&lower).first().map(|t| t.trim()) == Some("pdb") {
        return true;
    }
    HEADER_TOKENS.iter().any(|token| {
        if token.contains(' ') {
            lower.contains(token)
        } else {
            split_columns(&lower).iter().any(|cell| cell.trim() == *token)
        }
    })
}

/// Splits an `.fxout` line into columns. The format varies by FoldX version:
/// pipe-delimited, tab-delimited, or plain whitespace.
pub(crate) fn split_columns(line: &str) -> Vec<&str> {
    if line.contains('|') {
        line.split('|').collect()
    } else if line.contains('\t') {
        line.split('\t').collect()
    } else {
        line.split_whitespace().collect()
    }
}

/// The energy carried by a data line: the second column parsed as a float.
pub(crate) fn data_line_energy(line: &str) -> Option<f64> {
    split_columns(line).get(1)?.trim().parse::<f64>().ok()
}

/// Extracts the total energy from one FoldX output file.
///
/// This is the single change point for the tool's output layout. The
/// contract, inherited from observed FoldX behaviour: after the column
/// header, the mutant result comes first and any later rows are
/// wild-type-vs-wild-type references, so the first parseable data line wins.
/// A later data line carrying a different value is flagged, not used.
///
/// Every failure mode is soft: a missing file, an absent header, or an
/// unparseable value all yield `None`.
pub fn extract_energy(path: &Path) -> Option<f64> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            debug!(path = %path.display(), %err, "output file not readable");
            return None;
        }
    };
    extract_from_str(&content, path)
}

fn extract_from_str(content: &str, origin: &Path) -> Option<f64> {
    let mut chosen: Option<f64> = None;
    let mut flagged = false;
    let mut saw_header = false;
    for line in content.lines() {
        let line = line.trim_end();
        if line.trim().is_empty() {
            continue;
        }
        if is_header(line) {
            saw_header = true;
            continue;
        }
        if !saw_header || is_banner(line) {
            continue;
        }
        let Some(value) = data_line_energy(line) else {
            continue;
        };
        match chosen {
            None => chosen = Some(value),
            Some(first) => {
                if !flagged && (value - first).abs() > 1e-9 {
                    warn!(
                        path = %origin.display(),
                        kept = first,
                        also_seen = value,
                        "multiple data lines with differing energies; keeping the first"
                    );
                    flagged = true;
                }
            }
        }
    }
    if chosen.is_none() {
        debug!(path = %origin.display(), "no parseable energy line found");
    }
    chosen
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn extract(content: &str) -> Option<f64> {
        extract_from_str(content, &PathBuf::from("test.fxout"))
    }

    #[test]
    fn reads_tab_delimited_average_table() {
        assert_eq!(extract("Pdb\tTotal Energy\n1ABC\t-3.45\n"), Some(-3.45));
    }

    #[test]
    fn first_data_line_wins_over_wt_references() {
        let content = "Pdb\ttotal energy\tSD\n\
                       mut_1.pdb\t-12.30\t0.02\n\
                       wt_1.pdb\t-10.00\t0.01\n";
        assert_eq!(extract(content), Some(-12.30));
    }

    #[test]
    fn banner_lines_are_skipped() {
        let content = "********************************************\n\
                       FoldX 4 (c)\n\
                       by the FoldX consortium\n\
                       \n\
                       Pdb\ttotal energy\n\
                       model_1.pdb\t4.07\n";
        assert_eq!(extract(content), Some(4.07));
    }

    #[test]
    fn pipe_delimited_variant_is_accepted() {
        assert_eq!(extract("Pdb|ddG|SD\nrun_1|1.25|0.10\n"), Some(1.25));
    }

    #[test]
    fn whitespace_delimited_dif_variant_is_accepted() {
        let content = "Pdb total energy\nDif_run_1.pdb  -7.5  0.3\n";
        assert_eq!(extract(content), Some(-7.5));
    }

    #[test]
    fn missing_header_yields_none() {
        assert_eq!(extract("1ABC\t-3.45\n"), None);
    }

    #[test]
    fn unparseable_value_yields_none() {
        assert_eq!(extract("Pdb\tTotal Energy\n1ABC\tn/a\n"), None);
    }

    #[test]
    fn empty_and_missing_files_yield_none() {
        assert_eq!(extract(""), None);
        assert_eq!(extract_energy(Path::new("/nonexistent/Average.fxout")), None);
    }

    #[test]
    fn ambiguous_values_keep_the_first() {
        let content = "Pdb\ttotal energy\na.pdb\t-1.0\nb.pdb\t-2.0\n";
        assert_eq!(extract(content), Some(-1.0));
    }
}
