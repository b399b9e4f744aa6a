use crate::core::models::mutation::{Mutation, WILD_TYPE_SUFFIX};
use serde::Deserialize;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("failed to write request file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// File naming scheme for individual-list files. External tooling picks the
/// files up by name, so the scheme is part of the interface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum NamingConvention {
    /// `{gene}_{code}.individual_list.txt`
    #[default]
    Canonical,
    /// `individual_list_{gene}_{code}.txt`, as produced by older scripts.
    Legacy,
}

/// Line layout inside an individual-list file. FoldX builds differ in which
/// form they accept; the comma-delimited form is the documented default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LineDelimiter {
    /// `E,A,1932,K;`
    #[default]
    Comma,
    /// `EA1932K;` (concatenated legacy form)
    Plain,
}

/// Settings for one generation run.
#[derive(Debug, Clone)]
pub struct RequestConfig {
    pub chain: String,
    pub naming: NamingConvention,
    pub delimiter: LineDelimiter,
    pub output_dir: PathBuf,
}

impl RequestConfig {
    pub fn new(chain: &str) -> Self {
        Self {
            chain: chain.to_string(),
            naming: NamingConvention::default(),
            delimiter: LineDelimiter::default(),
            output_dir: PathBuf::from("."),
        }
    }

    fn file_name(&self, gene: &str, code: &str) -> String {
        match self.naming {
            NamingConvention::Canonical => format!("{gene}_{code}.individual_list.txt"),
            NamingConvention::Legacy => format!("individual_list_{gene}_{code}.txt"),
        }
    }

    pub fn request_path(&self, gene: &str, mutation: &Mutation) -> PathBuf {
        self.output_dir.join(self.file_name(gene, &mutation.code()))
    }

    pub fn wild_type_path(&self, gene: &str) -> PathBuf {
        self.output_dir.join(self.file_name(gene, WILD_TYPE_SUFFIX))
    }

    pub fn genes_path(&self) -> PathBuf {
        self.output_dir.join("genes.txt")
    }

    /// Formats one request line mutating `mutation`'s site to `target`.
    fn format_line(&self, mutation: &Mutation, target: char) -> String {
        let (wt, pos) = (mutation.wild_type(), mutation.position());
        match self.delimiter {
            LineDelimiter::Comma => format!("{wt},{},{pos},{target};\n", self.chain),
            LineDelimiter::Plain => format!("{wt}{}{pos}{target};\n", self.chain),
        }
    }
}

/// Writes the single-line request file for a real mutation. Truncates any
/// previous content, so regeneration is byte-idempotent.
pub fn write_request(
    config: &RequestConfig,
    gene: &str,
    mutation: &Mutation,
) -> Result<PathBuf, RequestError> {
    let path = config.request_path(gene, mutation);
    let line = config.format_line(mutation, mutation.mutant());
    std::fs::write(&path, line).map_err(|source| RequestError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Appends one self-mutation line to the per-gene wild-type reference file,
/// creating it on first touch. One append per distinct input row by contract.
pub fn append_wild_type(
    config: &RequestConfig,
    gene: &str,
    mutation: &Mutation,
) -> Result<PathBuf, RequestError> {
    let path = config.wild_type_path(gene);
    let line = config.format_line(mutation, mutation.wild_type());
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .map_err(|source| RequestError::Io {
            path: path.clone(),
            source,
        })?;
    file.write_all(line.as_bytes())
        .map_err(|source| RequestError::Io {
            path: path.clone(),
            source,
        })?;
    Ok(path)
}

/// Parses one comma-delimited request line back into
/// `(wt, chain, position, target)`. Used to verify round-trips.
pub fn parse_request_line(line: &str) -> Option<(char, String, String, char)> {
    let line = line.trim().strip_suffix(';')?;
    let mut parts = line.split(',');
    let wt = parts.next()?;
    let chain = parts.next()?;
    let position = parts.next()?;
    let target = parts.next()?;
    if parts.next().is_some() {
        return None;
    }
    let single = |s: &str| {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Some(c),
            _ => None,
        }
    };
    Some((
        single(wt)?,
        chain.to_string(),
        position.to_string(),
        single(target)?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn config(dir: &Path) -> RequestConfig {
        let mut config = RequestConfig::new("A");
        config.output_dir = dir.to_path_buf();
        config
    }

    #[test]
    fn request_file_round_trips() {
        let dir = tempdir().unwrap();
        let config = config(dir.path());
        let mutation: Mutation = "E1932K".parse().unwrap();

        let path = write_request(&config, "NF1", &mutation).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "NF1_E1932K.individual_list.txt"
        );
        let content = fs::read_to_string(&path).unwrap();
        assert_eq!(content, "E,A,1932,K;\n");

        let (wt, chain, position, target) =
            parse_request_line(content.trim_end()).unwrap();
        assert_eq!((wt, chain.as_str(), position.as_str(), target), ('E', "A", "1932", 'K'));
    }

    #[test]
    fn rewriting_is_byte_idempotent() {
        let dir = tempdir().unwrap();
        let config = config(dir.path());
        let mutation: Mutation = "R175H".parse().unwrap();

        let path = write_request(&config, "TP53", &mutation).unwrap();
        let first = fs::read(&path).unwrap();
        write_request(&config, "TP53", &mutation).unwrap();
        assert_eq!(fs::read(&path).unwrap(), first);
    }

    #[test]
    fn wild_type_file_accumulates_appends() {
        let dir = tempdir().unwrap();
        let config = config(dir.path());

        append_wild_type(&config, "TP53", &"R175R".parse().unwrap()).unwrap();
        append_wild_type(&config, "TP53", &"G245G".parse().unwrap()).unwrap();
        let content = fs::read_to_string(config.wild_type_path("TP53")).unwrap();
        assert_eq!(content, "R,A,175,R;\nG,A,245,G;\n");
    }

    #[test]
    fn legacy_naming_and_plain_delimiter() {
        let dir = tempdir().unwrap();
        let mut config = config(dir.path());
        config.naming = NamingConvention::Legacy;
        config.delimiter = LineDelimiter::Plain;
        let mutation: Mutation = "L858R".parse().unwrap();

        let path = write_request(&config, "EGFR", &mutation).unwrap();
        assert_eq!(
            path.file_name().unwrap().to_str().unwrap(),
            "individual_list_EGFR_L858R.txt"
        );
        assert_eq!(fs::read_to_string(&path).unwrap(), "LA858R;\n");
    }
}
