use crate::cli::{GenerateArgs, LineFormatArg, NamingArg};
use crate::error::{CliError, Result};
use foldxddg::core::io::request::{LineDelimiter, NamingConvention, RequestConfig};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

impl From<NamingArg> for NamingConvention {
    fn from(a: NamingArg) -> Self {
        match a {
            NamingArg::Canonical => Self::Canonical,
            NamingArg::Legacy => Self::Legacy,
        }
    }
}

impl From<LineFormatArg> for LineDelimiter {
    fn from(a: LineFormatArg) -> Self {
        match a {
            LineFormatArg::Comma => Self::Comma,
            LineFormatArg::Plain => Self::Plain,
        }
    }
}

/// The generation options as they appear in a TOML config file; every field
/// optional, CLI flags take precedence at merge time.
#[derive(Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct PartialRequestConfig {
    chain: Option<String>,
    #[serde(rename = "output-dir")]
    output_dir: Option<PathBuf>,
    naming: Option<NamingConvention>,
    #[serde(rename = "line-format")]
    line_format: Option<LineDelimiter>,
}

impl PartialRequestConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| CliError::Config(format!("cannot read '{}': {e}", path.display())))?;
        toml::from_str(&content)
            .map_err(|e| CliError::Config(format!("cannot parse '{}': {e}", path.display())))
    }

    /// Resolves the final configuration: CLI overrides beat the config file,
    /// which beats the library defaults. The chain identifier has no
    /// default; it must come from one of the two sources.
    pub fn merge_with_cli(self, args: &GenerateArgs) -> Result<RequestConfig> {
        let chain = args.chain.clone().or(self.chain).ok_or_else(|| {
            CliError::Argument(
                "a chain identifier is required (--chain or 'chain' in the config file)".into(),
            )
        })?;
        validate_chain(&chain)?;

        let mut config = RequestConfig::new(&chain);
        if let Some(dir) = args.output_dir.clone().or(self.output_dir) {
            config.output_dir = dir;
        }
        if let Some(naming) = args.naming.map(Into::into).or(self.naming) {
            config.naming = naming;
        }
        if let Some(delimiter) = args.line_format.map(Into::into).or(self.line_format) {
            config.delimiter = delimiter;
        }
        debug!(?config, "final generation configuration");
        Ok(config)
    }
}

/// The chain lands verbatim inside every request line, so anything that
/// would collide with the line syntax is rejected up front.
fn validate_chain(chain: &str) -> Result<()> {
    let clean = !chain.is_empty() && chain.chars().all(|c| c.is_ascii_alphanumeric());
    if !clean {
        return Err(CliError::Argument(format!(
            "invalid chain identifier '{chain}' (expected e.g. 'A')"
        )));
    }
    Ok(())
}
