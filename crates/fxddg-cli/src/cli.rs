use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Marta Iglesias",
    version,
    about = "fxddg - Prepares FoldX BuildModel mutation scans and extracts folding-stability changes (ddG) from FoldX output trees.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate FoldX individual-list request files from a mutation-scan CSV.
    Generate(GenerateArgs),
    /// Scan a FoldX results tree and compute ddG per input mutation.
    Ddg(DdgArgs),
    /// Convert a raw .fxout file into a clean CSV.
    Convert(ConvertArgs),
    /// Report the structure of every .fxout file under a results tree.
    Inspect(InspectArgs),
}

/// CLI mirror of the library's naming convention.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamingArg {
    /// {gene}_{code}.individual_list.txt
    Canonical,
    /// individual_list_{gene}_{code}.txt
    Legacy,
}

/// CLI mirror of the library's request-line layout.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineFormatArg {
    /// E,A,1932,K;
    Comma,
    /// EA1932K;
    Plain,
}

/// Arguments for the `generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to the mutation-scan CSV ('Gene,Mutation' or
    /// 'gene,position,wt_aa,mut_aa'; the layout is detected from the header).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// PDB chain identifier written into every request line.
    #[arg(short, long, value_name = "CHAIN")]
    pub chain: Option<String>,

    /// Directory the request files are written into.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Path to an optional configuration file in TOML format.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Override the request file naming convention from the config file.
    #[arg(long, value_name = "SCHEME")]
    pub naming: Option<NamingArg>,

    /// Override the request line layout from the config file.
    #[arg(long, value_name = "FORMAT")]
    pub line_format: Option<LineFormatArg>,
}

/// Arguments for the `ddg` subcommand.
#[derive(Args, Debug)]
pub struct DdgArgs {
    /// Root of the FoldX results tree (one run directory per mutation).
    #[arg(short, long, required = true, value_name = "DIR")]
    pub results: PathBuf,

    /// The mutation-scan CSV the run was generated from.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the augmented results CSV.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `convert` subcommand.
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// The raw .fxout file to convert.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the clean CSV.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub output: PathBuf,
}

/// Arguments for the `inspect` subcommand.
#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Root of the FoldX results tree to inspect.
    #[arg(short, long, required = true, value_name = "DIR")]
    pub results: PathBuf,
}
