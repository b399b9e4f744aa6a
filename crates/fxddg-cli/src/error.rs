use foldxddg::workflows::convert::ConvertError;
use foldxddg::workflows::ddg::DdgError;
use foldxddg::workflows::generate::GenerateError;
use foldxddg::workflows::inspect::InspectError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Ddg(#[from] DdgError),

    #[error(transparent)]
    Convert(#[from] ConvertError),

    #[error(transparent)]
    Inspect(#[from] InspectError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid argument: {0}")]
    Argument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
