use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ScanError {
    #[error("Assets directory not found at expected location: {path:?}")]
    MissingAssets { path: PathBuf },

    #[error("error creating file walker: {0}")]
    Glob(#[from] globwalk::GlobError),
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{path:?} not found. Run `shader_inventory scan` first.")]
    MissingShaderReport { path: PathBuf },

    #[error("error reading or writing CSV data: {0}")]
    Csv(#[from] csv::Error),

    #[error("error writing report: {0}")]
    Io(#[from] std::io::Error),
}
