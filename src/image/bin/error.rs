use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BinError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("Target bin path already exists: {0}")]
    TargetExists(PathBuf),

    #[error("Track {0} has no known length, only a single-bin image can be split")]
    MissingSectorCount(u32),
}

pub type BinResult<T> = Result<T, BinError>;
