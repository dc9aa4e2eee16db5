use crate::cd::error::MsfError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CueError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error("Bin file not found or not readable: {0}")]
    BinFileMissing(PathBuf),

    #[error("Unsupported file type: {0}, only BINARY files are supported")]
    InvalidFileType(String),

    #[error("Unknown track type: {0}")]
    InvalidTrackType(String),

    #[error(transparent)]
    InvalidMsfFormat(#[from] MsfError),

    #[error(transparent)]
    ParseIntError(#[from] std::num::ParseIntError),

    #[error("Track {0} has no INDEX entry")]
    TrackWithoutIndex(u32),

    #[error("Track {track} starts at sector {start}, past its end boundary at sector {end}")]
    InvalidTrackLayout { track: u32, start: u64, end: u64 },

    #[error("Track {track} has INDEX {index} at sector {offset}, before its first index at sector {start}")]
    IndexBeforeTrackStart {
        track: u32,
        index: u32,
        offset: u64,
        start: u64,
    },
}

pub type CueResult<T> = Result<T, CueError>;
