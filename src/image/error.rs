use crate::cue::error::CueError;
use crate::image::bin::error::BinError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImageError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    CueError(#[from] CueError),

    #[error(transparent)]
    BinError(#[from] BinError),

    #[error(transparent)]
    ProgressTemplateError(#[from] indicatif::style::TemplateError),

    #[error("No files are referenced in the CUE sheet")]
    NoFileReferencedInCueSheet,

    #[error("No tracks are declared in the CUE sheet")]
    NoTrackInCueSheet,

    #[error("Only a CUE sheet with a single bin file can be split, found {0} files")]
    NotASingleBinImage(usize),

    #[error("Output path has no file name: {0}")]
    InvalidOutputPath(PathBuf),
}

pub type ImageResult<T> = Result<T, ImageError>;
