use crate::cue::error::{CueError, CueResult};
use std::fmt::{self, Display};
use std::path::PathBuf;
use std::str::FromStr;

/// A parsed cuesheet: the binary files it references, in play order.
#[derive(Debug, Clone, Default)]
pub struct DiscImage {
    pub files: Vec<SourceFile>,
    /// Bytes per sector, locked from the first track of the parse.
    pub block_size: Option<u64>,
}

impl DiscImage {
    pub fn track_count(&self) -> usize {
        self.files.iter().map(|f| f.tracks.len()).sum()
    }
}

#[derive(Debug, Clone)]
pub struct SourceFile {
    pub path: PathBuf,
    pub size: u64,
    pub tracks: Vec<Track>,
}

#[derive(Debug, Clone)]
pub struct Track {
    pub number: u32,
    pub track_type: TrackType,
    pub indexes: Vec<Index>,
    /// Only known when the cuesheet references a single binary file.
    pub sectors: Option<u64>,
}

impl Track {
    pub fn first_index(&self) -> Option<&Index> {
        self.indexes.first()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    pub id: u32,
    pub timestamp: String,
    pub sector_offset: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackType {
    Audio,
    CdG,
    Mode1_2048,
    Mode1_2352,
    Mode2_2336,
    Mode2_2352,
    CdI2336,
    CdI2352,
}

impl TrackType {
    pub fn block_size(&self) -> u64 {
        match self {
            TrackType::Audio | TrackType::Mode1_2352 | TrackType::Mode2_2352 | TrackType::CdI2352 => {
                2352
            }
            TrackType::CdG => 2448,
            TrackType::Mode1_2048 => 2048,
            TrackType::Mode2_2336 | TrackType::CdI2336 => 2336,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackType::Audio => "AUDIO",
            TrackType::CdG => "CDG",
            TrackType::Mode1_2048 => "MODE1/2048",
            TrackType::Mode1_2352 => "MODE1/2352",
            TrackType::Mode2_2336 => "MODE2/2336",
            TrackType::Mode2_2352 => "MODE2/2352",
            TrackType::CdI2336 => "CDI/2336",
            TrackType::CdI2352 => "CDI/2352",
        }
    }
}

impl Display for TrackType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrackType {
    type Err = CueError;

    fn from_str(type_str: &str) -> CueResult<Self> {
        match type_str {
            "AUDIO" => Ok(TrackType::Audio),
            "CDG" => Ok(TrackType::CdG),
            "MODE1/2048" => Ok(TrackType::Mode1_2048),
            "MODE1/2352" => Ok(TrackType::Mode1_2352),
            "MODE2/2336" => Ok(TrackType::Mode2_2336),
            "MODE2/2352" => Ok(TrackType::Mode2_2352),
            "CDI/2336" => Ok(TrackType::CdI2336),
            "CDI/2352" => Ok(TrackType::CdI2352),
            _ => Err(CueError::InvalidTrackType(type_str.to_string())),
        }
    }
}
