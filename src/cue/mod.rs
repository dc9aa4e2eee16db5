use crate::cd::timestamp_to_sectors;
use crate::cue::error::{CueError, CueResult};
use crate::cue::models::{DiscImage, Index, SourceFile, Track, TrackType};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use std::path::{Path, PathBuf};
use tokio::fs;

pub mod error;
pub mod models;
pub mod writer;

lazy_static! {
    static ref FILE_LINE: Regex =
        Regex::new(r#"^FILE\s+"?(.*?)"?\s+(\S+)$"#).expect("valid FILE pattern");
    static ref TRACK_LINE: Regex =
        Regex::new(r"^TRACK\s+(\d+)\s+(\S+)").expect("valid TRACK pattern");
    static ref INDEX_LINE: Regex =
        Regex::new(r"^INDEX\s+(\d+)\s+(\S+)").expect("valid INDEX pattern");
}

/// Blocksize chosen by the first track of a parse. Discs cannot mix sector
/// sizes, so later tracks reuse it.
#[derive(Debug, Default)]
struct BlockSizeLock {
    block_size: Option<u64>,
}

impl BlockSizeLock {
    fn lock(&mut self, track_type: TrackType) {
        match self.block_size {
            Some(locked) if track_type.block_size() != locked => warn!(
                "Track type {track_type} uses {} byte sectors, keeping the locked blocksize of {locked}",
                track_type.block_size()
            ),
            Some(_) => {}
            None => {
                let block_size = track_type.block_size();
                debug!("Locked blocksize to {block_size}");
                self.block_size = Some(block_size);
            }
        }
    }
}

pub struct CueParser {
    cue_path: PathBuf,
}

impl CueParser {
    pub fn new(cue_path: impl AsRef<Path>) -> Self {
        Self {
            cue_path: cue_path.as_ref().to_path_buf(),
        }
    }

    pub async fn parse(&self) -> CueResult<DiscImage> {
        let data = fs::read(&self.cue_path).await?;
        let text = String::from_utf8_lossy(&data);

        let mut files: Vec<SourceFile> = Vec::new();
        // (file, track) of the open track. A FILE line does not close it, an
        // INDEX 01 may follow its INDEX 00 in the next file.
        let mut current_track: Option<(usize, usize)> = None;
        let mut block_size_lock = BlockSizeLock::default();

        for line in text.lines() {
            let line = line.trim().trim_start_matches('\u{feff}');

            if let Some(caps) = FILE_LINE.captures(line) {
                let file_type = &caps[2];
                if file_type != "BINARY" {
                    return Err(CueError::InvalidFileType(file_type.to_string()));
                }

                let (path, size) = self.resolve_bin_file(&caps[1]).await?;
                files.push(SourceFile {
                    path,
                    size,
                    tracks: Vec::new(),
                });
                continue;
            }

            if let Some(caps) = TRACK_LINE.captures(line) {
                if let Some(file_idx) = files.len().checked_sub(1) {
                    let file = &mut files[file_idx];
                    let track_type: TrackType = caps[2].parse()?;
                    block_size_lock.lock(track_type);

                    file.tracks.push(Track {
                        number: caps[1].parse()?,
                        track_type,
                        indexes: Vec::new(),
                        sectors: None,
                    });
                    current_track = Some((file_idx, file.tracks.len() - 1));
                }
                continue;
            }

            if let Some(caps) = INDEX_LINE.captures(line) {
                if let Some((file_idx, track_idx)) = current_track {
                    let track = &mut files[file_idx].tracks[track_idx];
                    let timestamp = caps[2].to_string();
                    let sector_offset = timestamp_to_sectors(&timestamp)?;

                    track.indexes.push(Index {
                        id: caps[1].parse()?,
                        timestamp,
                        sector_offset,
                    });
                }
            }
        }

        if let ([file], Some(block_size)) = (files.as_mut_slice(), block_size_lock.block_size) {
            compute_track_sectors(file, block_size)?;
        }

        let disc = DiscImage {
            files,
            block_size: block_size_lock.block_size,
        };
        log_disc_image(&disc);

        Ok(disc)
    }

    async fn resolve_bin_file(&self, filename: &str) -> CueResult<(PathBuf, u64)> {
        let cue_dir = self.cue_path.parent().unwrap_or(Path::new("."));
        let path = cue_dir.join(filename);

        let size = match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => metadata.len(),
            _ => return Err(CueError::BinFileMissing(path)),
        };

        if fs::File::open(&path).await.is_err() {
            return Err(CueError::BinFileMissing(path));
        }

        Ok((path, size))
    }
}

/// Derives each track's length from where the next one starts. The last
/// track runs to the end of the file.
fn compute_track_sectors(file: &mut SourceFile, block_size: u64) -> CueResult<()> {
    let mut next_start = file.size / block_size;

    for track in file.tracks.iter_mut().rev() {
        let start = track
            .first_index()
            .ok_or(CueError::TrackWithoutIndex(track.number))?
            .sector_offset;

        if let Some(index) = track.indexes.iter().find(|i| i.sector_offset < start) {
            return Err(CueError::IndexBeforeTrackStart {
                track: track.number,
                index: index.id,
                offset: index.sector_offset,
                start,
            });
        }

        let sectors = next_start
            .checked_sub(start)
            .ok_or(CueError::InvalidTrackLayout {
                track: track.number,
                start,
                end: next_start,
            })?;

        track.sectors = Some(sectors);
        next_start = start;
    }

    Ok(())
}

fn log_disc_image(disc: &DiscImage) {
    for file in &disc.files {
        debug!("-- File --");
        debug!("Filename: {}", file.path.display());
        debug!("Size: {}", file.size);
        debug!("Tracks:");

        for track in &file.tracks {
            debug!("  -- Track --");
            debug!("  Num: {}", track.number);
            debug!("  Type: {}", track.track_type);
            if let Some(sectors) = track.sectors {
                debug!("  Sectors: {sectors}");
            }
            debug!("  Indexes: {:?}", track.indexes);
        }
    }
}
