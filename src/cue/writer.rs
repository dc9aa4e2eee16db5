use crate::cd::sectors_to_timestamp;
use crate::cue::models::{DiscImage, SourceFile, Track};

const LINE_ENDING: &str = "\r\n";

/// Names a split track file following the redump convention: tracks are only
/// zero-padded when the disc has more than 9 of them.
pub fn track_filename(prefix: &str, track_number: u32, track_count: usize) -> String {
    format!("{prefix}{}", track_filename_suffix(track_number, track_count))
}

pub(crate) fn track_filename_suffix(track_number: u32, track_count: usize) -> String {
    if track_count > 9 {
        format!(" (Track {track_number:02}).bin")
    } else {
        format!(" (Track {track_number}).bin")
    }
}

/// Cuesheet for a single `<base_name>.bin` holding every track back to back.
pub fn merged_cue_sheet(base_name: &str, disc: &DiscImage) -> String {
    let mut cue = format!("FILE \"{base_name}.bin\" BINARY{LINE_ENDING}");

    // Kept in bytes so files that are not a whole number of sectors still
    // add up to the same offsets.
    let mut bytes_before = 0u64;

    for file in &disc.files {
        let sectors_before = disc.block_size.map_or(0, |bs| bytes_before / bs);

        for track in &file.tracks {
            push_track(&mut cue, track, |offset| sectors_before + offset);
        }

        bytes_before += file.size;
    }

    cue
}

/// Cuesheet for one file per track, each addressed from its first index.
pub fn split_cue_sheet(base_name: &str, file: &SourceFile) -> String {
    let mut cue = String::new();
    let track_count = file.tracks.len();

    for track in &file.tracks {
        let filename = track_filename(base_name, track.number, track_count);
        cue.push_str(&format!("FILE \"{filename}\" BINARY{LINE_ENDING}"));

        let start = track.first_index().map_or(0, |i| i.sector_offset);
        push_track(&mut cue, track, |offset| offset.saturating_sub(start));
    }

    cue
}

fn push_track(cue: &mut String, track: &Track, position: impl Fn(u64) -> u64) {
    cue.push_str(&format!(
        "  TRACK {:02} {}{LINE_ENDING}",
        track.number, track.track_type
    ));

    for index in &track.indexes {
        cue.push_str(&format!(
            "    INDEX {:02} {}{LINE_ENDING}",
            index.id,
            sectors_to_timestamp(position(index.sector_offset))
        ));
    }
}
