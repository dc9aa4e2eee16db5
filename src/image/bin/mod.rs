pub mod error;

use crate::cue::models::SourceFile;
use crate::cue::writer::track_filename_suffix;
use crate::image::bin::error::{BinError, BinResult};
use indicatif::ProgressBar;
use log::{debug, info};
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub const CHUNK_SIZE: usize = 1024 * 1024; // 1 MiB

/// Path of a split track file. `output_base` may carry a directory, the
/// track suffix is appended to its last component.
pub fn track_path(output_base: &Path, track_number: u32, track_count: usize) -> PathBuf {
    let mut name = OsString::from(output_base.as_os_str());
    name.push(track_filename_suffix(track_number, track_count));
    PathBuf::from(name)
}

async fn create_target(path: &Path) -> BinResult<File> {
    OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .await
        .map_err(|e| match e.kind() {
            ErrorKind::AlreadyExists => BinError::TargetExists(path.to_path_buf()),
            _ => BinError::IoError(e),
        })
}

/// Concatenates `files` into `output_path` in order. Returns the number of
/// bytes written.
pub async fn merge_bin_files(
    output_path: &Path,
    files: &[SourceFile],
    progress: &ProgressBar,
) -> BinResult<u64> {
    let mut output = create_target(output_path).await?;
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut written = 0u64;

    for file in files {
        debug!("Appending {:?} to {:?}", file.path, output_path);
        let mut input = File::open(&file.path).await?;

        loop {
            let read = input.read(&mut buffer).await?;
            if read == 0 {
                break;
            }

            output.write_all(&buffer[..read]).await?;
            written += read as u64;
            progress.inc(read as u64);
        }
    }

    output.flush().await?;
    info!("Wrote a new bin: {}", output_path.display());

    Ok(written)
}

/// Cuts `file` into one bin per track, named after `output_base`. Nothing is
/// written unless every target path is free.
pub async fn split_bin_file(
    output_base: &Path,
    file: &SourceFile,
    block_size: u64,
    progress: &ProgressBar,
) -> BinResult<Vec<PathBuf>> {
    let track_count = file.tracks.len();

    let targets = file
        .tracks
        .iter()
        .map(|track| -> BinResult<(PathBuf, u64)> {
            let sectors = track
                .sectors
                .ok_or(BinError::MissingSectorCount(track.number))?;
            Ok((
                track_path(output_base, track.number, track_count),
                sectors * block_size,
            ))
        })
        .collect::<BinResult<Vec<_>>>()?;

    for (path, _) in &targets {
        if fs::try_exists(path).await? {
            return Err(BinError::TargetExists(path.clone()));
        }
    }

    let mut input = File::open(&file.path).await?;
    let mut buffer = vec![0u8; CHUNK_SIZE];

    for (path, track_size) in &targets {
        debug!("Writing {track_size} bytes to {path:?}");
        let mut output = create_target(path).await?;
        let mut remaining = *track_size;

        while remaining > 0 {
            let len = remaining.min(CHUNK_SIZE as u64) as usize;
            input.read_exact(&mut buffer[..len]).await?;
            output.write_all(&buffer[..len]).await?;
            remaining -= len as u64;
            progress.inc(len as u64);
        }

        output.flush().await?;
    }

    info!("Wrote {} bin files", targets.len());

    Ok(targets.into_iter().map(|(path, _)| path).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cue::models::{Index, Track, TrackType};

    const BLOCK: u64 = 2352;

    fn pattern(len: u64, seed: u8) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8 ^ seed).collect()
    }

    fn track(number: u32, start: u64, sectors: Option<u64>) -> Track {
        Track {
            number,
            track_type: TrackType::Audio,
            indexes: vec![Index {
                id: 1,
                timestamp: crate::cd::sectors_to_timestamp(start),
                sector_offset: start,
            }],
            sectors,
        }
    }

    fn source(path: PathBuf, tracks: Vec<Track>) -> SourceFile {
        let size = std::fs::metadata(&path).unwrap().len();
        SourceFile { path, size, tracks }
    }

    #[test]
    fn track_path_keeps_directory() {
        assert_eq!(
            track_path(Path::new("/out/Game"), 2, 3),
            PathBuf::from("/out/Game (Track 2).bin")
        );
        assert_eq!(
            track_path(Path::new("Game"), 2, 12),
            PathBuf::from("Game (Track 02).bin")
        );
    }

    #[tokio::test]
    async fn merge_concatenates_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let b = dir.path().join("b.bin");
        std::fs::write(&a, pattern(BLOCK * 3, 1)).unwrap();
        std::fs::write(&b, pattern(BLOCK * 2 + 7, 2)).unwrap();
        let files = vec![source(a, vec![]), source(b, vec![])];
        let output = dir.path().join("merged.bin");

        let written = merge_bin_files(&output, &files, &ProgressBar::hidden())
            .await
            .unwrap();

        let mut expected = pattern(BLOCK * 3, 1);
        expected.extend(pattern(BLOCK * 2 + 7, 2));
        assert_eq!(written, expected.len() as u64);
        assert_eq!(std::fs::read(&output).unwrap(), expected);
    }

    #[tokio::test]
    async fn merge_spans_several_chunks() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        let data = pattern(CHUNK_SIZE as u64 * 2 + 5, 9);
        std::fs::write(&a, &data).unwrap();
        let output = dir.path().join("merged.bin");

        merge_bin_files(&output, &[source(a, vec![])], &ProgressBar::hidden())
            .await
            .unwrap();

        assert_eq!(std::fs::read(&output).unwrap(), data);
    }

    #[tokio::test]
    async fn merge_refuses_existing_target() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.bin");
        std::fs::write(&a, pattern(BLOCK, 1)).unwrap();
        let output = dir.path().join("merged.bin");
        std::fs::write(&output, b"keep me").unwrap();

        let err = merge_bin_files(&output, &[source(a, vec![])], &ProgressBar::hidden())
            .await
            .unwrap_err();

        assert!(matches!(err, BinError::TargetExists(p) if p == output));
        assert_eq!(std::fs::read(&output).unwrap(), b"keep me");
    }

    #[tokio::test]
    async fn split_writes_each_track() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("game.bin");
        let data = pattern(BLOCK * 10, 3);
        std::fs::write(&bin, &data).unwrap();
        let file = source(bin, vec![track(1, 0, Some(4)), track(2, 4, Some(6))]);

        let written = split_bin_file(&dir.path().join("Game"), &file, BLOCK, &ProgressBar::hidden())
            .await
            .unwrap();

        assert_eq!(
            written,
            vec![
                dir.path().join("Game (Track 1).bin"),
                dir.path().join("Game (Track 2).bin")
            ]
        );
        assert_eq!(std::fs::read(&written[0]).unwrap(), &data[..(BLOCK * 4) as usize]);
        assert_eq!(std::fs::read(&written[1]).unwrap(), &data[(BLOCK * 4) as usize..]);
    }

    #[tokio::test]
    async fn split_checks_every_target_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("game.bin");
        std::fs::write(&bin, pattern(BLOCK * 10, 3)).unwrap();
        let file = source(
            bin,
            vec![track(1, 0, Some(2)), track(2, 2, Some(3)), track(3, 5, Some(5))],
        );
        let taken = dir.path().join("Game (Track 3).bin");
        std::fs::write(&taken, b"taken").unwrap();

        let err = split_bin_file(&dir.path().join("Game"), &file, BLOCK, &ProgressBar::hidden())
            .await
            .unwrap_err();

        assert!(matches!(err, BinError::TargetExists(p) if p == taken));
        assert!(!dir.path().join("Game (Track 1).bin").exists());
        assert!(!dir.path().join("Game (Track 2).bin").exists());
        assert_eq!(std::fs::read(&taken).unwrap(), b"taken");
    }

    #[tokio::test]
    async fn split_needs_sector_counts() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("game.bin");
        std::fs::write(&bin, pattern(BLOCK * 2, 3)).unwrap();
        let file = source(bin, vec![track(1, 0, Some(1)), track(2, 1, None)]);

        let err = split_bin_file(&dir.path().join("Game"), &file, BLOCK, &ProgressBar::hidden())
            .await
            .unwrap_err();

        assert!(matches!(err, BinError::MissingSectorCount(2)));
        assert!(!dir.path().join("Game (Track 1).bin").exists());
    }

    #[tokio::test]
    async fn split_fails_when_source_is_short() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("game.bin");
        std::fs::write(&bin, pattern(BLOCK * 2, 3)).unwrap();
        let file = source(bin, vec![track(1, 0, Some(3))]);

        let err = split_bin_file(&dir.path().join("Game"), &file, BLOCK, &ProgressBar::hidden())
            .await
            .unwrap_err();

        assert!(matches!(err, BinError::IoError(e) if e.kind() == ErrorKind::UnexpectedEof));
    }

    #[tokio::test]
    async fn merging_then_splitting_restores_tracks() {
        let dir = tempfile::tempdir().unwrap();
        let sizes = [3u64, 1, 5];
        let mut originals = Vec::new();
        let mut files = Vec::new();
        for (i, sectors) in sizes.iter().enumerate() {
            let path = dir.path().join(format!("orig {i}.bin"));
            let data = pattern(BLOCK * sectors, i as u8 * 17);
            std::fs::write(&path, &data).unwrap();
            originals.push(data);
            files.push(source(path, vec![]));
        }

        let merged = dir.path().join("merged.bin");
        merge_bin_files(&merged, &files, &ProgressBar::hidden())
            .await
            .unwrap();

        let tracks = vec![
            track(1, 0, Some(3)),
            track(2, 3, Some(1)),
            track(3, 4, Some(5)),
        ];
        let merged_file = source(merged, tracks);
        let written = split_bin_file(
            &dir.path().join("Split"),
            &merged_file,
            BLOCK,
            &ProgressBar::hidden(),
        )
        .await
        .unwrap();

        for (path, original) in written.iter().zip(&originals) {
            assert_eq!(&std::fs::read(path).unwrap(), original);
        }
    }
}
