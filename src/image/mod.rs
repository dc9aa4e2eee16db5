use crate::cue::CueParser;
use crate::cue::models::DiscImage;
use crate::cue::writer::{merged_cue_sheet, split_cue_sheet};
use crate::image::bin::{merge_bin_files, split_bin_file};
use crate::image::error::{ImageError, ImageResult};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};
use tokio::fs;

pub mod bin;
pub mod error;

const PROGRESS_TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {bytes}/{total_bytes} ({eta})";

/// Merges every bin referenced by `cue_path` into `<output_cue stem>.bin`
/// next to `output_cue`, then writes the matching cuesheet to `output_cue`.
pub async fn merge_image(
    multi_progress: MultiProgress,
    cue_path: PathBuf,
    output_cue: PathBuf,
) -> ImageResult<()> {
    let disc = parse_cue(&cue_path).await?;
    let base_name = output_stem(&output_cue)?;
    let bin_path = output_cue.with_extension("bin");

    let cue_sheet = merged_cue_sheet(&base_name, &disc);

    info!(
        "Merging {} tracks from {} files, it will take a while",
        disc.track_count(),
        disc.files.len()
    );
    let total_bytes = disc.files.iter().map(|f| f.size).sum();
    let pb = copy_progress(&multi_progress, total_bytes)?;
    let written = merge_bin_files(&bin_path, &disc.files, &pb).await;
    pb.finish_and_clear();
    let written = written?;
    debug!("Merged {written} bytes");

    fs::write(&output_cue, cue_sheet).await?;
    info!("Wrote new cue: {}", output_cue.display());

    Ok(())
}

/// Splits the single bin referenced by `cue_path` into one bin per track
/// named after `output_cue`, then writes the matching cuesheet to
/// `output_cue`.
pub async fn split_image(
    multi_progress: MultiProgress,
    cue_path: PathBuf,
    output_cue: PathBuf,
) -> ImageResult<()> {
    let disc = parse_cue(&cue_path).await?;
    let [file] = disc.files.as_slice() else {
        return Err(ImageError::NotASingleBinImage(disc.files.len()));
    };
    let block_size = disc.block_size.ok_or(ImageError::NoTrackInCueSheet)?;

    let base_name = output_stem(&output_cue)?;
    let output_base = output_cue
        .parent()
        .unwrap_or(Path::new("."))
        .join(&base_name);

    let cue_sheet = split_cue_sheet(&base_name, file);

    info!(
        "Splitting {} tracks, it will take a while",
        file.tracks.len()
    );
    let pb = copy_progress(&multi_progress, file.size)?;
    let written = split_bin_file(&output_base, file, block_size, &pb).await;
    pb.finish_and_clear();
    for path in written? {
        debug!("Wrote {}", path.display());
    }

    fs::write(&output_cue, cue_sheet).await?;
    info!("Wrote new cue: {}", output_cue.display());

    Ok(())
}

async fn parse_cue(cue_path: &Path) -> ImageResult<DiscImage> {
    info!("Opening cue: {}", cue_path.display());
    let disc = CueParser::new(cue_path).parse().await?;

    if disc.files.is_empty() {
        return Err(ImageError::NoFileReferencedInCueSheet);
    }

    Ok(disc)
}

fn output_stem(output_cue: &Path) -> ImageResult<String> {
    output_cue
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .ok_or_else(|| ImageError::InvalidOutputPath(output_cue.to_path_buf()))
}

fn copy_progress(multi_progress: &MultiProgress, total_bytes: u64) -> ImageResult<ProgressBar> {
    let pb = multi_progress.add(ProgressBar::new(total_bytes));
    pb.set_style(ProgressStyle::with_template(PROGRESS_TEMPLATE)?.progress_chars("#>-"));
    Ok(pb)
}
