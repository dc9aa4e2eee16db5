use clap::Parser;
use std::path::PathBuf;

/// Merges a multi-bin image into a single .bin and .cue file.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(
    long_about = "Merges a multi-bin image into a single .bin and .cue file\n\nThe merged bin is written next to OUTPUT_CUE with the same name and a .bin extension, an existing bin is never overwritten"
)]
pub struct MergeCommand {
    /// Source .cue file referencing one bin per track
    #[arg(value_name = "INPUT_CUE")]
    pub input_cue: PathBuf,

    /// Destination .cue file of the merged image
    #[arg(value_name = "OUTPUT_CUE")]
    pub output_cue: PathBuf,
}

/// Splits a single-bin image into one .bin per track.
#[derive(Parser, Debug, Clone, Eq, PartialEq)]
#[command(
    long_about = "Splits a single-bin image into one .bin per track\n\nTrack files are named \"<OUTPUT_CUE name> (Track N).bin\" and written next to OUTPUT_CUE, nothing is written if any of them already exists"
)]
pub struct SplitCommand {
    /// Source .cue file referencing a single bin
    #[arg(value_name = "INPUT_CUE")]
    pub input_cue: PathBuf,

    /// Destination .cue file of the split image
    #[arg(value_name = "OUTPUT_CUE")]
    pub output_cue: PathBuf,
}
