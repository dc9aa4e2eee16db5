use crate::commands::image::{MergeCommand, SplitCommand};
use clap::{Parser, Subcommand};

pub mod image;

/// CLI for merging multi-track bin/cue disc images and splitting them back.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Merge(MergeCommand),
    Split(SplitCommand),
}
