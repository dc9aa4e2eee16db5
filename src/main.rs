use crate::commands::{Cli, Commands};
use anyhow::Result;
use binmerge::image::{merge_image, split_image};
use clap::Parser;
use indicatif::MultiProgress;
use indicatif_log_bridge::LogWrapper;

mod commands;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let logger = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .build();

    let level = logger.filter();
    let pb = MultiProgress::new();

    LogWrapper::new(pb.clone(), logger).try_init()?;
    log::set_max_level(level);

    let cli = Cli::parse();

    match cli.command {
        Commands::Merge(cmd) => merge_image(pb.clone(), cmd.input_cue, cmd.output_cue).await?,
        Commands::Split(cmd) => split_image(pb.clone(), cmd.input_cue, cmd.output_cue).await?,
    }

    Ok(())
}
