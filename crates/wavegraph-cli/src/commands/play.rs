//! Audio file playback command.

use super::common::{make_player, report_feedback};
use clap::Args;
use std::path::PathBuf;
use wavegraph_config::EngineConfig;
use wavegraph_core::FULL_SCALE;
use wavegraph_io::{Playback, WaveFile};
use wavegraph_nodes::Feedback;
use wavegraph_nodes::input::file_in;

#[derive(Args)]
pub struct PlayArgs {
    /// WAV file to play
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Output device (index, exact name, or partial name)
    #[arg(short, long)]
    device: Option<String>,
}

pub fn run(args: PlayArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let mut feedback: Vec<Feedback> = Vec::new();
    let signal = file_in(&args.file, &mut feedback);
    report_feedback(&feedback)?;

    println!(
        "Playing {} ({} samples, {:.1}s)",
        args.file.display(),
        signal.len(),
        signal.duration_secs()
    );

    let wav = WaveFile::from_samples(&signal.to_samples(FULL_SCALE)).to_bytes();
    let mut player = make_player(args.device.as_deref(), config);
    player.play(&wav)?;

    println!("Done.");
    Ok(())
}
