//! Linear node chain command.

use super::common::{make_player, make_rng, report_feedback};
use crate::chain::{parse_chain, run_chain};
use clap::Args;
use std::path::PathBuf;
use wavegraph_config::EngineConfig;
use wavegraph_core::{Plot, sample_time};
use wavegraph_io::{NullPlayback, Playback};
use wavegraph_nodes::Feedback;
use wavegraph_registry::{NodeContext, NodeOutput};

#[derive(Args)]
pub struct ChainArgs {
    /// Chain specification (e.g., "sine_wave:frequency=440|volume:volume=0.3|process")
    #[arg(value_name = "CHAIN")]
    spec: String,

    /// Noise seed (overrides the configured seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Export path for a trailing process node (overrides the configured path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Never play, even if the process node or configuration asks to
    #[arg(long)]
    no_play: bool,

    /// Output device (index, exact name, or partial name)
    #[arg(long)]
    device: Option<String>,
}

pub fn run(args: ChainArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let steps = parse_chain(&args.spec)?;

    let mut export = config.export.clone();
    if let Some(path) = &args.output {
        export.path.clone_from(path);
    }

    let mut rng = make_rng(args.seed, config);
    let mut feedback: Vec<Feedback> = Vec::new();
    let mut device;
    let mut silent = NullPlayback;
    let player: &mut dyn Playback = if args.no_play {
        &mut silent
    } else {
        device = make_player(args.device.as_deref(), config);
        &mut device
    };

    let output = {
        let mut ctx = NodeContext::new(&mut rng, &mut feedback, player);
        run_chain(&steps, &export, &mut ctx)?
    };
    report_feedback(&feedback)?;

    print_summary(&output);
    Ok(())
}

fn print_summary(output: &NodeOutput) {
    let plot = output.plot();
    let (min, max) = plot
        .points()
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), &(_, v)| {
            (lo.min(v), hi.max(v))
        });

    let kind = match plot {
        Plot::Signal(_) => "signal",
        Plot::Samples(_) => "samples",
    };
    println!(
        "Output:   {} ({} values, {:.3}s)",
        kind,
        plot.len(),
        sample_time(plot.len())
    );
    if !plot.is_empty() {
        println!("Range:    {min} .. {max}");
    }
}
