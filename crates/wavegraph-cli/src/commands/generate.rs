//! Tone and noise rendering command.

use super::common::{make_player, make_rng, report_feedback};
use clap::Args;
use std::path::PathBuf;
use wavegraph_config::EngineConfig;
use wavegraph_core::Signal;
use wavegraph_io::{NullPlayback, Playback};
use wavegraph_nodes::generators::{
    self, DEFAULT_AMPLITUDE, DEFAULT_FREQUENCY, DEFAULT_LENGTH, ToneSettings, Waveform,
};
use wavegraph_nodes::output::{self, ProcessSettings};
use wavegraph_nodes::Feedback;

#[derive(Args)]
pub struct GenerateArgs {
    /// Waveform: sine, square, sawtooth, triangle or noise
    #[arg(value_name = "WAVEFORM")]
    waveform: String,

    /// Output WAV file
    #[arg(value_name = "OUTPUT")]
    output: PathBuf,

    /// Frequency in Hz (ignored for noise)
    #[arg(long, default_value_t = DEFAULT_FREQUENCY)]
    freq: f32,

    /// Amplitude
    #[arg(long, default_value_t = DEFAULT_AMPLITUDE)]
    amplitude: f32,

    /// Duration in seconds
    #[arg(long, default_value_t = DEFAULT_LENGTH)]
    duration: f32,

    /// Leading silence in seconds
    #[arg(long, default_value_t = 0.0)]
    delay: f32,

    /// Noise seed (overrides the configured seed)
    #[arg(long)]
    seed: Option<u64>,

    /// Full-scale multiplier for quantization (overrides the configured scale)
    #[arg(long, allow_negative_numbers = true)]
    scale: Option<i16>,

    /// Also play the rendered file
    #[arg(long)]
    play: bool,

    /// Output device for --play (index, exact name, or partial name)
    #[arg(long)]
    device: Option<String>,
}

/// Source selected by the waveform argument.
enum Source {
    Tone(Waveform),
    Noise,
}

fn parse_source(name: &str) -> anyhow::Result<Source> {
    if name.eq_ignore_ascii_case("noise") || name.eq_ignore_ascii_case("white") {
        return Ok(Source::Noise);
    }
    Waveform::from_name(name).map(Source::Tone).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown waveform: {} (expected sine, square, sawtooth, triangle or noise)",
            name
        )
    })
}

pub fn run(args: GenerateArgs, config: &EngineConfig) -> anyhow::Result<()> {
    let source = parse_source(&args.waveform)?;
    let settings = ToneSettings {
        frequency: args.freq,
        amplitude: args.amplitude,
        length: args.duration,
        delay: args.delay,
    };

    let unconnected = Signal::new();
    let signal = match source {
        Source::Tone(waveform) => {
            println!(
                "Generating {} wave: {} Hz, {:.2}s",
                waveform.name(),
                args.freq,
                args.duration
            );
            generators::oscillator(waveform, &unconnected, &unconnected, &unconnected, &settings)
        }
        Source::Noise => {
            println!("Generating white noise: {:.2}s", args.duration);
            let mut rng = make_rng(args.seed, config);
            generators::white_noise(&mut rng, &unconnected, &unconnected, &settings)
        }
    };

    let sink = ProcessSettings {
        scale: args.scale.unwrap_or(config.export.scale),
        play: args.play,
        export: true,
        path: args.output.clone(),
    };

    let mut feedback: Vec<Feedback> = Vec::new();
    let mut device;
    let mut silent = NullPlayback;
    let player: &mut dyn Playback = if args.play {
        device = make_player(args.device.as_deref(), config);
        &mut device
    } else {
        &mut silent
    };

    let samples = output::process(Some(&signal), &sink, player, &mut feedback);
    report_feedback(&feedback)?;

    println!(
        "Wrote {} samples to {}",
        samples.len(),
        args.output.display()
    );
    Ok(())
}
