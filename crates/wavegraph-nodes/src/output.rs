//! Export and playback sink.
//!
//! [`process`] is the terminal node of a graph: it quantizes the incoming
//! signal, wraps it as a mono 16-bit WAV image and optionally plays and
//! saves it. Side-effect failures are reported, never returned, so the
//! quantized samples always reach the caller.

use crate::notify::{Feedback, Notifier};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use wavegraph_core::{FULL_SCALE, SampleBuffer, Signal};
use wavegraph_io::{Playback, WaveFile};

/// Display name used in feedback.
pub const PROCESS: &str = "Process";

/// Default export file name.
pub const DEFAULT_EXPORT_PATH: &str = "MySound.wav";

/// Settings of the [`process`] sink.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessSettings {
    /// Full-scale multiplier applied before quantization.
    pub scale: i16,
    /// Hand the rendered file to the playback collaborator.
    pub play: bool,
    /// Write the rendered file to `path`.
    pub export: bool,
    /// Export destination, created or overwritten.
    pub path: PathBuf,
}

impl Default for ProcessSettings {
    fn default() -> Self {
        Self {
            scale: FULL_SCALE,
            play: true,
            export: true,
            path: PathBuf::from(DEFAULT_EXPORT_PATH),
        }
    }
}

/// Renders `signal` to PCM, then plays and/or exports it.
///
/// `None` (an unconnected input) returns an empty buffer with no side
/// effects. Playback runs before export. A failure of either is sent to
/// `notifier` and the other still runs. Samples that saturate at `scale`
/// raise a single warning.
pub fn process(
    signal: Option<&Signal>,
    settings: &ProcessSettings,
    playback: &mut dyn Playback,
    notifier: &mut dyn Notifier,
) -> SampleBuffer {
    let Some(signal) = signal else {
        return SampleBuffer::new();
    };

    let samples = signal.to_samples(settings.scale);
    let clipped = count_clipped(signal, settings.scale);
    if clipped > 0 {
        notifier.notify(Feedback::warning(
            PROCESS,
            format!("{clipped} samples clipped at scale {}", settings.scale),
        ));
    }
    let wave = WaveFile::from_samples(&samples);
    tracing::debug!(
        samples = samples.len(),
        scale = settings.scale,
        play = settings.play,
        export = settings.export,
        "process"
    );

    if settings.play {
        if let Err(e) = playback.play(&wave.to_bytes()) {
            notifier.notify(Feedback::error(PROCESS, format!("playback failed: {e}")));
        }
    }

    if settings.export {
        match wave.save(&settings.path) {
            Ok(()) => tracing::info!(path = %settings.path.display(), "exported"),
            Err(e) => notifier.notify(Feedback::error(
                PROCESS,
                format!("error writing {}: {e}", settings.path.display()),
            )),
        }
    }

    samples
}

fn count_clipped(signal: &Signal, scale: i16) -> usize {
    let scale = f32::from(scale);
    let range = f32::from(i16::MIN)..=f32::from(i16::MAX);
    signal
        .iter()
        .filter(|&&v| {
            let x = v * scale;
            !x.is_nan() && !range.contains(&x)
        })
        .count()
}
