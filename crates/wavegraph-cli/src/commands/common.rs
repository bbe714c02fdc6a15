//! Shared CLI helpers used across multiple commands.

use rand::SeedableRng;
use rand::rngs::StdRng;
use std::path::Path;
use wavegraph_config::EngineConfig;
use wavegraph_io::DevicePlayer;
use wavegraph_nodes::{Feedback, FeedbackLevel};

/// Load the configuration file, or defaults if the platform file is absent.
pub fn load_config(path: Option<&Path>) -> anyhow::Result<EngineConfig> {
    Ok(EngineConfig::load_or_default(path)?)
}

/// Noise source: the flag seed, else the configured seed, else entropy.
pub fn make_rng(seed: Option<u64>, config: &EngineConfig) -> StdRng {
    match seed.or(config.noise.seed) {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Output player: the flag device, else the configured device, else the default.
pub fn make_player(device: Option<&str>, config: &EngineConfig) -> DevicePlayer {
    match device.or(config.playback.device.as_deref()) {
        Some(name) => DevicePlayer::with_device(name),
        None => DevicePlayer::new(),
    }
}

/// Prints collected feedback to stderr and fails if any of it is an error.
pub fn report_feedback(feedback: &[Feedback]) -> anyhow::Result<()> {
    for item in feedback {
        eprintln!("{item}");
    }

    if let Some(first) = feedback.iter().find(|f| f.level == FeedbackLevel::Error) {
        anyhow::bail!("{}: {}", first.node, first.message);
    }
    Ok(())
}

pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{bytes} B")
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
