//! WAV file source node.

use crate::notify::{Feedback, Notifier};
use std::path::Path;
use wavegraph_core::{FULL_SCALE, Signal};
use wavegraph_io::WaveFile;

/// Display name used in feedback.
pub const FILE_IN: &str = "File In";

/// Loads a WAV file as a signal.
///
/// An empty path means "not configured" and silently yields an empty signal.
/// A missing, unreadable or malformed file also yields an empty signal, and
/// the reason is sent to `notifier`.
pub fn file_in<P: AsRef<Path>>(path: P, notifier: &mut dyn Notifier) -> Signal {
    let path = path.as_ref();
    if path.as_os_str().is_empty() {
        return Signal::new();
    }

    match WaveFile::open(path) {
        Ok(wave) => {
            let signal = Signal::from_samples(&wave.to_samples(), FULL_SCALE);
            tracing::debug!(path = %path.display(), samples = signal.len(), "file_in");
            signal
        }
        Err(e) => {
            notifier.notify(Feedback::error(
                FILE_IN,
                format!("{}: {}", path.display(), e),
            ));
            Signal::new()
        }
    }
}
