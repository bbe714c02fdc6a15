//! Audio I/O layer for the wavegraph node engine.
//!
//! This crate provides:
//!
//! - **WAV codec**: [`WaveFile`] reads and writes the canonical 44-byte
//!   RIFF/WAVE header plus raw PCM payload, to a file or to memory
//! - **Playback**: the [`Playback`] collaborator trait and [`DevicePlayer`],
//!   which plays an in-memory WAV image on an output device
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use wavegraph_core::{FULL_SCALE, Signal};
//! use wavegraph_io::WaveFile;
//!
//! let tone: Signal = (0..44_100)
//!     .map(|i| (i as f32 * 0.0627).sin() * 0.5)
//!     .collect();
//!
//! let wave = WaveFile::from_samples(&tone.to_samples(FULL_SCALE));
//! wave.save("tone.wav")?;
//!
//! let loaded = WaveFile::open("tone.wav")?;
//! assert_eq!(loaded.to_bytes(), wave.to_bytes());
//! # Ok::<(), wavegraph_io::Error>(())
//! ```

mod playback;
mod wav;

pub use playback::{DevicePlayer, NullPlayback, Playback, list_output_devices};
pub use wav::{
    DATA_ID, FMT_CHUNK_SIZE, FMT_ID, HEADER_LEN, PCM_FORMAT, RIFF_MAGIC, WAVE_FORMAT, WaveFile,
    WaveHeader,
};

use std::path::PathBuf;

/// Header validation failures, one per checked field.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// Fewer than 44 header bytes were available.
    #[error("WAV header truncated: {len} of 44 bytes")]
    TruncatedHeader {
        /// Bytes actually read.
        len: usize,
    },

    /// Bytes 0..4 are not `RIFF`.
    #[error("RIFF header is not valid (magic {found:#010x})")]
    BadMagic {
        /// Value found in the magic field.
        found: u32,
    },

    /// Bytes 8..12 are not `WAVE`.
    #[error("format is not \"WAVE\" (found {found:#010x})")]
    BadFormat {
        /// Value found in the format field.
        found: u32,
    },

    /// Bytes 12..16 are not `fmt `.
    #[error("fmt subchunk id is not valid (found {found:#010x})")]
    BadFmtChunkId {
        /// Value found in the subchunk 1 id field.
        found: u32,
    },

    /// Bytes 36..40 are not `data`.
    #[error("data subchunk id is not valid (found {found:#010x})")]
    BadDataChunkId {
        /// Value found in the subchunk 2 id field.
        found: u32,
    },

    /// The fmt subchunk is not the 16-byte PCM layout.
    #[error("fmt subchunk size is {found}, expected 16 (PCM)")]
    BadFmtChunkSize {
        /// Value found in the subchunk 1 size field.
        found: u32,
    },

    /// Audio format tag is not PCM.
    #[error("audio format is {found}, only PCM (1) is supported")]
    NotPcm {
        /// Value found in the audio format field.
        found: u16,
    },

    /// Sample rate other than 44.1 kHz.
    #[error("sample rate {found} Hz is not supported, only 44100 Hz")]
    UnsupportedSampleRate {
        /// Value found in the sample rate field.
        found: u32,
    },

    /// Bit depth other than 16.
    #[error("{found} bits per sample is not supported, only 16")]
    UnsupportedBitDepth {
        /// Value found in the bits per sample field.
        found: u16,
    },
}

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The WAV file does not exist.
    #[error("file not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The WAV header failed validation.
    #[error("WAV format error: {0}")]
    Format(#[from] FormatError),

    /// Audio stream setup or runtime error.
    #[error("Audio stream error: {0}")]
    Stream(String),

    /// No audio device available on the system.
    #[error("No audio device available")]
    NoDevice,

    /// The requested audio device was not found.
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Returns true for header validation failures.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    /// Returns true when the source file is missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound(_))
    }
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
