//! RIFF/WAVE reading and writing.
//!
//! Only the canonical layout is handled: a 44-byte header (`RIFF` chunk,
//! 16-byte `fmt ` subchunk, `data` subchunk header) immediately followed by
//! the PCM payload. All multi-byte fields are little-endian.
//!
//! A [`WaveFile`] stores only channel count, sample rate, bit depth and the
//! payload. Byte rate, block align and both chunk sizes are derived on every
//! write, so they always agree with the payload.

use crate::{Error, FormatError, Result};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Read, Write};
use std::path::Path;
use wavegraph_core::{BITS_PER_SAMPLE, SAMPLE_RATE, SampleBuffer};

/// `RIFF` read as a little-endian `u32`.
pub const RIFF_MAGIC: u32 = 0x4646_4952;
/// `WAVE` read as a little-endian `u32`.
pub const WAVE_FORMAT: u32 = 0x4556_4157;
/// `fmt ` read as a little-endian `u32`.
pub const FMT_ID: u32 = 0x2074_6d66;
/// `data` read as a little-endian `u32`.
pub const DATA_ID: u32 = 0x6174_6164;
/// Size of the PCM `fmt ` subchunk body.
pub const FMT_CHUNK_SIZE: u32 = 16;
/// PCM audio format tag.
pub const PCM_FORMAT: u16 = 1;
/// Length of the canonical header.
pub const HEADER_LEN: usize = 44;

/// Bytes of the RIFF chunk counted by `chunk_size` besides the payload.
const RIFF_OVERHEAD: u32 = 36;

/// Every raw header field, in file order.
///
/// Produced by [`WaveFile::header`] for writing and by parsing for reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaveHeader {
    /// `RIFF` magic.
    pub magic: u32,
    /// File size minus 8.
    pub chunk_size: u32,
    /// `WAVE` format tag.
    pub format: u32,
    /// `fmt ` subchunk id.
    pub fmt_id: u32,
    /// `fmt ` subchunk size (16 for PCM).
    pub fmt_size: u32,
    /// Audio format tag (1 for PCM).
    pub audio_format: u16,
    /// Channel count.
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bytes per second.
    pub byte_rate: u32,
    /// Bytes per frame.
    pub block_align: u16,
    /// Bits per sample.
    pub bits_per_sample: u16,
    /// `data` subchunk id.
    pub data_id: u32,
    /// Payload length in bytes.
    pub data_size: u32,
}

impl WaveHeader {
    /// Decodes the 44 header bytes without validating them.
    pub fn parse(bytes: &[u8; HEADER_LEN]) -> Self {
        let u32_at = |at: usize| {
            u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
        };
        let u16_at = |at: usize| u16::from_le_bytes([bytes[at], bytes[at + 1]]);

        Self {
            magic: u32_at(0),
            chunk_size: u32_at(4),
            format: u32_at(8),
            fmt_id: u32_at(12),
            fmt_size: u32_at(16),
            audio_format: u16_at(20),
            channels: u16_at(22),
            sample_rate: u32_at(24),
            byte_rate: u32_at(28),
            block_align: u16_at(32),
            bits_per_sample: u16_at(34),
            data_id: u32_at(36),
            data_size: u32_at(40),
        }
    }

    /// Checks the header against the supported format.
    ///
    /// Checks run in a fixed order and the first failure wins: magic,
    /// format, fmt id, data id, fmt size, audio format, sample rate, bit
    /// depth.
    pub fn validate(&self) -> std::result::Result<(), FormatError> {
        if self.magic != RIFF_MAGIC {
            return Err(FormatError::BadMagic { found: self.magic });
        }
        if self.format != WAVE_FORMAT {
            return Err(FormatError::BadFormat { found: self.format });
        }
        if self.fmt_id != FMT_ID {
            return Err(FormatError::BadFmtChunkId { found: self.fmt_id });
        }
        if self.data_id != DATA_ID {
            return Err(FormatError::BadDataChunkId {
                found: self.data_id,
            });
        }
        if self.fmt_size != FMT_CHUNK_SIZE {
            return Err(FormatError::BadFmtChunkSize {
                found: self.fmt_size,
            });
        }
        if self.audio_format != PCM_FORMAT {
            return Err(FormatError::NotPcm {
                found: self.audio_format,
            });
        }
        if self.sample_rate != SAMPLE_RATE {
            return Err(FormatError::UnsupportedSampleRate {
                found: self.sample_rate,
            });
        }
        if self.bits_per_sample != BITS_PER_SAMPLE {
            return Err(FormatError::UnsupportedBitDepth {
                found: self.bits_per_sample,
            });
        }
        Ok(())
    }

    /// Encodes the header fields in file order.
    pub fn to_bytes(&self) -> [u8; HEADER_LEN] {
        let mut out = [0u8; HEADER_LEN];
        let mut at = 0;
        let mut put = |field: &[u8]| {
            out[at..at + field.len()].copy_from_slice(field);
            at += field.len();
        };

        put(&self.magic.to_le_bytes());
        put(&self.chunk_size.to_le_bytes());
        put(&self.format.to_le_bytes());
        put(&self.fmt_id.to_le_bytes());
        put(&self.fmt_size.to_le_bytes());
        put(&self.audio_format.to_le_bytes());
        put(&self.channels.to_le_bytes());
        put(&self.sample_rate.to_le_bytes());
        put(&self.byte_rate.to_le_bytes());
        put(&self.block_align.to_le_bytes());
        put(&self.bits_per_sample.to_le_bytes());
        put(&self.data_id.to_le_bytes());
        put(&self.data_size.to_le_bytes());
        out
    }
}

/// A PCM WAV file: format fields plus raw payload.
///
/// # Example
///
/// ```rust
/// use wavegraph_core::SampleBuffer;
/// use wavegraph_io::WaveFile;
///
/// let pcm = SampleBuffer::from_vec(vec![0, 1000, -1000]);
/// let wave = WaveFile::from_samples(&pcm);
///
/// let bytes = wave.to_bytes();
/// assert_eq!(bytes.len(), 44 + 6);
/// assert_eq!(&bytes[0..4], b"RIFF");
///
/// let decoded = WaveFile::from_bytes(&bytes).unwrap();
/// assert_eq!(decoded.to_samples(), pcm);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaveFile {
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
    data: Vec<u8>,
}

impl WaveFile {
    /// Wraps a raw PCM payload.
    pub fn new(channels: u16, sample_rate: u32, bits_per_sample: u16, data: Vec<u8>) -> Self {
        Self {
            channels,
            sample_rate,
            bits_per_sample,
            data,
        }
    }

    /// Mono, 16-bit, 44.1 kHz file holding `samples`.
    pub fn from_samples(samples: &SampleBuffer) -> Self {
        Self::new(1, SAMPLE_RATE, BITS_PER_SAMPLE, samples.to_bytes())
    }

    /// Channel count.
    pub fn channels(&self) -> u16 {
        self.channels
    }

    /// Sample rate in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Bits per sample.
    pub fn bits_per_sample(&self) -> u16 {
        self.bits_per_sample
    }

    /// Raw PCM payload.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// `sample_rate × channels × bytes per sample`.
    pub fn byte_rate(&self) -> u32 {
        self.sample_rate * u32::from(self.channels) * u32::from(self.bits_per_sample / 8)
    }

    /// `channels × bytes per sample`.
    pub fn block_align(&self) -> u16 {
        self.channels * (self.bits_per_sample / 8)
    }

    /// Duration in seconds, zero for a degenerate format.
    pub fn duration_secs(&self) -> f64 {
        let byte_rate = self.byte_rate();
        if byte_rate == 0 {
            return 0.0;
        }
        self.data.len() as f64 / f64::from(byte_rate)
    }

    /// Header for the current payload with all derived fields filled in.
    pub fn header(&self) -> WaveHeader {
        let data_size = self.data.len() as u32;
        WaveHeader {
            magic: RIFF_MAGIC,
            chunk_size: RIFF_OVERHEAD + data_size,
            format: WAVE_FORMAT,
            fmt_id: FMT_ID,
            fmt_size: FMT_CHUNK_SIZE,
            audio_format: PCM_FORMAT,
            channels: self.channels,
            sample_rate: self.sample_rate,
            byte_rate: self.byte_rate(),
            block_align: self.block_align(),
            bits_per_sample: self.bits_per_sample,
            data_id: DATA_ID,
            data_size,
        }
    }

    /// Payload decoded as 16-bit little-endian samples.
    pub fn to_samples(&self) -> SampleBuffer {
        SampleBuffer::from_bytes(&self.data)
    }

    /// Writes header and payload to `writer`.
    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.header().to_bytes())?;
        writer.write_all(&self.data)?;
        writer.flush()?;
        Ok(())
    }

    /// Complete file image in memory, byte-identical to [`save`](Self::save).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(HEADER_LEN + self.data.len());
        bytes.extend_from_slice(&self.header().to_bytes());
        bytes.extend_from_slice(&self.data);
        bytes
    }

    /// Writes the file to `path`, creating or truncating it.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.write_to(BufWriter::new(file))?;
        tracing::debug!(
            path = %path.display(),
            bytes = HEADER_LEN + self.data.len(),
            "wav_save"
        );
        Ok(())
    }

    /// Parses and validates a file image from `reader`.
    ///
    /// A payload shorter than the declared `data` size keeps the bytes that
    /// were present.
    pub fn read_from<R: Read>(reader: R) -> Result<Self> {
        let mut reader = reader;
        let mut raw = [0u8; HEADER_LEN];
        let got = read_fully(&mut reader, &mut raw)?;
        if got < HEADER_LEN {
            return Err(FormatError::TruncatedHeader { len: got }.into());
        }

        let header = WaveHeader::parse(&raw);
        header.validate()?;

        let mut data = Vec::new();
        reader
            .take(u64::from(header.data_size))
            .read_to_end(&mut data)?;
        if data.len() < header.data_size as usize {
            tracing::warn!(
                declared = header.data_size,
                actual = data.len(),
                "wav payload shorter than declared"
            );
        }

        Ok(Self {
            channels: header.channels,
            sample_rate: header.sample_rate,
            bits_per_sample: header.bits_per_sample,
            data,
        })
    }

    /// Parses and validates an in-memory file image.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Self::read_from(bytes)
    }

    /// Opens, parses and validates the file at `path`.
    ///
    /// A missing file fails with [`Error::NotFound`], distinct from every
    /// [`FormatError`].
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => Error::NotFound(path.to_path_buf()),
            _ => Error::Io(e),
        })?;
        let wave = Self::read_from(BufReader::new(file))?;
        tracing::debug!(
            path = %path.display(),
            channels = wave.channels,
            bytes = wave.data.len(),
            "wav_open"
        );
        Ok(wave)
    }
}

/// Reads until `buf` is full or the reader is exhausted.
fn read_fully<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => {}
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
