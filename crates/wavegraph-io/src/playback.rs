//! Playback of in-memory WAV images via cpal.

use crate::{Error, Result, WaveFile};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{Device, Host};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};
use wavegraph_core::SAMPLE_RATE;

/// Consumer of rendered audio.
///
/// The export sink hands the complete WAV file image to a `Playback`
/// implementation instead of touching disk.
pub trait Playback {
    /// Plays a complete RIFF/WAVE image.
    fn play(&mut self, wav: &[u8]) -> Result<()>;
}

/// Playback that discards the audio.
///
/// Used when no output device is wanted (tests, batch rendering).
#[derive(Debug, Clone, Copy, Default)]
pub struct NullPlayback;

impl Playback for NullPlayback {
    fn play(&mut self, wav: &[u8]) -> Result<()> {
        tracing::debug!(bytes = wav.len(), "null playback");
        Ok(())
    }
}

/// Extract device name via `description()` (cpal 0.17+).
fn device_name(device: &Device) -> std::result::Result<String, cpal::DeviceNameError> {
    device.description().map(|d| d.name().to_string())
}

/// Names of all output devices on the default host.
pub fn list_output_devices() -> Result<Vec<String>> {
    let host = cpal::default_host();
    let outputs = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?;
    Ok(outputs.filter_map(|d| device_name(&d).ok()).collect())
}

/// Plays WAV images on an audio output device.
///
/// Each call to [`play`](Playback::play) decodes the image, opens an output
/// stream, and blocks until the clip has been rendered. The stream is closed
/// before `play` returns, on success and on error alike.
#[derive(Debug, Clone, Default)]
pub struct DevicePlayer {
    /// Output device (index, exact name, or partial name); default device if `None`.
    pub device: Option<String>,
}

impl DevicePlayer {
    /// Player for the default output device.
    pub fn new() -> Self {
        Self::default()
    }

    /// Player for a named output device.
    pub fn with_device(device: impl Into<String>) -> Self {
        Self {
            device: Some(device.into()),
        }
    }

    fn output_device(&self, host: &Host) -> Result<Device> {
        match &self.device {
            Some(name) => find_output_device(host, name),
            None => host.default_output_device().ok_or(Error::NoDevice),
        }
    }
}

impl Playback for DevicePlayer {
    fn play(&mut self, wav: &[u8]) -> Result<()> {
        let wave = WaveFile::from_bytes(wav)?;
        let clip = Arc::new(wave.to_samples().to_floats());
        if clip.is_empty() {
            return Ok(());
        }

        let host = cpal::default_host();
        let device = self.output_device(&host)?;
        let output_config = device
            .default_output_config()
            .map_err(|e| Error::Stream(e.to_string()))?;

        let channels = output_config.channels() as usize;
        let device_rate = output_config.sample_rate() as f64;
        let step = f64::from(SAMPLE_RATE) / device_rate;

        tracing::info!(
            device = %device_name(&device).unwrap_or_default(),
            device_rate,
            channels,
            frames = clip.len(),
            "playback start"
        );

        let finished = Arc::new(AtomicBool::new(false));
        let cb_finished = Arc::clone(&finished);
        let cb_clip = Arc::clone(&clip);
        let mut position = 0.0f64;

        let stream = device
            .build_output_stream(
                &output_config.into(),
                move |data: &mut [f32], _: &cpal::OutputCallbackInfo| {
                    for frame in data.chunks_mut(channels) {
                        let index = position as usize;
                        let value = if index < cb_clip.len() {
                            cb_clip[index]
                        } else {
                            cb_finished.store(true, Ordering::Relaxed);
                            0.0
                        };
                        frame.fill(value);
                        position += step;
                    }
                },
                |err| tracing::error!("output stream error: {}", err),
                None,
            )
            .map_err(|e| Error::Stream(e.to_string()))?;

        stream.play().map_err(|e| Error::Stream(e.to_string()))?;

        // Generous deadline in case the device stops calling back.
        let deadline = Instant::now()
            + Duration::from_secs_f64(clip.len() as f64 / f64::from(SAMPLE_RATE))
            + Duration::from_secs(2);
        while !finished.load(Ordering::Relaxed) && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(20));
        }

        tracing::info!("playback done");
        Ok(())
    }
}

fn find_output_device(host: &Host, name_or_index: &str) -> Result<Device> {
    let devices: Vec<_> = host
        .output_devices()
        .map_err(|e| Error::Stream(e.to_string()))?
        .collect();

    // Try parsing as index first
    if let Ok(index) = name_or_index.parse::<usize>() {
        return devices.get(index).cloned().ok_or_else(|| {
            Error::DeviceNotFound(format!(
                "output device index {} (only {} devices available)",
                index,
                devices.len()
            ))
        });
    }

    for device in &devices {
        if device_name(device).is_ok_and(|n| n == name_or_index) {
            return Ok(device.clone());
        }
    }

    // Case-insensitive partial match, first hit wins
    let search_lower = name_or_index.to_lowercase();
    devices
        .iter()
        .find(|d| device_name(d).is_ok_and(|n| n.to_lowercase().contains(&search_lower)))
        .cloned()
        .ok_or_else(|| {
            Error::DeviceNotFound(format!("no output device matching '{}'", name_or_index))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_playback_accepts_anything() {
        let mut player = NullPlayback;
        assert!(player.play(&[]).is_ok());
        assert!(player.play(b"not a wav").is_ok());
    }

    #[test]
    fn device_player_rejects_malformed_image_before_opening_device() {
        let mut player = DevicePlayer::new();
        let err = player.play(b"garbage").unwrap_err();
        assert!(err.is_format_error());
    }

    #[test]
    fn device_player_skips_empty_clip() {
        let wave = WaveFile::from_samples(&wavegraph_core::SampleBuffer::new());
        let mut player = DevicePlayer::with_device("does-not-matter");
        assert!(player.play(&wave.to_bytes()).is_ok());
    }

    #[test]
    fn list_output_devices_does_not_panic() {
        // Device availability depends on the system
        let _ = list_output_devices();
    }
}
