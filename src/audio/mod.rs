//! Audio input
//!
//! Files are decoded once with symphonia, downmixed to mono and resampled to
//! the analysis rate.

mod decode;
mod metadata;

pub use decode::{decode_to_mono, resample_mono};
pub use metadata::read_track_info;

use crate::error::AuralError;
use anyhow::Result;
use std::path::Path;

/// Sample rate every per-file analysis runs at
pub const ANALYSIS_SAMPLE_RATE: u32 = 22050;

/// File extensions picked up when scanning directories
pub const AUDIO_EXTENSIONS: &[&str] = &["wav", "mp3", "flac", "ogg", "m4a", "aac"];

/// Mono audio held in memory
#[derive(Debug, Clone)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

/// Decode `path`, resample to `target_rate` and cap at `max_seconds`
pub fn load(path: &Path, target_rate: u32, max_seconds: Option<f32>) -> Result<AudioBuffer> {
    let (samples, native_rate) = decode_to_mono(path, max_seconds)?;
    if samples.is_empty() {
        return Err(AuralError::EmptyAudio(path.to_path_buf()).into());
    }

    log::debug!(
        "Decoded {} samples ({:.1}s) at {}Hz",
        samples.len(),
        samples.len() as f32 / native_rate as f32,
        native_rate
    );

    let samples = resample_mono(&samples, native_rate, target_rate)?;
    Ok(AudioBuffer::new(samples, target_rate))
}

/// Whether `path` has one of the recognised audio extensions
pub fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| AUDIO_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Synthesize `duration` seconds of summed sine tones
pub fn sine_mix(tones: &[(f32, f32)], duration: f32, sample_rate: u32) -> Vec<f32> {
    let n = (duration * sample_rate as f32) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            tones
                .iter()
                .map(|(freq, amp)| amp * (2.0 * std::f32::consts::PI * freq * t).sin())
                .sum()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration() {
        let buf = AudioBuffer::new(vec![0.0; 44100], 22050);
        assert!((buf.duration_secs() - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_is_audio_file() {
        assert!(is_audio_file(Path::new("song.MP3")));
        assert!(is_audio_file(Path::new("/a/b/c.wav")));
        assert!(!is_audio_file(Path::new("notes.txt")));
        assert!(!is_audio_file(Path::new("noext")));
    }

    #[test]
    fn test_sine_mix_length_and_peak() {
        let s = sine_mix(&[(440.0, 0.5)], 0.5, 22050);
        assert_eq!(s.len(), 11025);
        let peak = s.iter().fold(0.0f32, |m, v| m.max(v.abs()));
        assert!(peak <= 0.5 + 1e-4 && peak > 0.49);
    }
}
