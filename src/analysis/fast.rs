//! Fast analyzer
//!
//! Skips stratum-dsp entirely and takes tempo and beats from onset
//! autocorrelation. No key detection.

use super::traits::{fallback_tempo, AudioAnalyzer, FeatureSet};
use crate::audio::AudioBuffer;
use crate::features;
use anyhow::Result;

pub struct FastAnalyzer;

impl FastAnalyzer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FastAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioAnalyzer for FastAnalyzer {
    fn analyze(&self, audio: &AudioBuffer) -> Result<FeatureSet> {
        log::debug!("Fast analysis of {:.1}s of audio", audio.duration_secs());

        let frames = features::extract(&audio.samples, audio.sample_rate);
        let (tempo, beats) = fallback_tempo(&frames, audio.sample_rate);
        Ok(FeatureSet::new(audio, frames, tempo, beats, None))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Short clicks every `period` seconds
    fn click_track(period: f32, seconds: f32, sr: u32) -> Vec<f32> {
        let n = (seconds * sr as f32) as usize;
        let step = (period * sr as f32) as usize;
        let mut out = vec![0.0f32; n];
        let mut pos = 0;
        while pos < n {
            for (i, s) in out.iter_mut().skip(pos).take(200).enumerate() {
                *s = (i as f32 * 0.9).sin() * (1.0 - i as f32 / 200.0);
            }
            pos += step;
        }
        out
    }

    #[test]
    fn test_click_track_tempo() {
        let sr = 22050;
        let audio = AudioBuffer::new(click_track(0.5, 12.0, sr), sr);
        let set = FastAnalyzer::new().analyze(&audio).unwrap();
        assert!((set.tempo - 120.0).abs() < 6.0, "tempo {}", set.tempo);
        assert!(set.beat_times.len() > 10);
        assert!(set.key.is_none());
    }
}
