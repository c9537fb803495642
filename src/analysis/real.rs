//! stratum-dsp backed analyzer
//!
//! Per-frame features come from the in-house extractor; tempo, beats and key
//! come from stratum-dsp, with the autocorrelation estimate as fallback.

use super::stratum::analyze_samples;
use super::traits::{fallback_tempo, AudioAnalyzer, FeatureSet};
use crate::audio::AudioBuffer;
use crate::features;
use anyhow::Result;

/// Analyzer using stratum-dsp for tempo and key
pub struct RealAnalyzer {
    /// Whether to fall back to the in-house tempo estimate on stratum errors
    skip_on_error: bool,
    /// Minimum BPM for range folding (0 disables)
    min_bpm: f32,
    /// Maximum BPM for range folding (0 disables)
    max_bpm: f32,
}

impl RealAnalyzer {
    pub fn new() -> Self {
        Self {
            skip_on_error: true,
            min_bpm: 0.0,
            max_bpm: 0.0,
        }
    }

    /// Fold detected tempo into a BPM range
    pub fn with_bpm_range(mut self, min: f32, max: f32) -> Self {
        self.min_bpm = min;
        self.max_bpm = max;
        self
    }

    /// Create analyzer that fails on tempo detection errors
    pub fn strict() -> Self {
        Self {
            skip_on_error: false,
            ..Self::new()
        }
    }
}

impl Default for RealAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioAnalyzer for RealAnalyzer {
    fn analyze(&self, audio: &AudioBuffer) -> Result<FeatureSet> {
        log::debug!(
            "Analyzing {:.1}s of audio at {}Hz",
            audio.duration_secs(),
            audio.sample_rate
        );

        let frames = features::extract(&audio.samples, audio.sample_rate);

        match analyze_samples(&audio.samples, audio.sample_rate, self.min_bpm, self.max_bpm) {
            Ok(result) => {
                log::info!(
                    "Tempo detected: {:.1} BPM, key {}",
                    result.bpm,
                    result.key.map(|k| k.name()).unwrap_or("unknown")
                );
                let beats = if result.beats.is_empty() {
                    fallback_tempo(&frames, audio.sample_rate).1
                } else {
                    result.beats
                };
                Ok(FeatureSet::new(audio, frames, result.bpm, beats, result.key))
            }
            Err(e) => {
                if !self.skip_on_error {
                    return Err(e);
                }
                log::warn!("stratum-dsp analysis failed, using onset autocorrelation: {}", e);
                let (tempo, beats) = fallback_tempo(&frames, audio.sample_rate);
                Ok(FeatureSet::new(audio, frames, tempo, beats, None))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_audio_falls_back() {
        let audio = AudioBuffer::new(vec![0.0; 1000], 22050);
        let set = RealAnalyzer::new().analyze(&audio).unwrap();
        assert_eq!(set.tempo, 0.0);
        assert!(set.key.is_none());
    }

    #[test]
    fn test_strict_propagates() {
        let audio = AudioBuffer::new(vec![0.0; 1000], 22050);
        assert!(RealAnalyzer::strict().analyze(&audio).is_err());
    }
}
