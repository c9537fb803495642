//! Sacred frequency, entrainment and emotional pattern detection

use super::traits::FeatureSet;
use crate::features::{stats, stft};
use crate::model::{
    EmotionalPattern, EntrainmentPattern, ResonanceAnalysis, SacredFrequencyHit,
    SacredFrequencyMap,
};
use crate::tables::{BIOMETRIC_BANDS, SOLFEGGIO};
use std::collections::BTreeMap;

/// A bin counts as present when it exceeds this multiple of the mean magnitude
const PRESENCE_FACTOR: f32 = 2.0;

/// Looks for resonance signatures in a file's spectrum and features
#[derive(Debug, Clone, Default)]
pub struct ResonanceDetector;

impl ResonanceDetector {
    pub fn new() -> Self {
        Self
    }

    /// Run every detector
    pub fn analyze(&self, samples: &[f32], features: &FeatureSet) -> ResonanceAnalysis {
        ResonanceAnalysis {
            sacred_frequencies: self.detect_sacred_frequencies(samples, features.sample_rate),
            biometric_entrainment: self.analyze_biometric_entrainment(features),
            emotional_patterns: self.detect_emotional_patterns(features),
        }
    }

    /// Solfeggio frequencies standing out of the whole-signal spectrum
    pub fn detect_sacred_frequencies(&self, samples: &[f32], sample_rate: u32) -> SacredFrequencyMap {
        let mut found = SacredFrequencyMap::new();
        let magnitudes = stft::spectrum_magnitude(samples);
        let n = magnitudes.len();
        if n == 0 {
            return found;
        }

        let mean = stats::mean(&magnitudes);
        if mean <= 0.0 {
            return found;
        }

        for (hz, meaning) in SOLFEGGIO {
            let bin = (hz as f32 * n as f32 / sample_rate as f32).round() as usize;
            if bin > n / 2 {
                continue;
            }
            let strength = magnitudes[bin];
            if strength > mean * PRESENCE_FACTOR {
                found.insert(
                    hz,
                    SacredFrequencyHit {
                        meaning: meaning.to_string(),
                        strength,
                        prominence: strength / mean,
                    },
                );
            }
        }

        log::debug!("Sacred frequencies present: {:?}", found.keys().collect::<Vec<_>>());
        found
    }

    /// Bands whose range contains the tempo expressed in Hz
    pub fn analyze_biometric_entrainment(
        &self,
        features: &FeatureSet,
    ) -> BTreeMap<String, EntrainmentPattern> {
        let mut patterns = BTreeMap::new();
        if features.beat_times.len() < 2 {
            return patterns;
        }

        let intervals: Vec<f32> = features
            .beat_times
            .windows(2)
            .map(|w| w[1] - w[0])
            .collect();
        let mean_interval = stats::mean(&intervals);
        let stability = if mean_interval > 0.0 {
            1.0 - stats::std_dev(&intervals) / mean_interval
        } else {
            0.0
        };

        let tempo_hz = features.tempo / 60.0;
        for (name, lo, hi) in BIOMETRIC_BANDS {
            if (lo..=hi).contains(&tempo_hz) {
                patterns.insert(
                    name.to_string(),
                    EntrainmentPattern {
                        frequency_hz: tempo_hz,
                        stability,
                        entrainment_likelihood: stability * 0.8 + 0.2,
                    },
                );
            }
        }
        patterns
    }

    /// Brightness, warmth, complexity and stability rules
    pub fn detect_emotional_patterns(&self, features: &FeatureSet) -> BTreeMap<String, EmotionalPattern> {
        let mut patterns = BTreeMap::new();

        let brightness = stats::mean(&features.frames.centroid);
        let warmth = 1.0 / (1.0 + brightness / 1000.0);
        let chroma: Vec<f32> = features.chroma_mean().iter().map(|c| c + 1e-8).collect();
        let complexity = stats::entropy(&chroma);
        let stability = if brightness > 0.0 {
            1.0 - stats::std_dev(&features.frames.centroid) / brightness
        } else {
            0.0
        };

        if brightness > 2000.0 && complexity > 2.0 {
            patterns.insert(
                "transcendent_joy".to_string(),
                EmotionalPattern {
                    description: "High brightness and complexity suggest transcendent joy patterns"
                        .to_string(),
                    confidence: ((brightness / 3000.0) * (complexity / 3.0)).min(1.0),
                },
            );
        }

        if warmth > 0.7 && stability > 0.6 {
            patterns.insert(
                "deep_peace".to_string(),
                EmotionalPattern {
                    description: "Warm, stable frequencies suggest deep peace resonance".to_string(),
                    confidence: warmth * stability,
                },
            );
        }

        if complexity > 2.5 {
            patterns.insert(
                "mystical_complexity".to_string(),
                EmotionalPattern {
                    description: "High harmonic complexity suggests mystical or spiritual resonance"
                        .to_string(),
                    confidence: (complexity / 3.0).min(1.0),
                },
            );
        }

        patterns
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::{sine_mix, AudioBuffer};
    use crate::features::{self, FrameFeatures};

    fn feature_set(tempo: f32, beats: Vec<f32>, frames: FrameFeatures) -> FeatureSet {
        let audio = AudioBuffer::new(vec![0.0; 22050], 22050);
        FeatureSet::new(&audio, frames, tempo, beats, None)
    }

    #[test]
    fn test_detects_embedded_solfeggio_tones() {
        let samples = sine_mix(&[(528.0, 0.5), (741.0, 0.3)], 3.0, 22050);
        let found = ResonanceDetector::new().detect_sacred_frequencies(&samples, 22050);
        assert!(found.contains_key(&528));
        assert!(found.contains_key(&741));
        assert!(!found.contains_key(&174));
        assert!(found[&528].prominence > found[&741].prominence);
    }

    #[test]
    fn test_silence_has_no_sacred_frequencies() {
        let found = ResonanceDetector::new().detect_sacred_frequencies(&[0.0; 4096], 22050);
        assert!(found.is_empty());
    }

    #[test]
    fn test_entrainment_needs_matching_band() {
        // 480 BPM is 8 Hz, inside the alpha and theta bands
        let beats: Vec<f32> = (0..20).map(|i| i as f32 * 0.125).collect();
        let set = feature_set(480.0, beats, FrameFeatures::default());
        let patterns = ResonanceDetector::new().analyze_biometric_entrainment(&set);
        assert!(patterns.contains_key("alpha_brain"));
        assert!(patterns.contains_key("theta_brain"));
        let alpha = &patterns["alpha_brain"];
        assert!((alpha.stability - 1.0).abs() < 1e-4);
        assert!((alpha.entrainment_likelihood - 1.0).abs() < 1e-4);

        let ordinary = feature_set(120.0, vec![0.0, 0.5, 1.0], FrameFeatures::default());
        assert!(ResonanceDetector::new()
            .analyze_biometric_entrainment(&ordinary)
            .is_empty());
    }

    #[test]
    fn test_deep_peace_for_low_steady_tone() {
        let samples = sine_mix(&[(220.0, 0.5)], 2.0, 22050);
        let frames = features::extract(&samples, 22050);
        let set = feature_set(0.0, vec![], frames);
        let patterns = ResonanceDetector::new().detect_emotional_patterns(&set);
        assert!(patterns.contains_key("deep_peace"));
        assert!(!patterns.contains_key("transcendent_joy"));
    }
}
