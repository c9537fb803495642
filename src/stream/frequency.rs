//! Per-chunk spectral reading and sacred frequency matching

use crate::features::{stats, stft};
use crate::tables::{StreamFrequency, STREAM_FREQUENCIES};
use serde::{Deserialize, Serialize};

/// Matches within this many Hz of a table entry count
pub const MATCH_TOLERANCE_HZ: f32 = 5.0;

const PROMINENCE_FRACTION: f32 = 0.1;
const MAX_PROMINENT: usize = 10;
const PENTATONIC_RATIOS: [f32; 5] = [1.0, 9.0 / 8.0, 5.0 / 4.0, 3.0 / 2.0, 27.0 / 16.0];
const PENTATONIC_TOLERANCE_HZ: f32 = 10.0;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyAnalysis {
    pub dominant_frequency: f32,
    /// Absolute frequencies of the first bins above 10% of the peak, in bin order
    pub prominent_frequencies: Vec<f32>,
    /// Prominent frequency over dominant, only ratios above 1
    pub harmonic_ratios: Vec<f32>,
    pub spectral_centroid: f32,
}

/// Spectrum of one chunk
pub fn analyze_frequencies(chunk: &[f32], sample_rate: u32) -> FrequencyAnalysis {
    if chunk.is_empty() {
        return FrequencyAnalysis::default();
    }

    let magnitudes = stft::spectrum_magnitude(chunk);
    let n = magnitudes.len();
    let half = &magnitudes[..n / 2];

    let dominant_frequency = stats::argmax(half)
        .map(|k| stft::fft_frequency(k, n, sample_rate).abs())
        .unwrap_or(0.0);

    let peak = magnitudes.iter().cloned().fold(0.0f32, f32::max);
    let threshold = peak * PROMINENCE_FRACTION;
    let prominent_frequencies: Vec<f32> = magnitudes
        .iter()
        .enumerate()
        .filter(|(_, &m)| m > threshold)
        .take(MAX_PROMINENT)
        .map(|(k, _)| stft::fft_frequency(k, n, sample_rate).abs())
        .collect();

    let harmonic_ratios = if dominant_frequency > 0.0 {
        prominent_frequencies
            .iter()
            .filter(|&&f| f > 0.0)
            .map(|f| f / dominant_frequency)
            .filter(|&r| r > 1.0)
            .collect()
    } else {
        Vec::new()
    };

    let total: f32 = half.iter().sum();
    let spectral_centroid = if total > 0.0 {
        half.iter()
            .enumerate()
            .map(|(k, m)| stft::fft_frequency(k, n, sample_rate) * m)
            .sum::<f32>()
            / total
    } else {
        0.0
    };

    FrequencyAnalysis {
        dominant_frequency,
        prominent_frequencies,
        harmonic_ratios,
        spectral_centroid,
    }
}

/// A prominent frequency that landed near a table entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SacredHit {
    pub frequency: f32,
    pub detected_frequency: f32,
    pub name: String,
    pub consciousness_effect: String,
    pub tradition: String,
    /// 1 at an exact match, falling to 0 at the tolerance edge
    pub resonance_strength: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SacredAnalysis {
    pub detected: Vec<SacredHit>,
    pub primary_tradition: String,
}

impl SacredAnalysis {
    /// Effect of the strongest hit
    pub fn correlation(&self) -> String {
        let mut strongest: Option<&SacredHit> = None;
        for hit in &self.detected {
            match strongest {
                Some(s) if hit.resonance_strength <= s.resonance_strength => {}
                _ => strongest = Some(hit),
            }
        }
        strongest
            .map(|h| h.consciousness_effect.clone())
            .unwrap_or_else(|| "neutral_awareness".to_string())
    }

    /// `min(1, total strength / 3)`
    pub fn presence(&self) -> f32 {
        let total: f32 = self.detected.iter().map(|h| h.resonance_strength).sum();
        (total / 3.0).min(1.0)
    }
}

pub fn detect_sacred_frequencies(analysis: &FrequencyAnalysis) -> SacredAnalysis {
    let mut detected = Vec::new();
    for &freq in &analysis.prominent_frequencies {
        for entry in STREAM_FREQUENCIES.iter() {
            let delta = (freq - entry.hz).abs();
            if delta < MATCH_TOLERANCE_HZ {
                detected.push(hit(entry, freq, delta));
            }
        }
    }

    let primary_tradition = primary_tradition(&detected);
    SacredAnalysis {
        detected,
        primary_tradition,
    }
}

fn hit(entry: &StreamFrequency, detected: f32, delta: f32) -> SacredHit {
    SacredHit {
        frequency: entry.hz,
        detected_frequency: detected,
        name: entry.name.to_string(),
        consciousness_effect: entry.effect.to_string(),
        tradition: entry.tradition.to_string(),
        resonance_strength: 1.0 - delta / MATCH_TOLERANCE_HZ,
    }
}

/// Most frequent tradition; the first one seen wins ties
fn primary_tradition(hits: &[SacredHit]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for hit in hits {
        match counts.iter_mut().find(|(t, _)| *t == hit.tradition) {
            Some((_, c)) => *c += 1,
            None => counts.push((&hit.tradition, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (tradition, count) in counts {
        match best {
            Some((_, b)) if count <= b => {}
            _ => best = Some((tradition, count)),
        }
    }
    best.map(|(t, _)| t.to_string())
        .unwrap_or_else(|| "universal".to_string())
}

/// Pentatonic, modal and drone tags
pub fn recognize_cultural_patterns(analysis: &FrequencyAnalysis) -> Vec<String> {
    let mut echoes = Vec::new();
    let dominant = analysis.dominant_frequency;
    let prominent = &analysis.prominent_frequencies;

    for ratio in PENTATONIC_RATIOS {
        let expected = dominant * ratio;
        if prominent
            .iter()
            .any(|f| (f - expected).abs() < PENTATONIC_TOLERANCE_HZ)
        {
            echoes.push("pentatonic_universal".to_string());
        }
    }

    if prominent.iter().any(|&f| f > 200.0 && f < 800.0) {
        echoes.push("modal_ancient_wisdom".to_string());
    }

    let near_dominant = prominent
        .iter()
        .filter(|f| (*f - dominant).abs() < MATCH_TOLERANCE_HZ)
        .count();
    if dominant > 0.0 && near_dominant > 1 {
        echoes.push("drone_meditative_traditions".to_string());
    }

    echoes
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricSuggestion {
    pub heart_rate_guidance: String,
    pub breathing_pattern: String,
    pub brainwave_entrainment: String,
}

impl Default for BiometricSuggestion {
    fn default() -> Self {
        Self {
            heart_rate_guidance: "natural_rhythm".to_string(),
            breathing_pattern: "natural_flow".to_string(),
            brainwave_entrainment: "present_awareness".to_string(),
        }
    }
}

/// Later hits override earlier ones
pub fn biometric_suggestions(sacred: &SacredAnalysis) -> BiometricSuggestion {
    let mut s = BiometricSuggestion::default();
    for hit in &sacred.detected {
        let effect = hit.consciousness_effect.as_str();
        if effect.contains("healing") || effect.contains("love") {
            s.heart_rate_guidance = "coherent_variability".to_string();
            s.breathing_pattern = "heart_coherent_breathing".to_string();
        } else if effect.contains("meditation") || effect.contains("awareness") {
            s.brainwave_entrainment = "alpha_theta_bridge".to_string();
            s.breathing_pattern = "extended_exhale".to_string();
        } else if effect.contains("grounding") || effect.contains("security") {
            s.heart_rate_guidance = "steady_grounding".to_string();
            s.breathing_pattern = "deep_belly_breathing".to_string();
        }
    }
    s
}
