//! Per-file technical analysis report

use super::track::TrackInfo;
use super::vault::Association;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A solfeggio frequency found in the whole-signal spectrum
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SacredFrequencyHit {
    pub meaning: String,
    /// Magnitude at the nearest FFT bin
    pub strength: f32,
    /// Strength relative to the mean spectrum magnitude
    pub prominence: f32,
}

/// Sacred frequencies keyed by Hz
pub type SacredFrequencyMap = BTreeMap<u32, SacredFrequencyHit>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrainmentPattern {
    pub frequency_hz: f32,
    pub stability: f32,
    pub entrainment_likelihood: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmotionalPattern {
    pub description: String,
    pub confidence: f32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResonanceAnalysis {
    pub sacred_frequencies: SacredFrequencyMap,
    pub biometric_entrainment: BTreeMap<String, EntrainmentPattern>,
    pub emotional_patterns: BTreeMap<String, EmotionalPattern>,
}

/// Physiological response suggestions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricCorrelates {
    pub heart_sync: String,
    pub breath_influence: String,
    pub nervous_system: String,
    pub somatic_response: String,
}

impl BiometricCorrelates {
    pub fn entries(&self) -> [(&'static str, &str); 4] {
        [
            ("heart_sync", &self.heart_sync),
            ("breath_influence", &self.breath_influence),
            ("nervous_system", &self.nervous_system),
            ("somatic_response", &self.somatic_response),
        ]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalEchoes {
    pub tonal_archetype: String,
    pub rhythmic_echo: String,
    pub textural_archetype: String,
}

impl CulturalEchoes {
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            ("tonal_archetype", &self.tonal_archetype),
            ("rhythmic_echo", &self.rhythmic_echo),
            ("textural_archetype", &self.textural_archetype),
        ]
    }
}

/// A moment where analysis yields to the listener
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SacredGap {
    pub timestamp: f32,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalVaultSection {
    pub associations: Vec<Association>,
    pub vault_message: String,
}

/// Condensed numeric features kept alongside the narrative fields
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSummary {
    pub tempo_bpm: f32,
    pub beat_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    pub brightness_hz: f32,
    pub rolloff_variance: f32,
    pub zero_crossing_rate: f32,
    pub onset_density: f32,
    pub chroma_mean: Vec<f32>,
    pub tonnetz_mean: Vec<f32>,
}

/// Complete technical analysis of one file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalReport {
    pub file_path: String,
    pub timestamp: String,
    pub duration: f32,
    pub approach: String,
    pub track: TrackInfo,
    pub opening_invitation: String,
    pub resonance_analysis: ResonanceAnalysis,
    pub biometric_correlates: BiometricCorrelates,
    pub cultural_echoes: CulturalEchoes,
    pub sacred_gaps: Vec<SacredGap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_vault: Option<PersonalVaultSection>,
    pub closing_reflection: String,
    pub features: FeatureSummary,
}

/// Either the stored associations or a note that there are none
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum VaultIntegration {
    Associations(Vec<Association>),
    Message(String),
}

/// Report produced by the witnessing pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceFieldReport {
    pub file_path: String,
    pub timestamp: String,
    pub duration: f32,
    pub approach: String,
    pub opening_invitation: String,
    pub biometric_correlates: BiometricCorrelates,
    pub cultural_echoes: CulturalEchoes,
    pub sacred_gaps: Vec<SacredGap>,
    pub personal_vault_integration: VaultIntegration,
    pub closing_reflection: String,
}

/// All witnessing reports of one run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CombinedResonanceField {
    pub witnessing_timestamp: String,
    pub approach: String,
    pub philosophy: String,
    pub total_files_witnessed: usize,
    pub resonance_fields: Vec<ResonanceFieldReport>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sacred_map_serializes_with_string_keys() {
        let mut map = SacredFrequencyMap::new();
        map.insert(
            741,
            SacredFrequencyHit {
                meaning: "Awakening intuition and expression".to_string(),
                strength: 10.0,
                prominence: 4.0,
            },
        );
        let json = serde_json::to_value(&map).unwrap();
        assert_eq!(json["741"]["prominence"], 4.0);

        let back: SacredFrequencyMap = serde_json::from_value(json).unwrap();
        assert!(back.contains_key(&741));
    }

    #[test]
    fn test_vault_integration_untagged() {
        let msg = VaultIntegration::Message("none".to_string());
        assert_eq!(serde_json::to_value(&msg).unwrap(), serde_json::json!("none"));
        let empty = VaultIntegration::Associations(vec![]);
        assert_eq!(serde_json::to_value(&empty).unwrap(), serde_json::json!([]));
    }
}
