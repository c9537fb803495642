//! Poetic interpretation produced by the lexicon

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A list of interpretations, or a sentence saying there was nothing to read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Interpretations<T> {
    Found(Vec<T>),
    Absent(String),
}

impl<T> Interpretations<T> {
    /// Entries, empty when absent
    pub fn items(&self) -> &[T] {
        match self {
            Interpretations::Found(items) => items,
            Interpretations::Absent(_) => &[],
        }
    }
}

impl<T> Default for Interpretations<T> {
    fn default() -> Self {
        Interpretations::Found(Vec::new())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyInterpretation {
    pub frequency: u32,
    pub essence: String,
    pub poetic_description: String,
    pub emotional_invitation: String,
    pub somatic_suggestion: String,
    pub prominence: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternInterpretation {
    pub pattern: String,
    pub poetic_description: String,
    pub confidence_level: f32,
    pub invitation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GapInterpretation {
    pub timestamp: f32,
    pub message: String,
    pub invitation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BiometricPoem {
    pub poetic_description: String,
    pub invitation: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalPoem {
    pub archetypal_connection: String,
    pub poetic_description: String,
}

/// Full lexicon reading of one technical report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoeticInterpretation {
    pub timestamp: String,
    pub approach: String,
    pub opening_invitation: String,
    pub sacred_frequency_interpretations: Interpretations<FrequencyInterpretation>,
    pub emotional_pattern_interpretations: Interpretations<PatternInterpretation>,
    pub sacred_gap_interpretations: Vec<GapInterpretation>,
    pub biometric_poetry: BTreeMap<String, BiometricPoem>,
    pub cultural_echoes: BTreeMap<String, CulturalPoem>,
    pub rhythmic_archetypes: Vec<String>,
    pub closing_reflection: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_interpretations_serialize_as_text() {
        let none: Interpretations<PatternInterpretation> =
            Interpretations::Absent("quiet".to_string());
        assert_eq!(serde_json::to_value(&none).unwrap(), serde_json::json!("quiet"));
        assert!(none.items().is_empty());
    }

    #[test]
    fn test_found_interpretations_deserialize_from_list() {
        let json = serde_json::json!([{
            "timestamp": 1.5,
            "message": "Here, words dissolve into pure feeling",
            "invitation": "At 1.5 seconds, pause and here, words dissolve into pure feeling"
        }]);
        let parsed: Interpretations<GapInterpretation> = serde_json::from_value(json).unwrap();
        assert_eq!(parsed.items().len(), 1);
    }
}
