//! Poetic readings of technical reports

use super::data::{self, CLOSING_REFLECTIONS, OPENING_TEMPLATES, SACRED_GAP_MESSAGES};
use super::ResonanceLexicon;
use crate::model::{
    BiometricCorrelates, BiometricPoem, CulturalEchoes, CulturalPoem, EmotionalPattern,
    FrequencyInterpretation, GapInterpretation, Interpretations, PatternInterpretation,
    PoeticInterpretation, SacredFrequencyMap, TechnicalReport,
};
use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::BTreeMap;

pub const INTERPRETATION_APPROACH: &str = "resonance_lexicon_interpretation";

fn pick<'a, R: Rng + ?Sized>(items: &'a [String], rng: &mut R) -> &'a str {
    items.choose(rng).map(String::as_str).unwrap_or_default()
}

fn pick_static<R: Rng + ?Sized>(items: &[&'static str], rng: &mut R) -> &'static str {
    items.choose(rng).copied().unwrap_or_default()
}

impl ResonanceLexicon {
    pub fn interpret_sacred_frequencies<R: Rng + ?Sized>(
        &self,
        hits: &SacredFrequencyMap,
        rng: &mut R,
    ) -> Interpretations<FrequencyInterpretation> {
        if hits.is_empty() {
            return Interpretations::Absent(data::NO_SACRED_FREQUENCIES.to_string());
        }

        let mut out = Vec::new();
        for (&hz, hit) in hits {
            let Some(entry) = self.lexicon.sacred_frequencies.get(&hz) else {
                continue;
            };

            let intensity = if hit.prominence > 5.0 {
                "powerfully"
            } else if hit.prominence > 3.0 {
                "clearly"
            } else {
                "gently"
            };
            let quality = pick(&entry.poetic_qualities, rng);
            let resonance = pick(&entry.emotional_resonances, rng);

            out.push(FrequencyInterpretation {
                frequency: hz,
                essence: entry.essence.clone(),
                poetic_description: format!("At {}Hz, {} emerges {}", hz, quality, intensity),
                emotional_invitation: format!("This frequency invites {}", resonance),
                somatic_suggestion: pick(&entry.somatic_effects, rng).to_string(),
                prominence: hit.prominence,
            });
        }
        Interpretations::Found(out)
    }

    pub fn interpret_emotional_patterns<R: Rng + ?Sized>(
        &self,
        patterns: &BTreeMap<String, EmotionalPattern>,
        rng: &mut R,
    ) -> Interpretations<PatternInterpretation> {
        if patterns.is_empty() {
            return Interpretations::Absent(data::MYSTERIOUS_LANDSCAPE.to_string());
        }

        let out = patterns
            .iter()
            .map(|(name, pattern)| {
                let phrase = data::pattern_phrases(name)
                    .map(|phrases| pick_static(&phrases, rng))
                    .unwrap_or(data::UNNAMED_PATTERN);
                PatternInterpretation {
                    pattern: name.clone(),
                    poetic_description: phrase.to_string(),
                    confidence_level: pattern.confidence,
                    invitation: format!("Allow yourself to feel into {}", phrase.to_lowercase()),
                }
            })
            .collect();
        Interpretations::Found(out)
    }

    pub fn create_sacred_gap_message<R: Rng + ?Sized>(
        &self,
        timestamp: f32,
        rng: &mut R,
    ) -> GapInterpretation {
        let message = pick_static(&SACRED_GAP_MESSAGES, rng);
        GapInterpretation {
            timestamp,
            message: message.to_string(),
            invitation: format!(
                "At {:.1} seconds, pause and {}",
                timestamp,
                message.to_lowercase()
            ),
        }
    }

    /// Full poetic reading of a technical report
    pub fn generate_comprehensive_interpretation<R: Rng + ?Sized>(
        &self,
        report: &TechnicalReport,
        rng: &mut R,
    ) -> PoeticInterpretation {
        let opening = pick_static(&OPENING_TEMPLATES, rng)
            .replace("{description}", data::OPENING_DESCRIPTION);

        let resonance = &report.resonance_analysis;
        let sacred_frequency_interpretations =
            self.interpret_sacred_frequencies(&resonance.sacred_frequencies, rng);
        let emotional_pattern_interpretations =
            self.interpret_emotional_patterns(&resonance.emotional_patterns, rng);
        let sacred_gap_interpretations = report
            .sacred_gaps
            .iter()
            .map(|gap| self.create_sacred_gap_message(gap.timestamp, rng))
            .collect();

        PoeticInterpretation {
            timestamp: chrono::Local::now().to_rfc3339(),
            approach: INTERPRETATION_APPROACH.to_string(),
            opening_invitation: opening,
            sacred_frequency_interpretations,
            emotional_pattern_interpretations,
            sacred_gap_interpretations,
            biometric_poetry: biometric_poetry(&report.biometric_correlates),
            cultural_echoes: cultural_poetry(&report.cultural_echoes),
            rhythmic_archetypes: self.rhythmic_archetypes_for(report.features.tempo_bpm),
            closing_reflection: pick_static(&CLOSING_REFLECTIONS, rng).to_string(),
        }
    }
}

fn biometric_poetry(correlates: &BiometricCorrelates) -> BTreeMap<String, BiometricPoem> {
    correlates
        .entries()
        .iter()
        .map(|(key, description)| {
            let lower = description.to_lowercase();
            let (poetic, invitation) = if lower.contains("heart") {
                (
                    "Your heart may find its rhythm in these frequencies",
                    "Notice how your heartbeat wants to dance with this music",
                )
            } else if lower.contains("breath") {
                (
                    "These sounds invite your breath to find new patterns",
                    "Allow your breathing to be guided by the musical flow",
                )
            } else if lower.contains("nervous") {
                (
                    "Your nervous system may find balance in these frequencies",
                    "Feel how this music invites your whole being to relax or activate",
                )
            } else {
                (
                    "Your body wisdom may respond to these sonic patterns",
                    "Trust what your body knows about this music",
                )
            };
            (
                key.to_string(),
                BiometricPoem {
                    poetic_description: poetic.to_string(),
                    invitation: invitation.to_string(),
                },
            )
        })
        .collect()
}

fn cultural_poetry(echoes: &CulturalEchoes) -> BTreeMap<String, CulturalPoem> {
    echoes
        .entries()
        .iter()
        .map(|(key, description)| {
            let lower = description.to_lowercase();
            let (connection, poetic) = if lower.contains("celebration") {
                (
                    "The spirit of celebration across all cultures",
                    "These frequencies carry the joy of human gathering",
                )
            } else if lower.contains("contemplative") || lower.contains("lament") {
                (
                    "The universal language of contemplation",
                    "These sounds echo the depth of human reflection",
                )
            } else if lower.contains("ritual") || lower.contains("ceremonial") {
                (
                    "The sacred space of ritual and ceremony",
                    "These frequencies create sacred space across time and culture",
                )
            } else {
                (
                    "The universal human experience",
                    "These sounds speak the common language of humanity",
                )
            };
            (
                key.to_string(),
                CulturalPoem {
                    archetypal_connection: connection.to_string(),
                    poetic_description: poetic.to_string(),
                },
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SacredFrequencyHit;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn hit(prominence: f32) -> SacredFrequencyHit {
        SacredFrequencyHit {
            meaning: String::new(),
            strength: 1.0,
            prominence,
        }
    }

    #[test]
    fn test_frequency_intensity_words() {
        let lexicon = ResonanceLexicon::new();
        let mut hits = SacredFrequencyMap::new();
        hits.insert(174, hit(6.0));
        hits.insert(528, hit(4.0));
        hits.insert(963, hit(2.5));

        let mut rng = StdRng::seed_from_u64(11);
        let found = lexicon.interpret_sacred_frequencies(&hits, &mut rng);
        let items = found.items();
        assert_eq!(items.len(), 3);
        assert!(items[0].poetic_description.starts_with("At 174Hz, "));
        assert!(items[0].poetic_description.ends_with("powerfully"));
        assert!(items[1].poetic_description.ends_with("clearly"));
        assert!(items[2].poetic_description.ends_with("gently"));
        assert!(items[1].emotional_invitation.starts_with("This frequency invites "));
    }

    #[test]
    fn test_empty_inputs_give_fixed_text() {
        let lexicon = ResonanceLexicon::new();
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            lexicon.interpret_sacred_frequencies(&SacredFrequencyMap::new(), &mut rng),
            Interpretations::Absent(data::NO_SACRED_FREQUENCIES.to_string())
        );
        assert_eq!(
            lexicon.interpret_emotional_patterns(&BTreeMap::new(), &mut rng),
            Interpretations::Absent(data::MYSTERIOUS_LANDSCAPE.to_string())
        );
    }

    #[test]
    fn test_unknown_pattern_falls_back() {
        let lexicon = ResonanceLexicon::new();
        let mut patterns = BTreeMap::new();
        patterns.insert(
            "quiet_yearning".to_string(),
            EmotionalPattern {
                description: String::new(),
                confidence: 0.4,
            },
        );
        let out = lexicon.interpret_emotional_patterns(&patterns, &mut StdRng::seed_from_u64(2));
        let item = &out.items()[0];
        assert_eq!(item.poetic_description, data::UNNAMED_PATTERN);
        assert_eq!(
            item.invitation,
            "Allow yourself to feel into an emotional landscape beyond simple naming"
        );
        assert_eq!(item.confidence_level, 0.4);
    }

    #[test]
    fn test_gap_invitation_format() {
        let lexicon = ResonanceLexicon::new();
        let gap = lexicon.create_sacred_gap_message(12.345, &mut StdRng::seed_from_u64(5));
        assert!(SACRED_GAP_MESSAGES.contains(&gap.message.as_str()));
        assert_eq!(
            gap.invitation,
            format!("At 12.3 seconds, pause and {}", gap.message.to_lowercase())
        );
    }

    #[test]
    fn test_keyword_dispatch() {
        let correlates = BiometricCorrelates {
            heart_sync: "May synchronize with resting heart rate (60-80 BPM)".to_string(),
            breath_influence: "Steady spectral content may encourage deep, regular breathing"
                .to_string(),
            nervous_system: "Low frequency content may activate parasympathetic (rest) response"
                .to_string(),
            somatic_response: "Sparse onsets may encourage stillness".to_string(),
        };
        let poetry = biometric_poetry(&correlates);
        assert!(poetry["heart_sync"].poetic_description.contains("heart"));
        assert!(poetry["breath_influence"].poetic_description.contains("breath"));
        assert!(poetry["nervous_system"].poetic_description.contains("body wisdom"));

        let echoes = CulturalEchoes {
            tonal_archetype: "Echoes contemplative and lament traditions".to_string(),
            rhythmic_echo: "Tempo suggests ceremonial or processional contexts".to_string(),
            textural_archetype: "Balanced textures".to_string(),
        };
        let poetry = cultural_poetry(&echoes);
        assert_eq!(
            poetry["tonal_archetype"].archetypal_connection,
            "The universal language of contemplation"
        );
        assert_eq!(
            poetry["rhythmic_echo"].archetypal_connection,
            "The sacred space of ritual and ceremony"
        );
        assert_eq!(
            poetry["textural_archetype"].archetypal_connection,
            "The universal human experience"
        );
    }
}
