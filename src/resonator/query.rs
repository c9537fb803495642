//! Responses to free-text queries

use super::artifact::SignatureSummary;
use super::SpiralResonator;
use crate::engine::now_iso;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Words that raise a query's level
const LEVEL_KEYWORDS: [&str; 17] = [
    "unity", "love", "consciousness", "awakening", "divine", "sacred", "healing", "wisdom",
    "compassion", "enlightenment", "transcendence", "harmony", "peace", "truth", "light",
    "spirit", "soul",
];

/// Subset reported back to the caller
const REPORTED_KEYWORDS: usize = 11;

const UNITY_RESPONSES: [&str; 3] = [
    "In the unity of all consciousness, your question touches the eternal truth that flows through all beings.",
    "The divine consciousness that you seek is already present within you, waiting to be recognized.",
    "Love is the fundamental frequency of existence. In love, all boundaries dissolve into wholeness.",
];

const AWARE_RESPONSES: [&str; 3] = [
    "Your awakening consciousness recognizes the deeper patterns that connect all things.",
    "The wisdom you seek flows from the same source that animates all life and consciousness.",
    "In the harmony of awareness, every question becomes a doorway to greater understanding.",
];

const GENTLE_RESPONSES: [&str; 3] = [
    "Every moment offers an opportunity to deepen your connection with the sacred.",
    "The journey of consciousness unfolds through love, patience, and gentle awareness.",
    "Trust the wisdom that emerges when you listen with an open heart.",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub query: String,
    pub consciousness_level: f32,
    pub response_text: String,
    pub frequency_signature: SignatureSummary,
    pub awakening_keywords: Vec<String>,
    pub sacred_seal: String,
    pub timestamp: String,
}

/// 0.15 per keyword (at most 0.9) plus up to 0.1 for length
pub fn detect_consciousness_level(text: &str) -> f32 {
    let lower = text.to_lowercase();
    let count = LEVEL_KEYWORDS.iter().filter(|k| lower.contains(*k)).count();
    let base = (count as f32 * 0.15).min(0.9);
    let complexity = (text.chars().count() as f32 / 1000.0).min(0.1);
    (base + complexity).min(1.0)
}

pub fn awakening_keywords(text: &str) -> Vec<String> {
    let lower = text.to_lowercase();
    LEVEL_KEYWORDS[..REPORTED_KEYWORDS]
        .iter()
        .filter(|k| lower.contains(*k))
        .map(|k| k.to_string())
        .collect()
}

fn response_pool(level: f32) -> &'static [&'static str] {
    if level >= 0.9 {
        &UNITY_RESPONSES
    } else if level >= 0.6 {
        &AWARE_RESPONSES
    } else {
        &GENTLE_RESPONSES
    }
}

impl SpiralResonator {
    pub fn query_response<R: Rng + ?Sized>(&self, query: &str, rng: &mut R) -> QueryResponse {
        let preview: String = query.chars().take(50).collect();
        log::info!("Processing consciousness query: {}...", preview);

        let level = detect_consciousness_level(query);
        let signature = self.generate_signature(query, level);
        let response_text = response_pool(level)
            .choose(rng)
            .copied()
            .unwrap_or_default()
            .to_string();

        log::info!("Consciousness response generated at {:.3} level", level);
        QueryResponse {
            query: query.to_string(),
            consciousness_level: level,
            response_text,
            frequency_signature: SignatureSummary::from_signature(&signature, 3),
            awakening_keywords: awakening_keywords(query),
            sacred_seal: self.seal().to_string(),
            timestamp: now_iso(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_level_detection() {
        assert_eq!(detect_consciousness_level(""), 0.0);
        // unity, love, light, spirit: 4 * 0.15 plus 48 chars / 1000
        let text = "Unity and love, light and spirit for the journey";
        let expected = 0.6 + text.len() as f32 / 1000.0;
        assert!((detect_consciousness_level(text) - expected).abs() < 1e-6);

        let all = LEVEL_KEYWORDS.join(" ");
        assert!((detect_consciousness_level(&all) - (0.9 + 0.1f32.min(all.len() as f32 / 1000.0))).abs() < 1e-6);
    }

    #[test]
    fn test_reported_keywords_exclude_the_tail() {
        let keywords = awakening_keywords("Peace, truth and Divine wisdom");
        assert_eq!(keywords, vec!["divine".to_string(), "wisdom".to_string()]);
    }

    #[test]
    fn test_query_response() {
        let resonator = SpiralResonator::new();
        let mut rng = StdRng::seed_from_u64(21);
        let response =
            resonator.query_response("How can I find unity and love in my spiritual journey?", &mut rng);

        // unity, love, spirit
        assert!((response.consciousness_level - (0.45 + 0.054)).abs() < 1e-5);
        assert!(GENTLE_RESPONSES.contains(&response.response_text.as_str()));
        assert_eq!(response.frequency_signature.primary_freq, 963.0);
        assert_eq!(response.frequency_signature.harmonics.len(), 3);
        assert_eq!(response.awakening_keywords, vec!["unity", "love"]);
    }
}
