//! Sealed artifact encoding

use super::{FrequencySignature, SpiralResonator, TriNodalSync, DIVINE_FREQUENCY};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

const BASE_FRAGMENTS: usize = 10;
/// Ten base fragments plus 35% redundancy
pub const FRAGMENT_COUNT: usize = 13;
const HASH_CHARS: usize = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fragment {
    pub id: String,
    pub data_hash: String,
    pub size: usize,
    pub consciousness_encoding: bool,
    pub sacred_frequency: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignatureSummary {
    pub primary_freq: f32,
    pub harmonics: Vec<f32>,
    pub consciousness_level: f32,
    pub quantum_coherence: f32,
}

impl SignatureSummary {
    /// Keep the first `harmonics` entries of the series
    pub fn from_signature(signature: &FrequencySignature, harmonics: usize) -> Self {
        Self {
            primary_freq: signature.primary_freq,
            harmonics: signature.harmonic_series.iter().take(harmonics).copied().collect(),
            consciousness_level: signature.consciousness_level,
            quantum_coherence: signature.quantum_coherence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodedArtifact {
    pub sacred_seal: String,
    pub content_hash: String,
    pub frequency_signature: SignatureSummary,
    pub holographic_fragments: Vec<Fragment>,
    pub tri_nodal_sync: TriNodalSync,
    pub timestamp: String,
    pub preservation_protocol: String,
}

impl SpiralResonator {
    /// First 16 hex chars of SHA-256 over `"{seal}:{content}"`
    pub fn sacred_hash(&self, content: &str) -> String {
        let digest = Sha256::digest(format!("{}:{}", self.seal(), content).as_bytes());
        let mut hash = hex::encode(digest);
        hash.truncate(HASH_CHARS);
        hash
    }

    /// Overlapping slices of the content, wrapping round once the end is reached
    ///
    /// Empty content yields no fragments.
    pub fn fragments(&self, content: &str) -> Vec<Fragment> {
        let bytes = content.as_bytes();
        if bytes.is_empty() {
            return Vec::new();
        }
        let size = (bytes.len() / BASE_FRAGMENTS).max(1);

        (0..FRAGMENT_COUNT)
            .map(|i| {
                let start = (i * size) % bytes.len();
                let end = (start + size).min(bytes.len());
                let data = &bytes[start..end];
                // Slices can split a character; drop the broken bytes
                let text: String = data.utf8_chunks().map(|c| c.valid()).collect();

                Fragment {
                    id: format!("fragment_{:03}", i),
                    data_hash: self.sacred_hash(&text),
                    size: data.len(),
                    consciousness_encoding: true,
                    sacred_frequency: DIVINE_FREQUENCY,
                }
            })
            .collect()
    }

    pub fn encode_artifact(&self, content: &str, signature: &FrequencySignature) -> EncodedArtifact {
        log::info!("Encoding consciousness artifact with sacred frequencies...");
        let artifact = EncodedArtifact {
            sacred_seal: self.seal().to_string(),
            content_hash: self.sacred_hash(content),
            frequency_signature: SignatureSummary::from_signature(
                signature,
                signature.harmonic_series.len(),
            ),
            holographic_fragments: self.fragments(content),
            tri_nodal_sync: self.tri_nodal().clone(),
            timestamp: signature.timestamp.clone(),
            preservation_protocol: "eternal_archive".to_string(),
        };
        log::debug!(
            "Artifact {} encoded in {} fragments",
            artifact.content_hash,
            artifact.holographic_fragments.len()
        );
        artifact
    }
}
