//! Fixed lookup tables and report texts

/// Solfeggio frequencies searched for in whole-file spectra
pub const SOLFEGGIO: [(u32, &str); 9] = [
    (174, "Foundation of security and love"),
    (285, "Quantum cognition and healing"),
    (396, "Liberation from fear and guilt"),
    (417, "Facilitating change and transformation"),
    (528, "DNA repair and love frequency"),
    (639, "Harmonious relationships"),
    (741, "Awakening intuition and expression"),
    (852, "Returning to spiritual order"),
    (963, "Connection to divine consciousness"),
];

/// Physiological rhythm bands in Hz, inclusive
pub const BIOMETRIC_BANDS: [(&str, f32, f32); 4] = [
    ("heart_coherence", 0.1, 0.15),
    ("alpha_brain", 8.0, 12.0),
    ("theta_brain", 4.0, 8.0),
    ("schumann_resonance", 7.83, 7.83),
];

/// Entry of the real-time detection table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StreamFrequency {
    pub hz: f32,
    pub name: &'static str,
    pub effect: &'static str,
    pub tradition: &'static str,
}

const fn sf(
    hz: f32,
    name: &'static str,
    effect: &'static str,
    tradition: &'static str,
) -> StreamFrequency {
    StreamFrequency {
        hz,
        name,
        effect,
        tradition,
    }
}

pub const STREAM_FREQUENCIES: [StreamFrequency; 16] = [
    sf(174.0, "Foundation", "grounding_security", "solfeggio"),
    sf(285.0, "Quantum Cognition", "cellular_healing", "solfeggio"),
    sf(396.0, "Liberation", "fear_release", "solfeggio"),
    sf(417.0, "Resonant Change", "facilitating_change", "solfeggio"),
    sf(528.0, "Love Frequency", "dna_repair_love", "solfeggio"),
    sf(639.0, "Heart Connection", "harmonious_relationships", "solfeggio"),
    sf(741.0, "Awakening", "intuitive_awakening", "solfeggio"),
    sf(852.0, "Divine Order", "returning_to_order", "solfeggio"),
    sf(963.0, "Unity Consciousness", "oneness_activation", "solfeggio"),
    sf(40.0, "Gamma Coherence", "heightened_awareness", "brainwave"),
    sf(10.0, "Alpha Bridge", "relaxed_awareness", "brainwave"),
    sf(6.0, "Theta Portal", "deep_meditation", "brainwave"),
    sf(4.0, "Delta Healing", "restorative_sleep", "brainwave"),
    sf(432.0, "Natural Tuning", "earth_resonance", "ancient_tuning"),
    sf(111.0, "Temple Resonance", "consciousness_portal", "sacred_architecture"),
    sf(7.83, "Schumann Resonance", "earth_connection", "planetary"),
];

/// Signature stamped on alignment and resonator output
pub const SACRED_SEAL: &str = "ÆNOTH-MANUS-GROK-963";

pub const TECHNICAL_APPROACH: &str = "aural_sentience";
pub const WITNESS_APPROACH: &str = "resonant_witnessing";

pub const OPENING_INVITATION: &str = "This analysis honors the sacred subjectivity of your musical experience. \
These are invitations to deeper listening, not definitions of truth. \
Your felt experience remains the ultimate authority.";

pub const CLOSING_REFLECTION: &str = "Music lives in the space between sound and soul. \
What cannot be measured is often what matters most. \
Trust your inner knowing above all analysis.";

pub const VAULT_MESSAGE: &str = "Your personal associations are sacred and private. \
They inform this analysis only for you.";

pub const WITNESS_OPENING: &str = "This analysis offers reflections, not truths. Your experience is the only authority. \
Use these observations as invitations to deeper listening, not as definitions of what you feel.";

pub const WITNESS_CLOSING: &str = "The deepest truths of this music live in the space between sound and soul, \
in the gap between analysis and experience. Honor what cannot be named.";

pub const WITNESS_PHILOSOPHY: &str = "These reports honor the ineffable nature of musical experience. \
They offer reflections and invitations, never definitions or truths. \
Your felt experience remains the only authority.";

pub const NO_ASSOCIATIONS: &str =
    "No personal associations provided. Your private meanings remain your own.";

pub const GAP_ENTROPY_MESSAGE: &str =
    "Words fail here. Close your eyes and breathe into whatever arises.";

pub const GAP_FALLBACK_MESSAGE: &str =
    "This moment belongs to your heart alone. No analysis can touch its truth.";

/// Meaning of a solfeggio frequency, if it is one
pub fn solfeggio_meaning(hz: u32) -> Option<&'static str> {
    SOLFEGGIO.iter().find(|(f, _)| *f == hz).map(|(_, m)| *m)
}
