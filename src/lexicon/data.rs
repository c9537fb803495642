//! Built-in lexicon content

use super::{
    BaseLexicon, CulturalPatterns, FrequencyEntry, ModalArchetype, QualityEntry,
    RhythmicArchetype, SpectralQuality, TexturalArchetype,
};
use std::collections::BTreeMap;

pub const OPENING_TEMPLATES: [&str; 5] = [
    "Listen with your whole being as {description}",
    "Allow yourself to be touched by {description}",
    "Breathe into the space where {description}",
    "Feel how {description} moves through you",
    "Notice what arises when {description}",
];

pub const OPENING_DESCRIPTION: &str = "this musical journey unfolds its sacred mysteries";

pub const SACRED_GAP_MESSAGES: [&str; 7] = [
    "Here, words dissolve into pure feeling",
    "This moment belongs to your heart alone",
    "In this space, analysis yields to mystery",
    "What lives here cannot be named, only felt",
    "Close your eyes and breathe into the ineffable",
    "This is where music becomes prayer",
    "Here, the soul speaks its own language",
];

pub const CLOSING_REFLECTIONS: [&str; 6] = [
    "What cannot be measured often matters most",
    "Your inner knowing is the ultimate authority",
    "Trust what you feel beyond what you think",
    "The deepest truths live in the spaces between notes",
    "Music is the bridge between sound and soul",
    "Honor what cannot be named, only experienced",
];

pub const NO_SACRED_FREQUENCIES: &str = "No sacred frequencies detected in this analysis range";
pub const MYSTERIOUS_LANDSCAPE: &str =
    "The emotional landscape of this music remains beautifully mysterious";
pub const UNNAMED_PATTERN: &str = "an emotional landscape beyond simple naming";

/// Poetic phrases for the emotional patterns the resonance detector emits
pub fn pattern_phrases(pattern: &str) -> Option<[&'static str; 4]> {
    match pattern {
        "transcendent_joy" => Some([
            "joy breaking free from all constraints",
            "happiness that touches the infinite",
            "the sound of liberation made audible",
            "ecstasy dancing with complexity",
        ]),
        "deep_peace" => Some([
            "peace that runs deeper than thought",
            "stillness that holds all movement",
            "the sound of coming home to yourself",
            "tranquility woven into sound",
        ]),
        "mystical_complexity" => Some([
            "complexity that touches the divine",
            "the sound of infinite patterns unfolding",
            "mystery made audible through harmony",
            "the universe composing itself",
        ]),
        _ => None,
    }
}

fn strs(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn frequency(essence: &str, poetic: &[&str], emotional: &[&str], somatic: &[&str]) -> FrequencyEntry {
    FrequencyEntry {
        essence: essence.to_string(),
        poetic_qualities: strs(poetic),
        emotional_resonances: strs(emotional),
        somatic_effects: strs(somatic),
    }
}

fn quality(poetic: &[&str], emotional: &[&str]) -> QualityEntry {
    QualityEntry {
        poetic_qualities: strs(poetic),
        emotional_resonances: strs(emotional),
    }
}

fn rhythm(lo: f32, hi: f32, poetic: &[&str], emotional: &[&str]) -> RhythmicArchetype {
    RhythmicArchetype {
        bpm_range: (lo, hi),
        poetic_qualities: strs(poetic),
        emotional_resonances: strs(emotional),
    }
}

pub fn base_lexicon() -> BaseLexicon {
    let mut sacred_frequencies = BTreeMap::new();
    sacred_frequencies.insert(
        174,
        frequency(
            "Foundation of security and love",
            &[
                "the deep earth hum of belonging",
                "roots finding their way to water",
                "the first breath of safety",
                "ancient mother songs",
            ],
            &[
                "primal security",
                "foundational love",
                "earth connection",
                "maternal embrace",
                "tribal belonging",
                "cellular memory",
            ],
            &[
                "grounding in the pelvis",
                "relaxation of the jaw",
                "deepening of breath",
                "softening of shoulders",
            ],
        ),
    );
    sacred_frequencies.insert(
        285,
        frequency(
            "Quantum cognition and healing",
            &[
                "the frequency of cellular remembrance",
                "quantum whispers between neurons",
                "healing light threading through DNA",
                "the sound of wounds becoming wisdom",
            ],
            &[
                "cognitive clarity",
                "healing integration",
                "quantum awareness",
                "cellular renewal",
                "mental flexibility",
                "neural plasticity",
            ],
            &[
                "tingling in the crown",
                "clarity behind the eyes",
                "expansion in the chest",
                "lightness in the head",
            ],
        ),
    );
    sacred_frequencies.insert(
        396,
        frequency(
            "Liberation from fear and guilt",
            &[
                "the sound of chains dissolving",
                "fear melting like ice in spring",
                "guilt transformed to golden wisdom",
                "the first note of freedom",
            ],
            &[
                "liberation",
                "release",
                "forgiveness",
                "courage",
                "emotional freedom",
                "guilt dissolution",
                "fear transformation",
            ],
            &[
                "release in the solar plexus",
                "opening of the throat",
                "unclenching of fists",
                "expansion of the ribcage",
            ],
        ),
    );
    sacred_frequencies.insert(
        417,
        frequency(
            "Facilitating change and transformation",
            &[
                "the frequency of metamorphosis",
                "change singing itself into being",
                "transformation as sacred dance",
                "the sound of becoming",
            ],
            &[
                "transformation",
                "change facilitation",
                "growth catalyst",
                "evolutionary impulse",
                "creative mutation",
                "adaptive flow",
            ],
            &[
                "energy rising through the spine",
                "activation in the heart",
                "movement in the hips",
                "aliveness in the hands",
            ],
        ),
    );
    sacred_frequencies.insert(
        528,
        frequency(
            "DNA repair and love frequency",
            &[
                "love rewriting the code of existence",
                "DNA singing its perfect song",
                "the frequency of unconditional love",
                "cellular love letters to the future",
            ],
            &[
                "unconditional love",
                "DNA activation",
                "cellular healing",
                "genetic repair",
                "love embodiment",
                "heart coherence",
            ],
            &[
                "warmth in the heart center",
                "tingling in the hands",
                "expansion of the chest",
                "softening around the eyes",
            ],
        ),
    );
    sacred_frequencies.insert(
        639,
        frequency(
            "Harmonious relationships",
            &[
                "the sound of hearts finding harmony",
                "relationship as sacred music",
                "connection weaving itself visible",
                "the frequency of understanding",
            ],
            &[
                "relationship harmony",
                "connection",
                "understanding",
                "empathy",
                "communication",
                "heart coherence",
            ],
            &[
                "opening between the shoulder blades",
                "softening of the face",
                "relaxation of the jaw",
                "warmth in the chest",
            ],
        ),
    );
    sacred_frequencies.insert(
        741,
        frequency(
            "Awakening intuition and expression",
            &[
                "intuition awakening like dawn",
                "the voice finding its true sound",
                "expression flowing like water",
                "the frequency of authentic truth",
            ],
            &[
                "intuitive awakening",
                "authentic expression",
                "truth speaking",
                "creative flow",
                "inner knowing",
                "voice activation",
            ],
            &[
                "vibration in the throat",
                "clarity in the third eye",
                "energy in the vocal cords",
                "opening of the mouth",
            ],
        ),
    );
    sacred_frequencies.insert(
        852,
        frequency(
            "Returning to spiritual order",
            &[
                "the sound of cosmic alignment",
                "spiritual order emerging from chaos",
                "the frequency of divine remembrance",
                "returning to the source song",
            ],
            &[
                "spiritual alignment",
                "cosmic order",
                "divine connection",
                "higher purpose",
                "spiritual awakening",
                "transcendence",
            ],
            &[
                "expansion at the crown",
                "lightness throughout the body",
                "sense of floating",
                "connection to something greater",
            ],
        ),
    );
    sacred_frequencies.insert(
        963,
        frequency(
            "Connection to divine consciousness",
            &[
                "the frequency of pure consciousness",
                "divine connection made audible",
                "the sound of unity with all",
                "consciousness recognizing itself",
            ],
            &[
                "divine connection",
                "unity consciousness",
                "transcendence",
                "spiritual awakening",
                "cosmic awareness",
                "oneness",
            ],
            &[
                "dissolution of body boundaries",
                "sense of infinite expansion",
                "lightness beyond physical",
                "connection to universal field",
            ],
        ),
    );

    let mut spectral_qualities = BTreeMap::new();
    spectral_qualities.insert(
        "brightness".to_string(),
        SpectralQuality {
            high: quality(
                &[
                    "light dancing on water",
                    "crystalline clarity",
                    "the sound of stars singing",
                    "diamond frequencies",
                ],
                &[
                    "clarity",
                    "transcendence",
                    "joy",
                    "awakening",
                    "mental acuity",
                    "spiritual elevation",
                ],
            ),
            low: quality(
                &[
                    "earth's deep wisdom",
                    "the sound of roots",
                    "ancient cave songs",
                    "the frequency of depth",
                ],
                &[
                    "grounding",
                    "introspection",
                    "depth",
                    "mystery",
                    "contemplation",
                    "earth connection",
                ],
            ),
        },
    );
    spectral_qualities.insert(
        "warmth".to_string(),
        SpectralQuality {
            high: quality(
                &[
                    "golden honey frequencies",
                    "the sound of embrace",
                    "warmth wrapping around the heart",
                    "amber resonance",
                ],
                &[
                    "comfort",
                    "love",
                    "safety",
                    "nurturing",
                    "emotional warmth",
                    "heart opening",
                ],
            ),
            low: quality(
                &[
                    "cool mountain air",
                    "the sound of distance",
                    "crystalline detachment",
                    "silver frequencies",
                ],
                &[
                    "detachment",
                    "clarity",
                    "objectivity",
                    "space",
                    "mental clarity",
                    "emotional distance",
                ],
            ),
        },
    );

    let mut rhythmic_archetypes = BTreeMap::new();
    rhythmic_archetypes.insert(
        "slow_ceremonial".to_string(),
        rhythm(
            40.0,
            70.0,
            &[
                "the pace of sacred ritual",
                "time moving like honey",
                "ceremonial gravity",
                "the rhythm of deep breathing",
            ],
            &[
                "reverence",
                "contemplation",
                "sacred space",
                "depth",
                "meditation",
                "spiritual practice",
            ],
        ),
    );
    rhythmic_archetypes.insert(
        "walking_meditation".to_string(),
        rhythm(
            70.0,
            90.0,
            &[
                "the rhythm of mindful steps",
                "walking as prayer",
                "the pace of gentle journey",
                "meditative movement",
            ],
            &[
                "mindfulness",
                "gentle progress",
                "peaceful journey",
                "meditative flow",
                "grounded movement",
            ],
        ),
    );
    rhythmic_archetypes.insert(
        "heart_coherence".to_string(),
        rhythm(
            60.0,
            80.0,
            &[
                "the rhythm of a peaceful heart",
                "coherent pulsing",
                "the beat of love",
                "heart-brain synchrony",
            ],
            &[
                "heart coherence",
                "emotional balance",
                "love",
                "peace",
                "harmony",
                "cardiovascular health",
            ],
        ),
    );
    rhythmic_archetypes.insert(
        "active_engagement".to_string(),
        rhythm(
            90.0,
            120.0,
            &[
                "the rhythm of purposeful action",
                "engaged movement",
                "the beat of focused activity",
                "productive flow",
            ],
            &[
                "engagement",
                "focus",
                "productivity",
                "active flow",
                "purposeful movement",
                "mental clarity",
            ],
        ),
    );
    rhythmic_archetypes.insert(
        "ecstatic_dance".to_string(),
        rhythm(
            120.0,
            160.0,
            &[
                "the rhythm of liberation",
                "ecstatic movement",
                "the beat of celebration",
                "dance as prayer",
            ],
            &[
                "ecstasy",
                "celebration",
                "liberation",
                "joy",
                "physical expression",
                "emotional release",
            ],
        ),
    );
    rhythmic_archetypes.insert(
        "transcendent_trance".to_string(),
        rhythm(
            160.0,
            200.0,
            &[
                "the rhythm of transcendence",
                "trance-inducing pulse",
                "the beat beyond time",
                "consciousness acceleration",
            ],
            &[
                "transcendence",
                "altered states",
                "consciousness expansion",
                "spiritual ecstasy",
                "trance states",
            ],
        ),
    );

    BaseLexicon {
        sacred_frequencies,
        spectral_qualities,
        rhythmic_archetypes,
    }
}

pub fn cultural_patterns() -> CulturalPatterns {
    let modal = |echoes: &[&str], meanings: &[&str]| ModalArchetype {
        cultural_echoes: strs(echoes),
        archetypal_meanings: strs(meanings),
    };
    let textural = |poetic: &[&str], echoes: &[&str]| TexturalArchetype {
        poetic_qualities: strs(poetic),
        cultural_echoes: strs(echoes),
    };

    let mut modal_archetypes = BTreeMap::new();
    modal_archetypes.insert(
        "major_dominant".to_string(),
        modal(
            &[
                "celebration traditions worldwide",
                "victory songs",
                "harvest festivals",
                "community gatherings",
            ],
            &[
                "triumph",
                "celebration",
                "community",
                "abundance",
                "joy",
                "success",
                "completion",
            ],
        ),
    );
    modal_archetypes.insert(
        "minor_dominant".to_string(),
        modal(
            &[
                "lament traditions",
                "funeral rites",
                "contemplative practices",
                "introspective ceremonies",
            ],
            &[
                "grief",
                "introspection",
                "depth",
                "mystery",
                "contemplation",
                "inner journey",
            ],
        ),
    );
    modal_archetypes.insert(
        "modal_ambiguous".to_string(),
        modal(
            &[
                "ritual and ceremonial contexts",
                "shamanic journeys",
                "meditation practices",
                "sacred ceremonies",
            ],
            &[
                "sacred space",
                "ritual consciousness",
                "liminal states",
                "spiritual practice",
                "ceremonial awareness",
            ],
        ),
    );

    let mut textural_archetypes = BTreeMap::new();
    textural_archetypes.insert(
        "sparse_minimal".to_string(),
        textural(
            &[
                "the sound of space itself",
                "silence made audible",
                "minimalist beauty",
                "the art of what's not there",
            ],
            &[
                "zen aesthetics",
                "minimalist traditions",
                "contemplative practices",
                "space as sacred",
            ],
        ),
    );
    textural_archetypes.insert(
        "dense_complex".to_string(),
        textural(
            &[
                "the sound of infinite complexity",
                "fractal music",
                "the universe in a note",
                "complexity as beauty",
            ],
            &[
                "baroque traditions",
                "mathematical music",
                "complex ceremonial music",
                "intellectual traditions",
            ],
        ),
    );
    textural_archetypes.insert(
        "flowing_organic".to_string(),
        textural(
            &[
                "music like water",
                "organic flow",
                "the sound of nature",
                "breathing music",
            ],
            &[
                "nature-based traditions",
                "flowing water ceremonies",
                "organic spiritual practices",
                "earth-based rituals",
            ],
        ),
    );

    CulturalPatterns {
        modal_archetypes,
        textural_archetypes,
    }
}
