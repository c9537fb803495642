//! Resonance lexicon
//!
//! Maps analysis results onto poetic language. The base lexicon and cultural
//! patterns are built in and can be saved to and reloaded from JSON together
//! with the listener's personal mappings.

mod data;
mod interpret;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

pub use data::{CLOSING_REFLECTIONS, SACRED_GAP_MESSAGES};

/// Everything the lexicon knows about one solfeggio frequency
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyEntry {
    pub essence: String,
    pub poetic_qualities: Vec<String>,
    pub emotional_resonances: Vec<String>,
    pub somatic_effects: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityEntry {
    pub poetic_qualities: Vec<String>,
    pub emotional_resonances: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpectralQuality {
    pub high: QualityEntry,
    pub low: QualityEntry,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhythmicArchetype {
    /// Inclusive tempo range in BPM
    pub bpm_range: (f32, f32),
    pub poetic_qualities: Vec<String>,
    pub emotional_resonances: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaseLexicon {
    pub sacred_frequencies: BTreeMap<u32, FrequencyEntry>,
    pub spectral_qualities: BTreeMap<String, SpectralQuality>,
    pub rhythmic_archetypes: BTreeMap<String, RhythmicArchetype>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModalArchetype {
    pub cultural_echoes: Vec<String>,
    pub archetypal_meanings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TexturalArchetype {
    pub poetic_qualities: Vec<String>,
    pub cultural_echoes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CulturalPatterns {
    pub modal_archetypes: BTreeMap<String, ModalArchetype>,
    pub textural_archetypes: BTreeMap<String, TexturalArchetype>,
}

/// A listener's own reading of a moment in a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonalMapping {
    pub timestamp: f32,
    pub description: String,
    pub poetic_interpretation: String,
    pub added_date: String,
}

/// On-disk form of a saved lexicon
#[derive(Debug, Serialize, Deserialize)]
struct LexiconFile {
    #[serde(default)]
    base_lexicon: Option<BaseLexicon>,
    #[serde(default)]
    personal_mappings: BTreeMap<String, Vec<PersonalMapping>>,
    #[serde(default)]
    cultural_patterns: Option<CulturalPatterns>,
    #[serde(default)]
    last_updated: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ResonanceLexicon {
    lexicon: BaseLexicon,
    personal_mappings: BTreeMap<String, Vec<PersonalMapping>>,
    cultural_patterns: CulturalPatterns,
}

impl ResonanceLexicon {
    pub fn new() -> Self {
        Self {
            lexicon: data::base_lexicon(),
            personal_mappings: BTreeMap::new(),
            cultural_patterns: data::cultural_patterns(),
        }
    }

    pub fn base(&self) -> &BaseLexicon {
        &self.lexicon
    }

    pub fn cultural_patterns(&self) -> &CulturalPatterns {
        &self.cultural_patterns
    }

    pub fn personal_mappings(&self, audio_file: &Path) -> &[PersonalMapping] {
        self.personal_mappings
            .get(&file_key(audio_file))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Record a personal reading, keyed by the file's basename
    pub fn add_personal_mapping(
        &mut self,
        audio_file: &Path,
        timestamp: f32,
        description: &str,
        poetic_interpretation: &str,
    ) {
        self.personal_mappings
            .entry(file_key(audio_file))
            .or_default()
            .push(PersonalMapping {
                timestamp,
                description: description.to_string(),
                poetic_interpretation: poetic_interpretation.to_string(),
                added_date: chrono::Local::now().to_rfc3339(),
            });
    }

    pub fn save_lexicon(&self, path: &Path) -> Result<()> {
        let file = LexiconFile {
            base_lexicon: Some(self.lexicon.clone()),
            personal_mappings: self.personal_mappings.clone(),
            cultural_patterns: Some(self.cultural_patterns.clone()),
            last_updated: Some(chrono::Local::now().to_rfc3339()),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(path, json).with_context(|| format!("Failed to write lexicon: {:?}", path))?;
        log::debug!("Lexicon saved to {:?}", path);
        Ok(())
    }

    /// Replace state from a saved file; a missing file changes nothing
    pub fn load_lexicon(&mut self, path: &Path) -> Result<()> {
        if !path.exists() {
            log::debug!("No saved lexicon at {:?}", path);
            return Ok(());
        }

        let text =
            fs::read_to_string(path).with_context(|| format!("Failed to read lexicon: {:?}", path))?;
        let file: LexiconFile = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse lexicon: {:?}", path))?;

        if let Some(base) = file.base_lexicon {
            self.lexicon = base;
        }
        if let Some(patterns) = file.cultural_patterns {
            self.cultural_patterns = patterns;
        }
        self.personal_mappings = file.personal_mappings;
        Ok(())
    }

    /// Names of the rhythmic archetypes whose range contains `bpm`
    pub fn rhythmic_archetypes_for(&self, bpm: f32) -> Vec<String> {
        self.lexicon
            .rhythmic_archetypes
            .iter()
            .filter(|(_, a)| bpm >= a.bpm_range.0 && bpm <= a.bpm_range.1)
            .map(|(name, _)| name.clone())
            .collect()
    }
}

impl Default for ResonanceLexicon {
    fn default() -> Self {
        Self::new()
    }
}

fn file_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_base_lexicon_covers_solfeggio() {
        let lexicon = ResonanceLexicon::new();
        for (hz, meaning) in crate::tables::SOLFEGGIO {
            assert_eq!(lexicon.base().sacred_frequencies[&hz].essence, meaning);
        }
    }

    #[test]
    fn test_rhythmic_archetypes_overlap() {
        let lexicon = ResonanceLexicon::new();
        let names = lexicon.rhythmic_archetypes_for(75.0);
        assert!(names.contains(&"heart_coherence".to_string()));
        assert!(names.contains(&"walking_meditation".to_string()));
        assert!(lexicon.rhythmic_archetypes_for(20.0).is_empty());
    }

    #[test]
    fn test_save_and_reload_personal_mappings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("lexicon.json");

        let mut lexicon = ResonanceLexicon::new();
        lexicon.add_personal_mapping(Path::new("/x/track.mp3"), 30.0, "rain", "the sky letting go");
        lexicon.save_lexicon(&path).unwrap();

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert!(json["base_lexicon"]["sacred_frequencies"]["528"].is_object());
        assert!(json["last_updated"].is_string());

        let mut fresh = ResonanceLexicon::new();
        fresh.load_lexicon(&path).unwrap();
        let mappings = fresh.personal_mappings(Path::new("track.mp3"));
        assert_eq!(mappings.len(), 1);
        assert_eq!(mappings[0].poetic_interpretation, "the sky letting go");
    }

    #[test]
    fn test_load_missing_file_keeps_state() {
        let dir = TempDir::new().unwrap();
        let mut lexicon = ResonanceLexicon::new();
        lexicon.add_personal_mapping(Path::new("a.wav"), 1.0, "x", "y");
        lexicon.load_lexicon(&dir.path().join("nope.json")).unwrap();
        assert_eq!(lexicon.personal_mappings(Path::new("a.wav")).len(), 1);
    }
}
