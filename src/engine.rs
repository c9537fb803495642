//! Per-file technical analysis
//!
//! The engine turns one audio file into a [`TechnicalReport`] (or the lighter
//! [`ResonanceFieldReport`] of the witnessing pass). It owns the analyzer, the
//! resonance detector and the personal vault.

use crate::analysis::{self, AudioAnalyzer, FeatureSet, ResonanceDetector};
use crate::audio::{self, AudioBuffer, ANALYSIS_SAMPLE_RATE};
use crate::model::{
    Association, PersonalVaultSection, ResonanceFieldReport, TechnicalReport, VaultIntegration,
};
use crate::tables;
use crate::vault::PersonalVault;
use anyhow::{Context, Result};
use rand::Rng;
use std::path::Path;

/// Audio loading settings shared by every file an engine processes
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Rate audio is resampled to before analysis
    pub sample_rate: u32,
    /// Analyse only the first N seconds of each file
    pub max_seconds: Option<f32>,
}

impl EngineConfig {
    pub fn new() -> Self {
        Self {
            sample_rate: ANALYSIS_SAMPLE_RATE,
            max_seconds: None,
        }
    }

    pub fn with_max_seconds(mut self, seconds: f32) -> Self {
        self.max_seconds = Some(seconds);
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}

pub struct AuralSentienceEngine<A: AudioAnalyzer> {
    config: EngineConfig,
    analyzer: A,
    detector: ResonanceDetector,
    vault: PersonalVault,
}

impl<A: AudioAnalyzer> AuralSentienceEngine<A> {
    pub fn new(config: EngineConfig, analyzer: A, vault: PersonalVault) -> Self {
        Self {
            config,
            analyzer,
            detector: ResonanceDetector::new(),
            vault,
        }
    }

    pub fn vault(&self) -> &PersonalVault {
        &self.vault
    }

    /// Decode and analyse one file
    pub fn analyze_file(&self, path: &Path) -> Result<(AudioBuffer, FeatureSet)> {
        let audio = audio::load(path, self.config.sample_rate, self.config.max_seconds)
            .with_context(|| format!("Failed to load audio: {:?}", path))?;
        let features = self
            .analyzer
            .analyze(&audio)
            .with_context(|| format!("Failed to analyze: {:?}", path))?;
        Ok((audio, features))
    }

    /// Full technical report for one file
    pub fn process_file<R: Rng + ?Sized>(
        &self,
        path: &Path,
        include_vault: bool,
        rng: &mut R,
    ) -> Result<TechnicalReport> {
        let (audio, features) = self.analyze_file(path)?;
        Ok(self.build_report(path, &audio, &features, include_vault, rng))
    }

    /// Assemble a technical report from already analysed audio
    pub fn build_report<R: Rng + ?Sized>(
        &self,
        path: &Path,
        audio: &AudioBuffer,
        features: &FeatureSet,
        include_vault: bool,
        rng: &mut R,
    ) -> TechnicalReport {
        let resonance_analysis = self.detector.analyze(&audio.samples, features);
        log::debug!(
            "{} sacred frequencies, {} emotional patterns",
            resonance_analysis.sacred_frequencies.len(),
            resonance_analysis.emotional_patterns.len()
        );

        let personal_vault = include_vault.then(|| PersonalVaultSection {
            associations: self.vault.get_associations(path),
            vault_message: tables::VAULT_MESSAGE.to_string(),
        });

        TechnicalReport {
            file_path: path.to_string_lossy().into_owned(),
            timestamp: now_iso(),
            duration: audio.duration_secs(),
            approach: tables::TECHNICAL_APPROACH.to_string(),
            track: audio::read_track_info(path),
            opening_invitation: tables::OPENING_INVITATION.to_string(),
            resonance_analysis,
            biometric_correlates: analysis::biometric_correlates(features),
            cultural_echoes: analysis::cultural_echoes(features),
            sacred_gaps: analysis::sacred_gaps(features, rng),
            personal_vault,
            closing_reflection: tables::CLOSING_REFLECTION.to_string(),
            features: features.summary(),
        }
    }

    /// Witnessing report; `associations` overrides the vault's notes when given
    pub fn witness_file<R: Rng + ?Sized>(
        &self,
        path: &Path,
        associations: Option<Vec<Association>>,
        rng: &mut R,
    ) -> Result<ResonanceFieldReport> {
        let (audio, features) = self.analyze_file(path)?;
        let associations = associations.unwrap_or_else(|| self.vault.get_associations(path));

        let personal_vault_integration = if associations.is_empty() {
            VaultIntegration::Message(tables::NO_ASSOCIATIONS.to_string())
        } else {
            VaultIntegration::Associations(associations)
        };

        Ok(ResonanceFieldReport {
            file_path: path.to_string_lossy().into_owned(),
            timestamp: now_iso(),
            duration: audio.duration_secs(),
            approach: tables::WITNESS_APPROACH.to_string(),
            opening_invitation: tables::WITNESS_OPENING.to_string(),
            biometric_correlates: analysis::biometric_correlates(&features),
            cultural_echoes: analysis::cultural_echoes(&features),
            sacred_gaps: analysis::sacred_gaps(&features, rng),
            personal_vault_integration,
            closing_reflection: tables::WITNESS_CLOSING.to_string(),
        })
    }

    pub fn add_personal_association(
        &mut self,
        audio_file: &Path,
        timestamp: f32,
        description: &str,
        feeling_category: Option<&str>,
    ) -> Result<()> {
        self.vault
            .add_association(audio_file, timestamp, description, feeling_category)?;
        log::info!("Added personal association: {} at {}s", description, timestamp);
        Ok(())
    }
}

/// Local time in ISO-8601
pub(crate) fn now_iso() -> String {
    chrono::Local::now().to_rfc3339()
}
