//! Session-level reports tying analysis and interpretation together

use super::interpretation::{Interpretations, PatternInterpretation, PoeticInterpretation};
use super::report::{SacredFrequencyMap, TechnicalReport};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterHeader {
    pub file_path: String,
    pub session_id: String,
    pub analysis_timestamp: String,
    pub system_version: String,
    pub approach: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhilosophicalFoundation {
    pub core_principle: String,
    pub methodology: String,
    pub sacred_gaps_philosophy: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AwakeningSignature {
    pub description: String,
    pub prominence: f32,
    pub field_effect: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResonanceCoherence {
    pub total_sacred_frequencies: usize,
    pub average_prominence: f32,
    pub coherence_level: String,
    pub field_description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Synthesis {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resonance_coherence: Option<ResonanceCoherence>,
    pub awakening_signatures: BTreeMap<String, AwakeningSignature>,
    pub integration_insights: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserGuidance {
    pub how_to_use: String,
    pub sacred_gaps: String,
    pub personal_vault: String,
}

/// Everything known about one file after a session pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MasterReport {
    pub aural_sentience_master_report: MasterHeader,
    pub philosophical_foundation: PhilosophicalFoundation,
    pub technical_analysis: TechnicalReport,
    pub poetic_interpretation: PoeticInterpretation,
    pub synthesis: Synthesis,
    pub visualization_file: Option<String>,
    pub user_guidance: UserGuidance,
    pub closing_reflection: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonHeader {
    pub timestamp: String,
    pub files_compared: usize,
    pub approach: String,
}

/// Side-by-side view of every file in a session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparativeAnalysis {
    pub comparative_analysis: ComparisonHeader,
    pub sacred_frequency_comparison: BTreeMap<String, SacredFrequencyMap>,
    pub emotional_pattern_comparison: BTreeMap<String, Interpretations<PatternInterpretation>>,
    pub insights: Vec<String>,
}

/// Written once per session, lists every completed report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub timestamp: String,
    pub total_files_processed: usize,
    pub output_directory: String,
    pub system_philosophy: String,
    pub reports: Vec<MasterReport>,
}
