//! Master report assembly and cross-file comparison

use crate::model::{
    AwakeningSignature, ComparativeAnalysis, ComparisonHeader, MasterHeader, MasterReport,
    PhilosophicalFoundation, PoeticInterpretation, ResonanceCoherence, Synthesis,
    TechnicalReport, UserGuidance,
};
use std::collections::BTreeMap;
use std::path::Path;

pub const SYSTEM_VERSION: &str = "1.0.0";
pub const MASTER_APPROACH: &str = "complete_aural_sentience";
pub const COMPARISON_APPROACH: &str = "resonance_field_comparison";

pub const SESSION_PHILOSOPHY: &str = "This aural sentience system honors the sacred subjectivity of musical experience \
while providing technical insights and poetic interpretations that invite deeper listening.";

const CORE_PRINCIPLE: &str = "This system honors the sacred subjectivity of musical experience. \
It offers invitations to deeper listening while protecting the ineffable \
nature of personal musical meaning. Your felt experience is the ultimate truth.";

const SACRED_GAPS_PHILOSOPHY: &str = "Intentional spaces where analysis yields to mystery, acknowledging \
that some experiences are too sacred for interpretation.";

const HOW_TO_USE: &str = "This report offers multiple layers of engagement with your music. \
Begin with the poetic interpretation to feel into the essence, \
then explore the technical analysis for deeper understanding. \
Always trust your own experience above any analysis.";

const GAPS_GUIDANCE: &str = "Pay special attention to the sacred gaps - these are moments \
where the system recognizes the limits of analysis and invites \
pure, unmediated experience.";

const VAULT_GUIDANCE: &str = "Consider adding your own associations to build a personal \
resonance vault that will inform future analyses.";

const MASTER_CLOSING: &str = "Music lives in the space between sound and soul. What cannot be \
measured is often what matters most. This analysis is an invitation \
to deeper listening, not a definition of truth.";

const AWAKENING_FIELD_EFFECT: &str = "The integration of this awakening signature (741Hz) fractally enhances \
existing frequencies, leading to reduced noise, improved phase alignment, \
and the creation of new harmonic pathways. This signature dissolves \
limitations and enables authentic expression, strengthening the overall field.";

const TRANSCENDENT_INSIGHT: &str = "The presence of transcendent patterns suggests this music facilitates \
consciousness expansion and spiritual elevation.";

const MYSTICAL_INSIGHT: &str = "Mystical complexity patterns indicate this music engages higher-order \
consciousness and facilitates deep spiritual contemplation.";

const PAIR_INSIGHT: &str = "Both tracks show unique resonance signatures while sharing common \
elements that suggest complementary energetic fields.";

/// Combine both analyses of one file into its master report
pub fn compile_master_report(
    file_path: &Path,
    session_id: &str,
    technical: TechnicalReport,
    poetic: PoeticInterpretation,
    visualization_file: Option<String>,
) -> MasterReport {
    let synthesis = create_synthesis(&technical, &poetic);

    MasterReport {
        aural_sentience_master_report: MasterHeader {
            file_path: file_path.to_string_lossy().into_owned(),
            session_id: session_id.to_string(),
            analysis_timestamp: chrono::Local::now().to_rfc3339(),
            system_version: SYSTEM_VERSION.to_string(),
            approach: MASTER_APPROACH.to_string(),
        },
        philosophical_foundation: PhilosophicalFoundation {
            core_principle: CORE_PRINCIPLE.to_string(),
            methodology: crate::tables::WITNESS_APPROACH.to_string(),
            sacred_gaps_philosophy: SACRED_GAPS_PHILOSOPHY.to_string(),
        },
        technical_analysis: technical,
        poetic_interpretation: poetic,
        synthesis,
        visualization_file,
        user_guidance: UserGuidance {
            how_to_use: HOW_TO_USE.to_string(),
            sacred_gaps: GAPS_GUIDANCE.to_string(),
            personal_vault: VAULT_GUIDANCE.to_string(),
        },
        closing_reflection: MASTER_CLOSING.to_string(),
    }
}

/// Coherence, awakening signatures and pattern insights
pub fn create_synthesis(technical: &TechnicalReport, poetic: &PoeticInterpretation) -> Synthesis {
    let mut synthesis = Synthesis::default();
    let sacred = &technical.resonance_analysis.sacred_frequencies;

    if !sacred.is_empty() {
        if let Some(hit) = sacred.get(&741) {
            synthesis.awakening_signatures.insert(
                "741Hz_presence".to_string(),
                AwakeningSignature {
                    description: "Awakening signature detected - facilitates authentic expression"
                        .to_string(),
                    prominence: hit.prominence,
                    field_effect: AWAKENING_FIELD_EFFECT.to_string(),
                },
            );
        }

        let count = sacred.len();
        let average = sacred.values().map(|h| h.prominence).sum::<f32>() / count as f32;
        let (level, strength, structure) = if average > 4.0 {
            ("high", "strong", "highly")
        } else if average > 2.0 {
            ("moderate", "moderate", "moderately")
        } else {
            ("emerging", "gentle", "subtly")
        };

        synthesis.resonance_coherence = Some(ResonanceCoherence {
            total_sacred_frequencies: count,
            average_prominence: average,
            coherence_level: level.to_string(),
            field_description: format!(
                "This music contains {} sacred frequencies with {} resonance coherence, \
                 suggesting a {} structured energetic field.",
                count, strength, structure
            ),
        });
    }

    for pattern in poetic.emotional_pattern_interpretations.items() {
        let name = pattern.pattern.to_lowercase();
        if name.contains("transcendent") {
            synthesis.integration_insights.push(TRANSCENDENT_INSIGHT.to_string());
        } else if name.contains("mystical") {
            synthesis.integration_insights.push(MYSTICAL_INSIGHT.to_string());
        }
    }

    synthesis
}

/// Side-by-side sacred frequencies and emotional readings, keyed by file name
pub fn create_comparative_analysis(reports: &[MasterReport]) -> ComparativeAnalysis {
    let mut sacred_frequency_comparison = BTreeMap::new();
    let mut emotional_pattern_comparison = BTreeMap::new();

    for report in reports {
        let name = Path::new(&report.aural_sentience_master_report.file_path)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| report.aural_sentience_master_report.file_path.clone());

        sacred_frequency_comparison.insert(
            name.clone(),
            report
                .technical_analysis
                .resonance_analysis
                .sacred_frequencies
                .clone(),
        );
        emotional_pattern_comparison.insert(
            name,
            report
                .poetic_interpretation
                .emotional_pattern_interpretations
                .clone(),
        );
    }

    let mut insights = Vec::new();
    if reports.len() == 2 {
        insights.push(PAIR_INSIGHT.to_string());
    }

    ComparativeAnalysis {
        comparative_analysis: ComparisonHeader {
            timestamp: chrono::Local::now().to_rfc3339(),
            files_compared: reports.len(),
            approach: COMPARISON_APPROACH.to_string(),
        },
        sacred_frequency_comparison,
        emotional_pattern_comparison,
        insights,
    }
}
