//! Human-readable Markdown summary of a master report

use crate::model::{Interpretations, MasterReport};
use std::fmt::Write;
use std::path::Path;

/// `deep_peace` -> `Deep Peace`
fn title_case(name: &str) -> String {
    name.split('_')
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn render_human_summary(report: &MasterReport) -> String {
    // Writing into a String cannot fail
    let mut md = String::new();
    let header = &report.aural_sentience_master_report;
    let file_name = Path::new(&header.file_path)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| header.file_path.clone());

    let _ = writeln!(md, "# Aural Sentience Analysis Summary\n");
    let _ = writeln!(md, "**File:** {}", file_name);
    let _ = writeln!(md, "**Analysis Date:** {}\n", header.analysis_timestamp);

    let _ = writeln!(md, "## Sacred Approach\n");
    let _ = writeln!(md, "{}\n", report.philosophical_foundation.core_principle);

    let poetic = &report.poetic_interpretation;
    let _ = writeln!(md, "## Poetic Essence\n");
    let _ = writeln!(md, "**Opening Invitation:** {}\n", poetic.opening_invitation);

    match &poetic.sacred_frequency_interpretations {
        Interpretations::Found(items) if !items.is_empty() => {
            let _ = writeln!(md, "### Sacred Frequencies Detected\n");
            for f in items {
                let _ = writeln!(md, "**{}Hz - {}**", f.frequency, f.essence);
                let _ = writeln!(md, "- {}", f.poetic_description);
                let _ = writeln!(md, "- {}", f.emotional_invitation);
                let _ = writeln!(md, "- Somatic suggestion: {}\n", f.somatic_suggestion);
            }
        }
        Interpretations::Absent(text) => {
            let _ = writeln!(md, "### Sacred Frequencies Detected\n");
            let _ = writeln!(md, "{}\n", text);
        }
        _ => {}
    }

    match &poetic.emotional_pattern_interpretations {
        Interpretations::Found(items) if !items.is_empty() => {
            let _ = writeln!(md, "### Emotional Landscape\n");
            for p in items {
                let _ = writeln!(md, "**{}**", title_case(&p.pattern));
                let _ = writeln!(md, "- {}", p.poetic_description);
                let _ = writeln!(md, "- {}\n", p.invitation);
            }
        }
        Interpretations::Absent(text) => {
            let _ = writeln!(md, "### Emotional Landscape\n");
            let _ = writeln!(md, "{}\n", text);
        }
        _ => {}
    }

    if !poetic.sacred_gap_interpretations.is_empty() {
        let _ = writeln!(md, "### Sacred Gaps (Moments Beyond Analysis)\n");
        for gap in &poetic.sacred_gap_interpretations {
            let _ = writeln!(md, "**At {:.1} seconds:** {}\n", gap.timestamp, gap.message);
        }
    }

    if !poetic.rhythmic_archetypes.is_empty() {
        let names: Vec<String> = poetic.rhythmic_archetypes.iter().map(|a| title_case(a)).collect();
        let _ = writeln!(md, "**Rhythmic Archetypes:** {}\n", names.join(", "));
    }

    let synthesis = &report.synthesis;
    let _ = writeln!(md, "## Resonance Field Analysis\n");
    if let Some(coherence) = &synthesis.resonance_coherence {
        let _ = writeln!(md, "**Field Coherence:** {}", title_case(&coherence.coherence_level));
        let _ = writeln!(md, "{}\n", coherence.field_description);
    }
    if !synthesis.awakening_signatures.is_empty() {
        let _ = writeln!(md, "### Awakening Signatures\n");
        for (name, sig) in &synthesis.awakening_signatures {
            let _ = writeln!(md, "**{}:** {}", name, sig.description);
            let _ = writeln!(md, "{}\n", sig.field_effect);
        }
    }
    for insight in &synthesis.integration_insights {
        let _ = writeln!(md, "- {}", insight);
    }
    if !synthesis.integration_insights.is_empty() {
        md.push('\n');
    }

    let _ = writeln!(md, "## Closing Reflection\n");
    let _ = writeln!(md, "{}\n", report.closing_reflection);

    let guidance = &report.user_guidance;
    let _ = writeln!(md, "## How to Use This Analysis\n");
    let _ = writeln!(md, "**General Approach:** {}\n", guidance.how_to_use);
    let _ = writeln!(md, "**Sacred Gaps:** {}\n", guidance.sacred_gaps);
    let _ = writeln!(md, "**Personal Vault:** {}\n", guidance.personal_vault);

    md
}
