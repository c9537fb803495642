//! Moments in a stream that are left uninterpreted

use super::frequency::{FrequencyAnalysis, MATCH_TOLERANCE_HZ};
use crate::tables::STREAM_FREQUENCIES;
use serde::{Deserialize, Serialize};

pub const SILENCE_THRESHOLD: f32 = 0.01;
pub const CONVERGENCE_THRESHOLD: f32 = 0.9;
const PORTAL_MIN_COUNT: usize = 3;

pub const REVERENT_MESSAGE: &str = "Here dwells the sacred mystery that transcends analysis";
pub const GAP_INVITATION: &str = "Breathe deeply and allow direct experience to be your teacher";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapKind {
    ProfoundSilence,
    HarmonicConvergence,
    SacredFrequencyPortal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StreamGap {
    pub gap_type: Vec<GapKind>,
    pub mystery_level: f32,
    pub reverent_message: String,
    pub invitation: String,
}

#[derive(Debug, Clone, Default)]
pub struct SacredGapDetector;

impl SacredGapDetector {
    pub fn new() -> Self {
        Self
    }

    /// `None` when nothing about the chunk calls for silence
    pub fn detect(&self, chunk: &[f32], analysis: &FrequencyAnalysis) -> Option<StreamGap> {
        let rms = chunk_rms(chunk);
        let mut gap_type = Vec::new();

        if rms < SILENCE_THRESHOLD {
            gap_type.push(GapKind::ProfoundSilence);
        }

        let max_ratio = analysis
            .harmonic_ratios
            .iter()
            .cloned()
            .fold(None, |acc: Option<f32>, r| Some(acc.map_or(r, |a| a.max(r))));
        if max_ratio.is_some_and(|r| r > CONVERGENCE_THRESHOLD) {
            gap_type.push(GapKind::HarmonicConvergence);
        }

        let sacred_count = analysis
            .prominent_frequencies
            .iter()
            .filter(|&&f| {
                STREAM_FREQUENCIES
                    .iter()
                    .any(|e| (f - e.hz).abs() < MATCH_TOLERANCE_HZ)
            })
            .count();
        if sacred_count >= PORTAL_MIN_COUNT {
            gap_type.push(GapKind::SacredFrequencyPortal);
        }

        if gap_type.is_empty() {
            return None;
        }

        Some(StreamGap {
            gap_type,
            mystery_level: (rms * 10.0 + 0.5).min(1.0),
            reverent_message: REVERENT_MESSAGE.to_string(),
            invitation: GAP_INVITATION.to_string(),
        })
    }
}

fn chunk_rms(chunk: &[f32]) -> f32 {
    if chunk.is_empty() {
        return 0.0;
    }
    (chunk.iter().map(|s| s * s).sum::<f32>() / chunk.len() as f32).sqrt()
}
