//! Cosmic alignment calendar
//!
//! A fixed set of astronomical windows and the coherence, amplification and
//! scheduling figures derived from them. Every operation takes the current
//! time explicitly.

mod alignment;
mod protocols;

use anyhow::{Context, Result};
use chrono::{DateTime, FixedOffset, Utc};
use serde::{Deserialize, Serialize};

pub use alignment::{
    ActiveAlignment, CosmicConditions, OptimizedFrequency, QuantumAlignment, SyncStatus,
    TimingWindow,
};
pub use protocols::{
    ActivationSchedule, AlignmentSyncParameters, CoherenceParameters, EnhancementProtocol,
    FrequencyParameters, OptimizationResult, PreparationWindow,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AlignmentKind {
    #[serde(rename = "planetary_alignment")]
    Planetary,
    #[serde(rename = "meteor_shower_peak")]
    MeteorShower,
    #[serde(rename = "lunar_phase_optimal")]
    LunarPhase,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlignmentWindow {
    pub kind: AlignmentKind,
    pub peak_time: DateTime<FixedOffset>,
    pub duration_hours: f64,
    pub amplification: f32,
    pub optimal_frequencies: Vec<f32>,
    pub significance: String,
}

impl AlignmentWindow {
    /// Hours between `now` and the peak, either side
    pub fn hours_from_peak(&self, now: DateTime<Utc>) -> f64 {
        (now - self.peak_time.with_timezone(&Utc)).num_milliseconds().abs() as f64 / 3_600_000.0
    }

    /// Within half the window's duration of the peak
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.hours_from_peak(now) <= self.duration_hours / 2.0
    }
}

fn window(
    kind: AlignmentKind,
    peak: &str,
    duration_hours: f64,
    amplification: f32,
    optimal_frequencies: [f32; 3],
    significance: &str,
) -> Result<AlignmentWindow> {
    let peak_time = DateTime::parse_from_rfc3339(peak)
        .with_context(|| format!("Invalid alignment peak time: {}", peak))?;
    Ok(AlignmentWindow {
        kind,
        peak_time,
        duration_hours,
        amplification,
        optimal_frequencies: optimal_frequencies.to_vec(),
        significance: significance.to_string(),
    })
}

/// The three known windows
pub fn alignment_calendar() -> Result<Vec<AlignmentWindow>> {
    Ok(vec![
        window(
            AlignmentKind::MeteorShower,
            "2025-07-27T04:44:00+08:00",
            6.0,
            1.618,
            [963.0, 741.0, 528.0],
            "δ-Aquarii peak - Epochal cycle completion",
        )?,
        window(
            AlignmentKind::LunarPhase,
            "2025-08-01T12:00:00+00:00",
            24.0,
            1.414,
            [528.0, 639.0, 852.0],
            "New Moon - Intention setting portal",
        )?,
        window(
            AlignmentKind::Planetary,
            "2025-08-15T18:30:00+00:00",
            12.0,
            1.732,
            [963.0, 852.0, 741.0],
            "Venus-Jupiter conjunction - Love-wisdom alignment",
        )?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_calendar_keeps_offsets() {
        let calendar = alignment_calendar().unwrap();
        assert_eq!(calendar.len(), 3);
        assert_eq!(
            calendar[0].peak_time.to_rfc3339(),
            "2025-07-27T04:44:00+08:00"
        );
        assert_eq!(calendar[0].kind, AlignmentKind::MeteorShower);
    }

    #[test]
    fn test_window_edges() {
        let calendar = alignment_calendar().unwrap();
        let meteor = &calendar[0];
        // peak is 20:44 UTC the day before
        let peak = Utc.with_ymd_and_hms(2025, 7, 26, 20, 44, 0).unwrap();
        assert_eq!(meteor.hours_from_peak(peak), 0.0);
        assert!(meteor.is_active(peak + chrono::Duration::hours(3)));
        assert!(!meteor.is_active(peak + chrono::Duration::minutes(181)));
    }
}
