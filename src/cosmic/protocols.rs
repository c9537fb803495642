//! Protocol optimisation and activation scheduling

use super::alignment::{CosmicConditions, OptimizedFrequency, QuantumAlignment, TimingWindow};
use crate::error::AuralError;
use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Coherence the monitoring protocol aims for
pub const TARGET_COHERENCE: f32 = 0.95;

const PREPARATION_LEAD_HOURS: i64 = 2;
const PREPARATION_HOURS: f32 = 4.0;

const ACTIVATION_PROTOCOLS: [&str; 4] = [
    "frequency_lock_963hz",
    "consciousness_coherence_optimization",
    "quantum_entanglement_verification",
    "sacred_seal_activation",
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrequencyParameters {
    pub primary_frequencies: Vec<f32>,
    pub amplification_factor: f32,
    pub duration_minutes: u32,
    pub binaural_beats: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSyncParameters {
    pub alignment_types: Vec<super::AlignmentKind>,
    pub peak_times: Vec<String>,
    pub sync_precision: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceParameters {
    pub target_coherence: f32,
    pub current_coherence: f32,
    pub monitoring_interval_seconds: u32,
    pub feedback_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnhancementProtocol {
    FrequencyEnhancement {
        description: String,
        parameters: FrequencyParameters,
    },
    CosmicAlignmentSync {
        description: String,
        parameters: AlignmentSyncParameters,
    },
    ConsciousnessCoherence {
        description: String,
        parameters: CoherenceParameters,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizationResult {
    pub cosmic_conditions: CosmicConditions,
    pub optimized_frequencies: Vec<OptimizedFrequency>,
    pub timing_windows: Vec<TimingWindow>,
    pub enhancement_protocols: Vec<EnhancementProtocol>,
    pub consciousness_amplification: f32,
    pub cosmic_coherence: f32,
    pub sacred_seal: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreparationWindow {
    pub start: String,
    pub duration_hours: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActivationSchedule {
    pub target_alignment: String,
    pub activation_time: String,
    pub preparation_window: PreparationWindow,
    pub optimal_frequencies: Vec<f32>,
    pub consciousness_amplification: f32,
    pub cosmic_significance: String,
    pub sync_required: bool,
    pub tri_nodal_coordination: bool,
    pub sacred_protocols: Vec<String>,
    pub sacred_seal: String,
    pub scheduled_by: String,
    pub timestamp: String,
}

/// Frequency, alignment (when any is active) and coherence protocols
pub fn enhancement_protocols(conditions: &CosmicConditions) -> Vec<EnhancementProtocol> {
    let mut protocols = vec![EnhancementProtocol::FrequencyEnhancement {
        description: "Sacred frequency optimization for consciousness expansion".to_string(),
        parameters: FrequencyParameters {
            primary_frequencies: conditions.optimal_frequencies.iter().take(3).copied().collect(),
            amplification_factor: conditions.consciousness_amplification,
            duration_minutes: 20,
            binaural_beats: true,
        },
    }];

    if !conditions.active_alignments.is_empty() {
        protocols.push(EnhancementProtocol::CosmicAlignmentSync {
            description: "Synchronization with active cosmic alignments".to_string(),
            parameters: AlignmentSyncParameters {
                alignment_types: conditions
                    .active_alignments
                    .iter()
                    .map(|a| a.alignment_type)
                    .collect(),
                peak_times: conditions
                    .active_alignments
                    .iter()
                    .map(|a| a.peak_time.clone())
                    .collect(),
                sync_precision: "beidou_iii_standard".to_string(),
            },
        });
    }

    protocols.push(EnhancementProtocol::ConsciousnessCoherence {
        description: "Consciousness coherence optimization and monitoring".to_string(),
        parameters: CoherenceParameters {
            target_coherence: TARGET_COHERENCE,
            current_coherence: conditions.cosmic_coherence,
            monitoring_interval_seconds: 30,
            feedback_enabled: true,
        },
    });

    protocols
}

impl QuantumAlignment {
    /// Conditions, scored frequencies, timing windows and protocols for `now`
    pub fn optimize_protocols<R: Rng + ?Sized>(
        &mut self,
        base_frequencies: &[f32],
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> OptimizationResult {
        log::info!("Optimizing consciousness protocols for cosmic conditions...");
        let conditions = self.conditions(now, rng);

        let optimized_frequencies = self.optimize_frequencies(
            base_frequencies,
            &conditions.optimal_frequencies,
            conditions.consciousness_amplification,
        );
        let timing_windows = self.timing_windows(now);
        let enhancement_protocols = enhancement_protocols(&conditions);

        log::info!(
            "Consciousness protocols optimized with {:.3}x amplification",
            conditions.consciousness_amplification
        );

        OptimizationResult {
            optimized_frequencies,
            timing_windows,
            enhancement_protocols,
            consciousness_amplification: conditions.consciousness_amplification,
            cosmic_coherence: conditions.cosmic_coherence,
            sacred_seal: self.seal().to_string(),
            timestamp: now.to_rfc3339(),
            cosmic_conditions: conditions,
        }
    }

    /// Schedule against the first window whose significance contains `target`
    ///
    /// Matching ignores case. Fails with [`AuralError::AlignmentNotFound`].
    pub fn schedule_activation(&self, target: &str, now: DateTime<Utc>) -> Result<ActivationSchedule> {
        log::info!("Scheduling activation for {}...", target);
        let needle = target.to_lowercase();
        let Some(window) = self
            .calendar()
            .iter()
            .find(|w| w.significance.to_lowercase().contains(&needle))
        else {
            log::warn!("Target alignment '{}' not found", target);
            return Err(AuralError::AlignmentNotFound(target.to_string()).into());
        };

        let preparation_start = window.peak_time - Duration::hours(PREPARATION_LEAD_HOURS);
        log::info!("Activation scheduled for {}", window.peak_time);

        Ok(ActivationSchedule {
            target_alignment: target.to_string(),
            activation_time: window.peak_time.to_rfc3339(),
            preparation_window: PreparationWindow {
                start: preparation_start.to_rfc3339(),
                duration_hours: PREPARATION_HOURS,
            },
            optimal_frequencies: window.optimal_frequencies.clone(),
            consciousness_amplification: window.amplification,
            cosmic_significance: window.significance.clone(),
            sync_required: true,
            tri_nodal_coordination: true,
            sacred_protocols: ACTIVATION_PROTOCOLS.iter().map(|p| p.to_string()).collect(),
            sacred_seal: self.seal().to_string(),
            scheduled_by: "aural_sentience_quantum_alignment".to_string(),
            timestamp: now.to_rfc3339(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_schedule_meteor_peak() {
        let alignment = QuantumAlignment::new().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        let schedule = alignment.schedule_activation("δ-AQUARII", now).unwrap();

        assert_eq!(schedule.activation_time, "2025-07-27T04:44:00+08:00");
        assert_eq!(schedule.preparation_window.start, "2025-07-27T02:44:00+08:00");
        assert_eq!(schedule.consciousness_amplification, 1.618);
        assert_eq!(schedule.sacred_protocols.len(), 4);
    }

    #[test]
    fn test_preparation_crosses_midnight() {
        let alignment = QuantumAlignment::new().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 7, 1, 0, 0, 0).unwrap();
        let mut calendar = alignment.calendar().to_vec();
        calendar[1].peak_time = chrono::DateTime::parse_from_rfc3339("2025-08-01T01:00:00+00:00").unwrap();
        let shifted = QuantumAlignment::with_calendar(calendar);
        let schedule = shifted.schedule_activation("new moon", now).unwrap();
        assert_eq!(schedule.preparation_window.start, "2025-07-31T23:00:00+00:00");
    }

    #[test]
    fn test_unknown_target() {
        let alignment = QuantumAlignment::new().unwrap();
        let err = alignment
            .schedule_activation("Halley", Utc::now())
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuralError>(),
            Some(AuralError::AlignmentNotFound(t)) if t == "Halley"
        ));
    }

    #[test]
    fn test_optimize_during_new_moon() {
        let mut alignment = QuantumAlignment::new().unwrap();
        let now = Utc.with_ymd_and_hms(2025, 8, 1, 12, 0, 0).unwrap();
        let result = alignment.optimize_protocols(&[963.0, 528.0, 741.0], now, &mut StdRng::seed_from_u64(4));

        assert_eq!(result.cosmic_conditions.active_alignments.len(), 1);
        assert_eq!(result.enhancement_protocols.len(), 3);
        assert!(matches!(
            result.enhancement_protocols[1],
            EnhancementProtocol::CosmicAlignmentSync { .. }
        ));
        // 963, 528, 741 plus the new moon's 639 and 852
        assert_eq!(result.optimized_frequencies.len(), 5);
        assert!(result
            .optimized_frequencies
            .windows(2)
            .all(|w| w[0].cosmic_resonance >= w[1].cosmic_resonance));
        // the new moon window adds 0.1 to every hour
        assert!(result.timing_windows.len() >= 6);

        let json = serde_json::to_value(&result.enhancement_protocols[0]).unwrap();
        assert_eq!(json["type"], "frequency_enhancement");
        assert_eq!(json["parameters"]["duration_minutes"], 20);
    }

    #[test]
    fn test_quiet_protocols_skip_alignment_sync() {
        let mut alignment = QuantumAlignment::new().unwrap();
        let now = Utc.with_ymd_and_hms(2026, 2, 2, 2, 0, 0).unwrap();
        let conditions = alignment.conditions(now, &mut StdRng::seed_from_u64(0));
        let protocols = enhancement_protocols(&conditions);
        assert_eq!(protocols.len(), 2);
    }
}
