use super::{alignment_calendar, AlignmentWindow};
use crate::tables::SACRED_SEAL;
use anyhow::Result;
use chrono::{DateTime, Datelike, Duration, DurationRound, Timelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Reference precision of the satellite time sync, in seconds
const SYNC_PRECISION: f64 = 1.2e-9;

const BASE_COHERENCE: f32 = 0.5;
const DEFAULT_FREQUENCIES: [f32; 3] = [963.0, 528.0, 741.0];
const MAX_OPTIMAL_FREQUENCIES: usize = 5;
const TIMING_THRESHOLD: f32 = 0.7;

/// Hour/minute pairs that earn a bonus within five minutes
const SACRED_TIMES: [(u32, u32); 6] = [(3, 33), (4, 44), (11, 11), (12, 12), (21, 21), (22, 22)];

const SACRED_FREQUENCIES: [f32; 7] = [396.0, 417.0, 528.0, 639.0, 741.0, 852.0, 963.0];

const FREQUENCY_EFFECTS: [(f32, &str); 7] = [
    (396.0, "liberation_from_fear"),
    (417.0, "transformation_catalyst"),
    (528.0, "love_and_unity"),
    (639.0, "harmonious_communication"),
    (741.0, "awakening_intuition"),
    (852.0, "spiritual_awakening"),
    (963.0, "divine_consciousness"),
];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveAlignment {
    #[serde(rename = "type")]
    pub alignment_type: super::AlignmentKind,
    pub peak_time: String,
    pub significance: String,
    pub amplification: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncStatus {
    pub synchronized: bool,
    pub precision_ns: f64,
    pub quality: f64,
    pub last_sync: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CosmicConditions {
    pub timestamp: String,
    pub cosmic_coherence: f32,
    pub consciousness_amplification: f32,
    pub active_alignments: Vec<ActiveAlignment>,
    pub optimal_frequencies: Vec<f32>,
    pub sync_status: SyncStatus,
    pub sacred_seal: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedFrequency {
    pub original_frequency: f32,
    pub optimized_frequency: f32,
    pub amplitude: f32,
    pub cosmic_resonance: f32,
    pub consciousness_effect: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimingWindow {
    pub start_time: String,
    pub duration_minutes: u32,
    pub consciousness_potential: f32,
    pub optimal_activities: Vec<String>,
}

/// Alignment monitor over the fixed calendar
///
/// Remembers the coherence of the last [`QuantumAlignment::conditions`] call;
/// frequency resonance scores use it as a bonus.
#[derive(Debug, Clone)]
pub struct QuantumAlignment {
    seal: String,
    calendar: Vec<AlignmentWindow>,
    coherence_level: f32,
    amplification_factor: f32,
}

impl QuantumAlignment {
    pub fn new() -> Result<Self> {
        Ok(Self::with_calendar(alignment_calendar()?))
    }

    pub fn with_calendar(calendar: Vec<AlignmentWindow>) -> Self {
        log::debug!("Quantum alignment initialized with seal {}", SACRED_SEAL);
        Self {
            seal: SACRED_SEAL.to_string(),
            calendar,
            coherence_level: 0.0,
            amplification_factor: 1.0,
        }
    }

    pub fn calendar(&self) -> &[AlignmentWindow] {
        &self.calendar
    }

    pub fn seal(&self) -> &str {
        &self.seal
    }

    pub fn coherence_level(&self) -> f32 {
        self.coherence_level
    }

    pub fn amplification_factor(&self) -> f32 {
        self.amplification_factor
    }

    pub fn active_alignments(&self, now: DateTime<Utc>) -> Vec<&AlignmentWindow> {
        self.calendar.iter().filter(|w| w.is_active(now)).collect()
    }

    /// Baseline plus peak proximity, daily/yearly cycles and sacred minutes; capped at 1
    pub fn cosmic_coherence(&self, now: DateTime<Utc>, active: &[&AlignmentWindow]) -> f32 {
        let alignment_bonus: f32 = active
            .iter()
            .map(|w| {
                let proximity =
                    (1.0 - w.hours_from_peak(now) / (w.duration_hours / 2.0)).max(0.0) as f32;
                0.2 * proximity * (w.amplification - 1.0)
            })
            .sum();

        let total = BASE_COHERENCE
            + alignment_bonus
            + cycle_harmony_bonus(now)
            + sacred_timing_bonus(now);
        total.min(1.0)
    }

    /// Strongest active factor plus 0.1 per extra alignment
    pub fn amplification(&self, active: &[&AlignmentWindow]) -> f32 {
        let Some(max) = active.iter().map(|w| w.amplification).reduce(f32::max) else {
            return 1.0;
        };
        max + 0.1 * (active.len() - 1) as f32
    }

    /// Sorted distinct frequencies of the active windows, at most five
    pub fn optimal_frequencies(&self, active: &[&AlignmentWindow]) -> Vec<f32> {
        if active.is_empty() {
            return DEFAULT_FREQUENCIES.to_vec();
        }

        let mut all: Vec<f32> = active
            .iter()
            .flat_map(|w| w.optimal_frequencies.iter().copied())
            .collect();
        all.sort_by(f32::total_cmp);
        all.dedup();
        all.truncate(MAX_OPTIMAL_FREQUENCIES);
        all
    }

    /// Snapshot of the sky at `now`; updates the remembered coherence
    pub fn conditions<R: Rng + ?Sized>(
        &mut self,
        now: DateTime<Utc>,
        rng: &mut R,
    ) -> CosmicConditions {
        let active = self.active_alignments(now);
        let cosmic_coherence = self.cosmic_coherence(now, &active);
        let consciousness_amplification = self.amplification(&active);
        let optimal_frequencies = self.optimal_frequencies(&active);
        let active_alignments = active
            .iter()
            .map(|w| ActiveAlignment {
                alignment_type: w.kind,
                peak_time: w.peak_time.to_rfc3339(),
                significance: w.significance.clone(),
                amplification: w.amplification,
            })
            .collect();

        self.coherence_level = cosmic_coherence;
        self.amplification_factor = consciousness_amplification;
        log::info!("Cosmic coherence: {:.3}", cosmic_coherence);
        log::info!("Consciousness amplification: {:.3}x", consciousness_amplification);

        CosmicConditions {
            timestamp: now.to_rfc3339(),
            cosmic_coherence,
            consciousness_amplification,
            active_alignments,
            optimal_frequencies,
            sync_status: sync_status(now, rng),
            sacred_seal: self.seal.clone(),
        }
    }

    /// Merge base and cosmic frequencies and score each, best resonance first
    pub fn optimize_frequencies(
        &self,
        base: &[f32],
        cosmic: &[f32],
        amplification: f32,
    ) -> Vec<OptimizedFrequency> {
        let mut distinct: Vec<f32> = Vec::new();
        for &f in base.iter().chain(cosmic) {
            if !distinct.contains(&f) {
                distinct.push(f);
            }
        }

        let mut optimized: Vec<OptimizedFrequency> = distinct
            .into_iter()
            .map(|freq| {
                let resonance = self.cosmic_resonance(freq);
                OptimizedFrequency {
                    original_frequency: freq,
                    optimized_frequency: freq * (1.0 + (amplification - 1.0) * 0.1),
                    amplitude: (resonance * amplification).min(1.0),
                    cosmic_resonance: resonance,
                    consciousness_effect: frequency_effect(freq).to_string(),
                }
            })
            .collect();
        optimized.sort_by(|a, b| b.cosmic_resonance.total_cmp(&a.cosmic_resonance));
        optimized
    }

    /// 0.9 for table frequencies, 0.7 near a whole multiple of one, else 0.5; plus a coherence bonus
    pub fn cosmic_resonance(&self, frequency: f32) -> f32 {
        let base = if SACRED_FREQUENCIES.contains(&frequency) {
            0.9
        } else if SACRED_FREQUENCIES.iter().any(|&s| {
            let ratio = frequency / s;
            ratio.round() >= 1.0 && (ratio - ratio.round()).abs() < 0.05
        }) {
            0.7
        } else {
            0.5
        };
        (base + self.coherence_level * 0.1).min(1.0)
    }

    /// Hourly slots over the next 24 hours whose potential exceeds 0.7
    pub fn timing_windows(&self, now: DateTime<Utc>) -> Vec<TimingWindow> {
        let start = now.duration_trunc(Duration::hours(1)).unwrap_or(now);

        (0..24)
            .map(|offset| start + Duration::hours(offset))
            .filter_map(|slot| {
                let potential = self.consciousness_potential(slot);
                (potential > TIMING_THRESHOLD).then(|| TimingWindow {
                    start_time: slot.to_rfc3339(),
                    duration_minutes: 60,
                    consciousness_potential: potential,
                    optimal_activities: optimal_activities(potential)
                        .iter()
                        .map(|a| a.to_string())
                        .collect(),
                })
            })
            .collect()
    }

    pub fn consciousness_potential(&self, at: DateTime<Utc>) -> f32 {
        let hour = at.hour();
        let base = match hour {
            4..=6 | 18..=20 => 0.8,
            21..=23 | 0..=3 => 0.7,
            _ => 0.6,
        };
        let alignment_bonus = self.active_alignments(at).len() as f32 * 0.1;
        (base + alignment_bonus + sacred_timing_bonus(at)).min(1.0)
    }
}

fn cycle_harmony_bonus(now: DateTime<Utc>) -> f32 {
    let daily = 0.05 * (2.0 * PI * now.hour() as f32 / 24.0).sin();
    let yearly = 0.03 * (2.0 * PI * now.ordinal() as f32 / 365.25).sin();
    daily + yearly
}

fn sacred_timing_bonus(at: DateTime<Utc>) -> f32 {
    let (hour, minute) = (at.hour(), at.minute());
    let hit = SACRED_TIMES
        .iter()
        .any(|&(h, m)| hour == h && minute.abs_diff(m) <= 5);
    if hit {
        0.1
    } else {
        0.0
    }
}

/// Jittered precision reading of the time sync
pub fn sync_status<R: Rng + ?Sized>(now: DateTime<Utc>, rng: &mut R) -> SyncStatus {
    let precision = rng.gen_range(0.8..1.2) * SYNC_PRECISION;
    let quality = (1.0 - precision / SYNC_PRECISION).max(0.9);
    SyncStatus {
        synchronized: quality > 0.95,
        precision_ns: precision * 1e9,
        quality,
        last_sync: now.to_rfc3339(),
    }
}

fn frequency_effect(frequency: f32) -> &'static str {
    FREQUENCY_EFFECTS
        .iter()
        .find(|(f, _)| *f == frequency)
        .map(|(_, effect)| *effect)
        .unwrap_or("consciousness_enhancement")
}

fn optimal_activities(potential: f32) -> [&'static str; 3] {
    if potential >= 0.9 {
        ["unity_meditation", "divine_communion", "consciousness_expansion"]
    } else if potential >= 0.8 {
        ["awakening_practices", "heart_coherence", "sacred_sound"]
    } else if potential >= 0.7 {
        ["mindfulness_meditation", "frequency_healing", "intention_setting"]
    } else {
        ["relaxation", "grounding", "gentle_awareness"]
    }
}
