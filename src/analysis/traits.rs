//! Analysis trait definitions and data structures

use crate::audio::AudioBuffer;
use crate::features::{self, stats, FrameFeatures, HOP};
use crate::model::{FeatureSummary, MusicalKey};
use anyhow::Result;

/// Audio analyzer trait - allows swapping between the stratum-backed and fast implementations
pub trait AudioAnalyzer {
    /// Extract every feature the reports need from decoded audio
    fn analyze(&self, audio: &AudioBuffer) -> Result<FeatureSet>;
}

/// Complete feature set for one file
#[derive(Debug, Clone)]
pub struct FeatureSet {
    pub sample_rate: u32,
    pub hop: usize,
    /// Length of the analysed audio in seconds
    pub duration: f32,
    pub frames: FrameFeatures,
    /// Tempo in BPM, zero when no pulse was found
    pub tempo: f32,
    /// Beat positions in seconds
    pub beat_times: Vec<f32>,
    pub key: Option<MusicalKey>,
}

impl FeatureSet {
    /// Assemble a feature set from per-frame features and a tempo estimate
    pub fn new(
        audio: &AudioBuffer,
        frames: FrameFeatures,
        tempo: f32,
        beat_times: Vec<f32>,
        key: Option<MusicalKey>,
    ) -> Self {
        Self {
            sample_rate: audio.sample_rate,
            hop: HOP,
            duration: audio.duration_secs(),
            frames,
            tempo,
            beat_times,
            key,
        }
    }

    /// Start time of frame `index` in seconds
    pub fn frame_time(&self, index: usize) -> f32 {
        features::frames_to_time(index, self.sample_rate, self.hop)
    }

    /// Onsets per second
    pub fn onset_density(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        self.frames.onset_frames.len() as f32 / self.duration
    }

    /// Mean spectral centroid in Hz
    pub fn brightness(&self) -> f32 {
        stats::mean(&self.frames.centroid)
    }

    /// Mean chroma vector
    pub fn chroma_mean(&self) -> Vec<f32> {
        let rows: Vec<Vec<f32>> = self.frames.chroma.iter().map(|c| c.to_vec()).collect();
        stats::column_mean(&rows, 12)
    }

    pub fn tonnetz_mean(&self) -> Vec<f32> {
        let rows: Vec<Vec<f32>> = self.frames.tonnetz.iter().map(|c| c.to_vec()).collect();
        stats::column_mean(&rows, 6)
    }

    /// Numeric digest stored in every technical report
    pub fn summary(&self) -> FeatureSummary {
        FeatureSummary {
            tempo_bpm: self.tempo,
            beat_count: self.beat_times.len(),
            key: self.key.map(|k| k.name().to_string()),
            brightness_hz: self.brightness(),
            rolloff_variance: stats::variance(&self.frames.rolloff),
            zero_crossing_rate: stats::mean(&self.frames.zero_crossing_rate),
            onset_density: self.onset_density(),
            chroma_mean: self.chroma_mean(),
            tonnetz_mean: self.tonnetz_mean(),
        }
    }
}

/// Beat times from the in-house autocorrelation tempo estimate
pub(crate) fn fallback_tempo(frames: &FrameFeatures, sample_rate: u32) -> (f32, Vec<f32>) {
    let estimate = features::estimate_tempo(&frames.onset_envelope, sample_rate, HOP);
    let beats = estimate
        .beat_frames
        .iter()
        .map(|&f| features::frames_to_time(f, sample_rate, HOP))
        .collect();
    (estimate.bpm, beats)
}
