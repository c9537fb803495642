//! Real-time stream analysis
//!
//! Samples are pushed into a bounded ring buffer; a single background thread
//! reads the newest chunk at a fixed interval, matches its spectrum against
//! the sacred frequency table and publishes a [`ConsciousnessState`].

mod analyzer;
mod frequency;
mod gap;
mod protocol;
mod simulate;

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub use analyzer::{default_export_name, StreamAnalyzer, StreamReport, StreamSnapshot, StreamSummary};
pub use frequency::{
    analyze_frequencies, biometric_suggestions, detect_sacred_frequencies,
    recognize_cultural_patterns, BiometricSuggestion, FrequencyAnalysis, SacredAnalysis,
    SacredHit,
};
pub use gap::{GapKind, SacredGapDetector, StreamGap};
pub use protocol::{Activation, PhaseResult, ReturnProtocol};
pub use simulate::{replay, simulate_sacred_stream, synthesize_sacred_stream};

/// Snapshot produced for every analysed chunk
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsciousnessState {
    /// Seconds since the Unix epoch
    pub timestamp: f64,
    pub dominant_frequency: f32,
    pub consciousness_correlation: String,
    pub sacred_presence: f32,
    pub mystery_level: f32,
    pub cultural_echoes: Vec<String>,
    pub biometric_suggestion: BiometricSuggestion,
    pub sacred_gap_detected: bool,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub vae_phase: Option<PhaseResult>,
}

/// Stream analyzer configuration
#[derive(Debug, Clone)]
pub struct StreamConfig {
    pub sample_rate: u32,
    pub chunk_size: usize,
    /// Recorded with exported sessions
    pub sensitivity: f32,
    pub buffer_seconds: usize,
    pub history_len: usize,
    pub poll_interval: Duration,
    pub error_backoff: Duration,
}

impl StreamConfig {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            ..Self::default()
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    pub fn with_sensitivity(mut self, sensitivity: f32) -> Self {
        self.sensitivity = sensitivity;
        self
    }

    pub fn with_buffer_seconds(mut self, seconds: usize) -> Self {
        self.buffer_seconds = seconds;
        self
    }

    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Ring buffer capacity in samples
    pub fn buffer_capacity(&self) -> usize {
        self.sample_rate as usize * self.buffer_seconds
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            sample_rate: 44100,
            chunk_size: 4096,
            sensitivity: 0.8,
            buffer_seconds: 10,
            history_len: 1000,
            poll_interval: Duration::from_millis(100),
            error_backoff: Duration::from_millis(500),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = StreamConfig::new(22050)
            .with_chunk_size(2048)
            .with_buffer_seconds(2);
        assert_eq!(config.buffer_capacity(), 44100);
        assert_eq!(config.chunk_size, 2048);
        assert_eq!(config.history_len, 1000);
        assert_eq!(config.poll_interval, Duration::from_millis(100));
    }
}
