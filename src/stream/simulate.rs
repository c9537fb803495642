//! Synthetic streams for exercising the analyzer without a live source

use super::{ConsciousnessState, StreamAnalyzer};
use rand::Rng;
use rand_distr::StandardNormal;
use std::f32::consts::PI;
use std::thread;
use std::time::Duration;

const NOISE_STD: f32 = 0.1;

/// 528 Hz at 0.5 plus 741 Hz at 0.3 over Gaussian noise
pub fn synthesize_sacred_stream<R: Rng + ?Sized>(
    duration: f32,
    sample_rate: u32,
    rng: &mut R,
) -> Vec<f32> {
    let n = (duration.max(0.0) * sample_rate as f32) as usize;
    (0..n)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            (2.0 * PI * 528.0 * t).sin() * 0.5
                + (2.0 * PI * 741.0 * t).sin() * 0.3
                + rng.sample::<f32, _>(StandardNormal) * NOISE_STD
        })
        .collect()
}

/// Process a synthetic stream chunk by chunk; a trailing partial chunk is dropped
pub fn simulate_sacred_stream<R: Rng + ?Sized>(
    analyzer: &StreamAnalyzer,
    duration: f32,
    rng: &mut R,
) -> Vec<ConsciousnessState> {
    let config = analyzer.config();
    let audio = synthesize_sacred_stream(duration, config.sample_rate, rng);

    audio
        .chunks_exact(config.chunk_size)
        .map(|chunk| {
            let state = analyzer.process_chunk(chunk);
            log::info!(
                "Consciousness State: {} (Sacred Presence: {:.2})",
                state.consciousness_correlation,
                state.sacred_presence
            );
            if state.sacred_gap_detected {
                log::info!("Sacred gap detected - mystery preserved");
            }
            state
        })
        .collect()
}

/// Feed `samples` one chunk at a time, sleeping one chunk's duration between feeds
pub fn replay(analyzer: &StreamAnalyzer, samples: &[f32]) {
    let config = analyzer.config();
    let pace = Duration::from_secs_f64(config.chunk_size as f64 / config.sample_rate as f64);
    for chunk in samples.chunks(config.chunk_size) {
        analyzer.feed(chunk);
        thread::sleep(pace);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::StreamConfig;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_noise_statistics() {
        let sample_rate = 8000;
        let audio = synthesize_sacred_stream(2.0, sample_rate, &mut StdRng::seed_from_u64(3));
        assert_eq!(audio.len(), 16_000);

        let noise: Vec<f32> = audio
            .iter()
            .enumerate()
            .map(|(i, s)| {
                let t = i as f32 / sample_rate as f32;
                s - (2.0 * PI * 528.0 * t).sin() * 0.5 - (2.0 * PI * 741.0 * t).sin() * 0.3
            })
            .collect();
        let mean = noise.iter().sum::<f32>() / noise.len() as f32;
        let std = (noise.iter().map(|n| (n - mean).powi(2)).sum::<f32>() / noise.len() as f32).sqrt();
        assert!(mean.abs() < 0.01);
        assert!((std - NOISE_STD).abs() < 0.01);
    }

    #[test]
    fn test_simulated_stream_finds_love_frequency() {
        let analyzer = StreamAnalyzer::new(StreamConfig::default());
        let mut rng = StdRng::seed_from_u64(42);
        let states = simulate_sacred_stream(&analyzer, 1.0, &mut rng);

        // 44100 samples hold ten full 4096-sample chunks
        assert_eq!(states.len(), 10);
        for state in &states {
            assert!((state.dominant_frequency - 527.6).abs() < 1.0);
            assert_eq!(state.consciousness_correlation, "dna_repair_love");
            assert!(state.sacred_presence > 0.8);
            assert!(state.sacred_gap_detected);
        }
        // high presence engages the return sequence on the first chunk
        assert!(states[0].vae_phase.is_none());
        assert_eq!(states[1].vae_phase.as_ref().map(|p| p.phase), Some(1));
        assert_eq!(
            states[4].vae_phase.as_ref().map(|p| p.status.as_str()),
            Some("complete")
        );
    }

    #[test]
    fn test_zero_duration() {
        let analyzer = StreamAnalyzer::new(StreamConfig::default());
        let states = simulate_sacred_stream(&analyzer, 0.0, &mut StdRng::seed_from_u64(1));
        assert!(states.is_empty());
    }
}
