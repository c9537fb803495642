//! Autocorrelation tempo estimate and beat grid

use super::stats::mean;

const MIN_BPM: f32 = 30.0;
const MAX_BPM: f32 = 300.0;
/// Centre of the log-normal tempo prior
const PRIOR_BPM: f32 = 120.0;
/// Spread of the prior, in octaves
const PRIOR_STD_OCTAVES: f32 = 1.0;

/// Tempo and beat positions derived from an onset envelope
#[derive(Debug, Clone, PartialEq)]
pub struct TempoEstimate {
    pub bpm: f32,
    pub beat_frames: Vec<usize>,
}

/// Estimate tempo from `envelope` sampled at `sample_rate / hop` frames per second
///
/// Returns a zero tempo and no beats when the envelope carries no energy or is
/// too short to hold two periods of the slowest tempo considered.
pub fn estimate_tempo(envelope: &[f32], sample_rate: u32, hop: usize) -> TempoEstimate {
    let silent = TempoEstimate {
        bpm: 0.0,
        beat_frames: Vec::new(),
    };
    let frame_rate = sample_rate as f32 / hop as f32;
    let min_lag = ((60.0 * frame_rate / MAX_BPM).floor() as usize).max(1);
    let max_lag = (60.0 * frame_rate / MIN_BPM).ceil() as usize;

    if envelope.len() < 2 * min_lag + 2 || envelope.iter().all(|v| *v <= 0.0) {
        return silent;
    }

    let m = mean(envelope);
    let centred: Vec<f32> = envelope.iter().map(|v| v - m).collect();
    let max_lag = max_lag.min(centred.len() - 1);

    let raw: Vec<f32> = (0..=max_lag)
        .map(|lag| {
            centred[lag..]
                .iter()
                .zip(&centred)
                .map(|(a, b)| a * b)
                .sum()
        })
        .collect();

    // 3-tap smoothing so periods that fall between two frames are not
    // outscored by their integer multiples
    let autocorr: Vec<f32> = (0..raw.len())
        .map(|i| {
            let prev = if i > 0 { raw[i - 1] } else { 0.0 };
            let next = raw.get(i + 1).copied().unwrap_or(0.0);
            0.5 * prev + raw[i] + 0.5 * next
        })
        .collect();

    let mut best: Option<(usize, f32)> = None;
    for (lag, &value) in autocorr.iter().enumerate().skip(min_lag) {
        let bpm = 60.0 * frame_rate / lag as f32;
        let prior = (-0.5 * ((bpm / PRIOR_BPM).log2() / PRIOR_STD_OCTAVES).powi(2)).exp();
        let score = value * prior;
        if best.map_or(true, |(_, s)| score > s) {
            best = Some((lag, score));
        }
    }

    let Some((lag, score)) = best else {
        return silent;
    };
    if score <= 0.0 {
        return silent;
    }

    let period = refine_lag(&autocorr, lag);
    let bpm = 60.0 * frame_rate / period;
    let beat_frames = beat_grid(envelope, period);

    TempoEstimate { bpm, beat_frames }
}

/// Parabolic interpolation around an autocorrelation peak
fn refine_lag(autocorr: &[f32], lag: usize) -> f32 {
    if lag == 0 || lag + 1 >= autocorr.len() {
        return lag as f32;
    }
    let (a, b, c) = (autocorr[lag - 1], autocorr[lag], autocorr[lag + 1]);
    let denom = a - 2.0 * b + c;
    if denom.abs() < f32::EPSILON {
        return lag as f32;
    }
    let shift = 0.5 * (a - c) / denom;
    lag as f32 + shift.clamp(-0.5, 0.5)
}

/// Beat frames on a fixed `period` grid, phase chosen to maximise onset energy
fn beat_grid(envelope: &[f32], period: f32) -> Vec<usize> {
    if period < 1.0 {
        return Vec::new();
    }
    let positions = |phase: f32| {
        let mut t = phase;
        let mut out = Vec::new();
        while (t.round() as usize) < envelope.len() {
            out.push(t.round() as usize);
            t += period;
        }
        out
    };

    let mut best_phase = 0.0;
    let mut best_score = f32::MIN;
    for step in 0..period.ceil() as usize {
        let phase = step as f32;
        let score: f32 = positions(phase).iter().map(|&i| envelope[i]).sum();
        if score > best_score {
            best_score = score;
            best_phase = phase;
        }
    }
    positions(best_phase)
}

/// Seconds at which frame `frame` starts
pub fn frames_to_time(frame: usize, sample_rate: u32, hop: usize) -> f32 {
    frame as f32 * hop as f32 / sample_rate as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pulse_envelope(bpm: f32, seconds: f32, sample_rate: u32, hop: usize) -> Vec<f32> {
        let frame_rate = sample_rate as f32 / hop as f32;
        let n = (seconds * frame_rate) as usize;
        let period = 60.0 * frame_rate / bpm;
        let mut env = vec![0.0; n];
        let mut t: f32 = 3.0;
        while (t.round() as usize) < n {
            env[t.round() as usize] = 1.0;
            t += period;
        }
        env
    }

    #[test]
    fn test_recovers_pulse_tempo() {
        let env = pulse_envelope(120.0, 20.0, 22050, 512);
        let est = estimate_tempo(&env, 22050, 512);
        assert!((est.bpm - 120.0).abs() < 3.0, "bpm {}", est.bpm);
        assert!(est.beat_frames.len() >= 35);
    }

    #[test]
    fn test_beats_land_on_pulses() {
        let env = pulse_envelope(100.0, 15.0, 22050, 512);
        let est = estimate_tempo(&env, 22050, 512);
        let near_pulse = |f: usize| {
            let lo = f.saturating_sub(2);
            let hi = (f + 3).min(env.len());
            env[lo..hi].iter().any(|v| *v > 0.0)
        };
        let hits = est.beat_frames.iter().filter(|&&f| near_pulse(f)).count();
        assert!(hits * 2 >= est.beat_frames.len());
    }

    #[test]
    fn test_silence_has_no_tempo() {
        let est = estimate_tempo(&[0.0; 1000], 22050, 512);
        assert_eq!(est.bpm, 0.0);
        assert!(est.beat_frames.is_empty());
    }

    #[test]
    fn test_frames_to_time() {
        assert!((frames_to_time(43, 22050, 512) - 0.99845).abs() < 1e-4);
    }
}
