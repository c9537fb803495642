//! Onset envelope and peak picking

use super::stats::mean;

/// Half-wave rectified spectral flux of log-compressed magnitudes
///
/// One value per frame; the first frame has no predecessor and is zero.
pub fn onset_strength(spectrogram: &[Vec<f32>]) -> Vec<f32> {
    let log_spec: Vec<Vec<f32>> = spectrogram
        .iter()
        .map(|frame| frame.iter().map(|m| (1.0 + 100.0 * m).ln()).collect())
        .collect();

    let mut envelope = Vec::with_capacity(log_spec.len());
    if log_spec.is_empty() {
        return envelope;
    }
    envelope.push(0.0);

    for pair in log_spec.windows(2) {
        let (prev, cur) = (&pair[0], &pair[1]);
        let bins = cur.len().max(1);
        let flux: f32 = cur
            .iter()
            .zip(prev)
            .map(|(c, p)| (c - p).max(0.0))
            .sum();
        envelope.push(flux / bins as f32);
    }
    envelope
}

/// Frame indices of onsets in `envelope`
///
/// A frame is an onset when it is the maximum within `±3` frames, exceeds
/// `mean + 0.07 * max` and lies at least 10 frames after the previous onset.
pub fn detect_onsets(envelope: &[f32]) -> Vec<usize> {
    const WINDOW: usize = 3;
    const WAIT: usize = 10;
    const DELTA: f32 = 0.07;

    let peak = envelope.iter().fold(0.0f32, |m, v| m.max(*v));
    if peak <= 0.0 {
        return Vec::new();
    }
    let threshold = mean(envelope) + DELTA * peak;

    let mut onsets: Vec<usize> = Vec::new();
    for (i, &value) in envelope.iter().enumerate() {
        if value < threshold {
            continue;
        }
        let lo = i.saturating_sub(WINDOW);
        let hi = (i + WINDOW + 1).min(envelope.len());
        let is_local_max = envelope[lo..hi].iter().all(|&v| v <= value);
        if !is_local_max {
            continue;
        }
        if let Some(&last) = onsets.last() {
            if i - last < WAIT {
                continue;
            }
        }
        onsets.push(i);
    }
    onsets
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flux_only_counts_increases() {
        let spec = vec![vec![0.0, 0.0], vec![1.0, 0.0], vec![0.0, 0.0]];
        let env = onset_strength(&spec);
        assert_eq!(env.len(), 3);
        assert_eq!(env[0], 0.0);
        assert!(env[1] > 0.0);
        assert_eq!(env[2], 0.0);
    }

    #[test]
    fn test_detect_spaced_peaks() {
        let mut env = vec![0.0f32; 100];
        for i in (5..100).step_by(20) {
            env[i] = 1.0;
        }
        assert_eq!(detect_onsets(&env), vec![5, 25, 45, 65, 85]);
    }

    #[test]
    fn test_wait_suppresses_close_peaks() {
        let mut env = vec![0.0f32; 40];
        env[10] = 1.0;
        env[15] = 0.9;
        env[30] = 1.0;
        assert_eq!(detect_onsets(&env), vec![10, 30]);
    }

    #[test]
    fn test_flat_envelope_has_no_onsets() {
        assert!(detect_onsets(&[0.0; 50]).is_empty());
    }
}
