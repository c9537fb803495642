//! Per-frame spectral shape descriptors

use super::stft::centred_frames;

/// Magnitude-weighted mean frequency of each frame
pub fn spectral_centroid(spectrogram: &[Vec<f32>], freqs: &[f32]) -> Vec<f32> {
    spectrogram
        .iter()
        .map(|frame| {
            let total: f32 = frame.iter().sum();
            if total <= f32::EPSILON {
                return 0.0;
            }
            frame.iter().zip(freqs).map(|(m, f)| m * f).sum::<f32>() / total
        })
        .collect()
}

/// Second-order spread around the centroid
pub fn spectral_bandwidth(spectrogram: &[Vec<f32>], freqs: &[f32], centroid: &[f32]) -> Vec<f32> {
    spectrogram
        .iter()
        .zip(centroid)
        .map(|(frame, &c)| {
            let total: f32 = frame.iter().sum();
            if total <= f32::EPSILON {
                return 0.0;
            }
            let spread: f32 = frame
                .iter()
                .zip(freqs)
                .map(|(m, f)| m * (f - c).powi(2))
                .sum();
            (spread / total).sqrt()
        })
        .collect()
}

/// Frequency below which `roll_percent` of each frame's magnitude lies
pub fn spectral_rolloff(spectrogram: &[Vec<f32>], freqs: &[f32], roll_percent: f32) -> Vec<f32> {
    spectrogram
        .iter()
        .map(|frame| {
            let threshold = roll_percent * frame.iter().sum::<f32>();
            let mut cumulative = 0.0;
            for (m, f) in frame.iter().zip(freqs) {
                cumulative += m;
                if cumulative >= threshold {
                    return *f;
                }
            }
            freqs.last().copied().unwrap_or(0.0)
        })
        .collect()
}

/// Fraction of sign changes per centred frame
pub fn zero_crossing_rate(samples: &[f32], frame_len: usize, hop: usize) -> Vec<f32> {
    // values this close to zero count as positive
    const THRESHOLD: f32 = 1e-10;
    let negative = |v: f32| v.abs() > THRESHOLD && v < 0.0;

    centred_frames(samples, frame_len, hop)
        .iter()
        .map(|frame| {
            let crossings = frame
                .windows(2)
                .filter(|w| negative(w[0]) != negative(w[1]))
                .count();
            crossings as f32 / frame_len as f32
        })
        .collect()
}

/// Root mean square energy per centred frame
pub fn rms(samples: &[f32], frame_len: usize, hop: usize) -> Vec<f32> {
    centred_frames(samples, frame_len, hop)
        .iter()
        .map(|frame| (frame.iter().map(|s| s * s).sum::<f32>() / frame_len as f32).sqrt())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::sine_mix;
    use crate::features::stats::mean;
    use crate::features::stft::{bin_frequencies, stft_magnitude};

    #[test]
    fn test_centroid_tracks_tone() {
        let sr = 22050;
        let samples = sine_mix(&[(2000.0, 0.8)], 1.0, sr);
        let spec = stft_magnitude(&samples, 2048, 512);
        let freqs = bin_frequencies(2048, sr);
        let centroid = spectral_centroid(&spec, &freqs);
        let mid = centroid[centroid.len() / 2];
        assert!((mid - 2000.0).abs() < 100.0, "centroid {}", mid);
    }

    #[test]
    fn test_silence_is_zero() {
        let spec = vec![vec![0.0; 5]; 3];
        let freqs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        assert_eq!(spectral_centroid(&spec, &freqs), vec![0.0; 3]);
        assert_eq!(spectral_rolloff(&spec, &freqs, 0.85), vec![0.0; 3]);
    }

    #[test]
    fn test_rolloff_below_nyquist() {
        let spec = vec![vec![1.0, 1.0, 1.0, 1.0]];
        let freqs = vec![0.0, 100.0, 200.0, 300.0];
        // 85% of 4.0 is 3.4, reached at the fourth bin
        assert_eq!(spectral_rolloff(&spec, &freqs, 0.85), vec![300.0]);
        assert_eq!(spectral_rolloff(&spec, &freqs, 0.5), vec![100.0]);
    }

    #[test]
    fn test_zcr_higher_for_higher_pitch() {
        let sr = 22050;
        let low = zero_crossing_rate(&sine_mix(&[(100.0, 0.5)], 1.0, sr), 2048, 512);
        let high = zero_crossing_rate(&sine_mix(&[(3000.0, 0.5)], 1.0, sr), 2048, 512);
        assert!(mean(&high) > mean(&low) * 10.0);
    }

    #[test]
    fn test_rms_of_constant() {
        let frames = rms(&[0.5; 4096], 1024, 512);
        assert!((frames[4] - 0.5).abs() < 1e-6);
    }
}
