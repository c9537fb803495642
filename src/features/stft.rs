//! Framing, windowing and FFT magnitudes

use rayon::prelude::*;
use rustfft::{num_complex::Complex, FftPlanner};
use std::f32::consts::PI;

/// Hann window of `size` points
pub fn hann_window(size: usize) -> Vec<f32> {
    if size < 2 {
        return vec![1.0; size];
    }
    let n = size as f32;
    (0..size)
        .map(|i| 0.5 * (1.0 - (2.0 * PI * i as f32 / (n - 1.0)).cos()))
        .collect()
}

/// Number of centred frames for a signal of `len` samples
pub fn frame_count(len: usize, hop: usize) -> usize {
    if hop == 0 {
        return 0;
    }
    1 + len / hop
}

/// Split `samples` into centred frames of `frame_len`, zero-padded at the edges
///
/// Frame `i` is centred on sample `i * hop`.
pub fn centred_frames(samples: &[f32], frame_len: usize, hop: usize) -> Vec<Vec<f32>> {
    let half = frame_len / 2;
    (0..frame_count(samples.len(), hop))
        .map(|i| {
            let centre = i * hop;
            (0..frame_len)
                .map(|j| {
                    let idx = centre as isize + j as isize - half as isize;
                    if idx < 0 {
                        0.0
                    } else {
                        samples.get(idx as usize).copied().unwrap_or(0.0)
                    }
                })
                .collect()
        })
        .collect()
}

/// Short-time magnitude spectrogram, `n_fft/2 + 1` bins per frame
pub fn stft_magnitude(samples: &[f32], n_fft: usize, hop: usize) -> Vec<Vec<f32>> {
    if samples.is_empty() || n_fft == 0 {
        return Vec::new();
    }

    let window = hann_window(n_fft);
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(n_fft);
    let bins = n_fft / 2 + 1;

    centred_frames(samples, n_fft, hop)
        .into_par_iter()
        .map(|frame| {
            let mut buffer: Vec<Complex<f32>> = frame
                .iter()
                .zip(window.iter())
                .map(|(&s, &w)| Complex::new(s * w, 0.0))
                .collect();
            fft.process(&mut buffer);
            buffer[..bins].iter().map(|c| c.norm()).collect()
        })
        .collect()
}

/// Centre frequency of each STFT bin
pub fn bin_frequencies(n_fft: usize, sample_rate: u32) -> Vec<f32> {
    (0..n_fft / 2 + 1)
        .map(|k| k as f32 * sample_rate as f32 / n_fft as f32)
        .collect()
}

/// Magnitudes of an unwindowed FFT over the whole slice (all `n` bins)
pub fn spectrum_magnitude(samples: &[f32]) -> Vec<f32> {
    if samples.is_empty() {
        return Vec::new();
    }
    let mut planner = FftPlanner::<f32>::new();
    let fft = planner.plan_fft_forward(samples.len());
    let mut buffer: Vec<Complex<f32>> = samples.iter().map(|&s| Complex::new(s, 0.0)).collect();
    fft.process(&mut buffer);
    buffer.iter().map(|c| c.norm()).collect()
}

/// Signed frequency of FFT bin `k` of an `n`-point transform
pub fn fft_frequency(k: usize, n: usize, sample_rate: u32) -> f32 {
    let step = sample_rate as f32 / n as f32;
    if k < n.div_ceil(2) {
        k as f32 * step
    } else {
        (k as f32 - n as f32) * step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hann_window() {
        let w = hann_window(1024);
        assert!(w[0].abs() < 0.01);
        assert!(w[1023].abs() < 0.01);
        assert!((w[512] - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_frame_count_centred() {
        assert_eq!(frame_count(22050, 512), 44);
        let frames = centred_frames(&[1.0; 10], 4, 2);
        assert_eq!(frames.len(), 6);
        // first frame is half padding
        assert_eq!(frames[0], vec![0.0, 0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_stft_peak_at_tone() {
        let sr = 22050;
        let samples = crate::audio::sine_mix(&[(1000.0, 1.0)], 1.0, sr);
        let spec = stft_magnitude(&samples, 2048, 512);
        let freqs = bin_frequencies(2048, sr);
        let mid = &spec[spec.len() / 2];
        let peak = mid
            .iter()
            .enumerate()
            .max_by(|a, b| a.1.total_cmp(b.1))
            .map(|(i, _)| i)
            .unwrap();
        assert!((freqs[peak] - 1000.0).abs() < 11.0);
    }

    #[test]
    fn test_fft_frequency_negative_half() {
        assert_eq!(fft_frequency(1, 8, 8), 1.0);
        assert_eq!(fft_frequency(4, 8, 8), -4.0);
        assert_eq!(fft_frequency(7, 8, 8), -1.0);
    }
}
