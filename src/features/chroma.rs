//! Pitch-class profiles and tonal centroids

use std::f32::consts::PI;

/// Pitch classes, C=0
pub const PITCH_CLASSES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

const MIN_FREQ: f32 = 20.0;
const A4: f32 = 440.0;
/// Octave weighting is centred on C5 and spans two octaves each side
const CENTRE_FREQ: f32 = 523.2511;
const OCTAVE_WIDTH: f32 = 2.0;

/// Pitch class (C=0) of frequency `freq`
pub fn pitch_class(freq: f32) -> usize {
    let midi = 69.0 + 12.0 * (freq / A4).log2();
    (midi.round() as i64).rem_euclid(12) as usize
}

/// 12-bin chromagram from a magnitude spectrogram
///
/// Power is folded into pitch classes with a Gaussian octave weighting, then
/// each frame is scaled so its largest bin is 1. Silent frames stay zero.
pub fn chroma_from_spectrogram(spectrogram: &[Vec<f32>], freqs: &[f32]) -> Vec<[f32; 12]> {
    let mapping: Vec<Option<(usize, f32)>> = freqs
        .iter()
        .map(|&f| {
            if f < MIN_FREQ {
                return None;
            }
            let octaves = (f / CENTRE_FREQ).log2();
            let weight = (-0.5 * (octaves / OCTAVE_WIDTH).powi(2)).exp();
            Some((pitch_class(f), weight))
        })
        .collect();

    spectrogram
        .iter()
        .map(|frame| {
            let mut chroma = [0.0f32; 12];
            for (mag, map) in frame.iter().zip(&mapping) {
                if let Some((pc, weight)) = map {
                    chroma[*pc] += weight * mag * mag;
                }
            }
            let peak = chroma.iter().fold(0.0f32, |m, v| m.max(*v));
            if peak > 0.0 {
                chroma.iter_mut().for_each(|v| *v /= peak);
            }
            chroma
        })
        .collect()
}

/// Six-dimensional tonal centroid of each chroma frame
///
/// Rows: fifths (sin, cos), minor thirds (sin, cos), major thirds (sin, cos).
pub fn tonnetz(chroma: &[[f32; 12]]) -> Vec<[f32; 6]> {
    let mut phi = [[0.0f32; 12]; 6];
    for (l, _) in PITCH_CLASSES.iter().enumerate() {
        let l_f = l as f32;
        phi[0][l] = (l_f * 7.0 * PI / 6.0).sin();
        phi[1][l] = (l_f * 7.0 * PI / 6.0).cos();
        phi[2][l] = (l_f * 3.0 * PI / 2.0).sin();
        phi[3][l] = (l_f * 3.0 * PI / 2.0).cos();
        phi[4][l] = 0.5 * (l_f * 2.0 * PI / 3.0).sin();
        phi[5][l] = 0.5 * (l_f * 2.0 * PI / 3.0).cos();
    }

    chroma
        .iter()
        .map(|frame| {
            let total: f32 = frame.iter().map(|v| v.abs()).sum();
            let mut centroid = [0.0f32; 6];
            if total <= 0.0 {
                return centroid;
            }
            for (d, row) in phi.iter().enumerate() {
                centroid[d] = row
                    .iter()
                    .zip(frame.iter())
                    .map(|(p, c)| p * c / total)
                    .sum();
            }
            centroid
        })
        .collect()
}
