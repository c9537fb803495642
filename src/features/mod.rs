//! Spectral and rhythmic feature extraction
//!
//! All per-frame features share one framing: `N_FFT`-sample Hann windows every
//! `HOP` samples, centred on the hop position.

pub mod chroma;
pub mod onset;
pub mod spectral;
pub mod stats;
pub mod stft;
pub mod tempo;

pub use tempo::{estimate_tempo, frames_to_time, TempoEstimate};

pub const N_FFT: usize = 2048;
pub const HOP: usize = 512;
pub const ROLLOFF_PERCENT: f32 = 0.85;

/// Per-frame features of a mono signal
#[derive(Debug, Clone, Default)]
pub struct FrameFeatures {
    pub centroid: Vec<f32>,
    pub bandwidth: Vec<f32>,
    pub rolloff: Vec<f32>,
    pub zero_crossing_rate: Vec<f32>,
    pub rms: Vec<f32>,
    pub chroma: Vec<[f32; 12]>,
    pub tonnetz: Vec<[f32; 6]>,
    pub onset_envelope: Vec<f32>,
    pub onset_frames: Vec<usize>,
}

/// Compute every per-frame feature of `samples`
pub fn extract(samples: &[f32], sample_rate: u32) -> FrameFeatures {
    let spectrogram = stft::stft_magnitude(samples, N_FFT, HOP);
    let freqs = stft::bin_frequencies(N_FFT, sample_rate);

    let centroid = spectral::spectral_centroid(&spectrogram, &freqs);
    let bandwidth = spectral::spectral_bandwidth(&spectrogram, &freqs, &centroid);
    let rolloff = spectral::spectral_rolloff(&spectrogram, &freqs, ROLLOFF_PERCENT);
    let zero_crossing_rate = spectral::zero_crossing_rate(samples, N_FFT, HOP);
    let rms = spectral::rms(samples, N_FFT, HOP);

    let chroma = chroma::chroma_from_spectrogram(&spectrogram, &freqs);
    let tonnetz = chroma::tonnetz(&chroma);

    let onset_envelope = onset::onset_strength(&spectrogram);
    let onset_frames = onset::detect_onsets(&onset_envelope);

    log::debug!(
        "Extracted {} frames, {} onsets",
        spectrogram.len(),
        onset_frames.len()
    );

    FrameFeatures {
        centroid,
        bandwidth,
        rolloff,
        zero_crossing_rate,
        rms,
        chroma,
        tonnetz,
        onset_envelope,
        onset_frames,
    }
}
