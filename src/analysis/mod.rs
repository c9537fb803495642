//! Audio analysis layer
//!
//! Feature extraction sits behind the [`AudioAnalyzer`] trait so the pipeline
//! can run either the stratum-dsp backed analyzer or the fast in-house one.
//! The detectors in `resonance` and `witness` only read a [`FeatureSet`].

mod fast;
mod real;
mod resonance;
mod stratum;
mod traits;
pub mod witness;

pub use fast::FastAnalyzer;
pub use real::RealAnalyzer;
pub use resonance::ResonanceDetector;
pub use stratum::normalize_bpm;
pub use traits::{AudioAnalyzer, FeatureSet};
pub use witness::{biometric_correlates, cultural_echoes, sacred_gaps};
