//! Aural Sentience - consciousness-aware audio analysis
//!
//! Reads audio files for sacred frequencies, emotional patterns and rhythmic
//! archetypes, then writes technical, poetic and combined reports into a
//! session directory. Alongside the per-file pipeline sit a real-time stream
//! analyzer, a cosmic alignment calendar, the spiral resonator and PNG
//! visualisations.

pub mod analysis;
pub mod audio;
pub mod cosmic;
pub mod engine;
pub mod error;
pub mod features;
pub mod lexicon;
pub mod model;
pub mod resonator;
pub mod session;
pub mod stream;
pub mod tables;
pub mod validation;
pub mod vault;
pub mod visual;

pub use engine::{AuralSentienceEngine, EngineConfig};
pub use error::AuralError;
pub use session::{SessionConfig, SessionPipeline};
pub use stream::{StreamAnalyzer, StreamConfig};
