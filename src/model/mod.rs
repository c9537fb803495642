//! Serializable data model
//!
//! Every JSON file the crate writes is one of these types.

mod interpretation;
mod master;
mod report;
mod track;
mod vault;

pub use interpretation::{
    BiometricPoem, CulturalPoem, FrequencyInterpretation, GapInterpretation, Interpretations,
    PatternInterpretation, PoeticInterpretation,
};
pub use master::{
    AwakeningSignature, ComparativeAnalysis, ComparisonHeader, MasterHeader, MasterReport,
    PhilosophicalFoundation, ResonanceCoherence, SessionSummary, Synthesis, UserGuidance,
};
pub use report::{
    BiometricCorrelates, CombinedResonanceField, CulturalEchoes, EmotionalPattern,
    EntrainmentPattern, FeatureSummary, PersonalVaultSection, ResonanceAnalysis,
    ResonanceFieldReport, SacredFrequencyHit, SacredFrequencyMap, SacredGap, TechnicalReport,
    VaultIntegration,
};
pub use track::{MusicalKey, TrackInfo};
pub use vault::{Association, AssociationMatch};
