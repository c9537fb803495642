//! Biometric correlates, cultural echoes and sacred gaps

use super::traits::FeatureSet;
use crate::features::stats;
use crate::model::{BiometricCorrelates, CulturalEchoes, SacredGap};
use crate::tables::{GAP_ENTROPY_MESSAGE, GAP_FALLBACK_MESSAGE};
use rand::Rng;

/// Physiological response suggestions from tempo, rolloff, zcr and onsets
pub fn biometric_correlates(features: &FeatureSet) -> BiometricCorrelates {
    let tempo = features.tempo;
    let heart_sync = if (60.0..=80.0).contains(&tempo) {
        "May synchronize with resting heart rate (60-80 BPM)"
    } else if (80.0..=120.0).contains(&tempo) {
        "May elevate heart rate to active state (80-120 BPM)"
    } else if tempo > 120.0 {
        "May induce elevated arousal state (>120 BPM)"
    } else {
        "May slow heart rate below resting state"
    };

    let breath_influence = if stats::variance(&features.frames.rolloff) < 1_000_000.0 {
        "Steady spectral content may encourage deep, regular breathing"
    } else {
        "Dynamic spectral changes may create varied breathing patterns"
    };

    let zcr = stats::mean(&features.frames.zero_crossing_rate);
    let nervous_system = if zcr < 0.05 {
        "Low frequency content may activate parasympathetic (rest) response"
    } else if zcr > 0.15 {
        "High frequency content may activate sympathetic (alert) response"
    } else {
        "Balanced frequency content may maintain neutral arousal"
    };

    let density = features.onset_density();
    let somatic_response = if density > 2.0 {
        "Frequent onsets may trigger embodied movement responses"
    } else if density < 0.5 {
        "Sparse onsets may encourage stillness and internal focus"
    } else {
        "Moderate onset density may allow choice between movement and stillness"
    };

    BiometricCorrelates {
        heart_sync: heart_sync.to_string(),
        breath_influence: breath_influence.to_string(),
        nervous_system: nervous_system.to_string(),
        somatic_response: somatic_response.to_string(),
    }
}

/// Tonal, rhythmic and textural archetypes
pub fn cultural_echoes(features: &FeatureSet) -> CulturalEchoes {
    let chroma = features.chroma_mean();
    // C-E-G against C-Eb-G
    let major = chroma[0] + chroma[4] + chroma[7];
    let minor = chroma[0] + chroma[3] + chroma[7];

    let tonal_archetype = if major > minor * 1.2 {
        "Resonates with celebration traditions across cultures"
    } else if minor > major * 1.2 {
        "Echoes contemplative and lament traditions"
    } else {
        "Balanced tonality suggests ritual or ceremonial contexts"
    };

    let tempo = features.tempo;
    let rhythmic_echo = if (60.0..=80.0).contains(&tempo) {
        "Tempo aligns with walking meditation practices"
    } else if (120.0..=140.0).contains(&tempo) {
        "Tempo resonates with dance traditions worldwide"
    } else if tempo > 160.0 {
        "Rapid tempo echoes ecstatic and trance traditions"
    } else {
        "Tempo suggests ceremonial or processional contexts"
    };

    let brightness = features.brightness();
    let textural_archetype = if brightness > 3000.0 {
        "Bright textures echo sky, light, and transcendence themes"
    } else if brightness < 1000.0 {
        "Dark textures resonate with earth, depth, and introspection"
    } else {
        "Balanced textures suggest human-scale emotional landscapes"
    };

    CulturalEchoes {
        tonal_archetype: tonal_archetype.to_string(),
        rhythmic_echo: rhythmic_echo.to_string(),
        textural_archetype: textural_archetype.to_string(),
    }
}

/// Frames whose harmonic entropy runs far above the piece's overall complexity
///
/// When no frame qualifies, one gap is placed at a random point between 30%
/// and 70% of the duration.
pub fn sacred_gaps<R: Rng + ?Sized>(features: &FeatureSet, rng: &mut R) -> Vec<SacredGap> {
    let complexity = stats::entropy(&features.chroma_mean())
        + stats::std_dev(&features.frames.centroid) / 1000.0;
    let threshold = complexity * 1.5;

    let mut gaps: Vec<SacredGap> = features
        .frames
        .chroma
        .iter()
        .enumerate()
        .filter_map(|(i, frame)| {
            let padded: Vec<f32> = frame.iter().map(|c| c + 1e-8).collect();
            (stats::entropy(&padded) > threshold).then(|| SacredGap {
                timestamp: features.frame_time(i),
                message: GAP_ENTROPY_MESSAGE.to_string(),
            })
        })
        .collect();

    if gaps.is_empty() {
        gaps.push(SacredGap {
            timestamp: features.duration * rng.gen_range(0.3..0.7),
            message: GAP_FALLBACK_MESSAGE.to_string(),
        });
    }

    gaps
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::AudioBuffer;
    use crate::features::FrameFeatures;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn with_frames(tempo: f32, frames: FrameFeatures, seconds: f32) -> FeatureSet {
        let audio = AudioBuffer::new(vec![0.0; (seconds * 22050.0) as usize], 22050);
        FeatureSet::new(&audio, frames, tempo, vec![], None)
    }

    #[test]
    fn test_heart_sync_bands() {
        let f = |t| biometric_correlates(&with_frames(t, FrameFeatures::default(), 1.0)).heart_sync;
        assert!(f(70.0).contains("resting heart rate"));
        assert!(f(80.0).contains("resting heart rate"));
        assert!(f(100.0).contains("active state"));
        assert!(f(140.0).contains("elevated arousal"));
        assert!(f(40.0).contains("below resting"));
    }

    #[test]
    fn test_onset_density_bands() {
        let frames = FrameFeatures {
            onset_frames: (0..30).collect(),
            ..Default::default()
        };
        let c = biometric_correlates(&with_frames(0.0, frames, 10.0));
        assert!(c.somatic_response.starts_with("Frequent onsets"));

        let c = biometric_correlates(&with_frames(0.0, FrameFeatures::default(), 10.0));
        assert!(c.somatic_response.starts_with("Sparse onsets"));
        assert!(c.nervous_system.starts_with("Low frequency"));
    }

    #[test]
    fn test_major_triad_reads_as_celebration() {
        let mut c = [0.0; 12];
        c[0] = 1.0;
        c[4] = 1.0;
        c[7] = 1.0;
        let frames = FrameFeatures {
            chroma: vec![c; 4],
            centroid: vec![500.0; 4],
            ..Default::default()
        };
        let echoes = cultural_echoes(&with_frames(130.0, frames, 1.0));
        assert!(echoes.tonal_archetype.contains("celebration"));
        assert!(echoes.rhythmic_echo.contains("dance"));
        assert!(echoes.textural_archetype.starts_with("Dark"));
    }

    #[test]
    fn test_entropy_spike_becomes_gap() {
        let mut focused = [0.0; 12];
        focused[0] = 1.0;
        let mut frames = FrameFeatures {
            chroma: vec![focused; 20],
            centroid: vec![400.0; 20],
            ..Default::default()
        };
        frames.chroma[10] = [1.0; 12];
        let set = with_frames(0.0, frames, 1.0);
        let gaps = sacred_gaps(&set, &mut StdRng::seed_from_u64(1));
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].message, GAP_ENTROPY_MESSAGE);
        assert!((gaps[0].timestamp - set.frame_time(10)).abs() < 1e-6);
    }

    #[test]
    fn test_fallback_gap_within_middle() {
        let set = with_frames(0.0, FrameFeatures::default(), 10.0);
        let gaps = sacred_gaps(&set, &mut StdRng::seed_from_u64(7));
        assert_eq!(gaps.len(), 1);
        assert_eq!(gaps[0].message, GAP_FALLBACK_MESSAGE);
        assert!(gaps[0].timestamp >= 3.0 && gaps[0].timestamp < 7.0);
    }
}
