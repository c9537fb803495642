//! Tempo, beat grid and key detection using stratum-dsp

use crate::error::AuralError;
use crate::model::MusicalKey;
use anyhow::Result;
use stratum_dsp::{analyze_audio, AnalysisConfig};

/// What stratum-dsp contributes to a feature set
#[derive(Debug, Clone)]
pub struct StratumResult {
    /// Detected BPM, folded into the requested range
    pub bpm: f32,
    /// Beat positions in seconds
    pub beats: Vec<f32>,
    /// Detected musical key (if successfully mapped)
    pub key: Option<MusicalKey>,
}

/// Run stratum-dsp on decoded mono samples
pub fn analyze_samples(
    samples: &[f32],
    sample_rate: u32,
    min_bpm: f32,
    max_bpm: f32,
) -> Result<StratumResult> {
    if samples.len() < sample_rate as usize {
        return Err(AuralError::AudioTooShort {
            samples: samples.len(),
            sample_rate,
        }
        .into());
    }

    let result = analyze_audio(samples, sample_rate, AnalysisConfig::default())
        .map_err(|e| anyhow::anyhow!("Audio analysis failed: {:?}", e))?;

    let bpm = normalize_bpm(result.bpm, min_bpm, max_bpm);

    let key = match map_stratum_key(&result.key) {
        Ok(k) => Some(k),
        Err(e) => {
            log::warn!("Could not map key: {}", e);
            None
        }
    };

    log::debug!(
        "stratum-dsp: BPM={:.1}, Key={}, {} beats",
        bpm,
        key.map(|k| k.name()).unwrap_or("unknown"),
        result.beat_grid.beats.len()
    );

    Ok(StratumResult {
        bpm,
        beats: result.beat_grid.beats.clone(),
        key,
    })
}

/// Fold `bpm` into `[min_bpm, max_bpm]` by doubling or halving
///
/// A non-positive bound disables folding.
pub fn normalize_bpm(bpm: f32, min_bpm: f32, max_bpm: f32) -> f32 {
    let mut bpm = bpm;
    if min_bpm > 0.0 && max_bpm > 0.0 && bpm > 0.0 {
        while bpm < min_bpm && bpm * 2.0 <= max_bpm {
            bpm *= 2.0;
            log::debug!("BPM doubled to {:.1} (was below minimum {})", bpm, min_bpm);
        }
        while bpm > max_bpm && bpm / 2.0 >= min_bpm {
            bpm /= 2.0;
            log::debug!("BPM halved to {:.1} (was above maximum {})", bpm, max_bpm);
        }
    }
    bpm
}

/// Map stratum-dsp Key to our MusicalKey enum
fn map_stratum_key(key: &stratum_dsp::Key) -> Result<MusicalKey> {
    parse_key_name(&key.name())
}

/// Parse names like "C# Major", "Ebm" or "a minor"
fn parse_key_name(name: &str) -> Result<MusicalKey> {
    let lower = name.trim().to_lowercase();
    let mut chars = lower.chars();

    let base = match chars.next() {
        Some('c') => 0,
        Some('d') => 2,
        Some('e') => 4,
        Some('f') => 5,
        Some('g') => 7,
        Some('a') => 9,
        Some('b') => 11,
        _ => anyhow::bail!("Unknown key: {}", name),
    };

    let rest: String = chars.collect();
    let (pitch, mode) = if let Some(r) = rest.strip_prefix('#') {
        (base + 1, r)
    } else if let Some(r) = rest.strip_prefix('b') {
        (base + 11, r)
    } else {
        (base, rest.as_str())
    };

    let mode = mode.trim();
    let minor = match mode {
        "" | "maj" | "major" => false,
        "m" | "min" | "minor" => true,
        _ => anyhow::bail!("Unknown key: {}", name),
    };

    Ok(MusicalKey::from_pitch_class(pitch % 12, minor))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_audio_rejected() {
        let result = analyze_samples(&[0.0; 100], 22050, 70.0, 170.0);
        let err = result.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AuralError>(),
            Some(AuralError::AudioTooShort { .. })
        ));
    }

    #[test]
    fn test_normalize_bpm() {
        assert_eq!(normalize_bpm(60.0, 70.0, 170.0), 120.0);
        assert_eq!(normalize_bpm(200.0, 70.0, 170.0), 100.0);
        assert_eq!(normalize_bpm(60.0, 0.0, 0.0), 60.0);
        assert_eq!(normalize_bpm(0.0, 70.0, 170.0), 0.0);
    }

    #[test]
    fn test_parse_key_names() {
        assert_eq!(parse_key_name("C Major").unwrap(), MusicalKey::CMajor);
        assert_eq!(parse_key_name("c#m").unwrap(), MusicalKey::CsMinor);
        assert_eq!(parse_key_name("Eb minor").unwrap(), MusicalKey::EbMinor);
        assert_eq!(parse_key_name("bb").unwrap(), MusicalKey::BbMajor);
        assert_eq!(parse_key_name("A").unwrap(), MusicalKey::AMajor);
        assert!(parse_key_name("H dorian").is_err());
    }
}
