use serde::{Deserialize, Serialize};

/// Tag metadata for an analysed audio file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackInfo {
    /// Track title (file stem when untagged)
    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub artist: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,

    /// Duration reported by the container, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<f32>,
}

/// Musical key detected by stratum-dsp
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicalKey {
    CMajor,
    DbMajor,
    DMajor,
    EbMajor,
    EMajor,
    FMajor,
    GbMajor,
    GMajor,
    AbMajor,
    AMajor,
    BbMajor,
    BMajor,
    CMinor,
    CsMinor,
    DMinor,
    EbMinor,
    EMinor,
    FMinor,
    FsMinor,
    GMinor,
    AbMinor,
    AMinor,
    BbMinor,
    BMinor,
}

impl MusicalKey {
    const MAJOR: [MusicalKey; 12] = [
        MusicalKey::CMajor,
        MusicalKey::DbMajor,
        MusicalKey::DMajor,
        MusicalKey::EbMajor,
        MusicalKey::EMajor,
        MusicalKey::FMajor,
        MusicalKey::GbMajor,
        MusicalKey::GMajor,
        MusicalKey::AbMajor,
        MusicalKey::AMajor,
        MusicalKey::BbMajor,
        MusicalKey::BMajor,
    ];

    const MINOR: [MusicalKey; 12] = [
        MusicalKey::CMinor,
        MusicalKey::CsMinor,
        MusicalKey::DMinor,
        MusicalKey::EbMinor,
        MusicalKey::EMinor,
        MusicalKey::FMinor,
        MusicalKey::FsMinor,
        MusicalKey::GMinor,
        MusicalKey::AbMinor,
        MusicalKey::AMinor,
        MusicalKey::BbMinor,
        MusicalKey::BMinor,
    ];

    /// Key from a pitch class (C=0) and mode
    pub fn from_pitch_class(pitch_class: u32, minor: bool) -> Self {
        let idx = (pitch_class % 12) as usize;
        if minor {
            Self::MINOR[idx]
        } else {
            Self::MAJOR[idx]
        }
    }

    /// Tonic pitch class, C=0
    pub fn pitch_class(&self) -> u32 {
        let pos = Self::MAJOR
            .iter()
            .position(|k| k == self)
            .or_else(|| Self::MINOR.iter().position(|k| k == self));
        pos.unwrap_or(0) as u32
    }

    pub fn is_minor(&self) -> bool {
        Self::MINOR.contains(self)
    }

    /// "C Major", "C# Minor", ...
    pub fn name(&self) -> &'static str {
        let pc = self.pitch_class() as usize;
        if self.is_minor() {
            MINOR_NAMES[pc]
        } else {
            MAJOR_NAMES[pc]
        }
    }
}

const MAJOR_NAMES: [&str; 12] = [
    "C Major", "Db Major", "D Major", "Eb Major", "E Major", "F Major", "Gb Major", "G Major",
    "Ab Major", "A Major", "Bb Major", "B Major",
];

const MINOR_NAMES: [&str; 12] = [
    "C Minor", "C# Minor", "D Minor", "Eb Minor", "E Minor", "F Minor", "F# Minor", "G Minor",
    "Ab Minor", "A Minor", "Bb Minor", "B Minor",
];
