//! Session directory layout and file naming

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Owns every path a session writes to
pub struct SessionOrganizer {
    session_dir: PathBuf,
}

impl SessionOrganizer {
    pub fn new(session_dir: PathBuf) -> Self {
        Self { session_dir }
    }

    /// Create the session directory
    pub fn init(&self) -> Result<()> {
        fs::create_dir_all(&self.session_dir)
            .with_context(|| format!("Failed to create session directory: {:?}", self.session_dir))?;
        log::info!("Session directory: {:?}", self.session_dir);
        Ok(())
    }

    pub fn session_dir(&self) -> &Path {
        &self.session_dir
    }

    pub fn technical_path(&self, audio: &Path) -> PathBuf {
        self.per_file(audio, "_technical_analysis.json")
    }

    pub fn poetic_path(&self, audio: &Path) -> PathBuf {
        self.per_file(audio, "_poetic_interpretation.json")
    }

    pub fn master_path(&self, audio: &Path) -> PathBuf {
        self.per_file(audio, "_master_report.json")
    }

    pub fn summary_path(&self, audio: &Path) -> PathBuf {
        self.per_file(audio, "_human_summary.md")
    }

    pub fn visualization_path(&self, audio: &Path) -> PathBuf {
        self.per_file(audio, "_aural_sentience.png")
    }

    pub fn resonance_report_path(&self, audio: &Path) -> PathBuf {
        self.per_file(audio, "_resonance_report.json")
    }

    pub fn comparative_path(&self) -> PathBuf {
        self.session_dir.join("comparative_analysis.json")
    }

    pub fn session_summary_path(&self) -> PathBuf {
        self.session_dir.join("session_summary.json")
    }

    pub fn combined_field_path(&self) -> PathBuf {
        self.session_dir.join("combined_resonance_field.json")
    }

    /// Pretty JSON to `path`
    pub fn write_json<T: Serialize>(&self, path: &Path, value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
        log::debug!("Wrote {:?}", path);
        Ok(())
    }

    fn per_file(&self, audio: &Path, suffix: &str) -> PathBuf {
        self.session_dir
            .join(format!("{}{}", base_name(audio), suffix))
    }
}

/// File name without directory or extension
pub fn base_name(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "audio".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_per_file_names() {
        let org = SessionOrganizer::new(PathBuf::from("/s"));
        let audio = Path::new("/music/Gods Are Risin.mp3");
        assert_eq!(
            org.technical_path(audio),
            PathBuf::from("/s/Gods Are Risin_technical_analysis.json")
        );
        assert_eq!(
            org.summary_path(audio),
            PathBuf::from("/s/Gods Are Risin_human_summary.md")
        );
        assert_eq!(
            org.visualization_path(audio),
            PathBuf::from("/s/Gods Are Risin_aural_sentience.png")
        );
        assert_eq!(org.session_summary_path(), PathBuf::from("/s/session_summary.json"));
    }
}
