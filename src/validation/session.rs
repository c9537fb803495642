//! Checks a finished session directory against its own summary

use crate::error::AuralError;
use crate::model::SessionSummary;
use crate::session::SessionOrganizer;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// What a successful validation looked at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionValidation {
    pub session_id: String,
    pub reports: usize,
    pub files_checked: usize,
}

/// Validate the session written to `session_dir`
///
/// `session_summary.json` must exist and parse, and every report it lists
/// must have its master report and human summary on disk.
pub fn validate_session(session_dir: &Path) -> Result<SessionValidation> {
    log::info!("Validating session at: {:?}", session_dir);

    let organizer = SessionOrganizer::new(session_dir.to_path_buf());
    let summary_path = organizer.session_summary_path();
    require(&summary_path)?;

    let text = fs::read_to_string(&summary_path)
        .with_context(|| format!("Failed to read {:?}", summary_path))?;
    let summary: SessionSummary = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse {:?}", summary_path))?;

    if summary.total_files_processed != summary.reports.len() {
        anyhow::bail!(
            "Session summary claims {} files but lists {} reports",
            summary.total_files_processed,
            summary.reports.len()
        );
    }

    let mut files_checked = 1;
    for report in &summary.reports {
        let audio = PathBuf::from(&report.aural_sentience_master_report.file_path);
        for path in [organizer.master_path(&audio), organizer.summary_path(&audio)] {
            require(&path)?;
            files_checked += 1;
        }
        log::debug!("✓ {:?}", audio.file_name().unwrap_or_default());
    }

    if summary.reports.len() > 1 {
        require(&organizer.comparative_path())?;
        files_checked += 1;
    }

    log::info!(
        "Session {} valid: {} reports, {} files checked",
        summary.session_id,
        summary.reports.len(),
        files_checked
    );

    Ok(SessionValidation {
        session_id: summary.session_id,
        reports: summary.reports.len(),
        files_checked,
    })
}

fn require(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(AuralError::MissingSessionFile(path.to_path_buf()).into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_summary_is_named() {
        let dir = TempDir::new().unwrap();
        let err = validate_session(dir.path()).unwrap_err();
        match err.downcast_ref::<AuralError>() {
            Some(AuralError::MissingSessionFile(p)) => assert!(p.ends_with("session_summary.json")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_empty_session_is_valid() {
        let dir = TempDir::new().unwrap();
        let summary = SessionSummary {
            session_id: "20250101_000000".to_string(),
            timestamp: "2025-01-01T00:00:00+00:00".to_string(),
            total_files_processed: 0,
            output_directory: dir.path().to_string_lossy().into_owned(),
            system_philosophy: String::new(),
            reports: vec![],
        };
        fs::write(
            dir.path().join("session_summary.json"),
            serde_json::to_string_pretty(&summary).unwrap(),
        )
        .unwrap();

        let result = validate_session(dir.path()).unwrap();
        assert_eq!(result.reports, 0);
        assert_eq!(result.files_checked, 1);
    }

    #[test]
    fn test_corrupt_summary_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("session_summary.json"), "{ not json").unwrap();
        assert!(validate_session(dir.path()).is_err());
    }
}
