//! Personal association vault
//!
//! A flat JSON object mapping a file's basename to the listener's notes about
//! it. Every change is written back immediately.

use crate::model::{Association, AssociationMatch};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Default vault location, before `~` expansion
pub const DEFAULT_VAULT_PATH: &str = "~/.local/share/aural-sentience/personal_vault.json";

pub struct PersonalVault {
    path: PathBuf,
    associations: BTreeMap<String, Vec<Association>>,
}

impl PersonalVault {
    /// Open the vault at `path`, starting empty when the file does not exist
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let associations = if path.exists() {
            let text = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read vault: {:?}", path))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse vault: {:?}", path))?
        } else {
            log::debug!("No vault at {:?}, starting empty", path);
            BTreeMap::new()
        };

        Ok(Self { path, associations })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self) -> Result<()> {
        write_vault(&self.path, &self.associations)
    }

    /// Store a note about `audio_file` at `timestamp` seconds and save
    ///
    /// The note is kept in memory only once the file was written.
    pub fn add_association(
        &mut self,
        audio_file: &Path,
        timestamp: f32,
        description: &str,
        feeling_category: Option<&str>,
    ) -> Result<()> {
        let association = Association {
            timestamp,
            description: description.to_string(),
            feeling_category: feeling_category.map(str::to_string),
            added_date: chrono::Local::now().to_rfc3339(),
        };

        let mut updated = self.associations.clone();
        updated
            .entry(file_key(audio_file))
            .or_default()
            .push(association);
        write_vault(&self.path, &updated)?;
        self.associations = updated;
        Ok(())
    }

    /// Notes stored for a file, matched by basename
    pub fn get_associations(&self, audio_file: &Path) -> Vec<Association> {
        self.associations
            .get(&file_key(audio_file))
            .cloned()
            .unwrap_or_default()
    }

    /// Notes whose description contains any keyword, case-insensitively
    pub fn find_similar_associations(&self, keywords: &[String]) -> Vec<AssociationMatch> {
        let keywords: Vec<String> = keywords.iter().map(|k| k.to_lowercase()).collect();
        let mut matches = Vec::new();

        for (file, notes) in &self.associations {
            for note in notes {
                let description = note.description.to_lowercase();
                if keywords.iter().any(|k| description.contains(k.as_str())) {
                    matches.push(AssociationMatch {
                        file: file.clone(),
                        association: note.clone(),
                    });
                }
            }
        }
        matches
    }

    /// Every stored file key with its notes
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Vec<Association>)> {
        self.associations.iter()
    }
}

fn write_vault(path: &Path, associations: &BTreeMap<String, Vec<Association>>) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create vault directory: {:?}", parent))?;
    }
    let json = serde_json::to_string_pretty(associations)?;
    fs::write(path, json).with_context(|| format!("Failed to write vault: {:?}", path))?;
    Ok(())
}

fn file_key(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.to_string_lossy().into_owned())
}
