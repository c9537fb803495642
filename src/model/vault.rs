use serde::{Deserialize, Serialize};

/// A listener's private note about a moment in a track
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Association {
    /// Position in the track, seconds
    pub timestamp: f32,
    pub description: String,
    #[serde(default)]
    pub feeling_category: Option<String>,
    /// ISO-8601 time the note was stored
    pub added_date: String,
}

/// Result of a keyword search across the vault
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AssociationMatch {
    pub file: String,
    pub association: Association,
}
