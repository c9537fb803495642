//! Session configuration

use std::path::{Path, PathBuf};

/// Settings for one analysis session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Directory the session folder is created under
    pub output_root: PathBuf,

    /// Timestamp id, `%Y%m%d_%H%M%S`
    pub session_id: String,

    /// Whether to render the per-file overview PNG
    pub render_visuals: bool,

    /// Whether technical reports carry the personal vault section
    pub include_vault: bool,
}

impl SessionConfig {
    /// New session stamped with the current local time
    pub fn new(output_root: PathBuf) -> Self {
        Self {
            output_root,
            session_id: chrono::Local::now().format("%Y%m%d_%H%M%S").to_string(),
            render_visuals: true,
            include_vault: true,
        }
    }

    /// Use a fixed session id instead of the current time
    pub fn with_session_id(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = session_id.into();
        self
    }

    pub fn with_visuals(mut self, render: bool) -> Self {
        self.render_visuals = render;
        self
    }

    pub fn with_vault(mut self, include: bool) -> Self {
        self.include_vault = include;
        self
    }

    /// `<output_root>/aural_sentience_session_<id>`
    pub fn session_dir(&self) -> PathBuf {
        session_dir_for(&self.output_root, &self.session_id)
    }
}

pub(crate) fn session_dir_for(root: &Path, session_id: &str) -> PathBuf {
    root.join(format!("aural_sentience_session_{}", session_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_id_shape() {
        let config = SessionConfig::new(PathBuf::from("/tmp"));
        assert_eq!(config.session_id.len(), 15);
        assert_eq!(config.session_id.as_bytes()[8], b'_');
    }

    #[test]
    fn test_session_dir() {
        let config = SessionConfig::new(PathBuf::from("/out")).with_session_id("20250101_120000");
        assert_eq!(
            config.session_dir(),
            PathBuf::from("/out/aural_sentience_session_20250101_120000")
        );
    }
}
