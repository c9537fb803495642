//! Track metadata via lofty

use crate::model::TrackInfo;
use lofty::prelude::*;
use std::path::Path;

/// Read title/artist/album/duration from the file's tags
///
/// Never fails: unreadable tags fall back to the file stem as the title.
pub fn read_track_info(path: &Path) -> TrackInfo {
    let fallback_title = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "Unknown".to_string());

    let mut info = TrackInfo {
        title: fallback_title,
        artist: None,
        album: None,
        duration_secs: None,
    };

    let tagged = match lofty::read_from_path(path) {
        Ok(t) => t,
        Err(e) => {
            log::debug!("No readable tags for {:?}: {}", path, e);
            return info;
        }
    };

    let duration = tagged.properties().duration();
    if !duration.is_zero() {
        info.duration_secs = Some(duration.as_secs_f32());
    }

    if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
        if let Some(title) = tag.title() {
            if !title.trim().is_empty() {
                info.title = title.into_owned();
            }
        }
        info.artist = tag.artist().map(|a| a.into_owned());
        info.album = tag.album().map(|a| a.into_owned());
    }

    info
}
