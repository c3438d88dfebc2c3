use rec_indicator_core::IconKind;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Icon image paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IconsConfig {
    /// Image shown while recording.
    pub recording: PathBuf,
    /// Image shown while paused.
    pub paused: PathBuf,
}

impl IconsConfig {
    /// Path of the image for an icon kind.
    pub fn path_for(&self, kind: IconKind) -> &Path {
        match kind {
            IconKind::Recording => &self.recording,
            IconKind::Paused => &self.paused,
        }
    }
}
