use std::path::{Path, PathBuf};

use super::adapter::{TagAdapters, TrackMetadata};
use super::kind::ContainerKind;

/// What is known about one audio file for the duration of a pipeline run.
#[derive(Debug, Clone)]
pub struct AudioTrack {
    pub path: PathBuf,
    pub kind: ContainerKind,
    pub metadata: TrackMetadata,
    pub has_lyrics: bool,
}

impl AudioTrack {
    pub fn load(path: &Path, adapters: &TagAdapters) -> Self {
        let kind = ContainerKind::from_path(path);
        let adapter = adapters.for_kind(kind);
        Self {
            path: path.to_path_buf(),
            kind,
            metadata: adapter.read_metadata(path),
            has_lyrics: adapter.has_embedded_lyrics(path),
        }
    }

    pub fn file_name(&self) -> String {
        file_name(&self.path)
    }
}

pub(crate) fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
