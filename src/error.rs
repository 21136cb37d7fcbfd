use std::path::PathBuf;

/// Failures raised by a tag adapter or the transcoder while touching one file.
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("tag library: {0}")]
    Lofty(#[from] lofty::error::LoftyError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    /// The container refused a tag of the required type.
    #[error("{0}")]
    Unsupported(String),
    #[error("transcoder `{program}` failed: {reason}")]
    Transcode { program: String, reason: String },
}

/// Failures of a single remote request. Never surfaced past the lookup client.
#[derive(Debug, thiserror::Error)]
pub enum LookupError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("unexpected status {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Transport(String),
}

/// Errors handed to callers of the embedding API.
#[derive(Debug, thiserror::Error)]
pub enum EmbedError {
    #[error("directory does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("failed to read lyrics from {}: {source}", path.display())]
    ReadLyrics {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to embed lyrics into {}: {source}", path.display())]
    Embed {
        path: PathBuf,
        #[source]
        source: TagError,
    },
    #[error("no lyrics found for {artist} - {title}")]
    LyricsNotFound { artist: String, title: String },
    #[error("missing artist/title for {}", .0.display())]
    MissingMetadata(PathBuf),
    #[error("resolution cancelled for {}", .0.display())]
    Cancelled(PathBuf),
    #[error("lookup client: {0}")]
    Client(#[from] LookupError),
    #[error("invalid configuration: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl EmbedError {
    pub(crate) fn embed(path: impl Into<PathBuf>, source: TagError) -> Self {
        Self::Embed {
            path: path.into(),
            source,
        }
    }
}
