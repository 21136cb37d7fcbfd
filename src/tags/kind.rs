use std::fmt;
use std::path::Path;

/// Audio file family, which decides the tag schema used for lyrics.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ContainerKind {
    /// Vorbis comments, `LYRICS` key.
    Flac,
    /// iTunes-style atoms, `©lyr`.
    Mp4,
    /// ID3v2, `USLT` frame.
    Mp3,
    /// A known audio container without a native lyrics field we write to.
    /// Metadata can still be read, writes go through the transcoder.
    Generic,
    Unsupported,
}

const GENERIC_EXTENSIONS: &[&str] = &["wav", "ogg", "aac", "wma", "alac", "opus"];

impl ContainerKind {
    pub fn from_path(path: &Path) -> Self {
        path.extension()
            .and_then(|s| s.to_str())
            .map(|ext| Self::from_extension(&ext.to_ascii_lowercase()))
            .unwrap_or(Self::Unsupported)
    }

    fn from_extension(ext: &str) -> Self {
        match ext {
            "flac" => Self::Flac,
            "m4a" | "mp4" => Self::Mp4,
            "mp3" => Self::Mp3,
            e if GENERIC_EXTENSIONS.contains(&e) => Self::Generic,
            _ => Self::Unsupported,
        }
    }

    /// Whether lyrics are written into the file itself rather than a converted copy.
    pub fn is_native(self) -> bool {
        matches!(self, Self::Flac | Self::Mp4 | Self::Mp3)
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Flac => "flac",
            Self::Mp4 => "mp4",
            Self::Mp3 => "mp3",
            Self::Generic => "generic",
            Self::Unsupported => "unsupported",
        };
        f.write_str(name)
    }
}
