use serde::{Deserialize, Serialize};

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/lrcput/config.toml` or `~/.config/lrcput/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `LRCPUT__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub lookup: LookupSettings,
    pub transcode: TranscodeSettings,
    pub library: LibrarySettings,
    pub embed: EmbedSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LookupSettings {
    /// Base URL of the LRCLib-compatible API (without trailing `/get`).
    pub base_url: String,
    /// Per-request timeout, applied to each of the get and search steps.
    pub timeout_secs: u64,
}

impl Default for LookupSettings {
    fn default() -> Self {
        Self {
            base_url: "https://lrclib.net/api".to_string(),
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TranscodeSettings {
    /// Executable used to convert containers without a lyrics field to MP3.
    pub program: String,
    /// Appended to the input stem to name the converted sibling file.
    pub suffix: String,
}

impl Default for TranscodeSettings {
    fn default() -> Self {
        Self {
            program: "ffmpeg".to_string(),
            suffix: "_converted".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Extensions scanned when embedding companion lyric files (case-insensitive, without dot).
    pub local_extensions: Vec<String>,
    /// Extensions scanned when looking lyrics up remotely.
    pub lookup_extensions: Vec<String>,
    /// Extension of companion lyric files.
    pub lyrics_extension: String,
    /// Whether to follow symlinks during scanning.
    pub follow_links: bool,
    /// Whether to include hidden files/directories (dotfiles).
    pub include_hidden: bool,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            local_extensions: vec!["flac".into(), "mp3".into(), "m4a".into()],
            lookup_extensions: vec![
                "flac".into(),
                "mp3".into(),
                "m4a".into(),
                "wav".into(),
                "ogg".into(),
                "aac".into(),
                "wma".into(),
                "alac".into(),
            ],
            lyrics_extension: "lrc".to_string(),
            follow_links: true,
            include_hidden: true,
        }
    }
}

/// Defaults for the batch flags. Command-line flags can only switch these on.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct EmbedSettings {
    pub skip_existing: bool,
    /// Remove the companion lyric file after a successful embed.
    pub reduce_lrc: bool,
    pub recursive: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct UiSettings {
    /// Draw a progress bar during batch runs.
    pub progress: bool,
    /// Ask for artist/title of deferred files once the scan is over.
    pub prompt: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            progress: true,
            prompt: true,
        }
    }
}
