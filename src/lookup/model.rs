use serde::Deserialize;

/// What to ask the lyrics service for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupQuery {
    pub artist: String,
    pub title: String,
    /// Disambiguation hint, passed through untouched when present.
    pub duration_secs: Option<u32>,
}

impl LookupQuery {
    pub fn new(artist: impl Into<String>, title: impl Into<String>, duration_secs: Option<u32>) -> Self {
        Self {
            artist: artist.into(),
            title: title.into(),
            duration_secs,
        }
    }

    /// Build a query only when both artist and title are known.
    pub fn from_parts(artist: Option<&str>, title: Option<&str>, duration_secs: Option<u32>) -> Option<Self> {
        let artist = artist.map(str::trim).filter(|s| !s.is_empty())?;
        let title = title.map(str::trim).filter(|s| !s.is_empty())?;
        Some(Self::new(artist, title, duration_secs))
    }

    /// Queries missing artist or title are never sent.
    pub fn is_empty(&self) -> bool {
        self.artist.trim().is_empty() || self.title.trim().is_empty()
    }

    pub(crate) fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("track_name", self.title.clone()),
            ("artist_name", self.artist.clone()),
        ];
        if let Some(d) = self.duration_secs.filter(|d| *d > 0) {
            params.push(("duration", d.to_string()));
        }
        params
    }
}

/// Lyrics returned by a lookup. Synced lyrics win when both are offered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupResult {
    Synced(String),
    Plain(String),
    NotFound,
}

impl LookupResult {
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Synced(s) | Self::Plain(s) => Some(s),
            Self::NotFound => None,
        }
    }

    pub fn into_text(self) -> Option<String> {
        match self {
            Self::Synced(s) | Self::Plain(s) => Some(s),
            Self::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        !matches!(self, Self::NotFound)
    }
}

/// One track record as served by `/get` and `/search`. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct LyricsRecord {
    #[serde(default)]
    pub synced_lyrics: Option<String>,
    #[serde(default)]
    pub plain_lyrics: Option<String>,
}

impl LyricsRecord {
    pub fn has_synced(&self) -> bool {
        self.synced_lyrics.as_deref().is_some_and(|s| !s.is_empty())
    }

    pub fn into_result(self) -> LookupResult {
        let non_empty = |s: Option<String>| s.filter(|s| !s.is_empty());
        if let Some(synced) = non_empty(self.synced_lyrics) {
            LookupResult::Synced(synced)
        } else if let Some(plain) = non_empty(self.plain_lyrics) {
            LookupResult::Plain(plain)
        } else {
            LookupResult::NotFound
        }
    }
}
