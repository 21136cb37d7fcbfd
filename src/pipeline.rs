//! Per-file embedding: detect, source lyrics, write, report.

mod model;

use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub use model::{EmbedOptions, FileStatus, LyricsMode, Outcome};

use crate::config::Settings;
use crate::error::EmbedError;
use crate::filename;
use crate::lookup::{LookupQuery, LookupResult, LyricsLookup, LyricsLookupClient};
use crate::resolver::ResolveRequest;
use crate::tags::{AudioTrack, TagAdapters, TrackMetadata, Transcoder, file_name};

pub struct EmbeddingPipeline {
    adapters: TagAdapters,
    lookup: Box<dyn LyricsLookup>,
    lyrics_extension: String,
}

impl EmbeddingPipeline {
    pub fn new(adapters: TagAdapters, lookup: Box<dyn LyricsLookup>, lyrics_extension: &str) -> Self {
        Self {
            adapters,
            lookup,
            lyrics_extension: lyrics_extension.trim_start_matches('.').to_string(),
        }
    }

    pub fn from_settings(settings: &Settings) -> Result<Self, EmbedError> {
        let client = LyricsLookupClient::from_settings(&settings.lookup)?;
        Ok(Self::new(
            TagAdapters::new(Transcoder::new(&settings.transcode)),
            Box::new(client),
            &settings.library.lyrics_extension,
        ))
    }

    pub fn adapters(&self) -> &TagAdapters {
        &self.adapters
    }

    /// `<dir>/<stem>.lrc` next to `audio`.
    pub fn companion_path(&self, audio: &Path) -> PathBuf {
        audio.with_extension(&self.lyrics_extension)
    }

    pub fn run(&self, audio: &Path, mode: LyricsMode, options: EmbedOptions) -> Outcome {
        match mode {
            LyricsMode::Local => self.run_local(audio, options),
            LyricsMode::Remote => self.run_remote(audio, options),
        }
    }

    fn run_local(&self, audio: &Path, options: EmbedOptions) -> Outcome {
        let name = file_name(audio);
        let lrc = self.companion_path(audio);
        if !lrc.is_file() {
            tracing::debug!("no lyrics file for {name}");
            return Outcome::NotCandidate;
        }

        if options.skip_existing && self.adapters.for_path(audio).has_embedded_lyrics(audio) {
            tracing::info!("already has embedded lyrics: {name}");
            return Outcome::Skipped;
        }

        let result = read_lyrics(&lrc).and_then(|text| self.write(audio, &text));
        match result {
            Ok(output) => {
                tracing::info!("embedded lyrics for {name}");
                if options.reduce_lrc {
                    match fs::remove_file(&lrc) {
                        Ok(()) => tracing::info!("removed {}", lrc.display()),
                        Err(e) => tracing::warn!("could not remove {}: {e}", lrc.display()),
                    }
                }
                Outcome::Embedded { output }
            }
            Err(e) => {
                tracing::error!("embedding lyrics for {name} failed: {e}");
                mark_failed(&lrc);
                Outcome::Failed(e)
            }
        }
    }

    fn run_remote(&self, audio: &Path, options: EmbedOptions) -> Outcome {
        let track = AudioTrack::load(audio, &self.adapters);
        let name = track.file_name();

        if options.skip_existing && track.has_lyrics {
            tracing::info!("already has embedded lyrics: {name}");
            return Outcome::Skipped;
        }

        let meta = with_filename_fallback(audio, track.metadata);
        let Some(query) =
            LookupQuery::from_parts(meta.artist.as_deref(), meta.title.as_deref(), meta.duration_secs)
        else {
            tracing::warn!("missing tags for {name}, deferring to manual input");
            return Outcome::Deferred(ResolveRequest {
                path: track.path,
                suggested_artist: meta.artist,
                suggested_title: meta.title,
            });
        };

        tracing::info!(
            "looking up artist={:?} title={:?} duration={:?} for {name}",
            query.artist,
            query.title,
            query.duration_secs
        );
        let Some(lyrics) = self.lookup.lookup(&query).into_text() else {
            tracing::warn!("no lyrics found for {name}");
            return Outcome::Failed(EmbedError::LyricsNotFound {
                artist: query.artist,
                title: query.title,
            });
        };

        match self.write(audio, &lyrics) {
            Ok(output) => {
                tracing::info!("embedded lyrics for {name}");
                Outcome::Embedded { output }
            }
            Err(e) => {
                tracing::error!("embedding lyrics for {name} failed: {e}");
                Outcome::Failed(e)
            }
        }
    }

    /// Tags first, then the file name for whatever is still missing.
    pub fn identify(&self, audio: &Path) -> TrackMetadata {
        let meta = self.adapters.for_path(audio).read_metadata(audio);
        with_filename_fallback(audio, meta)
    }

    pub fn lookup(&self, query: &LookupQuery) -> LookupResult {
        self.lookup.lookup(query)
    }

    /// Look lyrics up for an artist/title supplied by the operator and embed them.
    pub fn embed_resolved(
        &self,
        audio: &Path,
        artist: &str,
        title: &str,
    ) -> Result<Option<PathBuf>, EmbedError> {
        let query = LookupQuery::from_parts(Some(artist), Some(title), None)
            .ok_or_else(|| EmbedError::MissingMetadata(audio.to_path_buf()))?;
        let lyrics = self
            .lookup
            .lookup(&query)
            .into_text()
            .ok_or(EmbedError::LyricsNotFound {
                artist: query.artist.clone(),
                title: query.title.clone(),
            })?;
        self.write(audio, &lyrics)
    }

    /// Write lyrics through the adapter for `audio`.
    pub fn write(&self, audio: &Path, lyrics: &str) -> Result<Option<PathBuf>, EmbedError> {
        self.adapters
            .for_path(audio)
            .write_lyrics(audio, lyrics)
            .map_err(|e| EmbedError::embed(audio, e))
    }
}

pub(crate) fn read_lyrics(path: &Path) -> Result<String, EmbedError> {
    fs::read_to_string(path).map_err(|source| EmbedError::ReadLyrics {
        path: path.to_path_buf(),
        source,
    })
}

fn with_filename_fallback(audio: &Path, mut meta: TrackMetadata) -> TrackMetadata {
    if meta.artist.is_some() && meta.title.is_some() {
        return meta;
    }
    let (artist, title) = filename::parse(&audio.to_string_lossy());
    let artist = artist.filter(|s| !s.is_empty());
    let title = Some(title).filter(|s| !s.is_empty());
    if artist.is_some() || title.is_some() {
        tracing::info!(
            "using file name for tags: artist={artist:?}, title={title:?} for {}",
            file_name(audio)
        );
    }
    meta.artist = meta.artist.or(artist);
    meta.title = meta.title.or(title);
    meta
}

/// Rename `x.lrc` to `x.lrc.failed` so the next run does not retry it.
fn mark_failed(lrc: &Path) {
    if !lrc.exists() {
        return;
    }
    let mut marked = OsString::from(lrc.as_os_str());
    marked.push(".failed");
    if let Err(e) = fs::rename(lrc, &marked) {
        tracing::warn!("could not mark {} as failed: {e}", lrc.display());
    }
}
