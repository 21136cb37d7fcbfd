use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::{AudioFile, TaggedFile, TaggedFileExt};
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag, TagExt, TagType};

use crate::error::TagError;

use super::kind::ContainerKind;
use super::transcode::Transcoder;

/// Identifying metadata used to query the lyrics service.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackMetadata {
    pub artist: Option<String>,
    pub title: Option<String>,
    pub duration_secs: Option<u32>,
}

/// Per-format lyrics capability.
pub trait TagAdapter {
    /// Whether the file already carries lyrics. Unreadable files report `false`.
    fn has_embedded_lyrics(&self, path: &Path) -> bool;

    /// Store `lyrics` verbatim. Returns the path of a newly produced file when
    /// the original could not be tagged in place.
    fn write_lyrics(&self, path: &Path, lyrics: &str) -> Result<Option<PathBuf>, TagError>;

    /// Read artist, title and duration. Read failures yield empty metadata.
    fn read_metadata(&self, path: &Path) -> TrackMetadata;
}

/// FLAC: Vorbis comment `LYRICS`.
pub struct FlacAdapter;

/// MP4/M4A: `©lyr` atom.
pub struct Mp4Adapter;

/// MP3: ID3v2 `USLT` frame, written as ID3v2.3.
pub struct Id3Adapter;

/// Any other container. Metadata comes from whatever tag lofty finds;
/// lyrics are written into an MP3 conversion of the file.
pub struct FallbackAdapter {
    transcoder: Transcoder,
}

impl TagAdapter for FlacAdapter {
    fn has_embedded_lyrics(&self, path: &Path) -> bool {
        native_tag(path, TagType::VorbisComments)
            .is_some_and(|tag| tag.get(&ItemKey::Lyrics).is_some())
    }

    fn write_lyrics(&self, path: &Path, lyrics: &str) -> Result<Option<PathBuf>, TagError> {
        ensure_flac_has_room(path)?;
        write_native(path, TagType::VorbisComments, lyrics, WriteOptions::default())?;
        Ok(None)
    }

    fn read_metadata(&self, path: &Path) -> TrackMetadata {
        read_native(path, Some(TagType::VorbisComments))
    }
}

impl TagAdapter for Mp4Adapter {
    fn has_embedded_lyrics(&self, path: &Path) -> bool {
        native_tag(path, TagType::Mp4Ilst).is_some_and(|tag| tag.get(&ItemKey::Lyrics).is_some())
    }

    fn write_lyrics(&self, path: &Path, lyrics: &str) -> Result<Option<PathBuf>, TagError> {
        write_native(path, TagType::Mp4Ilst, lyrics, WriteOptions::default())?;
        Ok(None)
    }

    fn read_metadata(&self, path: &Path) -> TrackMetadata {
        read_native(path, Some(TagType::Mp4Ilst))
    }
}

impl TagAdapter for Id3Adapter {
    fn has_embedded_lyrics(&self, path: &Path) -> bool {
        native_tag(path, TagType::Id3v2)
            .and_then(|tag| tag.get_string(&ItemKey::Lyrics).map(|s| !s.trim().is_empty()))
            .unwrap_or(false)
    }

    fn write_lyrics(&self, path: &Path, lyrics: &str) -> Result<Option<PathBuf>, TagError> {
        write_native(
            path,
            TagType::Id3v2,
            lyrics,
            WriteOptions::default().use_id3v23(true),
        )?;
        Ok(None)
    }

    fn read_metadata(&self, path: &Path) -> TrackMetadata {
        read_native(path, Some(TagType::Id3v2))
    }
}

impl FallbackAdapter {
    pub fn new(transcoder: Transcoder) -> Self {
        Self { transcoder }
    }
}

impl TagAdapter for FallbackAdapter {
    fn has_embedded_lyrics(&self, _path: &Path) -> bool {
        false
    }

    fn write_lyrics(&self, path: &Path, lyrics: &str) -> Result<Option<PathBuf>, TagError> {
        let converted = self.transcoder.convert(path)?;
        Id3Adapter.write_lyrics(&converted, lyrics)?;
        Ok(Some(converted))
    }

    fn read_metadata(&self, path: &Path) -> TrackMetadata {
        read_native(path, None)
    }
}

/// Picks the adapter for a file.
pub struct TagAdapters {
    fallback: FallbackAdapter,
}

impl TagAdapters {
    pub fn new(transcoder: Transcoder) -> Self {
        Self {
            fallback: FallbackAdapter::new(transcoder),
        }
    }

    pub fn for_kind(&self, kind: ContainerKind) -> &dyn TagAdapter {
        match kind {
            ContainerKind::Flac => &FlacAdapter,
            ContainerKind::Mp4 => &Mp4Adapter,
            ContainerKind::Mp3 => &Id3Adapter,
            ContainerKind::Generic | ContainerKind::Unsupported => &self.fallback,
        }
    }

    pub fn for_path(&self, path: &Path) -> &dyn TagAdapter {
        self.for_kind(ContainerKind::from_path(path))
    }
}

fn open(path: &Path, read_properties: bool) -> Result<TaggedFile, TagError> {
    let mut probe = Probe::open(path)?;
    if probe.file_type().is_none() {
        probe = probe.guess_file_type()?;
    }
    let tagged = probe
        .options(ParseOptions::new().read_properties(read_properties))
        .read()?;
    Ok(tagged)
}

/// lofty cannot insert a comment block after a STREAMINFO that is flagged as
/// the last metadata block (it panics while rewriting the block chain).
fn ensure_flac_has_room(path: &Path) -> Result<(), TagError> {
    let mut head = [0u8; 5];
    if File::open(path)?.read_exact(&mut head).is_err() {
        // Too short to judge; lofty reports the real problem.
        return Ok(());
    }
    if &head[..4] == b"fLaC" && head[4] & 0x80 != 0 {
        return Err(TagError::Unsupported(
            "FLAC has no metadata block after STREAMINFO to hold lyrics".to_string(),
        ));
    }
    Ok(())
}

fn native_tag(path: &Path, tag_type: TagType) -> Option<Tag> {
    match open(path, false) {
        Ok(tagged) => tagged.tag(tag_type).cloned(),
        Err(e) => {
            tracing::debug!("cannot inspect {}: {e}", path.display());
            None
        }
    }
}

fn write_native(
    path: &Path,
    tag_type: TagType,
    lyrics: &str,
    options: WriteOptions,
) -> Result<(), TagError> {
    let mut tagged = open(path, false)?;

    if tagged.tag(tag_type).is_none() {
        tagged.insert_tag(Tag::new(tag_type));
    }
    let tag = tagged.tag_mut(tag_type).ok_or_else(|| {
        TagError::Unsupported(format!("unable to create a {tag_type:?} tag"))
    })?;

    if !tag.insert_text(ItemKey::Lyrics, lyrics.to_string()) {
        return Err(TagError::Unsupported(format!(
            "{tag_type:?} tags cannot hold lyrics"
        )));
    }

    tag.save_to_path(path, options)?;
    Ok(())
}

/// `tag_type = None` takes the primary tag, else the first one found.
fn read_native(path: &Path, tag_type: Option<TagType>) -> TrackMetadata {
    let tagged = match open(path, true) {
        Ok(t) => t,
        Err(e) => {
            tracing::debug!("cannot read tags of {}: {e}", path.display());
            return TrackMetadata::default();
        }
    };

    let secs = tagged.properties().duration().as_secs();
    let duration_secs = u32::try_from(secs).ok().filter(|s| *s > 0);

    let tag = match tag_type {
        Some(t) => tagged.tag(t),
        None => tagged.primary_tag().or_else(|| tagged.first_tag()),
    };

    let text = |key: &ItemKey| {
        tag.and_then(|t| t.get_string(key))
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    TrackMetadata {
        artist: text(&ItemKey::TrackArtist),
        title: text(&ItemKey::TrackTitle),
        duration_secs,
    }
}
