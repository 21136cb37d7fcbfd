//! Fixtures and fakes shared by unit tests.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fs;
use std::path::Path;
use std::rc::Rc;

use lofty::config::{ParseOptions, WriteOptions};
use lofty::file::TaggedFileExt;
use lofty::probe::Probe;
use lofty::tag::{ItemKey, Tag, TagExt, TagType};

use crate::config::TranscodeSettings;
use crate::lookup::{LookupQuery, LookupResult, LyricsLookup};
use crate::resolver::{InteractiveResolver, ResolveAnswer, ResolveRequest};
use crate::tags::Transcoder;

fn flac_bytes(padding: Option<u32>) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(42 + 4 + padding.unwrap_or(0) as usize);
    bytes.extend_from_slice(b"fLaC");
    // last-block flag (only without padding) | STREAMINFO, length 34
    let last = if padding.is_some() { 0x00 } else { 0x80 };
    bytes.extend_from_slice(&[last, 0x00, 0x00, 0x22]);
    // min/max block size
    bytes.extend_from_slice(&[0x10, 0x00, 0x10, 0x00]);
    // min/max frame size
    bytes.extend_from_slice(&[0x00; 6]);
    // sample rate(20) channels-1(3) bps-1(5) total samples(36)
    bytes.extend_from_slice(&[0x0A, 0xC4, 0x42, 0xF0, 0x00, 0x00, 0x00, 0x00]);
    // md5
    bytes.extend_from_slice(&[0x00; 16]);
    if let Some(len) = padding {
        // last-block flag | PADDING, 24-bit length
        let [_, a, b, c] = len.to_be_bytes();
        bytes.extend_from_slice(&[0x81, a, b, c]);
        bytes.resize(bytes.len() + len as usize, 0);
    }
    bytes
}

/// Smallest FLAC shaped like an encoder writes it: STREAMINFO (44.1kHz,
/// stereo, 16 bit, zero samples) followed by a PADDING block.
pub fn write_minimal_flac(path: &Path) {
    fs::write(path, flac_bytes(Some(1024))).unwrap();
}

/// FLAC whose only metadata block is STREAMINFO.
pub fn write_bare_flac(path: &Path) {
    fs::write(path, flac_bytes(None)).unwrap();
}

/// Four silent MPEG-1 Layer III frames (128 kbps, 44.1kHz), no tags.
pub fn write_minimal_mp3(path: &Path) {
    let mut bytes = Vec::with_capacity(4 * 417);
    for _ in 0..4 {
        let start = bytes.len();
        bytes.extend_from_slice(&[0xFF, 0xFB, 0x90, 0x64]);
        bytes.resize(start + 417, 0);
    }
    fs::write(path, bytes).unwrap();
}

fn atom(name: &[u8; 4], body: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + body.len());
    out.extend_from_slice(&(8 + body.len() as u32).to_be_bytes());
    out.extend_from_slice(name);
    out.extend_from_slice(body);
    out
}

/// `ftyp` plus a `moov` holding only `mvhd`: no `udta`/`meta`/`ilst` yet.
pub fn write_minimal_m4a(path: &Path) {
    let mut ftyp = Vec::new();
    ftyp.extend_from_slice(b"M4A ");
    ftyp.extend_from_slice(&[0, 0, 0, 0]);
    ftyp.extend_from_slice(b"M4A isom");

    let mut mvhd = Vec::with_capacity(100);
    // version 0, flags, creation, modification
    mvhd.extend_from_slice(&[0; 12]);
    // timescale 1000, duration 0
    mvhd.extend_from_slice(&1000u32.to_be_bytes());
    mvhd.extend_from_slice(&[0; 4]);
    // rate 1.0, volume 1.0, reserved
    mvhd.extend_from_slice(&[0x00, 0x01, 0x00, 0x00, 0x01, 0x00]);
    mvhd.extend_from_slice(&[0; 10]);
    // identity matrix
    for v in [0x0001_0000u32, 0, 0, 0, 0x0001_0000, 0, 0, 0, 0x4000_0000] {
        mvhd.extend_from_slice(&v.to_be_bytes());
    }
    // pre-defined, next track id
    mvhd.extend_from_slice(&[0; 24]);
    mvhd.extend_from_slice(&2u32.to_be_bytes());

    let mut bytes = atom(b"ftyp", &ftyp);
    bytes.extend(atom(b"moov", &atom(b"mvhd", &mvhd)));
    fs::write(path, bytes).unwrap();
}

/// Transcoder backed by a shell script that copies `source` to its last
/// argument, standing in for ffmpeg.
#[cfg(unix)]
pub fn copying_transcoder(dir: &Path, source: &Path) -> Transcoder {
    use std::os::unix::fs::PermissionsExt;

    let script = dir.join("fake-ffmpeg.sh");
    fs::write(
        &script,
        format!("#!/bin/sh\nfor last; do :; done\ncp '{}' \"$last\"\n", source.display()),
    )
    .unwrap();
    fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
    Transcoder::new(&TranscodeSettings {
        program: script.to_string_lossy().into_owned(),
        ..TranscodeSettings::default()
    })
}

/// Tag of `tag_type` stored in `path`, if any.
pub fn read_tag(path: &Path, tag_type: TagType) -> Option<Tag> {
    // Fixtures carry no audio tracks worth measuring.
    let tagged = Probe::open(path)
        .unwrap()
        .options(ParseOptions::new().read_properties(false))
        .read()
        .unwrap();
    tagged.tag(tag_type).cloned()
}

/// Lyrics stored in an ID3v2 tag, if any.
pub fn id3_lyrics(path: &Path) -> Option<String> {
    read_tag(path, TagType::Id3v2)
        .and_then(|t| t.get_string(&ItemKey::Lyrics).map(str::to_string))
}

/// Write artist/title Vorbis comments into an existing FLAC fixture.
pub fn tag_flac(path: &Path, artist: &str, title: &str) {
    let mut tagged = Probe::open(path).unwrap().read().unwrap();
    if tagged.tag(TagType::VorbisComments).is_none() {
        tagged.insert_tag(Tag::new(TagType::VorbisComments));
    }
    let tag = tagged.tag_mut(TagType::VorbisComments).unwrap();
    tag.insert_text(ItemKey::TrackArtist, artist.to_string());
    tag.insert_text(ItemKey::TrackTitle, title.to_string());
    tag.save_to_path(path, WriteOptions::default()).unwrap();
}

/// Lyrics stored in a FLAC fixture, if any.
pub fn flac_lyrics(path: &Path) -> Option<String> {
    let tagged = Probe::open(path).unwrap().read().unwrap();
    tagged
        .tag(TagType::VorbisComments)
        .and_then(|t| t.get_string(&ItemKey::Lyrics))
        .map(str::to_string)
}

/// Answers every query with the same lyrics, or misses when `lyrics` is `None`.
/// Records the queries it received.
pub struct FakeLookup {
    pub lyrics: Option<String>,
    pub queries: RefCell<Vec<LookupQuery>>,
}

impl FakeLookup {
    pub fn hit(lyrics: &str) -> Self {
        Self {
            lyrics: Some(lyrics.to_string()),
            queries: RefCell::new(Vec::new()),
        }
    }

    pub fn miss() -> Self {
        Self {
            lyrics: None,
            queries: RefCell::new(Vec::new()),
        }
    }
}

impl LyricsLookup for FakeLookup {
    fn lookup(&self, query: &LookupQuery) -> LookupResult {
        self.queries.borrow_mut().push(query.clone());
        if query.is_empty() {
            return LookupResult::NotFound;
        }
        match &self.lyrics {
            Some(text) => LookupResult::Plain(text.clone()),
            None => LookupResult::NotFound,
        }
    }
}

impl<T: LyricsLookup> LyricsLookup for Rc<T> {
    fn lookup(&self, query: &LookupQuery) -> LookupResult {
        (**self).lookup(query)
    }
}

/// Replays canned answers in order and remembers what it was asked.
#[derive(Default)]
pub struct ScriptedResolver {
    pub answers: VecDeque<ResolveAnswer>,
    pub asked: Vec<ResolveRequest>,
    pub not_found: Vec<ResolveRequest>,
}

impl ScriptedResolver {
    pub fn new(answers: Vec<ResolveAnswer>) -> Self {
        Self {
            answers: answers.into(),
            ..Self::default()
        }
    }
}

impl InteractiveResolver for ScriptedResolver {
    fn resolve(&mut self, requests: &[ResolveRequest]) -> Vec<ResolveAnswer> {
        self.asked.extend_from_slice(requests);
        requests
            .iter()
            .map(|_| self.answers.pop_front().unwrap_or(ResolveAnswer::Cancelled))
            .collect()
    }

    fn report_not_found(&mut self, request: &ResolveRequest) {
        self.not_found.push(request.clone());
    }
}
