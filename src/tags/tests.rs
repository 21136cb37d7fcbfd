use std::fs;
use std::path::Path;

use tempfile::tempdir;

use lofty::config::WriteOptions;
use lofty::tag::{ItemKey, Tag, TagExt, TagType};

use super::*;
use crate::config::TranscodeSettings;
use crate::error::TagError;
use crate::testing::{
    flac_lyrics, id3_lyrics, read_tag, tag_flac, write_bare_flac, write_minimal_flac, write_minimal_m4a,
    write_minimal_mp3,
};

fn adapters_with(program: &str) -> TagAdapters {
    TagAdapters::new(Transcoder::new(&TranscodeSettings {
        program: program.to_string(),
        ..TranscodeSettings::default()
    }))
}

#[test]
fn container_kind_is_keyed_by_extension_case_insensitive() {
    assert_eq!(ContainerKind::from_path(Path::new("a.flac")), ContainerKind::Flac);
    assert_eq!(ContainerKind::from_path(Path::new("a.FLAC")), ContainerKind::Flac);
    assert_eq!(ContainerKind::from_path(Path::new("a.m4a")), ContainerKind::Mp4);
    assert_eq!(ContainerKind::from_path(Path::new("a.Mp3")), ContainerKind::Mp3);
    assert_eq!(ContainerKind::from_path(Path::new("a.wav")), ContainerKind::Generic);
    assert_eq!(ContainerKind::from_path(Path::new("a.OGG")), ContainerKind::Generic);
    assert_eq!(ContainerKind::from_path(Path::new("a.xyz")), ContainerKind::Unsupported);
    assert_eq!(ContainerKind::from_path(Path::new("noext")), ContainerKind::Unsupported);
    assert!(ContainerKind::Mp3.is_native());
    assert!(!ContainerKind::Generic.is_native());
}

#[test]
fn flac_write_then_detect() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.flac");
    write_minimal_flac(&path);

    let adapter = FlacAdapter;
    assert!(!adapter.has_embedded_lyrics(&path));

    let out = adapter.write_lyrics(&path, "[00:01.00]hello").unwrap();
    assert!(out.is_none());
    assert!(adapter.has_embedded_lyrics(&path));
    assert_eq!(flac_lyrics(&path).as_deref(), Some("[00:01.00]hello"));
}

#[test]
fn writing_same_lyrics_twice_is_idempotent() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.flac");
    write_minimal_flac(&path);
    let adapters = adapters_with("ffmpeg");
    let adapter = adapters.for_path(&path);

    adapter.write_lyrics(&path, "line one\nline two").unwrap();
    adapter.write_lyrics(&path, "line one\nline two").unwrap();

    assert!(adapter.has_embedded_lyrics(&path));
    assert_eq!(flac_lyrics(&path).as_deref(), Some("line one\nline two"));
}

#[test]
fn rewriting_overwrites_previous_lyrics() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.flac");
    write_minimal_flac(&path);

    FlacAdapter.write_lyrics(&path, "old").unwrap();
    FlacAdapter.write_lyrics(&path, "new").unwrap();
    assert_eq!(flac_lyrics(&path).as_deref(), Some("new"));
}

#[test]
fn flac_metadata_reads_vorbis_comments() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("x.flac");
    write_minimal_flac(&path);
    tag_flac(&path, "  Nina Simone ", "Sinnerman");

    let meta = FlacAdapter.read_metadata(&path);
    assert_eq!(meta.artist.as_deref(), Some("Nina Simone"));
    assert_eq!(meta.title.as_deref(), Some("Sinnerman"));
    assert_eq!(meta.duration_secs, None);
}

#[test]
fn unreadable_files_report_no_lyrics_and_empty_metadata() {
    let dir = tempdir().unwrap();
    for name in ["bad.flac", "bad.mp3", "bad.m4a", "bad.ogg"] {
        let path = dir.path().join(name);
        fs::write(&path, b"definitely not audio").unwrap();
        let adapters = adapters_with("ffmpeg");
        let adapter = adapters.for_path(&path);
        assert!(!adapter.has_embedded_lyrics(&path), "{name}");
        assert_eq!(adapter.read_metadata(&path), TrackMetadata::default(), "{name}");
    }
}

#[test]
fn missing_file_write_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gone.mp3");
    assert!(Id3Adapter.write_lyrics(&path, "x").is_err());
}

#[test]
fn transcoder_output_is_a_converted_sibling() {
    let t = Transcoder::new(&TranscodeSettings::default());
    assert_eq!(
        t.output_path(Path::new("/music/a/Song.wav")),
        Path::new("/music/a/Song_converted.mp3")
    );
}

#[test]
fn failed_transcode_leaves_original_and_no_output() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.wav");
    fs::write(&path, b"RIFF....").unwrap();

    let adapters = adapters_with("false");
    let err = adapters.for_path(&path).write_lyrics(&path, "x").unwrap_err();
    assert!(matches!(err, TagError::Transcode { .. }));
    assert!(path.exists());
    assert!(!dir.path().join("song_converted.mp3").exists());
}

#[test]
fn missing_transcoder_is_a_transcode_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.xyz");
    fs::write(&path, b"data").unwrap();

    let adapters = adapters_with("lrcput-no-such-transcoder");
    let err = adapters.for_path(&path).write_lyrics(&path, "x").unwrap_err();
    assert!(matches!(err, TagError::Transcode { .. }));
}

#[test]
fn generic_containers_never_report_lyrics() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("a.wav");
    fs::write(&path, b"whatever").unwrap();
    assert!(!adapters_with("ffmpeg").for_path(&path).has_embedded_lyrics(&path));
}

#[test]
fn audio_track_load_collects_kind_metadata_and_lyrics_flag() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("t.flac");
    write_minimal_flac(&path);
    tag_flac(&path, "A", "B");
    FlacAdapter.write_lyrics(&path, "la la").unwrap();

    let track = AudioTrack::load(&path, &adapters_with("ffmpeg"));
    assert_eq!(track.kind, ContainerKind::Flac);
    assert_eq!(track.metadata.artist.as_deref(), Some("A"));
    assert_eq!(track.metadata.title.as_deref(), Some("B"));
    assert!(track.has_lyrics);
    assert_eq!(track.file_name(), "t.flac");
}

#[test]
fn flac_without_room_after_streaminfo_is_refused() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bare.flac");
    write_bare_flac(&path);
    let before = fs::read(&path).unwrap();

    let err = FlacAdapter.write_lyrics(&path, "x").unwrap_err();
    assert!(matches!(err, TagError::Unsupported(_)));
    assert_eq!(fs::read(&path).unwrap(), before);
}

fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}

#[test]
fn mp3_write_then_detect_as_id3v23() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    write_minimal_mp3(&path);
    assert!(!Id3Adapter.has_embedded_lyrics(&path));

    let out = Id3Adapter.write_lyrics(&path, "[00:01.00]mp3 words").unwrap();
    assert!(out.is_none());
    assert!(Id3Adapter.has_embedded_lyrics(&path));
    assert_eq!(id3_lyrics(&path).as_deref(), Some("[00:01.00]mp3 words"));

    let bytes = fs::read(&path).unwrap();
    assert_eq!(&bytes[..3], b"ID3");
    assert_eq!(bytes[3], 3, "major version");
}

#[test]
fn mp3_rewrite_keeps_one_lyrics_frame_and_other_frames() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.mp3");
    write_minimal_mp3(&path);

    let mut tag = Tag::new(TagType::Id3v2);
    tag.insert_text(ItemKey::TrackTitle, "Kept Title".to_string());
    tag.save_to_path(&path, WriteOptions::default().use_id3v23(true)).unwrap();

    Id3Adapter.write_lyrics(&path, "same").unwrap();
    Id3Adapter.write_lyrics(&path, "same").unwrap();

    assert_eq!(count(&fs::read(&path).unwrap(), b"USLT"), 1);
    assert_eq!(Id3Adapter.read_metadata(&path).title.as_deref(), Some("Kept Title"));
    assert_eq!(id3_lyrics(&path).as_deref(), Some("same"));
}

#[test]
fn m4a_write_creates_ilst_and_detects() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("song.m4a");
    write_minimal_m4a(&path);
    assert!(!Mp4Adapter.has_embedded_lyrics(&path));
    assert!(read_tag(&path, TagType::Mp4Ilst).is_none());

    let out = Mp4Adapter.write_lyrics(&path, "[00:01.00]mp4 words").unwrap();
    assert!(out.is_none());
    assert!(Mp4Adapter.has_embedded_lyrics(&path));

    let ilst = read_tag(&path, TagType::Mp4Ilst).unwrap();
    assert_eq!(ilst.get_string(&ItemKey::Lyrics), Some("[00:01.00]mp4 words"));
    assert!(count(&fs::read(&path).unwrap(), b"\xA9lyr") >= 1);
}

#[cfg(unix)]
#[test]
fn generic_write_tags_the_converted_copy() {
    let dir = tempdir().unwrap();
    let source = dir.path().join("source.mp3");
    write_minimal_mp3(&source);
    let path = dir.path().join("song.ogg");
    fs::write(&path, b"pretend vorbis").unwrap();

    let adapters = TagAdapters::new(crate::testing::copying_transcoder(dir.path(), &source));
    let out = adapters.for_path(&path).write_lyrics(&path, "converted words").unwrap();

    let converted = dir.path().join("song_converted.mp3");
    assert_eq!(out.as_deref(), Some(converted.as_path()));
    assert_eq!(fs::read(&path).unwrap(), b"pretend vorbis");
    assert_eq!(id3_lyrics(&converted).as_deref(), Some("converted words"));
    assert!(id3_lyrics(&source).is_none());
}
