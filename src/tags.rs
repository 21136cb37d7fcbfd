//! Reading and writing lyrics across tag formats.
//!
//! Each container family gets a [`TagAdapter`]; [`TagAdapters`] picks one by
//! file extension. Containers without a lyrics field are converted to MP3
//! first and the converted copy is tagged instead.

mod adapter;
mod kind;
mod track;
mod transcode;

pub use adapter::{
    FallbackAdapter, FlacAdapter, Id3Adapter, Mp4Adapter, TagAdapter, TagAdapters, TrackMetadata,
};
pub use kind::ContainerKind;
pub use track::AudioTrack;
pub(crate) use track::file_name;
pub use transcode::Transcoder;

#[cfg(test)]
mod tests;
