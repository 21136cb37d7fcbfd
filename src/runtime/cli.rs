use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "lrcput", version)]
#[command(about = "Embed LRC lyrics into audio files")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Do not draw a progress bar
    #[arg(long, global = true)]
    pub no_progress: bool,

    /// Log debug details (overridden by RUST_LOG)
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Args, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmbedFlags {
    /// Leave files that already have embedded lyrics untouched
    #[arg(long)]
    pub skip_existing: bool,

    /// Descend into subdirectories
    #[arg(long)]
    pub recursive: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Embed the .lrc file next to each audio file in DIR
    Batch {
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        flags: EmbedFlags,

        /// Delete each .lrc file once it has been embedded
        #[arg(long)]
        reduce: bool,
    },

    /// Search LRCLib and embed lyrics for every audio file in DIR
    Lookup {
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        #[command(flatten)]
        flags: EmbedFlags,

        /// Do not ask for artist/title when tags and file name are not enough
        #[arg(long)]
        no_prompt: bool,
    },

    /// Embed lyrics into a single AUDIO file
    Single {
        #[arg(value_name = "AUDIO")]
        audio: PathBuf,

        /// Lyrics file to embed; searches LRCLib when omitted
        #[arg(long, value_name = "FILE")]
        lrc: Option<PathBuf>,

        /// Do not ask for artist/title when tags and file name are not enough
        #[arg(long)]
        no_prompt: bool,
    },

    /// Print the effective configuration as TOML
    Config,
}
