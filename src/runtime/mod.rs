use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;
use lrcput::config::Settings;
use lrcput::embedder::Embedder;
use lrcput::resolver::InteractiveResolver;

use cli::{Cli, Command};
use progress::ProgressObserver;
use prompt::TerminalResolver;
use settings::{effective_flags, load_settings};

mod cli;
mod logging;
mod progress;
mod prompt;
mod report;
mod settings;

pub fn run() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);
    let settings = load_settings();

    match dispatch(&cli, &settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{} {e}", "error:".red().bold());
            ExitCode::FAILURE
        }
    }
}

fn dispatch(cli: &Cli, settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let hide_progress = cli.no_progress || !settings.ui.progress;

    match &cli.command {
        Command::Config => {
            print!("{}", settings.to_toml()?);
        }
        Command::Batch { dir, flags, reduce } => {
            let embedder = Embedder::from_settings(settings)?;
            let flags = effective_flags(settings, flags);
            let reduce = *reduce || settings.embed.reduce_lrc;
            let mut observer = ProgressObserver::new("Embedding", hide_progress);
            let outcome = embedder.embed_from_local_files(
                dir,
                flags.skip_existing,
                reduce,
                flags.recursive,
                &mut observer,
            )?;
            report::print_summary(&outcome);
        }
        Command::Lookup { dir, flags, no_prompt } => {
            let embedder = Embedder::from_settings(settings)?;
            let flags = effective_flags(settings, flags);
            let mut resolver = terminal_resolver(!no_prompt && settings.ui.prompt);
            let mut observer = ProgressObserver::new("Searching", hide_progress);
            let outcome = embedder.embed_from_lookup(
                dir,
                flags.skip_existing,
                flags.recursive,
                &mut observer,
                resolver.as_mut().map(|r| r as &mut dyn InteractiveResolver),
            )?;
            report::print_summary(&outcome);
        }
        Command::Single { audio, lrc, no_prompt } => {
            let embedder = Embedder::from_settings(settings)?;
            let output = match lrc {
                Some(lrc) => embedder.embed_single_from_file(audio, lrc)?,
                None => {
                    let mut resolver = terminal_resolver(!no_prompt && settings.ui.prompt);
                    embedder.embed_single_from_lookup(
                        audio,
                        resolver.as_mut().map(|r| r as &mut dyn InteractiveResolver),
                    )?
                }
            };
            match output {
                Some(path) => println!("Embedded; output file: {}", path.display()),
                None => println!("Embedded in place"),
            }
        }
    }

    Ok(())
}

fn terminal_resolver(enabled: bool) -> Option<TerminalResolver> {
    if !enabled {
        return None;
    }
    match TerminalResolver::new() {
        Ok(resolver) => Some(resolver),
        Err(e) => {
            tracing::warn!("interactive prompt unavailable: {e}");
            None
        }
    }
}
