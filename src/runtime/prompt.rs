use crossterm::style::Stylize;
use lrcput::error::EmbedError;
use lrcput::resolver::{InteractiveResolver, ResolveAnswer, ResolveRequest};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

/// Asks on the terminal for the artist and title of each deferred file,
/// pre-filled with whatever the file name suggested.
pub struct TerminalResolver {
    editor: DefaultEditor,
}

impl TerminalResolver {
    pub fn new() -> Result<Self, ReadlineError> {
        Ok(Self {
            editor: DefaultEditor::new()?,
        })
    }

    fn ask(&mut self, label: &str, initial: Option<&str>) -> Option<String> {
        let prompt = format!("  {label}: ");
        let line = match initial {
            Some(text) => self.editor.readline_with_initial(&prompt, (text, "")),
            None => self.editor.readline(&prompt),
        };
        match line {
            Ok(line) => Some(line.trim().to_string()),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => None,
            Err(e) => {
                tracing::warn!("prompt failed: {e}");
                None
            }
        }
    }

    fn ask_one(&mut self, request: &ResolveRequest) -> ResolveAnswer {
        println!("{} {}", "Missing tags:".yellow().bold(), request.file_name());
        let Some(artist) = self.ask("Artist", request.suggested_artist.as_deref()) else {
            return ResolveAnswer::Cancelled;
        };
        let Some(title) = self.ask("Title", request.suggested_title.as_deref()) else {
            return ResolveAnswer::Cancelled;
        };
        if artist.is_empty() || title.is_empty() {
            return ResolveAnswer::Cancelled;
        }
        ResolveAnswer::Provided { artist, title }
    }
}

impl InteractiveResolver for TerminalResolver {
    fn resolve(&mut self, requests: &[ResolveRequest]) -> Vec<ResolveAnswer> {
        if !requests.is_empty() {
            println!(
                "{} files need an artist and title (Ctrl-C skips a file)",
                requests.len()
            );
        }
        requests.iter().map(|r| self.ask_one(r)).collect()
    }

    fn report_not_found(&mut self, request: &ResolveRequest) {
        println!("{} {}", "No lyrics found for".yellow(), request.file_name());
    }

    fn report_failure(&mut self, request: &ResolveRequest, error: &EmbedError) {
        println!("{} {}: {error}", "Failed:".red(), request.file_name());
    }
}
