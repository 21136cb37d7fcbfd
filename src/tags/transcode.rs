use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::config::TranscodeSettings;
use crate::error::TagError;

/// Converts containers that have no lyrics field into an MP3 sibling.
#[derive(Debug, Clone)]
pub struct Transcoder {
    program: String,
    suffix: String,
}

impl Transcoder {
    pub fn new(settings: &TranscodeSettings) -> Self {
        Self {
            program: settings.program.clone(),
            suffix: settings.suffix.clone(),
        }
    }

    /// `<dir>/<stem><suffix>.mp3` next to `input`.
    pub fn output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        input.with_file_name(format!("{stem}{}.mp3", self.suffix))
    }

    /// Run the transcoder, overwriting any previous output. The original file
    /// is never touched. On failure nothing is left behind at the output path.
    pub fn convert(&self, input: &Path) -> Result<PathBuf, TagError> {
        let output = self.output_path(input);
        tracing::info!(
            "converting {} -> {} with {}",
            input.display(),
            output.display(),
            self.program
        );

        let result = Command::new(&self.program)
            .arg("-y")
            .arg("-i")
            .arg(input)
            .arg(&output)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output();

        let failure = match result {
            Ok(out) if out.status.success() => return Ok(output),
            Ok(out) => {
                let stderr = String::from_utf8_lossy(&out.stderr);
                match stderr.lines().rev().find(|l| !l.trim().is_empty()) {
                    Some(last) => format!("{} ({})", out.status, last.trim()),
                    None => out.status.to_string(),
                }
            }
            Err(e) => e.to_string(),
        };

        if output.exists() {
            let _ = fs::remove_file(&output);
        }
        Err(TagError::Transcode {
            program: self.program.clone(),
            reason: failure,
        })
    }
}
