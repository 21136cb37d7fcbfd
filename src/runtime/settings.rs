use crate::runtime::cli::EmbedFlags;
use lrcput::config;

pub fn load_settings() -> config::Settings {
    match config::Settings::load() {
        Ok(s) => {
            if let Err(msg) = s.validate() {
                tracing::warn!("invalid config, using defaults: {msg}");
                config::Settings::default()
            } else {
                s
            }
        }
        Err(e) => {
            // Config is optional; a broken file must not stop a run.
            tracing::warn!("failed to load config, using defaults: {e}");
            config::Settings::default()
        }
    }
}

/// Config-file defaults OR-ed with the command-line switches.
pub fn effective_flags(settings: &config::Settings, flags: &EmbedFlags) -> EmbedFlags {
    EmbedFlags {
        skip_existing: flags.skip_existing || settings.embed.skip_existing,
        recursive: flags.recursive || settings.embed.recursive,
    }
}
