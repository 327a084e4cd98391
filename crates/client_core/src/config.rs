use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use serde::Deserialize;
use url::Url;

use crate::error::ConfigError;

pub const SETTINGS_FILE_NAME: &str = "activities.toml";
const SETTINGS_DIR_NAME: &str = "mergington_activities";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub server_url: String,
    pub message_display_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            server_url: "http://127.0.0.1:8000".into(),
            message_display_secs: 5,
        }
    }
}

impl ClientSettings {
    pub fn message_display(&self) -> Duration {
        Duration::from_secs(self.message_display_secs)
    }

    pub fn server_base_url(&self) -> Result<Url, ConfigError> {
        normalize_server_url(&self.server_url)
    }
}

#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    server_url: Option<String>,
    message_display_secs: Option<u64>,
}

/// Candidate settings files, most specific first: the working directory, then
/// the per-user config directory.
pub fn default_settings_paths() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(SETTINGS_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME));
    }
    paths
}

/// Defaults, then the first readable settings file, then environment.
pub fn load_settings(explicit_path: Option<&Path>) -> ClientSettings {
    let candidates = match explicit_path {
        Some(path) => vec![path.to_path_buf()],
        None => default_settings_paths(),
    };
    let file_contents = candidates.iter().find_map(|path| {
        fs::read_to_string(path)
            .ok()
            .map(|raw| (path.clone(), raw))
    });

    let mut settings = ClientSettings::default();
    if let Some((path, raw)) = file_contents {
        apply_file(&mut settings, &path, &raw);
    } else if let Some(path) = explicit_path {
        tracing::warn!(path = %path.display(), "settings file not readable; using defaults");
    }
    apply_env(&mut settings, |name| std::env::var(name).ok());
    settings
}

fn apply_file(settings: &mut ClientSettings, path: &Path, raw: &str) {
    match toml::from_str::<SettingsFile>(raw) {
        Ok(file_cfg) => {
            if let Some(v) = file_cfg.server_url {
                settings.server_url = v;
            }
            if let Some(v) = file_cfg.message_display_secs {
                settings.message_display_secs = v;
            }
            tracing::debug!(path = %path.display(), "loaded settings file");
        }
        Err(err) => {
            tracing::warn!(path = %path.display(), "ignoring unparsable settings file: {err}");
        }
    }
}

fn apply_env(settings: &mut ClientSettings, var: impl Fn(&str) -> Option<String>) {
    if let Some(v) = var("ACTIVITIES_SERVER_URL") {
        settings.server_url = v;
    }
    if let Some(v) = var("APP__SERVER_URL") {
        settings.server_url = v;
    }

    if let Some(v) = var("APP__MESSAGE_DISPLAY_SECS") {
        match v.trim().parse::<u64>() {
            Ok(parsed) => settings.message_display_secs = parsed,
            Err(_) => tracing::warn!(value = %v, "ignoring invalid APP__MESSAGE_DISPLAY_SECS"),
        }
    }
}

/// Trims the input, drops a trailing slash and checks the URL can carry
/// endpoint paths.
pub fn normalize_server_url(raw: &str) -> Result<Url, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let url = Url::parse(trimmed).map_err(|e| ConfigError::InvalidServerUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::UnsupportedScheme(url.scheme().to_string()));
    }
    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidServerUrl {
            url: raw.to_string(),
            reason: "url cannot be a base".to_string(),
        });
    }
    Ok(url)
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
