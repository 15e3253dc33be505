use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::theme::{apply_overrides, Theme, ThemeOverrides};

#[derive(Debug, Clone)]
pub struct MmergeConfig {
    pub theme: Theme,
    /// Color overrides, kept so they still apply when `--theme` swaps the base.
    pub colors: Option<ThemeOverrides>,
    pub stage_resolved: bool,
    pub show_help: bool,
    pub log_file: Option<PathBuf>,
}

impl Default for MmergeConfig {
    fn default() -> Self {
        Self {
            theme: Theme::from_name("one-dark"),
            colors: None,
            stage_resolved: false,
            show_help: false,
            log_file: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    colors: Option<ThemeOverrides>,
    #[serde(default)]
    stage_resolved: Option<bool>,
    #[serde(default)]
    show_help: Option<bool>,
    #[serde(default)]
    log_file: Option<PathBuf>,
}

fn config_path() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("mmerge");
    path.push("config.toml");
    path
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load config from `~/.config/mmerge/config.toml`, falling back to defaults.
pub fn load_config() -> MmergeConfig {
    load_config_from(&config_path())
}

fn load_config_from(path: &Path) -> MmergeConfig {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return MmergeConfig::default(),
    };

    let file: ConfigFile = match toml::from_str(&contents) {
        Ok(f) => f,
        Err(e) => {
            // logging may not be up yet; it is initialised from this config
            eprintln!("mmerge: ignoring {}: {e}", path.display());
            return MmergeConfig::default();
        }
    };

    let theme_name = file.theme.as_deref().unwrap_or("one-dark");
    let mut theme = Theme::from_name(theme_name);
    if let Some(ref overrides) = file.colors {
        apply_overrides(&mut theme, overrides);
    }

    MmergeConfig {
        theme,
        colors: file.colors,
        stage_resolved: file.stage_resolved.unwrap_or(false),
        show_help: file.show_help.unwrap_or(false),
        log_file: file.log_file,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config_from(&dir.path().join("nope.toml"));
        assert_eq!(config.theme.name, "one-dark");
        assert!(!config.stage_resolved);
        assert!(config.log_file.is_none());
    }

    #[test]
    fn test_reads_settings_and_overrides() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            r##"
theme = "dracula"
stage_resolved = true
show_help = true
log_file = "/tmp/mmerge.log"

[colors]
accent = "#102030"
"##,
        )
        .unwrap();

        let config = load_config_from(&path);
        assert_eq!(config.theme.name, "dracula");
        assert_eq!(config.theme.accent, Color::Rgb(0x10, 0x20, 0x30));
        assert!(config.stage_resolved);
        assert!(config.show_help);
        assert_eq!(config.log_file, Some(PathBuf::from("/tmp/mmerge.log")));
    }

    #[test]
    fn test_broken_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "theme = [unterminated").unwrap();
        let config = load_config_from(&path);
        assert_eq!(config.theme.name, "one-dark");
    }
}
