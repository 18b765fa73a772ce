// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Application configuration.
//!
//! Settings are read from a YAML file. Every field has a default, so the
//! file may list only what it changes, and a missing file means defaults.

use crate::models::tag::{Rgb, TagRegistry};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A tag registered at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagConfig {
    pub name: String,
    #[serde(default)]
    pub shortcut: Option<String>,
    #[serde(default)]
    pub color: Option<Rgb>,
}

impl TagConfig {
    fn new(name: &str, shortcut: &str) -> Self {
        Self {
            name: name.to_string(),
            shortcut: Some(shortcut.to_string()),
            color: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Tags available in a fresh session, in display order.
    pub default_tags: Vec<TagConfig>,
    /// Seconds skipped by Shift+Left / Shift+Right.
    pub jump_seconds: f64,
    pub ffmpeg_path: PathBuf,
    /// Where exported clips go; next to the video when unset.
    pub export_dir: Option<PathBuf>,
    /// Cut exported clips without re-encoding.
    pub stream_copy: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_tags: vec![
                TagConfig::new("DefCorner", "Ctrl+1"),
                TagConfig::new("TraAttToDef", "Ctrl+2"),
                TagConfig::new("CounterAttack", "Ctrl+3"),
                TagConfig::new("SetPiece", "Ctrl+4"),
                TagConfig::new("Goal", "Ctrl+5"),
            ],
            jump_seconds: 60.0,
            ffmpeg_path: PathBuf::from("ffmpeg"),
            export_dir: None,
            stream_copy: true,
        }
    }
}

impl AppConfig {
    /// Default config file location, `<config dir>/matchclip/config.yaml`.
    pub fn default_path() -> Option<PathBuf> {
        dirs_next::config_dir().map(|dir| dir.join("matchclip").join("config.yaml"))
    }

    /// Load settings from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        let yaml = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_yaml::from_str(&yaml)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        Ok(config)
    }

    /// Build the startup tag registry.
    pub fn tag_registry(&self) -> TagRegistry {
        let mut registry = TagRegistry::new();
        for tag in &self.default_tags {
            registry.add(&tag.name, tag.shortcut.as_deref(), tag.color);
        }
        registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tags() {
        let registry = AppConfig::default().tag_registry();
        assert_eq!(
            registry.get_tags(),
            vec!["DefCorner", "TraAttToDef", "CounterAttack", "SetPiece", "Goal"]
        );
        assert_eq!(registry.get_shortcut("Goal"), Some("Ctrl+5"));
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.yaml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_partial_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(
            &path,
            "jump_seconds: 10\ndefault_tags:\n  - name: Press\n    shortcut: Ctrl+P\n    color: \"#112233\"\n  - name: Offside\n",
        )
        .unwrap();

        let config = AppConfig::load(&path).unwrap();
        assert_eq!(config.jump_seconds, 10.0);
        assert!(config.stream_copy);

        let registry = config.tag_registry();
        assert_eq!(registry.get_tags(), vec!["Press", "Offside"]);
        assert_eq!(registry.get_color("Press"), Rgb::new(0x11, 0x22, 0x33));
        assert_eq!(registry.get_shortcut("Offside"), None);
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        std::fs::write(&path, "default_tags:\n  - color: \"#nothex\"\n").unwrap();
        assert!(AppConfig::load(&path).is_err());
    }
}
