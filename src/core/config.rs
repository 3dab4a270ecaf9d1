//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::entities::kit::KitType;

/// ckit configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Kit type used when `--kit` is not given (light, sensor)
    pub default_kit: Option<String>,

    /// Default output format
    pub default_format: Option<String>,

    /// Keep going when a CSV row fails to decode
    pub skip_errors: Option<bool>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    pub fn load() -> Self {
        let mut config = Config::default();

        // 1. Built-in defaults (already in Default impl)

        // 2. User config file (~/.config/ckit/config.yaml, or $CKIT_CONFIG)
        if let Some(path) = Self::config_path() {
            if let Some(file_config) = Self::load_file(&path) {
                config.merge(file_config);
            }
        }

        // 3. Environment variables
        if let Ok(kit) = std::env::var("CKIT_KIT") {
            config.default_kit = Some(kit);
        }
        if let Ok(format) = std::env::var("CKIT_FORMAT") {
            config.default_format = Some(format);
        }
        if let Ok(skip) = std::env::var("CKIT_SKIP_ERRORS") {
            config.skip_errors = Some(matches!(
                skip.to_lowercase().as_str(),
                "1" | "true" | "yes"
            ));
        }

        config
    }

    /// Read a single YAML config file; unreadable or invalid files are ignored
    pub fn load_file(path: &Path) -> Option<Config> {
        let contents = std::fs::read_to_string(path).ok()?;
        match serde_yml::from_str::<Config>(&contents) {
            Ok(config) => Some(config),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring invalid config file");
                None
            }
        }
    }

    /// Path of the user config file
    fn config_path() -> Option<PathBuf> {
        if let Ok(path) = std::env::var("CKIT_CONFIG") {
            return Some(PathBuf::from(path));
        }
        directories::ProjectDirs::from("", "", "ckit")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.default_kit.is_some() {
            self.default_kit = other.default_kit;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
        if other.skip_errors.is_some() {
            self.skip_errors = other.skip_errors;
        }
    }

    /// Default kit type, falling back to a light circuit
    pub fn kit_type(&self) -> KitType {
        self.default_kit
            .as_deref()
            .and_then(|kit| match kit.parse() {
                Ok(kind) => Some(kind),
                Err(e) => {
                    tracing::warn!(error = %e, "ignoring configured default_kit");
                    None
                }
            })
            .unwrap_or(KitType::LightCircuit)
    }

    pub fn skip_errors(&self) -> bool {
        self.skip_errors.unwrap_or(false)
    }
}
