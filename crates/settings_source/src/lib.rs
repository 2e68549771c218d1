// crates/settings_source/src/lib.rs

//! Read access to the key/value settings store the comment marker lives in.
//!
//! The pipeline never touches the filesystem itself: callers hand it a
//! [`SettingsSource`] and the marker is resolved through that on every call.
//! Any failure to read the store degrades to "no value", which in turn
//! resolves to the default marker.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use comment_prefix::{COMMENT_PREFIX_SETTING, DEFAULT_COMMENT_PREFIX, TOGGLE_ENABLED_SETTING};
use serde_json::{Map, Value};
use thiserror::Error;

/// Reasons a settings file could not be used.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("settings file not found: {0}")]
    Missing(PathBuf),

    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed settings file {path}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("settings root in {0} is not a JSON object")]
    NotAnObject(PathBuf),
}

/// Get a configuration value by key, or nothing.
pub trait SettingsSource {
    fn get_value(&self, key: &str) -> Option<Value>;

    /// The value under `key` if it is a JSON string.
    fn get_string(&self, key: &str) -> Option<String> {
        match self.get_value(key)? {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

/// A flat JSON object on disk, e.g. an editor's `settings.json`.
/// The file is re-read on every lookup so edits are picked up immediately.
#[derive(Clone, Debug)]
pub struct JsonSettingsFile {
    path: PathBuf,
}

impl JsonSettingsFile {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Loads the whole settings object.
    pub fn load(&self) -> Result<Map<String, Value>, SettingsError> {
        if !self.path.exists() {
            return Err(SettingsError::Missing(self.path.clone()));
        }
        let raw = fs::read_to_string(&self.path).map_err(|source| SettingsError::Io {
            path: self.path.clone(),
            source,
        })?;
        let parsed: Value = serde_json::from_str(&raw).map_err(|source| SettingsError::Malformed {
            path: self.path.clone(),
            source,
        })?;
        match parsed {
            Value::Object(map) => Ok(map),
            _ => Err(SettingsError::NotAnObject(self.path.clone())),
        }
    }
}

impl SettingsSource for JsonSettingsFile {
    fn get_value(&self, key: &str) -> Option<Value> {
        match self.load() {
            Ok(mut map) => map.remove(key),
            Err(err) => {
                log::debug!("ignoring settings for '{}': {}", key, err);
                None
            }
        }
    }
}

/// In-memory settings, mostly useful for embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct MemorySettings {
    values: HashMap<String, Value>,
}

impl MemorySettings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.values.insert(key.to_string(), value.into());
        self
    }
}

impl SettingsSource for MemorySettings {
    fn get_value(&self, key: &str) -> Option<Value> {
        self.values.get(key).cloned()
    }
}

/// A source that never has any value.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoSettings;

impl SettingsSource for NoSettings {
    fn get_value(&self, _key: &str) -> Option<Value> {
        None
    }
}

/// Resolves the comment marker used by the cleaning pipeline.
///
/// A non-empty string is trimmed and used as-is, so a whitespace-only value
/// yields `""` and switches comment filtering off. Anything else falls back
/// to [`DEFAULT_COMMENT_PREFIX`].
pub fn resolve_comment_prefix(source: &dyn SettingsSource) -> String {
    match source.get_string(COMMENT_PREFIX_SETTING) {
        Some(value) if !value.is_empty() => value.trim().to_string(),
        _ => DEFAULT_COMMENT_PREFIX.to_string(),
    }
}

/// Whether the line-comment toggle is switched on. Defaults to `true`;
/// only an explicit `false` (boolean or the string "false") turns it off.
pub fn is_toggle_enabled(source: &dyn SettingsSource) -> bool {
    match source.get_value(TOGGLE_ENABLED_SETTING) {
        Some(Value::Bool(enabled)) => enabled,
        Some(Value::String(s)) => s != "false",
        _ => true,
    }
}
