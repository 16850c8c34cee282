//! File-backed stand-in for the browser's synced settings store.
//!
//! The file holds a RON map with the store's camelCase keys:
//!
//! ```ron
//! { "mode": "filtering-basic", "hideShortText": true, "minLikes": 100 }
//! ```
//!
//! Missing keys take their defaults. Changes made by another process are
//! picked up by [`SettingsStore::poll`].

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use serde_json::Value;
use sieve_core::{Mode, Settings, SettingsError};
use sieve_logging::{sieve_debug, sieve_info};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read settings {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings {path:?}: {source}")]
    Parse {
        path: PathBuf,
        source: ron::error::SpannedError,
    },
    #[error("settings {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: SettingsError,
    },
    #[error("failed to serialize settings: {0}")]
    Serialize(#[from] ron::Error),
    #[error("failed to write settings {path:?}: {source}")]
    Write { path: PathBuf, source: io::Error },
}

/// What identifies one version of the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Fingerprint {
    modified: Option<SystemTime>,
    len: u64,
}

#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    seen: Option<Fingerprint>,
    current: Arc<Settings>,
}

impl SettingsStore {
    /// Opens the store. A missing file reads as all defaults.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let seen = fingerprint(&path);
        let current = Arc::new(read_settings(&path)?);
        sieve_info!("Settings store at {:?}, mode={:?}", path, current.mode);
        Ok(Self {
            path,
            seen,
            current,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn snapshot(&self) -> Arc<Settings> {
        Arc::clone(&self.current)
    }

    /// Re-reads the file if it changed on disk. Returns the new snapshot when
    /// the effective settings differ from the current ones.
    pub fn poll(&mut self) -> Result<Option<Arc<Settings>>, StoreError> {
        let now = fingerprint(&self.path);
        if now == self.seen {
            return Ok(None);
        }
        let settings = read_settings(&self.path)?;
        self.seen = now;
        if settings == *self.current {
            sieve_debug!("Settings file touched without changes");
            return Ok(None);
        }
        self.current = Arc::new(settings);
        sieve_info!("Settings reloaded, mode={:?}", self.current.mode);
        Ok(Some(self.snapshot()))
    }

    /// Writes a full snapshot back to the store.
    pub fn publish(&mut self, settings: Settings) -> Result<(), StoreError> {
        let values = Value::Object(settings.to_values());
        let content = ron::ser::to_string_pretty(&values, ron::ser::PrettyConfig::new())?;
        write_atomic(&self.path, &content).map_err(|source| StoreError::Write {
            path: self.path.clone(),
            source,
        })?;
        self.seen = fingerprint(&self.path);
        self.current = Arc::new(settings);
        Ok(())
    }

    /// Publishes a new mode, keeping every other field. The badge collaborator
    /// reads `mode` from the store.
    pub fn publish_mode(&mut self, mode: Mode) -> Result<(), StoreError> {
        let settings = Settings {
            mode,
            ..(*self.current).clone()
        };
        self.publish(settings)
    }
}

fn fingerprint(path: &Path) -> Option<Fingerprint> {
    let meta = fs::metadata(path).ok()?;
    Some(Fingerprint {
        modified: meta.modified().ok(),
        len: meta.len(),
    })
}

fn read_settings(path: &Path) -> Result<Settings, StoreError> {
    let content = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(StoreError::Read {
                path: path.to_path_buf(),
                source,
            })
        }
    };
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    let values: Value = ron::from_str(&content).map_err(|source| StoreError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Settings::from_value(values).map_err(|source| StoreError::Invalid {
        path: path.to_path_buf(),
        source,
    })
}

/// Temp file in the same directory, then rename over the target.
fn write_atomic(target: &Path, content: &str) -> io::Result<()> {
    let dir = match target.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir)?;
    let mut tmp = NamedTempFile::new_in(&dir)?;
    tmp.write_all(content.as_bytes())?;
    tmp.flush()?;
    tmp.as_file_mut().sync_all()?;
    tmp.persist(target).map_err(|err| err.error)?;
    Ok(())
}
