//! Profile store with whole-blob persistence.
//!
//! The full profile list is serialized to JSON and written after every
//! mutation, and read back in full when the store is opened.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use uuid::Uuid;

use crate::error::EngineError;
use crate::model::{Avatar, GameMode, GameStats, Profile};

/// Expected age range; values outside it are accepted but logged.
pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 1..=20;

/// Read-all / write-all storage for the serialized profile list.
pub trait ProfileBackend: Send {
    /// Read the stored blob, `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<String>>;

    /// Replace the stored blob.
    fn save(&self, blob: &str) -> Result<()>;
}

/// Stores the profile list as a JSON file.
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ProfileBackend for FileBackend {
    fn load(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&self.path)
            .with_context(|| format!("failed to read profiles from {}", self.path.display()))?;
        Ok(Some(content))
    }

    fn save(&self, blob: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, blob)
            .with_context(|| format!("failed to write profiles to {}", self.path.display()))
    }
}

/// Keeps the blob in memory. Useful for tests and throwaway sessions.
#[derive(Default)]
pub struct MemoryBackend {
    blob: Mutex<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing blob, e.g. to simulate corrupted storage.
    pub fn with_blob(blob: &str) -> Self {
        Self {
            blob: Mutex::new(Some(blob.to_string())),
        }
    }

    /// The last saved blob.
    pub fn blob(&self) -> Option<String> {
        self.blob.lock().unwrap().clone()
    }
}

impl ProfileBackend for MemoryBackend {
    fn load(&self) -> Result<Option<String>> {
        Ok(self.blob())
    }

    fn save(&self, blob: &str) -> Result<()> {
        *self.blob.lock().unwrap() = Some(blob.to_string());
        Ok(())
    }
}

/// The list of child profiles.
pub struct ProfileStore {
    profiles: Vec<Profile>,
    backend: Box<dyn ProfileBackend>,
}

impl ProfileStore {
    /// Open the store, reading whatever the backend holds.
    ///
    /// Missing or unreadable data degrades to an empty list.
    pub fn open(backend: Box<dyn ProfileBackend>) -> Self {
        let profiles = match backend.load() {
            Ok(Some(blob)) => match serde_json::from_str::<Vec<Profile>>(&blob) {
                Ok(profiles) => profiles,
                Err(e) => {
                    tracing::error!("failed to parse saved profiles, starting empty: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::error!("failed to load profiles, starting empty: {e:#}");
                Vec::new()
            }
        };
        tracing::debug!(count = profiles.len(), "profile store opened");
        Self { profiles, backend }
    }

    /// Convenience for a JSON file at `path`.
    pub fn open_file(path: impl Into<PathBuf>) -> Self {
        Self::open(Box::new(FileBackend::new(path)))
    }

    /// An empty store that is never written anywhere durable.
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryBackend::new()))
    }

    pub fn profiles(&self) -> &[Profile] {
        &self.profiles
    }

    pub fn get(&self, id: Uuid) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    /// First profile whose name matches, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Profile> {
        let name = name.trim();
        self.profiles
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Create and persist a new profile.
    pub fn create_profile(
        &mut self,
        name: &str,
        age: Option<u32>,
        avatar: Avatar,
    ) -> Result<Profile, EngineError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(EngineError::EmptyName);
        }
        let age = age.ok_or(EngineError::MissingAge)?;
        if !AGE_RANGE.contains(&age) {
            tracing::warn!(age, "profile age outside the expected 1-20 range");
        }

        let profile = Profile {
            id: Uuid::new_v4(),
            name: name.to_string(),
            age,
            avatar,
            game_stats: GameStats::default(),
        };
        self.profiles.push(profile.clone());
        tracing::info!(id = %profile.id, name = %profile.name, "profile created");
        self.persist();
        Ok(profile)
    }

    /// Record one play of `mode`. Returns the updated profile, or `None` if
    /// no profile has this id.
    pub fn increment_stat(&mut self, id: Uuid, mode: GameMode) -> Option<Profile> {
        let Some(profile) = self.profiles.iter_mut().find(|p| p.id == id) else {
            tracing::warn!(%id, "increment for unknown profile ignored");
            return None;
        };
        profile.game_stats.increment(mode);
        let updated = profile.clone();
        self.persist();
        Some(updated)
    }

    fn persist(&self) {
        let result = serde_json::to_string(&self.profiles)
            .context("failed to serialize profiles")
            .and_then(|blob| self.backend.save(&blob));
        if let Err(e) = result {
            tracing::error!("failed to save profiles: {e:#}");
        }
    }
}
