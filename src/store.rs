//! Persistence of the profile set.
//!
//! The whole set is read on every invocation and rewritten on every change.
//! There is no file locking: two invocations racing on the file resolve as
//! last-write-wins.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::paths::Paths;
use crate::profiles::{Profile, ProfileSet};

/// Read the profile set, seeding the default profiles if the file is absent
pub fn load(path: &Path) -> Result<ProfileSet> {
    if !path.exists() {
        let defaults = ProfileSet::defaults();
        save(path, &defaults)?;
        return Ok(defaults);
    }

    let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;

    serde_json::from_str(&content).map_err(|source| Error::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write the full profile set as pretty-printed JSON, replacing the file.
///
/// The content goes to a sibling temp file first and is renamed into place.
pub fn save(path: &Path, profiles: &ProfileSet) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
    }

    let content = serde_json::to_string_pretty(profiles)
        .map_err(|e| Error::io(path, std::io::Error::other(e)))?;

    let temp_path = path.with_extension("json.tmp");
    fs::write(&temp_path, content).map_err(|e| Error::io(&temp_path, e))?;
    fs::rename(&temp_path, path).map_err(|e| Error::io(path, e))
}

/// A loaded profile set bound to the file it came from
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: ProfileSet,
}

impl ProfileStore {
    /// Load (or seed) the profile file at the resolved location
    pub fn open(paths: &Paths) -> Result<Self> {
        Self::open_at(paths.profiles_file())
    }

    pub fn open_at(path: &Path) -> Result<Self> {
        let profiles = load(path)?;
        Ok(Self {
            path: path.to_path_buf(),
            profiles,
        })
    }

    pub fn profiles(&self) -> &ProfileSet {
        &self.profiles
    }

    pub fn upsert(&mut self, profile_name: &str, profile: Profile) -> Result<()> {
        self.profiles.upsert(profile_name, profile);
        self.save()
    }

    /// Remove a profile and persist; `NotFound` if it was never stored
    pub fn remove(&mut self, profile_name: &str) -> Result<Profile> {
        let removed = self.profiles.remove(profile_name).ok_or_else(|| Error::NotFound {
            name: profile_name.to_string(),
            available: self.profiles.names(),
        })?;
        self.save()?;
        Ok(removed)
    }

    pub fn save(&self) -> Result<()> {
        save(&self.path, &self.profiles)
    }
}
