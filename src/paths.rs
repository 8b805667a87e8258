use directories::BaseDirs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Directory name used under the per-user config root
pub const APP_DIR: &str = "git-usr";

/// File holding the stored profiles
pub const PROFILES_FILE: &str = "profiles.json";

/// Environment variable that overrides the config directory
pub const CONFIG_DIR_ENV: &str = "GIT_USR_CONFIG_DIR";

/// All computed paths used by git-usr
#[derive(Debug, Clone)]
pub struct Paths {
    /// ~/.config/git-usr (or %APPDATA%\git-usr)
    pub config_dir: PathBuf,
    /// ~/.config/git-usr/profiles.json
    pub profiles_file: PathBuf,
}

impl Paths {
    /// Resolve the platform config location and make sure the directory exists.
    ///
    /// `GIT_USR_CONFIG_DIR` wins when set and non-empty. Otherwise Windows uses
    /// the roaming application-data directory and every other platform uses
    /// `~/.config`, regardless of XDG or macOS conventions.
    pub fn resolve() -> Result<Self> {
        let config_dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => default_config_root()?.join(APP_DIR),
        };

        let paths = Self::from_dir(config_dir);
        paths.ensure_dir()?;
        Ok(paths)
    }

    /// Build paths rooted at an explicit directory
    pub fn from_dir(config_dir: impl Into<PathBuf>) -> Self {
        let config_dir = config_dir.into();
        let profiles_file = config_dir.join(PROFILES_FILE);
        Self {
            config_dir,
            profiles_file,
        }
    }

    /// Create the config directory if it is missing
    pub fn ensure_dir(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir).map_err(|e| Error::io(&self.config_dir, e))
    }

    pub fn profiles_file(&self) -> &Path {
        &self.profiles_file
    }
}

#[cfg(windows)]
fn default_config_root() -> Result<PathBuf> {
    // FOLDERID_RoamingAppData
    let base_dirs = BaseDirs::new().ok_or(Error::HomeDir)?;
    Ok(base_dirs.config_dir().to_path_buf())
}

#[cfg(not(windows))]
fn default_config_root() -> Result<PathBuf> {
    let base_dirs = BaseDirs::new().ok_or(Error::HomeDir)?;
    Ok(base_dirs.home_dir().join(".config"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use tempfile::TempDir;

    #[test]
    fn test_profiles_file_under_config_dir() {
        let paths = Paths::from_dir("/tmp/git-usr");
        assert!(paths.profiles_file().ends_with("git-usr/profiles.json"));
    }

    #[test]
    #[serial]
    fn test_resolve_honors_override_and_creates_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("nested").join("git-usr");
        unsafe { std::env::set_var(CONFIG_DIR_ENV, &dir) };

        let paths = Paths::resolve().unwrap();
        unsafe { std::env::remove_var(CONFIG_DIR_ENV) };

        assert_eq!(paths.config_dir, dir);
        assert!(dir.is_dir());
    }

    #[test]
    #[serial]
    #[cfg(not(windows))]
    fn test_default_config_root_is_dot_config() {
        let base_dirs = BaseDirs::new().unwrap();
        let expected = base_dirs.home_dir().join(".config").join(APP_DIR);

        let computed = default_config_root().unwrap().join(APP_DIR);
        assert_eq!(computed, expected);
    }
}
