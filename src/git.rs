use std::fmt;
use std::path::PathBuf;
use std::process::{Command, Output};

use crate::error::{Error, Result};

/// Where an identity setting is applied
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Scope {
    /// The current repository's `.git/config`
    #[default]
    Local,
    /// The user's `~/.gitconfig`
    Global,
}

impl Scope {
    pub fn flag(self) -> &'static str {
        match self {
            Scope::Local => "--local",
            Scope::Global => "--global",
        }
    }

    /// Human phrasing used in switch confirmations
    pub fn describe(self) -> &'static str {
        match self {
            Scope::Local => "for this repository",
            Scope::Global => "globally",
        }
    }
}

/// The two identity keys git-usr reads and writes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    Name,
    Email,
}

impl IdentityKey {
    pub fn as_str(self) -> &'static str {
        match self {
            IdentityKey::Name => "user.name",
            IdentityKey::Email => "user.email",
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The identity git currently resolves (repository config over global)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Identity {
    pub name: Option<String>,
    pub email: Option<String>,
}

impl Identity {
    /// Both halves, only when both are set
    pub fn pair(&self) -> Option<(&str, &str)> {
        match (self.name.as_deref(), self.email.as_deref()) {
            (Some(name), Some(email)) => Some((name, email)),
            _ => None,
        }
    }
}

/// Access to git's identity configuration
pub trait GitConfig {
    /// Read the effective value of `key`; `None` when it is not configured
    fn get(&self, key: IdentityKey) -> Result<Option<String>>;

    /// Write `key = value` at `scope`
    fn set(&self, key: IdentityKey, value: &str, scope: Scope) -> Result<()>;

    fn current_identity(&self) -> Result<Identity> {
        Ok(Identity {
            name: self.get(IdentityKey::Name)?,
            email: self.get(IdentityKey::Email)?,
        })
    }

    /// Apply a name/email pair: name first, then email
    fn set_identity(&self, name: &str, email: &str, scope: Scope) -> Result<()> {
        self.set(IdentityKey::Name, name, scope)?;
        self.set(IdentityKey::Email, email, scope)
    }
}

/// `GitConfig` backed by the `git` executable on `PATH`
#[derive(Debug, Clone)]
pub struct GitCli {
    program: String,
    /// Repository to run in; the process working directory when `None`
    current_dir: Option<PathBuf>,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            current_dir: None,
        }
    }

    pub fn with_current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.current_dir = Some(dir.into());
        self
    }

    fn run(&self, args: &[&str]) -> Result<Output> {
        let mut command = Command::new(&self.program);
        command.args(args);
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }

        command
            .output()
            .map_err(|e| Error::ExternalTool(format!("failed to run {}: {}", self.program, e)))
    }
}

impl GitConfig for GitCli {
    fn get(&self, key: IdentityKey) -> Result<Option<String>> {
        let output = self.run(&["config", key.as_str()])?;

        // `git config <key>` exits 1 when the key is unset
        if !output.status.success() {
            return Ok(None);
        }

        let value = String::from_utf8_lossy(&output.stdout).trim().to_string();
        Ok(if value.is_empty() { None } else { Some(value) })
    }

    fn set(&self, key: IdentityKey, value: &str, scope: Scope) -> Result<()> {
        let output = self.run(&["config", scope.flag(), key.as_str(), value])?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::ExternalTool(format!(
                "failed to set {}: {}",
                key, stderr
            )));
        }

        Ok(())
    }
}
