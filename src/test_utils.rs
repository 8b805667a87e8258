//! Test utilities shared across test modules
//!
//! Temp-dir backed paths plus in-memory stand-ins for git and the terminal
//! prompt, so command handlers can be exercised without a repository or a TTY.

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};

use tempfile::TempDir;

use crate::error::{Error, Result};
use crate::git::{GitConfig, IdentityKey, Scope};
use crate::paths::Paths;
use crate::prompt::Prompt;

/// Create a Paths struct rooted in a temporary directory
pub fn setup_test_paths(temp_dir: &TempDir) -> Paths {
    let paths = Paths::from_dir(temp_dir.path().join(".config/git-usr"));
    paths.ensure_dir().unwrap();
    paths
}

/// Recording git double. Local values shadow global ones on read.
#[derive(Debug, Default)]
pub struct FakeGit {
    values: RefCell<HashMap<(IdentityKey, Scope), String>>,
    calls: RefCell<Vec<(IdentityKey, String, Scope)>>,
    fail_set: bool,
    fail_get: bool,
}

impl FakeGit {
    /// Every `set` fails like a git invocation outside a repository
    pub fn failing() -> Self {
        Self {
            fail_set: true,
            ..Self::default()
        }
    }

    /// Every `get` fails like a missing git binary
    pub fn unavailable() -> Self {
        Self {
            fail_get: true,
            fail_set: true,
            ..Self::default()
        }
    }

    pub fn with_identity(name: &str, email: &str, scope: Scope) -> Self {
        let git = Self::default();
        let mut values = git.values.borrow_mut();
        values.insert((IdentityKey::Name, scope), name.to_string());
        values.insert((IdentityKey::Email, scope), email.to_string());
        drop(values);
        git
    }

    /// Successful `set` calls in order
    pub fn calls(&self) -> Vec<(IdentityKey, String, Scope)> {
        self.calls.borrow().clone()
    }

    pub fn value(&self, key: IdentityKey, scope: Scope) -> Option<String> {
        self.values.borrow().get(&(key, scope)).cloned()
    }
}

impl GitConfig for FakeGit {
    fn get(&self, key: IdentityKey) -> Result<Option<String>> {
        if self.fail_get {
            return Err(Error::ExternalTool("failed to run git".to_string()));
        }
        Ok(self
            .value(key, Scope::Local)
            .or_else(|| self.value(key, Scope::Global)))
    }

    fn set(&self, key: IdentityKey, value: &str, scope: Scope) -> Result<()> {
        if self.fail_set {
            return Err(Error::ExternalTool(format!(
                "failed to set {}: fatal: not in a git directory",
                key
            )));
        }
        self.values
            .borrow_mut()
            .insert((key, scope), value.to_string());
        self.calls
            .borrow_mut()
            .push((key, value.to_string(), scope));
        Ok(())
    }
}

/// Prompt that replays fixed answers; an exhausted script answers with ""
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<String>>,
    asked: RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: RefCell::new(answers.into_iter().map(Into::into).collect()),
            asked: RefCell::new(Vec::new()),
        }
    }

    /// Messages shown so far
    pub fn asked(&self) -> Vec<String> {
        self.asked.borrow().clone()
    }
}

impl Prompt for ScriptedPrompt {
    fn text(&self, message: &str) -> Result<String> {
        self.asked.borrow_mut().push(message.to_string());
        Ok(self.answers.borrow_mut().pop_front().unwrap_or_default())
    }
}
