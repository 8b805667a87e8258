use std::path::PathBuf;

use thiserror::Error;

/// Error kinds surfaced by the profile store and the git collaborator
#[derive(Error, Debug)]
pub enum Error {
    /// Reading or writing the profile file (or its directory) failed
    #[error("i/o error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The profile file is not a valid profile JSON document
    #[error("malformed profile file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// No profile is stored under the requested name
    #[error("profile '{name}' not found (available: {})", display_names(.available))]
    NotFound { name: String, available: Vec<String> },
    /// A required field is missing or a name is not allowed
    #[error("{0}")]
    Validation(String),
    /// git could not be spawned or exited unsuccessfully
    #[error("git command failed: {0}")]
    ExternalTool(String),
    /// Interactive input was aborted
    #[error("input error: {0}")]
    Prompt(#[from] inquire::InquireError),
    #[error("failed to determine home directory")]
    HomeDir,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

fn display_names(names: &[String]) -> String {
    if names.is_empty() {
        "none".to_string()
    } else {
        names.join(", ")
    }
}
