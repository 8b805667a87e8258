use clap::{Parser, Subcommand};
use clap_complete::Shell;

use crate::error::{Error, Result};
use crate::git::Scope;
use crate::ui::ColorMode;

pub const BIN_NAME: &str = "git-usr";

const EXAMPLES: &str = "\
Examples:
  git usr work                   Switch to work profile (local)
  git usr personal --global      Switch to personal profile (global)
  git usr add work \"John Doe\" \"john@company.com\"
  git usr list                   List all available profiles";

/// Git User Profile Switcher - switch git user.name/user.email by profile name
#[derive(Parser, Debug)]
#[command(name = BIN_NAME, bin_name = BIN_NAME)]
#[command(version, disable_help_subcommand = true, after_help = EXAMPLES)]
pub struct Cli {
    /// Apply the profile to the global git config instead of this repository
    #[arg(long, global = true)]
    pub global: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// When to use colors: always, auto, never
    #[arg(long, global = true, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// List all profiles, marking the one git currently uses
    List,

    /// Show the current git user.name and user.email
    Current,

    /// Add or update a profile (prompts for missing values)
    Add {
        /// Profile name to store it under
        profile: String,
        /// Value for user.name
        name: Option<String>,
        /// Value for user.email
        email: Option<String>,
    },

    /// Remove a profile
    Remove {
        /// Profile name to remove
        profile: String,
    },

    /// Generate a shell completion script
    Completion {
        /// Target shell
        shell: Shell,
    },

    /// Show usage, examples and the config file location
    Help,

    /// Show version information
    Version,

    /// Switch to the named profile: `git usr <profile> [--global]`
    #[command(external_subcommand)]
    Switch(Vec<String>),
}

/// Exit status for a failed argument parse.
///
/// `--help` and `--version` surface as clap "errors" printed to stdout and
/// exit 0; every real usage error exits 1 like any other failure.
pub fn usage_exit_code(err: &clap::Error) -> i32 {
    if err.use_stderr() { 1 } else { 0 }
}

/// A bare-profile invocation with the flags that followed the profile name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchTarget {
    pub profile: String,
    pub scope: Scope,
    /// `--color WHEN` given after the profile name
    pub color: Option<ColorMode>,
    /// `--no-color` given after the profile name
    pub no_color: bool,
}

/// Resolve `git usr <profile> [--global|--local] [--color WHEN] [--no-color]`.
///
/// Flags after the profile name arrive unparsed, so they are handled here.
/// `global_flag` is the `--global` seen before the profile name.
pub fn switch_target(args: &[String], global_flag: bool) -> Result<SwitchTarget> {
    let (profile, rest) = args
        .split_first()
        .ok_or_else(|| Error::Validation("Profile name required".to_string()))?;

    let mut target = SwitchTarget {
        profile: profile.clone(),
        scope: if global_flag { Scope::Global } else { Scope::Local },
        color: None,
        no_color: false,
    };

    let mut rest = rest.iter();
    while let Some(arg) = rest.next() {
        match arg.as_str() {
            "--global" => target.scope = Scope::Global,
            "--local" => target.scope = Scope::Local,
            "--no-color" => target.no_color = true,
            "--color" => {
                let value = rest.next().ok_or_else(|| {
                    Error::Validation("'--color' requires a value: always, auto, never".to_string())
                })?;
                target.color = Some(parse_color(value)?);
            }
            other => match other.strip_prefix("--color=") {
                Some(value) => target.color = Some(parse_color(value)?),
                None => {
                    return Err(Error::Validation(format!(
                        "Unexpected argument '{}'\nUsage: git usr <profile> [--global]",
                        other
                    )));
                }
            },
        }
    }

    Ok(target)
}

fn parse_color(value: &str) -> Result<ColorMode> {
    value.parse().map_err(Error::Validation)
}
