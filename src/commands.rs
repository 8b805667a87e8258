//! Handlers for each CLI command (`list`, `add`, `remove`, switching, ...).
//!
//! This is the coordination layer between:
//! - `crate::store` for the persisted profile set.
//! - `crate::git` for reading and writing the identity.
//! - `crate::prompt` for values missing from the command line.
//! - `crate::ui` for output.
//!
//! Each handler loads the profile set fresh; mutations rewrite the whole file.

use anyhow::{Context, Result};
use clap::CommandFactory;
use clap_complete::Shell;

use crate::cli::{BIN_NAME, Cli};
use crate::completion;
use crate::error::Error;
use crate::git::{GitConfig, Identity, Scope};
use crate::paths::Paths;
use crate::profiles::{Profile, ProfileSet, validate_profile_name};
use crate::prompt::{Prompt, value_or_prompt};
use crate::store::ProfileStore;
use crate::ui::Ui;

/// The profile matching the identity git currently uses, if any
pub fn current_profile<'a>(profiles: &'a ProfileSet, identity: &Identity) -> Option<&'a str> {
    identity
        .pair()
        .and_then(|(name, email)| profiles.find_matching(name, email))
}

/// List all profiles, marking the one matching the current identity
pub fn list(paths: &Paths, git: &impl GitConfig, ui: &Ui) -> Result<()> {
    let store = ProfileStore::open(paths)?;
    let profiles = store.profiles();

    if profiles.is_empty() {
        ui.warn("No profiles found.");
        ui.newline();
        ui.println("Create one with:");
        ui.println(format!("  {} add <profile> \"Name\" \"email\"", ui.bold("git usr")));
        return Ok(());
    }

    // An unreadable identity just means nothing gets marked
    let identity = git.current_identity().unwrap_or_default();
    let current = current_profile(profiles, &identity);

    ui.section("Available profiles");
    ui.println(ui.profile_table(profiles, current).to_string());

    Ok(())
}

/// Apply a stored profile's name and email at `scope`
pub fn switch(
    paths: &Paths,
    git: &impl GitConfig,
    profile_name: &str,
    scope: Scope,
    ui: &Ui,
) -> Result<()> {
    let store = ProfileStore::open(paths)?;

    let profile = match store.profiles().require(profile_name) {
        Ok(profile) => profile,
        Err(e) => {
            ui.info(format!(
                "Use '{} add {}' to create a new profile",
                ui.bold("git usr"),
                profile_name
            ));
            return Err(e.into());
        }
    };

    let spinner = ui.spinner(format!("Switching to profile '{}'...", profile_name));

    if let Err(e) = git.set_identity(&profile.name, &profile.email, scope) {
        spinner.finish_and_clear();
        return Err(e).with_context(|| format!("Failed to switch to profile '{}'", profile_name));
    }

    ui.spinner_finish_ok(
        &spinner,
        format!("Switched to '{}' profile {}", profile_name, scope.describe()),
    );
    ui.profile_details(profile);

    Ok(())
}

/// Add or update a profile.
///
/// An existing profile is only overwritten when both values are supplied;
/// otherwise its stored values are shown and nothing changes. Missing values
/// for a new profile are asked for through `prompt`.
pub fn add(
    paths: &Paths,
    profile_name: &str,
    name: Option<String>,
    email: Option<String>,
    prompt: &impl Prompt,
    ui: &Ui,
) -> Result<()> {
    validate_profile_name(profile_name)?;

    let mut store = ProfileStore::open(paths)?;
    let name = name.filter(|v| !v.trim().is_empty());
    let email = email.filter(|v| !v.trim().is_empty());

    if let Some(existing) = store.profiles().get(profile_name) {
        if name.is_none() || email.is_none() {
            ui.info(format!("Profile '{}' already exists:", profile_name));
            ui.profile_details(existing);
            ui.newline();
            ui.println("To update it, provide both name and email.");
            return Ok(());
        }
    }

    let name = value_or_prompt(prompt, name, "Enter name:")?;
    let email = value_or_prompt(prompt, email, "Enter email:")?;

    if name.is_empty() || email.is_empty() {
        return Err(Error::Validation("Name and email are required".to_string()).into());
    }

    let profile = Profile::new(name, email);
    store.upsert(profile_name, profile.clone())?;

    ui.ok(format!("Profile '{}' saved", profile_name));
    ui.profile_details(&profile);
    ui.newline();
    ui.println(format!("Use: {} {}", ui.bold("git usr"), profile_name));

    Ok(())
}

/// Remove a stored profile
pub fn remove(paths: &Paths, profile_name: &str, ui: &Ui) -> Result<()> {
    let mut store = ProfileStore::open(paths)?;
    store.remove(profile_name)?;

    ui.ok(format!("Profile '{}' removed", profile_name));
    Ok(())
}

/// Show the identity git currently resolves
pub fn current(paths: &Paths, git: &impl GitConfig, ui: &Ui) -> Result<()> {
    let identity = git.current_identity()?;

    let Some((name, email)) = identity.pair() else {
        ui.warn("No git user configured in this repository");
        return Ok(());
    };

    ui.section("Current git configuration");
    ui.profile_details(&Profile::new(name, email));

    if let Ok(store) = ProfileStore::open(paths) {
        if let Some(profile_name) = current_profile(store.profiles(), &identity) {
            ui.println(format!("   {} {}", ui.dim("Profile:"), profile_name));
        }
    }

    Ok(())
}

/// Print a completion script with the stored profile names baked in
pub fn completion(paths: &Paths, shell: Shell, ui: &Ui) -> Result<()> {
    let store = ProfileStore::open(paths)?;
    let script = completion::generate(shell, &store.profiles().names(), &mut Cli::command());
    ui.println(script);
    Ok(())
}

/// Print usage plus the config file location
pub fn help(paths: Option<&Paths>, ui: &Ui) {
    let mut cmd = Cli::command();
    ui.println(cmd.render_long_help().ansi().to_string());

    let location = paths
        .map(|p| p.profiles_file().display().to_string())
        .unwrap_or_else(|| "(unavailable)".to_string());
    ui.println(format!("Config location: {}", location));
}

/// Print the version banner
pub fn version(ui: &Ui) {
    ui.println(version_banner(ui));
}

fn version_banner(ui: &Ui) -> String {
    format!(
        "{}\n{} version {}\n{}",
        ui.dim(BANNER),
        ui.bold(BIN_NAME),
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_DESCRIPTION")
    )
}

const BANNER: &str = r"   __ _(_) |_      _   _ ___ _ __
  / _` | | __|____| | | / __| '__|
 | (_| | | ||_____| |_| \__ \ |
  \__, |_|\__|     \__,_|___/_|
  |___/";
