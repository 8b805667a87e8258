//! Profile data model.
//!
//! A `Profile` is the (display name, email) pair git records as
//! `user.name` / `user.email`. Profiles are keyed by a short profile name in a
//! `ProfileSet`, which serializes as a plain JSON object:
//!
//! ```json
//! {
//!   "work": { "name": "Jane Doe", "email": "jane@corp.example" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::collections::btree_map;

use crate::error::{Error, Result};

/// Command words that a profile name would shadow on the command line
pub const RESERVED_NAMES: &[&str] = &[
    "list",
    "current",
    "add",
    "remove",
    "completion",
    "help",
    "version",
];

/// A stored git identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// Written to `user.name`
    pub name: String,
    /// Written to `user.email`
    pub email: String,
}

impl Profile {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }

    /// Exact match against a (user.name, user.email) pair
    pub fn matches(&self, name: &str, email: &str) -> bool {
        self.name == name && self.email == email
    }
}

/// Profile name -> profile mapping, kept sorted by name
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProfileSet(BTreeMap<String, Profile>);

impl ProfileSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// The two placeholder profiles written on first run
    pub fn defaults() -> Self {
        let mut set = Self::new();
        set.upsert("work", Profile::new("Your Work Name", "you@work.com"));
        set.upsert(
            "personal",
            Profile::new("Your Personal Name", "you@personal.com"),
        );
        set
    }

    pub fn get(&self, profile_name: &str) -> Option<&Profile> {
        self.0.get(profile_name)
    }

    pub fn contains(&self, profile_name: &str) -> bool {
        self.0.contains_key(profile_name)
    }

    /// Insert or replace a profile, returning the previous value
    pub fn upsert(&mut self, profile_name: impl Into<String>, profile: Profile) -> Option<Profile> {
        self.0.insert(profile_name.into(), profile)
    }

    pub fn remove(&mut self, profile_name: &str) -> Option<Profile> {
        self.0.remove(profile_name)
    }

    /// Profile names in sorted order
    pub fn names(&self) -> Vec<String> {
        self.0.keys().cloned().collect()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Profile> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Name of the first profile (in sorted order) whose name and email both
    /// equal the given identity.
    pub fn find_matching(&self, name: &str, email: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(_, profile)| profile.matches(name, email))
            .map(|(profile_name, _)| profile_name.as_str())
    }

    /// Lookup that fails with `NotFound` carrying the available names
    pub fn require(&self, profile_name: &str) -> Result<&Profile> {
        self.get(profile_name).ok_or_else(|| Error::NotFound {
            name: profile_name.to_string(),
            available: self.names(),
        })
    }
}

impl<'a> IntoIterator for &'a ProfileSet {
    type Item = (&'a String, &'a Profile);
    type IntoIter = btree_map::Iter<'a, String, Profile>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Validate a profile name for `add`.
///
/// The name must be non-empty, must not look like a flag and must not be one
/// of the subcommand words, since `git usr <name>` could never reach it.
pub fn validate_profile_name(profile_name: &str) -> Result<()> {
    if profile_name.trim().is_empty() {
        return Err(Error::Validation("Profile name cannot be empty".to_string()));
    }

    if profile_name.starts_with('-') {
        return Err(Error::Validation(format!(
            "Invalid profile name '{}': names cannot start with '-'",
            profile_name
        )));
    }

    if RESERVED_NAMES.contains(&profile_name) {
        return Err(Error::Validation(format!(
            "Invalid profile name '{}': it is a git-usr command",
            profile_name
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_seed_work_and_personal() {
        let set = ProfileSet::defaults();
        assert_eq!(set.names(), vec!["personal", "work"]);
        assert_eq!(set.get("work").unwrap().email, "you@work.com");
    }

    #[test]
    fn test_json_shape_is_flat_object() {
        let mut set = ProfileSet::new();
        set.upsert("work", Profile::new("A", "a@x.com"));

        let value = serde_json::to_value(&set).unwrap();
        assert_eq!(
            value,
            serde_json::json!({ "work": { "name": "A", "email": "a@x.com" } })
        );
    }

    #[test]
    fn test_upsert_replaces_existing() {
        let mut set = ProfileSet::defaults();
        let previous = set.upsert("work", Profile::new("A", "a@x.com"));

        assert_eq!(previous.unwrap().name, "Your Work Name");
        assert_eq!(set.get("work"), Some(&Profile::new("A", "a@x.com")));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_find_matching_requires_name_and_email() {
        let mut set = ProfileSet::new();
        set.upsert("work", Profile::new("A", "a@x.com"));
        set.upsert("oss", Profile::new("A", "a@oss.org"));

        assert_eq!(set.find_matching("A", "a@oss.org"), Some("oss"));
        assert_eq!(set.find_matching("A", "nobody@x.com"), None);
        assert_eq!(set.find_matching("B", "a@x.com"), None);
    }

    #[test]
    fn test_find_matching_duplicates_picks_one() {
        let mut set = ProfileSet::new();
        set.upsert("beta", Profile::new("A", "a@x.com"));
        set.upsert("alpha", Profile::new("A", "a@x.com"));

        assert_eq!(set.find_matching("A", "a@x.com"), Some("alpha"));
    }

    #[test]
    fn test_require_reports_available_names() {
        let set = ProfileSet::defaults();
        match set.require("oss") {
            Err(Error::NotFound { name, available }) => {
                assert_eq!(name, "oss");
                assert_eq!(available, vec!["personal", "work"]);
            }
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_profile_name_validation() {
        assert!(validate_profile_name("work").is_ok());
        assert!(validate_profile_name("client.acme").is_ok());
        assert!(validate_profile_name("my profile").is_ok());

        assert!(validate_profile_name("").is_err());
        assert!(validate_profile_name("   ").is_err());
        assert!(validate_profile_name("--global").is_err());
        assert!(validate_profile_name("list").is_err());
        assert!(validate_profile_name("remove").is_err());
    }
}
