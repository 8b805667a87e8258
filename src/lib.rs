pub mod cli;
pub mod commands;
pub mod completion;
pub mod error;
pub mod git;
pub mod paths;
pub mod profiles;
pub mod prompt;
pub mod store;
pub mod ui;

#[cfg(test)]
pub mod test_utils;
