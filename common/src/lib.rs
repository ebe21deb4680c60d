//! Types and configuration shared by every `hcheck` crate.
//!
//! * **[`network`]**: the verification targets and port specifications.
//! * **[`checklist`]**: loading targets from the YAML checklist.
//! * **[`config`]**: runtime settings for a verification batch.

pub mod checklist;
pub mod config;
pub mod error;
pub mod network;

pub use error::ConfigError;
