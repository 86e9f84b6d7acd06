//! Empties a project's scratch directories according to `CustomClean.xml`.
//!
//! The pipeline is [`config::load`] → [`clean::clean`] → [`summary::format`];
//! [`project::run`] strings the three together for a given project root.

pub mod clean;
pub mod config;
pub mod error;
pub mod project;
pub mod summary;

pub use clean::CleanResult;
pub use config::CleaningPolicy;
pub use error::{ConfigError, DeletionError, InitError};
