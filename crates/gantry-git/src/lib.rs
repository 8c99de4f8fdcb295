//! Gantry Git - local git operations
//!
//! This crate provides local repository access for the CLI: tag listing,
//! commit ranges, and a `ReleaseHost` implementation backed by `git2`.

mod commits;
mod host;
mod repository;
mod tags;

pub use repository::{GitRepo, Result};
