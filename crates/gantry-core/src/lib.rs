//! Gantry Core - Core library for release publishing
//!
//! This crate provides the foundational error types and configuration
//! handling for the Gantry release changelog and publishing tool.

pub mod config;
pub mod error;

pub use config::{load_config, load_config_or_default, Config};
pub use error::{GantryError, Result};
