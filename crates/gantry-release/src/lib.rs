//! Gantry Release - previous-release resolution and release publishing
//!
//! This crate selects the nearest prior release tag, matches closed issues
//! to the commits that closed them, and drives the changelog pipeline
//! against an abstract release host.

pub mod associations;
pub mod host;
pub mod resolver;
pub mod types;
pub mod workflow;

pub use associations::IssueIndex;
pub use host::ReleaseHost;
pub use resolver::{parse_tag_ref, resolve_previous};
pub use types::{IssueClosure, ReleaseId, ReleaseRequest, TagCandidate, TagRef};
pub use workflow::{ReleaseOptions, ReleaseOutcome, ReleaseWorkflow};
