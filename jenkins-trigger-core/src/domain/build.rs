//! Build domain model
//!
//! Represents a concrete build instance and the result it reports.

use serde::{Deserialize, Serialize};

/// A started build on the Jenkins server
///
/// Created once the queue item resolves; never changed locally afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildHandle {
    /// Build number within its job
    pub number: u64,

    /// Absolute URL of the build page
    pub url: String,
}

/// Result of a build as reported by Jenkins
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildResult {
    Success,
    Failure,
    Aborted,
    Unstable,
    /// Still running, or a result Jenkins may still replace
    Pending,
}

impl BuildResult {
    /// Maps the Jenkins `result` field to a build result
    ///
    /// `None` means the build is still running. Values Jenkins can report
    /// before a build settles (such as `NOT_BUILT`) are treated as pending.
    pub fn from_jenkins(result: Option<&str>) -> Self {
        match result {
            Some("SUCCESS") => BuildResult::Success,
            Some("FAILURE") => BuildResult::Failure,
            Some("ABORTED") => BuildResult::Aborted,
            Some("UNSTABLE") => BuildResult::Unstable,
            _ => BuildResult::Pending,
        }
    }

    /// Whether the result will not change on later queries
    pub fn is_terminal(self) -> bool {
        !matches!(self, BuildResult::Pending)
    }

    /// Whether the result is a passing terminal state
    pub fn is_success(self) -> bool {
        matches!(self, BuildResult::Success)
    }
}

impl std::fmt::Display for BuildResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BuildResult::Success => write!(f, "SUCCESS"),
            BuildResult::Failure => write!(f, "FAILURE"),
            BuildResult::Aborted => write!(f, "ABORTED"),
            BuildResult::Unstable => write!(f, "UNSTABLE"),
            BuildResult::Pending => write!(f, "PENDING"),
        }
    }
}
