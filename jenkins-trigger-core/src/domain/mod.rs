//! Core domain types
//!
//! These types describe what the action observes on the Jenkins side. They are
//! produced by the client from wire DTOs and consumed by the action.

pub mod build;
pub mod queue;

/// Job parameters sent with a trigger, keyed by parameter name
pub type JobParameters = std::collections::BTreeMap<String, serde_json::Value>;

/// Cookies attached to every request sent to the server
pub type Cookies = std::collections::BTreeMap<String, String>;
