//! Queue item DTOs

use serde::{Deserialize, Serialize};

use crate::domain::build::BuildHandle;

/// Response of `GET {queue_item}/api/json`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueItemInfo {
    /// Set once an executor has started the build
    #[serde(default)]
    pub executable: Option<Executable>,

    /// True when the item was removed from the queue without building
    #[serde(default)]
    pub cancelled: bool,

    /// Human readable reason the item is still waiting
    #[serde(default)]
    pub why: Option<String>,
}

/// Build reference embedded in a queue item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Executable {
    pub number: u64,
    pub url: String,
}

impl From<Executable> for BuildHandle {
    fn from(executable: Executable) -> Self {
        BuildHandle {
            number: executable.number,
            url: executable.url,
        }
    }
}
