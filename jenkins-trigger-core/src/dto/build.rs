//! Build DTOs

use serde::{Deserialize, Serialize};

use crate::domain::build::BuildResult;

/// Response of `GET {build}/api/json`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildInfo {
    pub number: u64,
    pub url: String,

    /// `null` while the build is running
    #[serde(default)]
    pub result: Option<String>,
}

impl BuildInfo {
    /// The build result this response reports
    pub fn build_result(&self) -> BuildResult {
        BuildResult::from_jenkins(self.result.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_running_build() {
        let info: BuildInfo = serde_json::from_str(
            r#"{"number": 3, "url": "https://ci.example.com/job/a/3/", "result": null, "building": true}"#,
        )
        .unwrap();
        assert_eq!(info.build_result(), BuildResult::Pending);
    }

    #[test]
    fn test_finished_build() {
        let info: BuildInfo = serde_json::from_str(
            r#"{"number": 3, "url": "https://ci.example.com/job/a/3/", "result": "UNSTABLE", "building": false, "duration": 1200}"#,
        )
        .unwrap();
        assert_eq!(info.build_result(), BuildResult::Unstable);
    }
}
