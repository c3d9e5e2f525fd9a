//! Queue item and build endpoints

use jenkins_trigger_core::domain::build::BuildHandle;
use jenkins_trigger_core::domain::queue::QueueItem;
use jenkins_trigger_core::dto::build::BuildInfo;
use jenkins_trigger_core::dto::queue::QueueItemInfo;
use reqwest::Method;

use crate::JenkinsClient;
use crate::error::Result;

impl JenkinsClient {
    // =============================================================================
    // Queue
    // =============================================================================

    /// Get the current state of a queue item
    ///
    /// # Arguments
    /// * `item` - The queue item returned by a trigger
    pub async fn get_queue_item(&self, item: &QueueItem) -> Result<QueueItemInfo> {
        let url = Self::api_json(&item.url)?;
        let response = self.request(Method::GET, url).send().await?;

        self.handle_response(response).await
    }

    // =============================================================================
    // Builds
    // =============================================================================

    /// Get the current state of a build
    ///
    /// # Arguments
    /// * `build` - The build to query
    pub async fn get_build_info(&self, build: &BuildHandle) -> Result<BuildInfo> {
        let url = Self::api_json(&build.url)?;
        let response = self.request(Method::GET, url).send().await?;

        self.handle_response(response).await
    }
}
