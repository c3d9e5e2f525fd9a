//! Build server abstraction
//!
//! The four remote operations the action needs. [`JenkinsClient`] implements
//! them over HTTP; tests substitute scripted implementations.

use async_trait::async_trait;
use jenkins_trigger_core::domain::JobParameters;
use jenkins_trigger_core::domain::build::{BuildHandle, BuildResult};
use jenkins_trigger_core::domain::queue::QueueItem;
use tracing::debug;

use crate::JenkinsClient;
use crate::error::{ClientError, Result};

/// Remote build server capable of running jobs
#[async_trait]
pub trait BuildServer: Send + Sync {
    /// Identifies the server; doubles as a connectivity and auth check
    async fn version(&self) -> Result<String>;

    /// Queues a build of `job_name` with the given parameters
    async fn submit_job(&self, job_name: &str, parameters: &JobParameters) -> Result<QueueItem>;

    /// Returns the build a queue item produced, or `None` while it is still queued
    async fn queued_build(&self, item: &QueueItem) -> Result<Option<BuildHandle>>;

    /// Fetches the current result of a build
    async fn build_result(&self, build: &BuildHandle) -> Result<BuildResult>;
}

#[async_trait]
impl BuildServer for JenkinsClient {
    async fn version(&self) -> Result<String> {
        self.get_version().await
    }

    async fn submit_job(&self, job_name: &str, parameters: &JobParameters) -> Result<QueueItem> {
        self.build_job(job_name, parameters).await
    }

    async fn queued_build(&self, item: &QueueItem) -> Result<Option<BuildHandle>> {
        let info = self.get_queue_item(item).await?;

        if let Some(executable) = info.executable {
            return Ok(Some(executable.into()));
        }

        if info.cancelled {
            return Err(ClientError::QueueItemCancelled(item.url.clone()));
        }

        if let Some(why) = info.why {
            debug!("{} is waiting: {}", item, why);
        }

        Ok(None)
    }

    async fn build_result(&self, build: &BuildHandle) -> Result<BuildResult> {
        let info = self.get_build_info(build).await?;
        Ok(info.build_result())
    }
}
