//! Action errors
//!
//! Every error ends the run with a non-zero exit status. Nothing here is
//! retried; the only retries are the poller's "not ready yet" ticks.

use std::time::Duration;

use jenkins_trigger_client::ClientError;
use jenkins_trigger_core::domain::build::BuildResult;
use thiserror::Error;

use crate::config::ConfigError;

#[derive(Debug, Error)]
pub enum ActionError {
    /// An input could not be parsed
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The identification probe failed before anything was submitted
    #[error("Could not connect to Jenkins.")]
    Connection(#[source] ClientError),

    #[error("Could not obtain build and timed out. Waited for {} seconds.", .0.as_secs())]
    StartTimeout(Duration),

    #[error("Build has not finished and timed out. Waited for {} seconds.", .0.as_secs())]
    CompletionTimeout(Duration),

    /// The build reached a terminal status other than success
    #[error("Build status returned \"{0}\". Build has failed ☹️.")]
    BuildFailed(BuildResult),

    /// A remote call failed after the connection was established
    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Failed to write action output: {0}")]
    Output(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_messages_carry_deadline() {
        assert_eq!(
            ActionError::StartTimeout(Duration::from_secs(120)).to_string(),
            "Could not obtain build and timed out. Waited for 120 seconds."
        );
        assert_eq!(
            ActionError::CompletionTimeout(Duration::from_secs(600)).to_string(),
            "Build has not finished and timed out. Waited for 600 seconds."
        );
    }

    #[test]
    fn test_build_failed_names_status() {
        assert_eq!(
            ActionError::BuildFailed(BuildResult::Aborted).to_string(),
            "Build status returned \"ABORTED\". Build has failed ☹️."
        );
    }
}
