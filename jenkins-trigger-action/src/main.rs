//! Jenkins Trigger Action
//!
//! Triggers a Jenkins job from a CI workflow, reports the URL of the build it
//! started and optionally waits for that build to finish.
//!
//! Architecture:
//! - Configuration: `INPUT_*` environment variables parsed into typed settings
//! - Action: connect, submit, wait for start, report, wait for completion
//! - Output: step outputs file and workflow annotations
//!
//! Runs on a single thread; the only suspension points are network calls and
//! the poller's sleeps.

mod action;
mod config;
mod error;
mod logging;
mod output;

use std::process::ExitCode;

use clap::Parser;
use tracing::instrument::WithSubscriber;
use tracing::{error, warn};

use crate::config::ActionInputs;
use crate::error::ActionError;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let inputs = ActionInputs::parse();
    let (dispatch, rejected_level) = logging::dispatch(inputs.log_level.as_deref());

    async move {
        if let Some(level) = rejected_level {
            warn!("Unknown log level {:?}, using info", level);
        }

        match action::run(inputs).await {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("{}", failure_message(e));
                ExitCode::FAILURE
            }
        }
    }
    .with_subscriber(dispatch)
    .await
}

/// Renders an error with its causes on one line
fn failure_message(error: ActionError) -> String {
    format!("{:#}", anyhow::Error::new(error))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jenkins_trigger_client::ClientError;

    #[test]
    fn test_failure_message_includes_cause() {
        let error = ActionError::Connection(ClientError::api_error(401, "Unauthorized"));
        assert_eq!(
            failure_message(error),
            "Could not connect to Jenkins.: API error (status 401): Unauthorized"
        );
    }

    #[test]
    fn test_failure_message_without_cause() {
        let error = ActionError::StartTimeout(std::time::Duration::from_secs(30));
        assert_eq!(
            failure_message(error),
            "Could not obtain build and timed out. Waited for 30 seconds."
        );
    }
}
