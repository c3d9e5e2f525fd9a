//! Trigger flow
//!
//! Connects, submits the job, waits for the build to start and reports its
//! URL, then optionally waits for the build to finish.

use jenkins_trigger_client::{BuildServer, ClientError, JenkinsClient};
use jenkins_trigger_core::domain::build::BuildHandle;
use jenkins_trigger_core::domain::queue::QueueItem;
use jenkins_trigger_core::poll::{PollConfig, PollOutcome, poll};
use tracing::{debug, info};

use crate::config::{ActionInputs, Settings};
use crate::error::ActionError;
use crate::output::ActionOutput;

/// Runs the action end to end
pub async fn run(inputs: ActionInputs) -> Result<(), ActionError> {
    let settings = Settings::from_inputs(&inputs)?;
    let client = connect(&settings).await?;
    let output = ActionOutput::new(settings.results_file.clone());

    trigger(&client, &settings, &output).await
}

/// Builds the client and checks that the server answers
///
/// Fails before anything is submitted when the identification call fails.
pub async fn connect(settings: &Settings) -> Result<JenkinsClient, ActionError> {
    let mut client = JenkinsClient::new(&settings.url).with_cookies(&settings.cookies);

    match &settings.credentials {
        Some(credentials) => client = client.with_credentials(credentials.clone()),
        None => info!("Username or token not provided. Connecting without authentication."),
    }

    let version = client.version().await.map_err(ActionError::Connection)?;

    info!("Successfully connected to Jenkins.");
    debug!("Jenkins version: {}", version);

    Ok(client)
}

/// Submits the job and follows the resulting build
pub async fn trigger<S>(
    server: &S,
    settings: &Settings,
    output: &ActionOutput,
) -> Result<(), ActionError>
where
    S: BuildServer + ?Sized,
{
    let item = server
        .submit_job(&settings.job_name, &settings.parameters)
        .await?;

    info!("Requested to build job.");
    debug!("Waiting on {}", item);

    let build = wait_for_start(server, &item, settings.start_poll).await?;

    info!("Build URL: {}", build.url);
    output.report_build_url(&build.url)?;

    if !settings.wait {
        info!("Not waiting for build to finish.");
        return Ok(());
    }

    wait_for_completion(server, &build, settings.completion_poll).await
}

/// Polls the queue item until it has produced a build
async fn wait_for_start<S>(
    server: &S,
    item: &QueueItem,
    config: PollConfig,
) -> Result<BuildHandle, ActionError>
where
    S: BuildServer + ?Sized,
{
    let interval = config.interval().as_secs();

    let outcome = poll(config, move || async move {
        let build = server.queued_build(item).await?;
        if build.is_none() {
            info!("Build not started yet. Waiting {} seconds.", interval);
        }
        Ok::<_, ClientError>(build)
    })
    .await?;

    match outcome {
        PollOutcome::Success(build) => Ok(build),
        PollOutcome::TimedOut { .. } => Err(ActionError::StartTimeout(config.deadline())),
    }
}

/// Polls the build until it reaches a terminal result
///
/// A terminal result other than success fails at once.
async fn wait_for_completion<S>(
    server: &S,
    build: &BuildHandle,
    config: PollConfig,
) -> Result<(), ActionError>
where
    S: BuildServer + ?Sized,
{
    let interval = config.interval().as_secs();

    let outcome = poll(config, move || async move {
        let result = server.build_result(build).await?;
        if result.is_terminal() {
            return Ok::<_, ClientError>(Some(result));
        }
        info!(
            "Build not finished yet. Waiting {} seconds. {}",
            interval, build.url
        );
        Ok(None)
    })
    .await?;

    match outcome {
        PollOutcome::Success(result) if result.is_success() => {
            info!("Build successful 🎉");
            Ok(())
        }
        PollOutcome::Success(result) => Err(ActionError::BuildFailed(result)),
        PollOutcome::TimedOut { .. } => Err(ActionError::CompletionTimeout(config.deadline())),
    }
}
