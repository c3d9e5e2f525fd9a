//! Action configuration
//!
//! Inputs arrive as `INPUT_*` environment variables (the GitHub Actions
//! convention) and are read as raw strings through clap. [`Settings`] turns
//! them into typed values, naming the offending input on failure.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use jenkins_trigger_client::Credentials;
use jenkins_trigger_core::domain::{Cookies, JobParameters};
use jenkins_trigger_core::poll::PollConfig;
use thiserror::Error;

/// An input that could not be parsed
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Invalid `{field}` input: {reason}")]
pub struct ConfigError {
    /// Name of the input, as used in the action definition
    pub field: &'static str,
    pub reason: String,
}

impl ConfigError {
    fn new(field: &'static str, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

/// Raw action inputs
#[derive(Debug, Parser)]
#[command(name = "jenkins-trigger")]
#[command(about = "Trigger a Jenkins job and follow its build", long_about = None)]
pub struct ActionInputs {
    /// Jenkins base URL
    #[arg(long, env = "INPUT_URL")]
    pub url: String,

    /// Job to build; use `/` to address jobs inside folders
    #[arg(long, env = "INPUT_JOB_NAME")]
    pub job_name: String,

    /// Username for authentication
    #[arg(long, env = "INPUT_USERNAME")]
    pub username: Option<String>,

    /// API token for authentication
    #[arg(long, env = "INPUT_API_TOKEN", hide_env_values = true)]
    pub api_token: Option<String>,

    /// Job parameters as a JSON object
    #[arg(long, env = "INPUT_PARAMETERS")]
    pub parameters: Option<String>,

    /// Cookies to send with each request, as a JSON object
    #[arg(long, env = "INPUT_COOKIES", hide_env_values = true)]
    pub cookies: Option<String>,

    /// Wait for the build to finish (`true` or `false`)
    #[arg(long, env = "INPUT_WAIT")]
    pub wait: Option<String>,

    /// Seconds to wait for the build to finish
    #[arg(long, env = "INPUT_TIMEOUT")]
    pub timeout: Option<String>,

    /// Seconds to wait for the build to start
    #[arg(long, env = "INPUT_START_TIMEOUT")]
    pub start_timeout: Option<String>,

    /// Seconds between status checks
    #[arg(long, env = "INPUT_INTERVAL")]
    pub interval: Option<String>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, env = "INPUT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// File that collects step outputs
    #[arg(long, env = "GITHUB_OUTPUT")]
    pub github_output: Option<PathBuf>,
}

const DEFAULT_TIMEOUT_SECS: u64 = 600;
const DEFAULT_START_TIMEOUT_SECS: u64 = 600;
const DEFAULT_INTERVAL_SECS: u64 = 5;

/// Typed action settings
#[derive(Debug, Clone)]
pub struct Settings {
    pub url: String,
    pub job_name: String,
    /// Basic auth credentials; `None` means anonymous access
    pub credentials: Option<Credentials>,
    pub parameters: JobParameters,
    pub cookies: Cookies,
    pub wait: bool,
    /// Pacing and bound of the wait for the build to start
    pub start_poll: PollConfig,
    /// Pacing and bound of the wait for the build to finish
    pub completion_poll: PollConfig,
    pub results_file: Option<PathBuf>,
}

impl Settings {
    /// Parses raw inputs into settings
    pub fn from_inputs(inputs: &ActionInputs) -> Result<Self, ConfigError> {
        let url = inputs.url.trim().to_string();
        if url.is_empty() {
            return Err(ConfigError::new("url", "must not be empty"));
        }
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ConfigError::new("url", "must start with http:// or https://"));
        }

        let job_name = inputs.job_name.trim().to_string();
        if job_name.is_empty() {
            return Err(ConfigError::new("job_name", "must not be empty"));
        }

        let credentials = match (present(&inputs.username), present(&inputs.api_token)) {
            (Some(username), Some(api_token)) => Some(Credentials::new(username, api_token)),
            _ => None,
        };

        let parameters: JobParameters = parse_json(&inputs.parameters, "parameters")?;
        let cookies: Cookies = parse_json(&inputs.cookies, "cookies")?;
        let wait = parse_bool(&inputs.wait, "wait")?;

        let interval = parse_seconds(&inputs.interval, "interval", DEFAULT_INTERVAL_SECS)?;
        let start_timeout =
            parse_seconds(&inputs.start_timeout, "start_timeout", DEFAULT_START_TIMEOUT_SECS)?;
        let timeout = parse_seconds(&inputs.timeout, "timeout", DEFAULT_TIMEOUT_SECS)?;

        let start_poll = PollConfig::new(interval, start_timeout)
            .map_err(|e| ConfigError::new("start_timeout", e.to_string()))?;
        let completion_poll = PollConfig::new(interval, timeout)
            .map_err(|e| ConfigError::new("timeout", e.to_string()))?;

        Ok(Self {
            url,
            job_name,
            credentials,
            parameters,
            cookies,
            wait,
            start_poll,
            completion_poll,
            results_file: inputs.github_output.clone(),
        })
    }
}

/// Treats unset and blank inputs alike; unset action inputs arrive as empty strings
fn present(value: &Option<String>) -> Option<&str> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|value| !value.is_empty())
}

fn parse_json<T>(value: &Option<String>, field: &'static str) -> Result<T, ConfigError>
where
    T: serde::de::DeserializeOwned + Default,
{
    match present(value) {
        Some(raw) => serde_json::from_str(raw)
            .map_err(|e| ConfigError::new(field, format!("`{}` is not valid JSON: {}", field, e))),
        None => Ok(T::default()),
    }
}

fn parse_bool(value: &Option<String>, field: &'static str) -> Result<bool, ConfigError> {
    match present(value) {
        None => Ok(false),
        Some(raw) if raw.eq_ignore_ascii_case("true") => Ok(true),
        Some(raw) if raw.eq_ignore_ascii_case("false") => Ok(false),
        Some(raw) => Err(ConfigError::new(
            field,
            format!("expected `true` or `false`, got {:?}", raw),
        )),
    }
}

fn parse_seconds(
    value: &Option<String>,
    field: &'static str,
    default_secs: u64,
) -> Result<Duration, ConfigError> {
    let secs = match present(value) {
        None => default_secs,
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            ConfigError::new(
                field,
                format!("expected a whole number of seconds, got {:?}", raw),
            )
        })?,
    };

    if secs == 0 {
        return Err(ConfigError::new(field, "must be greater than 0"));
    }

    Ok(Duration::from_secs(secs))
}
