//! Jenkins HTTP Client
//!
//! A small, type-safe HTTP client for the parts of the Jenkins remote API used
//! to trigger a job and follow the resulting build.
//!
//! The action talks to the server through the [`BuildServer`] trait so the
//! waiting logic can be exercised without a live Jenkins.
//!
//! # Example
//!
//! ```no_run
//! use jenkins_trigger_client::{BuildServer, JenkinsClient};
//! use jenkins_trigger_core::domain::JobParameters;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = JenkinsClient::new("https://ci.example.com");
//!
//!     let item = client.submit_job("deploy", &JobParameters::new()).await?;
//!     println!("Queued: {}", item);
//!     Ok(())
//! }
//! ```

mod builds;
pub mod error;
mod jobs;
mod server;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use server::BuildServer;

use jenkins_trigger_core::domain::Cookies;
use reqwest::header::COOKIE;
use reqwest::{Client, Method, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// Username and API token used for HTTP basic auth
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub api_token: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, api_token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            api_token: api_token.into(),
        }
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("api_token", &"<redacted>")
            .finish()
    }
}

/// HTTP client for a Jenkins server
///
/// Every request carries the configured credentials and cookies.
#[derive(Debug, Clone)]
pub struct JenkinsClient {
    /// Base URL of the server (e.g., "https://ci.example.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Basic auth credentials, anonymous when absent
    credentials: Option<Credentials>,
    /// Pre-rendered `Cookie` header value
    cookie_header: Option<String>,
}

impl JenkinsClient {
    /// Create a new anonymous Jenkins client
    ///
    /// # Example
    /// ```
    /// use jenkins_trigger_client::JenkinsClient;
    ///
    /// let client = JenkinsClient::new("https://ci.example.com/");
    /// assert_eq!(client.base_url(), "https://ci.example.com");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new Jenkins client with a custom HTTP client
    ///
    /// This allows you to configure proxies, TLS settings, etc.
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credentials: None,
            cookie_header: None,
        }
    }

    /// Authenticate every request with the given credentials
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Send the given cookies with every request
    pub fn with_cookies(mut self, cookies: &Cookies) -> Self {
        self.cookie_header = if cookies.is_empty() {
            None
        } else {
            Some(
                cookies
                    .iter()
                    .map(|(name, value)| format!("{}={}", name, value))
                    .collect::<Vec<_>>()
                    .join("; "),
            )
        };
        self
    }

    /// Get the base URL of the server
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Start a request carrying credentials and cookies
    fn request(&self, method: Method, url: impl reqwest::IntoUrl) -> RequestBuilder {
        self.request_in_session(method, url, None)
    }

    /// Start a request that also carries the given session cookies
    ///
    /// Jenkins only accepts a crumb together with the session it was issued
    /// in, so the session is merged into the single `Cookie` header.
    fn request_in_session(
        &self,
        method: Method,
        url: impl reqwest::IntoUrl,
        session: Option<&str>,
    ) -> RequestBuilder {
        let mut request = self.client.request(method, url);

        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.api_token));
        }

        let cookie = match (self.cookie_header.as_deref(), session) {
            (Some(configured), Some(session)) => Some(format!("{}; {}", configured, session)),
            (configured, session) => configured.or(session).map(str::to_string),
        };
        if let Some(cookie) = cookie {
            request = request.header(COOKIE, cookie);
        }

        request
    }

    /// Parse the base URL with a trailing slash so relative joins keep its path
    fn base(&self) -> Result<Url> {
        Url::parse(&format!("{}/", self.base_url))
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid base URL: {}", e)))
    }

    /// Resolve a path relative to the base URL
    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base()?
            .join(path)
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid path {}: {}", path, e)))
    }

    /// URL of `{resource}/api/json` for an absolute resource URL
    fn api_json(resource_url: &str) -> Result<Url> {
        let resource = if resource_url.ends_with('/') {
            resource_url.to_string()
        } else {
            format!("{}/", resource_url)
        };

        Url::parse(&resource)
            .and_then(|url| url.join("api/json"))
            .map_err(|e| ClientError::InvalidRequest(format!("Invalid URL {}: {}", resource_url, e)))
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Turn a non-success status into an API error, passing the response through otherwise
    async fn check_status(&self, response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(response)
    }

    /// Handle an API response and deserialize JSON
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        self.check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    // =============================================================================
    // Server Identification
    // =============================================================================

    /// Get the Jenkins version from the `X-Jenkins` header of the root page
    ///
    /// Used as a cheap probe that the URL points at a reachable Jenkins and
    /// that the credentials are accepted.
    pub async fn get_version(&self) -> Result<String> {
        let url = self.base()?;
        let response = self.request(Method::GET, url).send().await?;
        let response = self.check_status(response).await?;

        response
            .headers()
            .get("X-Jenkins")
            .and_then(|value| value.to_str().ok())
            .map(str::to_string)
            .ok_or(ClientError::MissingHeader("X-Jenkins"))
    }
}
