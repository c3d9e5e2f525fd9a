//! Job trigger endpoints

use jenkins_trigger_core::domain::JobParameters;
use jenkins_trigger_core::domain::queue::QueueItem;
use jenkins_trigger_core::dto::crumb::Crumb;
use reqwest::header::{HeaderMap, LOCATION, SET_COOKIE};
use reqwest::{Method, Url};
use tracing::debug;

use crate::JenkinsClient;
use crate::error::{ClientError, Result};

/// Parameters Jenkins reads from the trigger itself rather than the job
const RESERVED_PARAMETERS: [&str; 2] = ["token", "delay"];

/// A crumb and the session cookies it is bound to
struct IssuedCrumb {
    crumb: Crumb,
    session: Option<String>,
}

impl JenkinsClient {
    // =============================================================================
    // Job Triggering
    // =============================================================================

    /// Trigger a build of a job
    ///
    /// Uses `buildWithParameters` when any non-reserved parameter is given and
    /// `build` otherwise. Parameters are sent in the query string.
    ///
    /// # Arguments
    /// * `job_name` - Job name; `/` separates folders (e.g. "team/deploy")
    /// * `parameters` - Job parameters
    ///
    /// # Returns
    /// The queue item created for the trigger
    pub async fn build_job(&self, job_name: &str, parameters: &JobParameters) -> Result<QueueItem> {
        let entry = if parameters
            .keys()
            .all(|key| RESERVED_PARAMETERS.contains(&key.as_str()))
        {
            "build"
        } else {
            "buildWithParameters"
        };

        let url = self.job_url(job_name, entry)?;
        let query = Self::query_pairs(parameters);

        let request = match self.get_crumb().await? {
            Some(IssuedCrumb { crumb, session }) => self
                .request_in_session(Method::POST, url, session.as_deref())
                .header(crumb.crumb_request_field.as_str(), crumb.crumb.as_str()),
            None => self.request(Method::POST, url),
        }
        .query(&query);

        let response = request.send().await?;
        let response = self.check_status(response).await?;

        let location = response
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(ClientError::MissingHeader("Location"))?;

        let location = self
            .base()?
            .join(location)
            .map_err(|e| ClientError::ParseError(format!("Invalid queue location: {}", e)))?;

        Ok(QueueItem::from_location(location.as_str()))
    }

    /// Fetch a CSRF crumb, or `None` when crumb protection is disabled
    async fn get_crumb(&self) -> Result<Option<IssuedCrumb>> {
        let url = self.endpoint("crumbIssuer/api/json")?;
        let response = self.request(Method::GET, url).send().await?;
        let session = Self::session_cookies(response.headers());

        match self.handle_response(response).await {
            Ok(crumb) => Ok(Some(IssuedCrumb { crumb, session })),
            Err(e) if e.is_not_found() => {
                debug!("Crumb issuer not available, sending request without crumb");
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// `name=value` pairs set by a response, joined for a `Cookie` header
    fn session_cookies(headers: &HeaderMap) -> Option<String> {
        let pairs: Vec<&str> = headers
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .filter_map(|value| value.split(';').next())
            .map(str::trim)
            .filter(|pair| pair.contains('='))
            .collect();

        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// URL of `entry` under the job, with one `job/<name>` pair per folder level
    fn job_url(&self, job_name: &str, entry: &str) -> Result<Url> {
        let segments: Vec<&str> = job_name
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();

        if segments.is_empty() {
            return Err(ClientError::InvalidRequest(format!(
                "Invalid job name: {:?}",
                job_name
            )));
        }

        let mut url = self.base()?;
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidRequest("Base URL cannot have a path".to_string()))?
            .pop_if_empty()
            .extend(segments.iter().flat_map(|segment| ["job", *segment]))
            .push(entry);

        Ok(url)
    }

    /// Render parameters as strings; non-string values use their JSON text
    fn query_pairs(parameters: &JobParameters) -> Vec<(&str, String)> {
        parameters
            .iter()
            .map(|(name, value)| {
                let value = match value {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                };
                (name.as_str(), value)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_url_plain() {
        let client = JenkinsClient::new("https://ci.example.com");
        assert_eq!(
            client.job_url("deploy", "build").unwrap().as_str(),
            "https://ci.example.com/job/deploy/build"
        );
    }

    #[test]
    fn test_job_url_with_folders_and_base_path() {
        let client = JenkinsClient::new("https://example.com/jenkins/");
        assert_eq!(
            client
                .job_url("team/services/deploy", "buildWithParameters")
                .unwrap()
                .as_str(),
            "https://example.com/jenkins/job/team/job/services/job/deploy/buildWithParameters"
        );
    }

    #[test]
    fn test_job_url_encodes_spaces() {
        let client = JenkinsClient::new("https://ci.example.com");
        assert_eq!(
            client.job_url("nightly build", "build").unwrap().as_str(),
            "https://ci.example.com/job/nightly%20build/build"
        );
    }

    #[test]
    fn test_job_url_rejects_empty_name() {
        let client = JenkinsClient::new("https://ci.example.com");
        assert!(matches!(
            client.job_url("/", "build"),
            Err(ClientError::InvalidRequest(_))
        ));
    }

    #[test]
    fn test_session_cookies_keep_name_and_value() {
        let mut headers = HeaderMap::new();
        headers.append(
            SET_COOKIE,
            "JSESSIONID.1f2e=node0abc; Path=/; HttpOnly".parse().unwrap(),
        );
        headers.append(SET_COOKIE, "remember-me=1; Max-Age=60".parse().unwrap());

        assert_eq!(
            JenkinsClient::session_cookies(&headers).as_deref(),
            Some("JSESSIONID.1f2e=node0abc; remember-me=1")
        );
        assert_eq!(JenkinsClient::session_cookies(&HeaderMap::new()), None);
    }

    #[test]
    fn test_query_pairs_render_values() {
        let mut parameters = JobParameters::new();
        parameters.insert("BRANCH".to_string(), json!("main"));
        parameters.insert("DRY_RUN".to_string(), json!(true));
        parameters.insert("REPLICAS".to_string(), json!(3));

        assert_eq!(
            JenkinsClient::query_pairs(&parameters),
            vec![
                ("BRANCH", "main".to_string()),
                ("DRY_RUN", "true".to_string()),
                ("REPLICAS", "3".to_string()),
            ]
        );
    }
}
