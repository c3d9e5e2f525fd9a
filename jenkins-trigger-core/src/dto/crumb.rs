//! CSRF crumb DTO

use serde::{Deserialize, Serialize};

/// Response of `GET /crumbIssuer/api/json`
///
/// The crumb is sent back as the header named by `crumb_request_field` on
/// state-changing requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Crumb {
    pub crumb_request_field: String,
    pub crumb: String,
}
