use std::time::Instant;

use url::Url;

use super::{read_body, remaining, ClientError};
use crate::core::types::AccessToken;
use crate::util::cli::Config;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    CourseAccess,
    CourseInfo,
}

impl Resource {
    pub fn name(self) -> &'static str {
        match self {
            Resource::CourseAccess => "course_access",
            Resource::CourseInfo => "course_info",
        }
    }
}

/// Failure of a resource API call, shown to the user as-is.
#[derive(Debug, serde::Serialize)]
pub struct DownstreamError {
    pub resource: Resource,
    pub url: String,
    pub status: Option<u16>,
    pub timeout: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl DownstreamError {
    fn new(resource: Resource, url: &Url, error: ClientError) -> Self {
        Self {
            resource,
            url: url.to_string(),
            status: error.status(),
            timeout: error.is_timeout(),
            body: error.body().map(ToString::to_string),
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResourceClient {
    http: reqwest::Client,
    course_access: Url,
    course_info: Url,
}

impl ResourceClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            course_access: config.course_access_endpoint.clone(),
            course_info: config.course_info_endpoint.clone(),
        }
    }

    fn endpoint(&self, resource: Resource) -> &Url {
        match resource {
            Resource::CourseAccess => &self.course_access,
            Resource::CourseInfo => &self.course_info,
        }
    }

    /// GETs `resource` with the bearer token. An empty body reads as `{}`.
    pub async fn fetch(
        &self,
        resource: Resource,
        token: &AccessToken,
        deadline: Instant,
    ) -> Result<serde_json::Value, DownstreamError> {
        let url = self.endpoint(resource);
        self.get_json(url, token, deadline)
            .await
            .map_err(|e| DownstreamError::new(resource, url, e))
    }

    async fn get_json(
        &self,
        url: &Url,
        token: &AccessToken,
        deadline: Instant,
    ) -> Result<serde_json::Value, ClientError> {
        let response = self
            .http
            .get(url.clone())
            .bearer_auth(token.as_ref())
            .header(reqwest::header::ACCEPT, "application/json")
            .timeout(remaining(deadline)?)
            .send()
            .await?;

        let body = read_body(response).await?;
        if body.trim().is_empty() {
            return Ok(serde_json::Value::Object(Default::default()));
        }
        Ok(serde_json::from_str(&body)?)
    }
}
