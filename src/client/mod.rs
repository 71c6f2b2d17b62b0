//! Outbound legs of the authorization code grant: building the
//! authorization request URL, redeeming codes at the token endpoint, and
//! calling the protected resource APIs.

pub mod error;
pub mod resource;

use std::time::{Duration, Instant};

use url::Url;

use crate::core::models::{AuthorizationRequest, TokenRequest, TokenResponse};
use crate::core::types::{
    AuthCode, ClientId, ClientSecret, GrantType, RedirectUri, ResponseType, Scope, StateNonce,
};
use crate::util::cli::Config;

pub use error::ClientError;
pub use resource::{DownstreamError, Resource, ResourceClient};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Shared HTTP client. Per-request deadlines are applied on top of the
/// connect timeout.
pub fn http_client() -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
        .connect_timeout(CONNECT_TIMEOUT)
        .build()
}

/// Time left before `deadline`, or an error if it already passed.
pub(crate) fn remaining(deadline: Instant) -> Result<Duration, ClientError> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        Err(ClientError::DeadlineExceeded)
    } else {
        Ok(left)
    }
}

pub(crate) async fn read_body(response: reqwest::Response) -> Result<String, ClientError> {
    let status = response.status();
    let body = response.text().await?;
    if status.is_success() {
        Ok(body)
    } else {
        Err(ClientError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

fn append_params(mut url: Url, p: impl serde::Serialize) -> Url {
    // serde_urlencoded only fails on non-map values.
    let new_qs = serde_urlencoded::to_string(p).unwrap_or_default();
    let pairs = form_urlencoded::parse(new_qs.as_bytes());
    url.query_pairs_mut().extend_pairs(pairs);
    url
}

#[derive(Debug, Clone)]
pub struct OAuthClient {
    http: reqwest::Client,
    client_id: ClientId,
    client_secret: ClientSecret,
    authorization_endpoint: Url,
    token_endpoint: Url,
}

impl OAuthClient {
    pub fn new(http: reqwest::Client, config: &Config) -> Self {
        Self {
            http,
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
            authorization_endpoint: config.authorization_endpoint.clone(),
            token_endpoint: config.token_endpoint.clone(),
        }
    }

    /// Authorization request URL (RFC 6749 §4.1.1).
    pub fn authorization_url(
        &self,
        redirect_uri: &RedirectUri,
        scope: &Scope,
        state: &StateNonce,
    ) -> Url {
        let req = AuthorizationRequest {
            response_type: ResponseType::Code,
            redirect_uri,
            client_id: &self.client_id,
            scope,
            state,
        };
        append_params(self.authorization_endpoint.clone(), req)
    }

    /// Redeems an authorization code (RFC 6749 §4.1.3), authenticating
    /// with HTTP Basic.
    pub async fn exchange_code(
        &self,
        code: &AuthCode,
        redirect_uri: &RedirectUri,
        deadline: Instant,
    ) -> Result<TokenResponse, ClientError> {
        let req = TokenRequest {
            grant_type: GrantType::AuthorizationCode,
            redirect_uri,
            code,
        };

        let response = self
            .http
            .post(self.token_endpoint.clone())
            .basic_auth(&self.client_id.0, Some(self.client_secret.as_ref()))
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&req)
            .timeout(remaining(deadline)?)
            .send()
            .await?;

        let body = read_body(response).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn client() -> OAuthClient {
        OAuthClient {
            http: reqwest::Client::new(),
            client_id: ClientId("relay client".into()),
            client_secret: ClientSecret("shh".into()),
            authorization_endpoint: Url::parse("https://auth.example/oauth2/authorize").unwrap(),
            token_endpoint: Url::parse("https://auth.example/oauth2/token").unwrap(),
        }
    }

    #[test]
    fn authorization_url_carries_exactly_five_parameters() {
        let url = client().authorization_url(
            &RedirectUri("https://relay.example/callback".into()),
            &Scope("NoSQL core:*:*,Analytics:A&B".into()),
            &StateNonce("n0nce".into()),
        );

        assert_eq!(url.host_str(), Some("auth.example"));
        assert_eq!(url.path(), "/oauth2/authorize");

        let params: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(params.len(), 5);
        let params: HashMap<_, _> = params.into_iter().collect();
        assert_eq!(params["response_type"], "code");
        assert_eq!(params["redirect_uri"], "https://relay.example/callback");
        assert_eq!(params["client_id"], "relay client");
        assert_eq!(params["scope"], "NoSQL core:*:*,Analytics:A&B");
        assert_eq!(params["state"], "n0nce");
    }

    #[test]
    fn authorization_url_escapes_reserved_characters() {
        let url = client().authorization_url(
            &RedirectUri("http://relay.example/callback".into()),
            &Scope("a&b=c".into()),
            &StateNonce("s".into()),
        );
        let query = url.query().unwrap();
        assert!(query.contains("scope=a%26b%3Dc"));
        assert!(query.contains("redirect_uri=http%3A%2F%2Frelay.example%2Fcallback"));
        assert!(query.contains("client_id=relay+client"));
    }

    #[test]
    fn remaining_rejects_elapsed_deadlines() {
        let past = Instant::now() - Duration::from_millis(1);
        assert!(matches!(remaining(past), Err(ClientError::DeadlineExceeded)));
        assert!(remaining(Instant::now() + Duration::from_secs(1)).is_ok());
    }
}
