use super::types::*;

/// Query parameters of the authorization request (RFC 6749 §4.1.1).
#[derive(Debug, serde::Serialize)]
pub struct AuthorizationRequest<'r> {
    pub response_type: ResponseType,
    pub redirect_uri: &'r RedirectUri,
    pub client_id: &'r ClientId,
    pub scope: &'r Scope,
    pub state: &'r StateNonce,
}

/// What the authorization server sends back to `/callback`
/// (RFC 6749 §4.1.2 and §4.1.2.1).
#[derive(Debug, Default, serde::Deserialize)]
pub struct AuthorizationResponse {
    pub code: Option<AuthCode>,
    pub state: Option<StateNonce>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Form body of the access token request (RFC 6749 §4.1.3).
#[derive(Debug, serde::Serialize)]
pub struct TokenRequest<'r> {
    pub grant_type: GrantType,
    pub redirect_uri: &'r RedirectUri,
    pub code: &'r AuthCode,
}

/// Access token response (RFC 6749 §4.1.4). Only `access_token` is required.
#[derive(Debug, serde::Deserialize)]
pub struct TokenResponse {
    pub access_token: AccessToken,
    #[serde(default)]
    pub token_type: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub scope: Option<String>,
}

/// Submission of the landing page form.
#[derive(Debug, serde::Deserialize)]
pub struct AuthorizeForm {
    pub scope: Scope,
    pub csrf_token: CsrfToken,
}

/// Payload of the session cookie.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenSession {
    pub access_token: AccessToken,
}

impl TokenSession {
    pub fn new(access_token: AccessToken) -> Self {
        Self { access_token }
    }
}
