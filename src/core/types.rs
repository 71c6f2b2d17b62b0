use std::str::FromStr;

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantType {
    AuthorizationCode,
}

#[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseType {
    Code,
}

/// Requested permissions, forwarded to the authorization server exactly as
/// the user submitted them.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Scope(pub String);

impl Scope {
    /// Individual scope values, split on commas and whitespace.
    pub fn parts(&self) -> impl Iterator<Item = &str> {
        self.0
            .split(|c: char| c == ',' || c == ' ')
            .filter(|s| !s.is_empty())
    }
}

impl FromStr for Scope {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

#[derive(Clone, Debug, Eq, Hash, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct ClientId(pub String);

impl FromStr for ClientId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

#[derive(Clone, serde::Deserialize)]
#[serde(transparent)]
pub struct ClientSecret(pub String);

impl std::fmt::Debug for ClientSecret {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ClientSecret(..)")
    }
}

impl AsRef<str> for ClientSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct RedirectUri(pub String);

#[derive(Debug, Clone, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct AuthCode(pub String);

impl AsRef<str> for AuthCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[derive(Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct AccessToken(pub String);

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AccessToken(..)")
    }
}

impl AsRef<str> for AccessToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Anti-CSRF value round-tripped through the authorization server as
/// the `state` parameter.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct StateNonce(pub String);

impl AsRef<str> for StateNonce {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Secret half of the landing form's CSRF protection. Lives only in an
/// httpOnly cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsrfSecret(pub String);

impl AsRef<str> for CsrfSecret {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Public half of the CSRF protection, embedded in the landing form.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct CsrfToken(pub String);

impl AsRef<str> for CsrfToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Scheme and host the user agent used to reach us.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub scheme: String,
    pub host: String,
}

impl Origin {
    /// `forwarded_proto` is the raw `X-Forwarded-Proto` header. Only its
    /// first hop is considered, and anything but `https` falls back to `http`.
    pub fn new(forwarded_proto: Option<&str>, host: &str) -> Self {
        let scheme = forwarded_proto
            .and_then(|p| p.split(',').next())
            .map(|p| p.trim().to_ascii_lowercase())
            .filter(|p| p == "https")
            .unwrap_or_else(|| "http".to_string());

        Self {
            scheme,
            host: host.to_string(),
        }
    }

    pub fn redirect_uri(&self) -> RedirectUri {
        RedirectUri(format!("{}://{}/callback", self.scheme, self.host))
    }
}
