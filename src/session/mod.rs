//! Cookie-carried state: the access token session, the pending
//! authorization `state`, and the landing form's CSRF secret.

use cookie::time::Duration;
use cookie::{Cookie, SameSite};

use crate::core::models::TokenSession;
use crate::core::types::{CsrfSecret, CsrfToken, StateNonce};
use crate::util::sign::{Purpose, SigningService};

pub const SESSION_COOKIE: &str = "authrelay-session";
pub const STATE_COOKIE: &str = "authrelay-state";
pub const CSRF_COOKIE: &str = "authrelay-csrf";

const STATE_PATH: &str = "/callback";
const STATE_MAX_AGE_MINUTES: i64 = 10;

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("no {0} cookie")]
    Missing(&'static str),
    #[error("{0} cookie failed verification")]
    Tampered(&'static str),
    #[error("{0} cookie payload is malformed")]
    Malformed(&'static str),
    #[error("authorization response state does not match")]
    StateMismatch,
    #[error("missing or invalid CSRF token")]
    Csrf,
}

#[derive(Debug, Clone)]
pub struct SessionCodec {
    signer: SigningService,
    secure: bool,
}

impl SessionCodec {
    /// `secure` sets the Secure attribute on every cookie issued.
    pub fn new(signer: SigningService, secure: bool) -> Self {
        Self { signer, secure }
    }

    fn cookie(&self, name: &'static str, value: String) -> cookie::CookieBuilder<'static> {
        Cookie::build((name, value))
            .http_only(true)
            .secure(self.secure)
            .same_site(SameSite::Lax)
            .path("/")
    }

    pub fn issue(&self, session: &TokenSession) -> Result<Cookie<'static>, SessionError> {
        let json = serde_json::to_vec(session).map_err(|_| SessionError::Malformed(SESSION_COOKIE))?;
        let payload = base64::encode_config(json, base64::URL_SAFE_NO_PAD);
        let value = self.signer.sign(Purpose::Session, &payload);
        Ok(self.cookie(SESSION_COOKIE, value).build())
    }

    /// Session carried by the `authrelay-session` cookie value, if any.
    pub fn lookup(&self, raw: Option<&str>) -> Result<TokenSession, SessionError> {
        let raw = raw
            .filter(|r| !r.is_empty())
            .ok_or(SessionError::Missing(SESSION_COOKIE))?;
        let payload = self
            .signer
            .unsign(Purpose::Session, raw)
            .ok_or(SessionError::Tampered(SESSION_COOKIE))?;
        let json = base64::decode_config(payload, base64::URL_SAFE_NO_PAD)
            .map_err(|_| SessionError::Malformed(SESSION_COOKIE))?;
        serde_json::from_slice(&json).map_err(|_| SessionError::Malformed(SESSION_COOKIE))
    }

    pub fn issue_state(&self, state: &StateNonce) -> Cookie<'static> {
        self.cookie(STATE_COOKIE, self.signer.sign(Purpose::State, state.as_ref()))
            .path(STATE_PATH)
            .max_age(Duration::minutes(STATE_MAX_AGE_MINUTES))
            .build()
    }

    /// Checks that the `state` returned by the authorization server is the
    /// one we signed into the state cookie.
    pub fn verify_state(
        &self,
        raw: Option<&str>,
        returned: Option<&StateNonce>,
    ) -> Result<(), SessionError> {
        let raw = raw.ok_or(SessionError::Missing(STATE_COOKIE))?;
        let expected = self
            .signer
            .unsign(Purpose::State, raw)
            .ok_or(SessionError::Tampered(STATE_COOKIE))?;
        match returned {
            Some(state) if state.as_ref() == expected => Ok(()),
            _ => Err(SessionError::StateMismatch),
        }
    }

    pub fn clear_state(&self) -> Cookie<'static> {
        self.cookie(STATE_COOKIE, String::new())
            .path(STATE_PATH)
            .max_age(Duration::ZERO)
            .build()
    }

    /// The CSRF secret from its cookie, if the client already has one.
    pub fn csrf_secret(&self, raw: Option<&str>) -> Option<CsrfSecret> {
        raw.filter(|r| !r.is_empty())
            .map(|r| CsrfSecret(r.to_string()))
    }

    pub fn issue_csrf(&self, secret: &CsrfSecret) -> Cookie<'static> {
        self.cookie(CSRF_COOKIE, secret.0.clone()).build()
    }

    pub fn csrf_token(&self, secret: &CsrfSecret) -> CsrfToken {
        CsrfToken(self.signer.digest(Purpose::Csrf, secret.as_ref()))
    }

    pub fn verify_csrf(&self, raw: Option<&str>, token: &CsrfToken) -> Result<(), SessionError> {
        let secret = self.csrf_secret(raw).ok_or(SessionError::Csrf)?;
        if self
            .signer
            .verify_digest(Purpose::Csrf, secret.as_ref(), token.as_ref())
        {
            Ok(())
        } else {
            Err(SessionError::Csrf)
        }
    }
}
