//! The relay drives the four legs of the authorization code grant. Each
//! method serves one route and returns a [`Page`] or [`Redirect`] for the
//! HTTP layer to encode.

pub mod error;
pub mod views;

use std::sync::Arc;
use std::time::Instant;

use cookie::Cookie;
use warp::http::StatusCode;

use crate::client::{self, DownstreamError, OAuthClient, Resource, ResourceClient};
use crate::core::models::{AuthorizationResponse, AuthorizeForm, TokenSession};
use crate::core::types::{CsrfSecret, Origin, StateNonce};
use crate::http::server::Server;
use crate::session::{SessionCodec, SessionError};
use crate::util::cli::{Config, Options};
use crate::util::random::FromRandom;
use crate::util::sign::SigningService;

pub use error::Error;
use views::Views;

pub const LANDING_PATH: &str = "/";
pub const DATA_PATH: &str = "/data";

/// An HTML response, with any cookies to set alongside it.
#[derive(Debug)]
pub struct Page {
    pub status: StatusCode,
    pub html: String,
    pub cookies: Vec<Cookie<'static>>,
}

impl Page {
    pub fn new(status: StatusCode, html: String) -> Self {
        Self {
            status,
            html,
            cookies: Vec::new(),
        }
    }

    pub fn ok(html: String) -> Self {
        Self::new(StatusCode::OK, html)
    }

    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }
}

/// A `302 Found`, with any cookies to set alongside it.
#[derive(Debug)]
pub struct Redirect {
    pub location: String,
    pub cookies: Vec<Cookie<'static>>,
}

impl Redirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            cookies: Vec::new(),
        }
    }

    pub fn with_cookie(mut self, cookie: Cookie<'static>) -> Self {
        self.cookies.push(cookie);
        self
    }
}

#[derive(Debug)]
pub struct AuthRelay {
    config: Config,
    oauth: OAuthClient,
    resources: ResourceClient,
    sessions: SessionCodec,
    views: Views,
}

impl AuthRelay {
    pub fn new(config: Config) -> Result<Self, Error> {
        let http = client::http_client()?;
        let signer = SigningService::with_secret_key(&config.session_secret)?;

        Ok(Self {
            oauth: OAuthClient::new(http.clone(), &config),
            resources: ResourceClient::new(http, &config),
            sessions: SessionCodec::new(signer, config.production),
            views: Views::new()?,
            config,
        })
    }

    fn deadline(&self) -> Instant {
        Instant::now() + self.config.request_timeout
    }

    /// `GET /`: the scope form, protected by a CSRF token.
    pub fn landing(&self, csrf_cookie: Option<&str>) -> Result<Page, Error> {
        let (secret, new_cookie) = match self.sessions.csrf_secret(csrf_cookie) {
            Some(secret) => (secret, None),
            None => {
                let secret = CsrfSecret::from_random();
                let cookie = self.sessions.issue_csrf(&secret);
                (secret, Some(cookie))
            }
        };

        let token = self.sessions.csrf_token(&secret);
        let html = self.views.landing(&token, &self.config.default_scope)?;

        let page = Page::ok(html);
        Ok(match new_cookie {
            Some(cookie) => page.with_cookie(cookie),
            None => page,
        })
    }

    /// `POST /auth`: sends the user agent to the authorization endpoint
    /// with a fresh `state`.
    pub fn authorization_redirect(
        &self,
        origin: &Origin,
        csrf_cookie: Option<&str>,
        form: AuthorizeForm,
    ) -> Result<Redirect, Error> {
        self.sessions.verify_csrf(csrf_cookie, &form.csrf_token)?;

        let state = StateNonce::from_random();
        let redirect_uri = origin.redirect_uri();
        let url = self
            .oauth
            .authorization_url(&redirect_uri, &form.scope, &state);

        tracing::debug!(
            redirect_uri = %redirect_uri.0,
            scopes = form.scope.parts().count(),
            "redirecting to authorization endpoint"
        );

        Ok(Redirect::to(url.as_str()).with_cookie(self.sessions.issue_state(&state)))
    }

    /// `GET /callback`: redeems the authorization code and stores the
    /// access token in the session cookie. Every failure sends the user
    /// back to the landing page.
    pub async fn callback(
        &self,
        origin: &Origin,
        state_cookie: Option<&str>,
        response: AuthorizationResponse,
    ) -> Result<Redirect, Error> {
        if let Some(error) = &response.error {
            tracing::warn!(
                error = %error,
                description = ?response.error_description,
                "authorization server denied the request"
            );
            return Ok(Redirect::to(LANDING_PATH));
        }

        let code = match &response.code {
            Some(code) => code,
            None => {
                tracing::warn!("authorization response carried no code");
                return Ok(Redirect::to(LANDING_PATH));
            }
        };

        if let Err(e) = self
            .sessions
            .verify_state(state_cookie, response.state.as_ref())
        {
            tracing::warn!(error = %e, "rejecting authorization response");
            return Ok(Redirect::to(LANDING_PATH));
        }

        let redirect_uri = origin.redirect_uri();
        let token = match self
            .oauth
            .exchange_code(code, &redirect_uri, self.deadline())
            .await
        {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    status = ?e.status(),
                    timeout = e.is_timeout(),
                    "access token error"
                );
                return Ok(Redirect::to(LANDING_PATH));
            }
        };

        if token.refresh_token.is_some() {
            tracing::debug!("discarding refresh token");
        }
        tracing::info!(
            token_type = ?token.token_type,
            expires_in = ?token.expires_in,
            "obtained access token"
        );

        let session = self.sessions.issue(&TokenSession::new(token.access_token))?;
        Ok(Redirect::to(DATA_PATH)
            .with_cookie(session)
            .with_cookie(self.sessions.clear_state()))
    }

    /// `GET /data`: course access, then course info, rendered together.
    /// The second call only runs if the first succeeds.
    pub async fn data(&self, session_cookie: Option<&str>) -> Result<Page, Error> {
        let session = match self.sessions.lookup(session_cookie) {
            Ok(session) => session,
            Err(e) => return self.unauthorized(e),
        };

        let deadline = self.deadline();
        let token = &session.access_token;
        let result = async {
            let access = self
                .resources
                .fetch(Resource::CourseAccess, token, deadline)
                .await?;
            let info = self
                .resources
                .fetch(Resource::CourseInfo, token, deadline)
                .await?;
            Ok::<_, DownstreamError>((access, info))
        }
        .await;

        match result {
            Ok((access, info)) => Ok(Page::ok(self.views.data(&access, &info)?)),
            Err(e) => {
                tracing::warn!(
                    resource = e.resource.name(),
                    status = ?e.status,
                    timeout = e.timeout,
                    message = %e.message,
                    "resource request failed"
                );
                Ok(Page::new(StatusCode::BAD_GATEWAY, self.views.error(&e)?))
            }
        }
    }

    fn unauthorized(&self, error: SessionError) -> Result<Page, Error> {
        tracing::info!(error = %error, "no usable session");
        let html = self
            .views
            .unauthorized("Your session is missing or has expired.")?;
        Ok(Page::new(StatusCode::UNAUTHORIZED, html))
    }
}

async fn authrelayd(opts: Options) -> Result<(), Error> {
    let config = Config::from_options(opts)?;
    let listen = config.listen;
    let relay = Arc::new(AuthRelay::new(config)?);

    let server = Server::new(relay);
    server.serve(listen).await
}

pub async fn main(opts: Options) -> Result<(), ()> {
    authrelayd(opts).await.map_err(|e| {
        tracing::error!(error = %e, "authrelayd stopped");
    })
}
