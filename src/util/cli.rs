use std::net::{IpAddr, SocketAddr};
use std::time::Duration;

use clap::Parser;
use url::Url;

use crate::core::types::{ClientId, ClientSecret, Scope};

pub const DEFAULT_SCOPE: &str = "Analytics:MetronAPI:CreateGetDeleteAggregators,NoSQL core:*:*";

const MIN_SESSION_SECRET_LEN: usize = 32;

#[derive(Parser, Debug)]
#[clap(
    name = "authrelayd",
    version = env!("CARGO_PKG_VERSION"),
    about = "Demonstrates the OAuth 2.0 authorization code grant"
)]
pub struct Options {
    /// Port to listen on
    #[clap(long, env = "PORT", default_value = "3000")]
    port: u16,
    /// Address to listen on
    #[clap(long, env = "BIND_ADDRESS", default_value = "0.0.0.0")]
    bind_address: IpAddr,
    /// Base URL of the authorization server
    #[clap(long, env = "AUTH_SITE")]
    auth_site: String,
    /// Path of the authorization endpoint, appended to the auth site
    #[clap(long, env = "AUTHORIZATION_PATH")]
    authorization_path: String,
    /// Path of the token endpoint, appended to the auth site
    #[clap(long, env = "TOKEN_PATH")]
    token_path: String,
    #[clap(long, env = "CLIENT_ID")]
    client_id: String,
    #[clap(long, env = "CLIENT_SECRET", hide_env_values = true)]
    client_secret: String,
    /// Resource API checking course access
    #[clap(long, env = "COURSE_ACCESS_ROUTE")]
    course_access_route: String,
    /// Resource API returning course information
    #[clap(long, env = "COURSE_INFO_ROUTE")]
    course_info_route: String,
    /// `production` turns on the secure cookie attribute
    #[clap(long, env = "APP_ENV", default_value = "development")]
    app_env: String,
    /// Key used to sign cookies, at least 32 bytes
    #[clap(long, env = "SESSION_SECRET", hide_env_values = true)]
    session_secret: String,
    /// Deadline for outbound requests made while serving one request
    #[clap(long, env = "HTTP_TIMEOUT_SECS", default_value = "10")]
    http_timeout_secs: u64,
    /// Scope pre-filled on the landing page
    #[clap(long, env = "DEFAULT_SCOPE", default_value = DEFAULT_SCOPE)]
    default_scope: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} is not a valid URL: {source}")]
    InvalidUrl {
        name: &'static str,
        #[source]
        source: url::ParseError,
    },
    #[error("SESSION_SECRET must be at least 32 bytes")]
    WeakSessionSecret,
    #[error("HTTP_TIMEOUT_SECS must be greater than zero")]
    ZeroTimeout,
}

/// Process-wide settings. Built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct Config {
    pub listen: SocketAddr,
    pub authorization_endpoint: Url,
    pub token_endpoint: Url,
    pub client_id: ClientId,
    pub client_secret: ClientSecret,
    pub course_access_endpoint: Url,
    pub course_info_endpoint: Url,
    pub production: bool,
    pub session_secret: Vec<u8>,
    pub request_timeout: Duration,
    pub default_scope: Scope,
}

fn parse_url(name: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|source| ConfigError::InvalidUrl { name, source })
}

impl Config {
    pub fn from_options(opts: Options) -> Result<Self, ConfigError> {
        let authorization_endpoint = parse_url(
            "AUTH_SITE + AUTHORIZATION_PATH",
            &format!("{}{}", opts.auth_site, opts.authorization_path),
        )?;
        let token_endpoint = parse_url(
            "AUTH_SITE + TOKEN_PATH",
            &format!("{}{}", opts.auth_site, opts.token_path),
        )?;
        let course_access_endpoint = parse_url("COURSE_ACCESS_ROUTE", &opts.course_access_route)?;
        let course_info_endpoint = parse_url("COURSE_INFO_ROUTE", &opts.course_info_route)?;

        if opts.session_secret.len() < MIN_SESSION_SECRET_LEN {
            return Err(ConfigError::WeakSessionSecret);
        }
        if opts.http_timeout_secs == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        Ok(Self {
            listen: SocketAddr::new(opts.bind_address, opts.port),
            authorization_endpoint,
            token_endpoint,
            client_id: ClientId(opts.client_id),
            client_secret: ClientSecret(opts.client_secret),
            course_access_endpoint,
            course_info_endpoint,
            production: opts.app_env.eq_ignore_ascii_case("production"),
            session_secret: opts.session_secret.into_bytes(),
            request_timeout: Duration::from_secs(opts.http_timeout_secs),
            default_scope: Scope(opts.default_scope),
        })
    }
}
