use crate::session::SessionError;
use crate::util::cli::ConfigError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("invalid session secret: {0}")]
    SigningKey(#[from] hmac::digest::InvalidLength),
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
    #[error("failed to compile templates: {0}")]
    Template(#[from] handlebars::TemplateError),
    #[error("failed to render page: {0}")]
    Render(#[from] handlebars::RenderError),
    #[error("failed to bind listener: {0}")]
    Bind(#[from] warp::Error),
    #[error(transparent)]
    Session(#[from] SessionError),
    #[error("request has no Host header")]
    MissingHost,
}
