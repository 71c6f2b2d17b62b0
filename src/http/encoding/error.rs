use warp::http::StatusCode;
use warp::{Rejection, Reply};

use crate::relay::Error;
use crate::session::SessionError;

#[derive(Debug, Clone, Copy)]
pub enum RelayRejection {
    Forbidden,
    BadRequest(&'static str),
    Internal,
}

impl warp::reject::Reject for RelayRejection {}

impl From<Error> for RelayRejection {
    fn from(error: Error) -> Self {
        match error {
            Error::Session(SessionError::Csrf) => Self::Forbidden,
            Error::MissingHost => Self::BadRequest("missing Host header"),
            e => {
                tracing::error!(error = %e, "request failed");
                Self::Internal
            }
        }
    }
}

pub async fn handle_reject(err: Rejection) -> Result<impl Reply, Rejection> {
    match err.find::<RelayRejection>() {
        Some(e) => {
            let (status, message) = match *e {
                RelayRejection::Forbidden => (StatusCode::FORBIDDEN, "invalid csrf token"),
                RelayRejection::BadRequest(m) => (StatusCode::BAD_REQUEST, m),
                RelayRejection::Internal => {
                    (StatusCode::INTERNAL_SERVER_ERROR, "internal server error")
                }
            };
            Ok(warp::reply::with_status(message, status).into_response())
        }
        _ => Err(err),
    }
}
