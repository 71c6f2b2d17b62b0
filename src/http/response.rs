use cookie::Cookie;
use warp::http::header::{HeaderMap, HeaderValue, CONTENT_TYPE, LOCATION, SET_COOKIE};
use warp::http::StatusCode;
use warp::reply::{Reply, Response};

use crate::relay::{Page, Redirect};

fn append_cookies(headers: &mut HeaderMap, cookies: &[Cookie<'static>]) -> Result<(), ()> {
    for cookie in cookies {
        let value = HeaderValue::from_str(&cookie.to_string()).map_err(|_| ())?;
        headers.append(SET_COOKIE, value);
    }
    Ok(())
}

fn internal_error(what: &str) -> Response {
    tracing::error!("failed to encode {}", what);
    StatusCode::INTERNAL_SERVER_ERROR.into_response()
}

impl Reply for Page {
    fn into_response(self) -> Response {
        let mut response = Response::new(self.html.into());
        *response.status_mut() = self.status;
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("text/html; charset=utf-8"),
        );
        match append_cookies(response.headers_mut(), &self.cookies) {
            Ok(()) => response,
            Err(()) => internal_error("cookie"),
        }
    }
}

impl Reply for Redirect {
    fn into_response(self) -> Response {
        let location = match HeaderValue::from_str(&self.location) {
            Ok(location) => location,
            Err(_) => return internal_error("redirect location"),
        };

        let mut response = Response::new(warp::hyper::Body::empty());
        *response.status_mut() = StatusCode::FOUND;
        response.headers_mut().insert(LOCATION, location);
        match append_cookies(response.headers_mut(), &self.cookies) {
            Ok(()) => response,
            Err(()) => internal_error("cookie"),
        }
    }
}
