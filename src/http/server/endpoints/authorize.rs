use std::sync::Arc;

use warp::Filter;

use crate::core::models::AuthorizeForm;
use crate::core::types::Origin;
use crate::http::encoding::{self, reply};
use crate::relay::AuthRelay;
use crate::session::CSRF_COOKIE;

const MAX_FORM_BYTES: u64 = 16 * 1024;

pub fn authorize_endpoint(
    relay: Arc<AuthRelay>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_relay = warp::any().map(move || relay.clone());

    warp::path!("auth")
        .and(warp::post())
        .and(with_relay)
        .and(encoding::origin())
        .and(warp::cookie::optional::<String>(CSRF_COOKIE))
        .and(warp::body::content_length_limit(MAX_FORM_BYTES))
        .and(warp::body::form::<AuthorizeForm>())
        .and_then(
            |relay: Arc<AuthRelay>, origin: Origin, csrf: Option<String>, form| async move {
                reply::reply(relay.authorization_redirect(&origin, csrf.as_deref(), form))
            },
        )
}
