use std::sync::Arc;

use warp::Filter;

use crate::http::encoding::reply;
use crate::relay::AuthRelay;
use crate::session::CSRF_COOKIE;

pub fn landing_endpoint(
    relay: Arc<AuthRelay>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_relay = warp::any().map(move || relay.clone());

    warp::path::end()
        .and(warp::get())
        .and(with_relay)
        .and(warp::cookie::optional::<String>(CSRF_COOKIE))
        .and_then(|relay: Arc<AuthRelay>, csrf: Option<String>| async move {
            reply::reply(relay.landing(csrf.as_deref()))
        })
}
