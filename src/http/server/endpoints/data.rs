use std::sync::Arc;

use warp::Filter;

use crate::http::encoding::reply;
use crate::relay::AuthRelay;
use crate::session::SESSION_COOKIE;

pub fn data_endpoint(
    relay: Arc<AuthRelay>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_relay = warp::any().map(move || relay.clone());

    warp::path!("data")
        .and(warp::get())
        .and(with_relay)
        .and(warp::cookie::optional::<String>(SESSION_COOKIE))
        .and_then(|relay: Arc<AuthRelay>, session: Option<String>| async move {
            reply::reply(relay.data(session.as_deref()).await)
        })
}
