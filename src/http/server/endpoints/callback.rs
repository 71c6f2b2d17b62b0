use std::sync::Arc;

use warp::Filter;

use crate::core::models::AuthorizationResponse;
use crate::core::types::Origin;
use crate::http::encoding::{self, reply};
use crate::relay::AuthRelay;
use crate::session::STATE_COOKIE;

/// A callback without any query string reads as an empty response.
fn authorization_response(
) -> impl warp::Filter<Extract = (AuthorizationResponse,), Error = std::convert::Infallible> + Clone
{
    warp::query::<AuthorizationResponse>()
        .or(warp::any().map(AuthorizationResponse::default))
        .unify()
}

pub fn callback_endpoint(
    relay: Arc<AuthRelay>,
) -> impl warp::Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone {
    let with_relay = warp::any().map(move || relay.clone());

    warp::path!("callback")
        .and(warp::get())
        .and(with_relay)
        .and(encoding::origin())
        .and(warp::cookie::optional::<String>(STATE_COOKIE))
        .and(authorization_response())
        .and_then(
            |relay: Arc<AuthRelay>, origin: Origin, state: Option<String>, response| async move {
                let result = relay.callback(&origin, state.as_deref(), response).await;
                reply::reply(result)
            },
        )
}
