pub mod error;
pub mod reply;

use warp::{Filter, Rejection};

use crate::core::types::Origin;
use crate::relay::Error;

/// Where the user agent thinks we live, from `Host` and, behind a
/// proxy, `X-Forwarded-Proto`.
pub fn origin() -> impl Filter<Extract = (Origin,), Error = Rejection> + Clone {
    warp::header::optional::<String>("x-forwarded-proto")
        .and(warp::header::optional::<String>("host"))
        .and_then(|proto: Option<String>, host: Option<String>| async move {
            let origin = host
                .filter(|h| !h.is_empty())
                .map(|h| Origin::new(proto.as_deref(), &h))
                .ok_or(Error::MissingHost);
            reply::accept(origin)
        })
}
