use super::error::RelayRejection;
use warp::reply::{Reply, Response};
use warp::Rejection;

pub fn accept<T, E>(result: Result<T, E>) -> Result<T, Rejection>
where
    E: Into<RelayRejection>,
{
    result.map_err(|e| warp::reject::custom(e.into()))
}

pub fn reply<T, E>(result: Result<T, E>) -> Result<Response, Rejection>
where
    T: Reply,
    E: Into<RelayRejection>,
{
    result
        .map(|t| t.into_response())
        .map_err(|e| warp::reject::custom(e.into()))
}
