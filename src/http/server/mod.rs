use std::net::SocketAddr;
use std::sync::Arc;

use warp::Filter;

use crate::relay::{AuthRelay, Error};

mod endpoints;

use endpoints::{
    authorize::authorize_endpoint,
    callback::callback_endpoint,
    data::data_endpoint,
    landing::landing_endpoint,
};

use super::encoding::error::handle_reject;

#[derive(Debug)]
pub struct Server {
    relay: Arc<AuthRelay>,
}

impl Server {
    pub fn new(relay: Arc<AuthRelay>) -> Self {
        Self { relay }
    }

    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl warp::Reply,), Error = warp::Rejection> + Clone + Send + Sync + 'static
    {
        let relay = &self.relay;

        landing_endpoint(relay.clone())
            .or(authorize_endpoint(relay.clone()))
            .or(callback_endpoint(relay.clone()))
            .or(data_endpoint(relay.clone()))
            .recover(handle_reject)
            .with(warp::log("authrelay::http"))
    }

    /// Serves until Ctrl-C.
    pub async fn serve(self, addr: SocketAddr) -> Result<(), Error> {
        let shutdown = async {
            if tokio::signal::ctrl_c().await.is_err() {
                tracing::warn!("unable to listen for shutdown signal");
                std::future::pending::<()>().await;
            }
            tracing::info!("shutting down");
        };

        let (addr, server) =
            warp::serve(self.routes()).try_bind_with_graceful_shutdown(addr, shutdown)?;
        tracing::info!(%addr, "HTTP started");
        server.await;

        Ok(())
    }
}
