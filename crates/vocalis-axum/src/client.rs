//! Caller identification for request logs.

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::{ConnectInfo, FromRequestParts};
use axum::http::request::Parts;
use vocalis_core::ClientId;

/// Peer address of the caller, or `unknown` when the server was not started
/// with connect info.
#[derive(Debug, Clone)]
pub struct ClientAddr(pub ClientId);

impl<S> FromRequestParts<S> for ClientAddr
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let client = ConnectInfo::<SocketAddr>::from_request_parts(parts, state)
            .await
            .map_or_else(|_| ClientId::unknown(), |ConnectInfo(addr)| addr.into());
        Ok(Self(client))
    }
}
