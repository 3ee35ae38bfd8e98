use async_trait::async_trait;
use thiserror::Error;
use wayroute_core::GeoPoint;

use crate::route::Route;

#[derive(Debug, Error)]
pub enum DirectionsError {
    #[error("no route found")]
    NoRouteFound,

    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialize(#[from] serde_json::Error),
}

/// Fetches a driving route between two coordinates.
///
/// Travel mode is fixed to automobile; implementations issue exactly one
/// upstream request per call.
#[async_trait]
pub trait Directions: Send + Sync {
    async fn fetch_route(&self, from: GeoPoint, to: GeoPoint) -> Result<Route, DirectionsError>;
}
