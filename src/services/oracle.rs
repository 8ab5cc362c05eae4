//! Provider seams: geocoding and directions.
//!
//! The search engine only sees these traits, so it can be driven by the
//! Google Maps adapter in production and by scripted doubles in tests.

use crate::models::{CandidateRoute, GeoPoint, TransportMode, WaypointSet};
use async_trait::async_trait;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    #[error("Address not found: {0}")]
    NotFound(String),

    #[error("No route found")]
    NoRouteFound,

    #[error("Provider rate limit exceeded")]
    RateLimited,

    #[error("Provider transport error: {0}")]
    Transport(String),

    #[error("Unexpected provider response: {0}")]
    InvalidResponse(String),

    #[error("Provider configuration missing: {0}")]
    ConfigurationMissing(String),
}

impl OracleError {
    /// True for failures of the provider itself rather than of the query
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            OracleError::RateLimited | OracleError::Transport(_) | OracleError::InvalidResponse(_)
        )
    }
}

pub type OracleResult<T> = std::result::Result<T, OracleError>;

/// One directions query. Loops always use `destination == origin`.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectionsQuery {
    pub origin: String,
    pub destination: String,
    pub waypoints: WaypointSet,
    pub mode: TransportMode,
    /// Let the provider reorder waypoints
    pub optimize: bool,
}

impl DirectionsQuery {
    /// Closed loop from `origin` back to itself through `waypoints`
    pub fn round_trip(origin: &str, waypoints: WaypointSet, mode: TransportMode) -> Self {
        DirectionsQuery {
            origin: origin.to_string(),
            destination: origin.to_string(),
            optimize: !waypoints.is_empty(),
            waypoints,
            mode,
        }
    }

    pub fn is_round_trip(&self) -> bool {
        self.origin == self.destination
    }
}

#[async_trait]
pub trait Geocoder: Send + Sync {
    async fn geocode(&self, address: &str) -> OracleResult<GeoPoint>;
}

#[async_trait]
pub trait DirectionsOracle: Send + Sync {
    async fn route(&self, query: &DirectionsQuery) -> OracleResult<CandidateRoute>;

    /// Elevation in metres at `point`
    async fn elevation(&self, point: GeoPoint) -> OracleResult<f64>;
}
