pub mod geo;
pub mod request;
pub mod route;

pub use geo::GeoPoint;
pub use request::{RideStyle, RiderProfile, RoutePlanRequest, StyleBias, TransportMode};
pub use route::{
    CandidateRoute, ElevationSample, Leg, PlannedRoute, SearchResult, SearchStatus,
    SearchStrategy, Waypoint, WaypointSet,
};
