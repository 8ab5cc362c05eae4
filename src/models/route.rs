use crate::models::GeoPoint;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Directions providers accept at most this many intermediate waypoints
/// on the free tier; candidate sets never exceed it.
pub const MAX_WAYPOINTS: usize = 5;

/// An intermediate stop that pulls the loop away from the trivial
/// origin-to-origin path.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Waypoint {
    Point(GeoPoint),
    /// Named place, resolved by the provider
    Landmark(String),
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Waypoint::Point(p) => write!(f, "{}", p),
            Waypoint::Landmark(name) => write!(f, "{}", name),
        }
    }
}

/// Ordered waypoints for one oracle query. Empty means an origin-only round trip.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WaypointSet(Vec<Waypoint>);

impl WaypointSet {
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self, String> {
        if waypoints.len() > MAX_WAYPOINTS {
            return Err(format!(
                "At most {} waypoints allowed, got {}",
                MAX_WAYPOINTS,
                waypoints.len()
            ));
        }
        Ok(WaypointSet(waypoints))
    }

    pub fn empty() -> Self {
        WaypointSet(Vec::new())
    }

    /// Build from points, dropping any that fell outside the coordinate range
    pub fn from_points(points: impl IntoIterator<Item = Option<GeoPoint>>) -> Option<Self> {
        let waypoints: Vec<Waypoint> = points
            .into_iter()
            .collect::<Option<Vec<_>>>()?
            .into_iter()
            .map(Waypoint::Point)
            .collect();
        WaypointSet::new(waypoints).ok()
    }

    /// Landmark-only set, keeping at most `limit` names
    pub fn from_landmarks(names: &[String], limit: usize) -> Self {
        WaypointSet(
            names
                .iter()
                .take(limit.min(MAX_WAYPOINTS))
                .map(|n| Waypoint::Landmark(n.clone()))
                .collect(),
        )
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for WaypointSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(|w| w.to_string()).collect();
        write!(f, "[{}]", parts.join(" | "))
    }
}

/// One road segment as reported by the oracle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub distance_km: f64,
    pub instruction_text: String,
    pub start_point: GeoPoint,
}

/// Result of a single oracle query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRoute {
    pub waypoint_set: WaypointSet,
    pub legs: Vec<Leg>,
    /// Sum of leg distances
    pub total_distance_km: f64,
}

impl CandidateRoute {
    pub fn new(waypoint_set: WaypointSet, legs: Vec<Leg>) -> Self {
        let total_distance_km = legs.iter().map(|l| l.distance_km).sum();
        CandidateRoute {
            waypoint_set,
            legs,
            total_distance_km,
        }
    }

    pub fn instructions(&self) -> Vec<String> {
        self.legs.iter().map(|l| l.instruction_text.clone()).collect()
    }
}

/// Which part of the search produced the chosen route
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    Geometric,
    ShrinkPass,
    Landmarks,
    OriginOnly,
}

impl fmt::Display for SearchStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchStrategy::Geometric => write!(f, "geometric"),
            SearchStrategy::ShrinkPass => write!(f, "shrink_pass"),
            SearchStrategy::Landmarks => write!(f, "landmarks"),
            SearchStrategy::OriginOnly => write!(f, "origin_only"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStatus {
    /// Chosen route is within tolerance
    Converged,
    /// Closest route found, outside tolerance
    BestEffort,
    /// Every oracle query failed
    NoRoute,
    AddressUnresolvable,
    /// Provider rejected its credentials; search abandoned
    ConfigurationMissing,
}

/// Terminal outcome of one search run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub chosen_route: Option<CandidateRoute>,
    pub target_distance_km: f64,
    /// Equals the target when no route was chosen
    pub distance_error_km: f64,
    pub attempts_made: u32,
    pub within_tolerance: bool,
    pub status: SearchStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<SearchStrategy>,
}

impl SearchResult {
    pub fn unresolvable(target_distance_km: f64) -> Self {
        SearchResult {
            chosen_route: None,
            target_distance_km,
            distance_error_km: target_distance_km,
            attempts_made: 0,
            within_tolerance: false,
            status: SearchStatus::AddressUnresolvable,
            strategy: None,
        }
    }

    pub fn misconfigured(target_distance_km: f64, attempts_made: u32) -> Self {
        SearchResult {
            attempts_made,
            status: SearchStatus::ConfigurationMissing,
            ..Self::unresolvable(target_distance_km)
        }
    }

    pub fn total_distance_km(&self) -> Option<f64> {
        self.chosen_route.as_ref().map(|r| r.total_distance_km)
    }
}

/// Elevation at a step start. `distance_km` is a 0.5 km index placeholder,
/// not the measured arc length.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationSample {
    pub distance_km: f64,
    pub elevation_m: f64,
}

/// Search result decorated for display
#[derive(Debug, Clone, Serialize)]
pub struct PlannedRoute {
    pub id: Uuid,
    pub origin: String,
    pub search: SearchResult,
    /// Localized step instructions, in route order
    pub itinerary: Vec<String>,
    /// Main roads mentioned by the itinerary
    pub highlights: Vec<String>,
    pub elevation: Vec<ElevationSample>,
    /// RFC 3339 timestamp
    pub planned_at: String,
}

impl PlannedRoute {
    /// Map-renderable form: a closed LineString through the leg start points.
    pub fn to_geojson(&self) -> geojson::FeatureCollection {
        let mut features = Vec::new();

        if let Some(route) = &self.search.chosen_route {
            let mut line: Vec<Vec<f64>> = route
                .legs
                .iter()
                .map(|l| vec![l.start_point.lng, l.start_point.lat])
                .collect();
            if let Some(first) = line.first().cloned() {
                line.push(first);
            }

            let mut properties = serde_json::Map::new();
            properties.insert("origin".to_string(), self.origin.clone().into());
            properties.insert(
                "total_distance_km".to_string(),
                route.total_distance_km.into(),
            );
            properties.insert(
                "distance_error_km".to_string(),
                self.search.distance_error_km.into(),
            );
            properties.insert(
                "within_tolerance".to_string(),
                self.search.within_tolerance.into(),
            );

            features.push(geojson::Feature {
                bbox: None,
                geometry: Some(geojson::Geometry::new(geojson::Value::LineString(line))),
                id: Some(geojson::feature::Id::String(self.id.to_string())),
                properties: Some(properties),
                foreign_members: None,
            });
        }

        geojson::FeatureCollection {
            bbox: None,
            features,
            foreign_members: None,
        }
    }
}
