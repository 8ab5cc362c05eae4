use crate::models::{CandidateRoute, GeoPoint, Leg, WaypointSet};
use crate::services::oracle::{
    DirectionsOracle, DirectionsQuery, Geocoder, OracleError, OracleResult,
};
use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::time::Duration;

const GOOGLE_MAPS_BASE_URL: &str = "https://maps.googleapis.com/maps/api";

/// Google Maps Web Services adapter (geocoding, directions, elevation)
#[derive(Clone)]
pub struct GoogleMapsClient {
    client: Client,
    api_key: String,
    base_url: String,
    tag_pattern: Regex,
}

impl GoogleMapsClient {
    pub fn new(api_key: String, timeout: Duration) -> OracleResult<Self> {
        Self::with_base_url(api_key, GOOGLE_MAPS_BASE_URL.to_string(), timeout)
    }

    /// Point the client at another host (proxy, local fake)
    pub fn with_base_url(api_key: String, base_url: String, timeout: Duration) -> OracleResult<Self> {
        if api_key.trim().is_empty() {
            return Err(OracleError::ConfigurationMissing(
                "GOOGLE_MAPS_API_KEY".to_string(),
            ));
        }

        let client = Client::builder()
            .connect_timeout(timeout)
            .timeout(timeout)
            .build()
            .map_err(|e| OracleError::Transport(format!("Failed to build HTTP client: {}", e)))?;

        let tag_pattern = Regex::new(r"<[^>]+>")
            .map_err(|e| OracleError::InvalidResponse(format!("Bad tag pattern: {}", e)))?;

        Ok(GoogleMapsClient {
            client,
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            tag_pattern,
        })
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> OracleResult<T> {
        let url = format!("{}/{}/json", self.base_url, endpoint);

        let response = self
            .client
            .get(&url)
            .query(params)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    OracleError::Transport(format!("{} request timed out", endpoint))
                } else {
                    OracleError::Transport(format!("{} request failed: {}", endpoint, e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(endpoint, status = %status, "Google Maps HTTP error");
            return Err(OracleError::Transport(format!("HTTP {} from {}", status, endpoint)));
        }

        response
            .json()
            .await
            .map_err(|e| OracleError::InvalidResponse(format!("Failed to parse {}: {}", endpoint, e)))
    }

    /// Plain text from an `html_instructions` field
    fn strip_html(&self, html: &str) -> String {
        let text = self.tag_pattern.replace_all(html, " ");
        let text = unescape_entities(&text);
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    fn build_candidate(
        &self,
        response: DirectionsApiResponse,
        waypoints: WaypointSet,
    ) -> OracleResult<CandidateRoute> {
        check_status(&response.status, response.error_message.as_deref(), || {
            OracleError::NoRouteFound
        })?;

        let route = response
            .routes
            .into_iter()
            .next()
            .ok_or(OracleError::NoRouteFound)?;

        let legs = route
            .legs
            .into_iter()
            .flat_map(|leg| leg.steps)
            .map(|step| -> OracleResult<Leg> {
                Ok(Leg {
                    distance_km: step.distance.value / 1000.0,
                    instruction_text: self.strip_html(&step.html_instructions),
                    start_point: GeoPoint::new(step.start_location.lat, step.start_location.lng)
                        .map_err(OracleError::InvalidResponse)?,
                })
            })
            .collect::<OracleResult<Vec<Leg>>>()?;

        if legs.is_empty() {
            return Err(OracleError::NoRouteFound);
        }

        Ok(CandidateRoute::new(waypoints, legs))
    }
}

/// Map a provider status to an error. `not_found` builds the error for
/// "nothing matched" statuses.
fn check_status(
    status: &str,
    message: Option<&str>,
    not_found: impl FnOnce() -> OracleError,
) -> OracleResult<()> {
    match status {
        "OK" => Ok(()),
        "ZERO_RESULTS" | "NOT_FOUND" => Err(not_found()),
        "OVER_QUERY_LIMIT" | "OVER_DAILY_LIMIT" => Err(OracleError::RateLimited),
        "REQUEST_DENIED" => Err(OracleError::ConfigurationMissing(
            message.unwrap_or("request denied").to_string(),
        )),
        other => Err(OracleError::Transport(format!(
            "{}: {}",
            other,
            message.unwrap_or("no message")
        ))),
    }
}

fn unescape_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

#[async_trait]
impl Geocoder for GoogleMapsClient {
    async fn geocode(&self, address: &str) -> OracleResult<GeoPoint> {
        let response: GeocodeApiResponse = self
            .get_json("geocode", &[("address", address.to_string())])
            .await?;

        check_status(&response.status, response.error_message.as_deref(), || {
            OracleError::NotFound(address.to_string())
        })?;

        let location = response
            .results
            .first()
            .map(|r| r.geometry.location)
            .ok_or_else(|| OracleError::NotFound(address.to_string()))?;

        tracing::debug!(address, lat = location.lat, lng = location.lng, "Geocoded address");
        GeoPoint::new(location.lat, location.lng).map_err(OracleError::InvalidResponse)
    }
}

#[async_trait]
impl DirectionsOracle for GoogleMapsClient {
    async fn route(&self, query: &DirectionsQuery) -> OracleResult<CandidateRoute> {
        let mut params = vec![
            ("origin", query.origin.clone()),
            ("destination", query.destination.clone()),
            ("mode", query.mode.google_maps_mode().to_string()),
        ];

        if !query.waypoints.is_empty() {
            let joined = query
                .waypoints
                .waypoints()
                .iter()
                .map(|w| w.to_string())
                .collect::<Vec<_>>()
                .join("|");
            let value = if query.optimize {
                format!("optimize:true|{}", joined)
            } else {
                joined
            };
            params.push(("waypoints", value));
        }

        tracing::debug!(
            waypoints = query.waypoints.len(),
            mode = query.mode.google_maps_mode(),
            "Google Maps directions request"
        );

        let response: DirectionsApiResponse = self.get_json("directions", &params).await?;
        self.build_candidate(response, query.waypoints.clone())
    }

    async fn elevation(&self, point: GeoPoint) -> OracleResult<f64> {
        let response: ElevationApiResponse = self
            .get_json("elevation", &[("locations", point.to_string())])
            .await?;

        check_status(&response.status, response.error_message.as_deref(), || {
            OracleError::InvalidResponse("no elevation data".to_string())
        })?;

        response
            .results
            .first()
            .map(|r| r.elevation)
            .ok_or_else(|| OracleError::InvalidResponse("no elevation data".to_string()))
    }
}

// Google Maps API response types

#[derive(Debug, Clone, Copy, Deserialize)]
struct ApiLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct GeocodeApiResponse {
    status: String,
    #[serde(default)]
    results: Vec<GeocodeResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GeocodeResult {
    geometry: GeocodeGeometry,
}

#[derive(Debug, Deserialize)]
struct GeocodeGeometry {
    location: ApiLocation,
}

#[derive(Debug, Deserialize)]
struct DirectionsApiResponse {
    status: String,
    #[serde(default)]
    routes: Vec<ApiRoute>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiRoute {
    legs: Vec<ApiLeg>,
}

#[derive(Debug, Deserialize)]
struct ApiLeg {
    steps: Vec<ApiStep>,
}

#[derive(Debug, Deserialize)]
struct ApiStep {
    distance: ApiDistance,
    #[serde(default)]
    html_instructions: String,
    start_location: ApiLocation,
}

#[derive(Debug, Deserialize)]
struct ApiDistance {
    /// Metres
    value: f64,
}

#[derive(Debug, Deserialize)]
struct ElevationApiResponse {
    status: String,
    #[serde(default)]
    results: Vec<ElevationResult>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ElevationResult {
    elevation: f64,
}
