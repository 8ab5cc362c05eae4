use crate::error::{AppError, Result};
use crate::models::{RideStyle, RiderProfile, RoutePlanRequest, TransportMode};
use crate::services::localizer::Language;
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
pub struct LoopRouteRequest {
    pub origin: String,
    pub distance_km: f64,
    /// English or Portuguese label, e.g. "advanced" / "Avançado"
    pub rider_profile: Option<String>,
    pub style: Option<String>,
    #[serde(default)]
    pub landmarks: Vec<String>,
    /// Run the shrink pass for short targets that did not converge
    #[serde(default)]
    pub strict: bool,
    pub language: Option<String>,
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoopRouteQuery {
    /// `geojson` returns a FeatureCollection instead of the full plan
    pub format: Option<String>,
}

fn parse_or_default<T>(value: Option<&str>) -> Result<T>
where
    T: FromStr<Err = String> + Default,
{
    value
        .map(T::from_str)
        .transpose()
        .map(Option::unwrap_or_default)
        .map_err(AppError::InvalidRequest)
}

impl LoopRouteRequest {
    pub fn to_plan_request(&self) -> Result<RoutePlanRequest> {
        let mut request = RoutePlanRequest::new(
            self.origin.clone(),
            self.distance_km,
            parse_or_default::<RiderProfile>(self.rider_profile.as_deref())?,
            parse_or_default::<RideStyle>(self.style.as_deref())?,
        )
        .with_landmarks(self.landmarks.clone());
        request.mode = parse_or_default::<TransportMode>(self.mode.as_deref())?;
        Ok(request)
    }

    pub fn language(&self) -> Result<Option<Language>> {
        self.language
            .as_deref()
            .map(Language::from_str)
            .transpose()
            .map_err(AppError::InvalidRequest)
    }
}

/// POST /routes/loop
/// Plan a loop that starts and ends at the origin address
pub async fn create_loop_route(
    State(state): State<Arc<AppState>>,
    Query(query): Query<LoopRouteQuery>,
    Json(body): Json<LoopRouteRequest>,
) -> Result<Response> {
    let request = body.to_plan_request()?;
    let language = body.language()?;

    tracing::info!(
        origin = %request.origin,
        distance_km = request.target_distance_km,
        profile = %request.rider_profile,
        style = %request.style,
        strict = body.strict,
        "Loop route request"
    );

    let planned = state
        .planner
        .plan_itinerary(&request, body.strict, language)
        .await?;

    match query.format.as_deref() {
        Some("geojson") => Ok(Json(planned.to_geojson()).into_response()),
        None | Some("json") => Ok(Json(planned).into_response()),
        Some(other) => Err(AppError::InvalidRequest(format!(
            "Unsupported format: '{}'",
            other
        ))),
    }
}
