use async_trait::async_trait;
use pedala::config::PlannerConfig;
use pedala::models::{CandidateRoute, GeoPoint, Leg, RideStyle, RiderProfile, RoutePlanRequest};
use pedala::services::landmarks::LandmarkCatalog;
use pedala::services::oracle::{
    DirectionsOracle, DirectionsQuery, Geocoder, OracleError, OracleResult,
};
use pedala::services::route_planner::{RoutePlanner, RouteSearchEngine};
use std::sync::{Arc, Mutex};

/// Praça Afonso Pena, São José dos Campos
#[allow(dead_code)]
pub const ORIGIN_LAT: f64 = -23.1791;
#[allow(dead_code)]
pub const ORIGIN_LNG: f64 = -45.8872;
#[allow(dead_code)]
pub const ORIGIN_ADDRESS: &str = "Praça Afonso Pena, São José dos Campos, SP";

#[allow(dead_code)]
pub fn origin_point() -> GeoPoint {
    GeoPoint::new(ORIGIN_LAT, ORIGIN_LNG).unwrap()
}

/// Geocoder that knows exactly one address
pub struct FixedGeocoder {
    pub address: String,
    pub point: GeoPoint,
}

#[async_trait]
impl Geocoder for FixedGeocoder {
    async fn geocode(&self, address: &str) -> OracleResult<GeoPoint> {
        if address == self.address {
            Ok(self.point)
        } else {
            Err(OracleError::NotFound(address.to_string()))
        }
    }
}

type Script = Box<dyn Fn(&DirectionsQuery) -> OracleResult<f64> + Send + Sync>;

/// Oracle answering every query from a script, recording each query
pub struct ScriptedOracle {
    script: Script,
    queries: Mutex<Vec<DirectionsQuery>>,
}

#[allow(dead_code)]
impl ScriptedOracle {
    pub fn new(script: impl Fn(&DirectionsQuery) -> OracleResult<f64> + Send + Sync + 'static) -> Self {
        ScriptedOracle {
            script: Box::new(script),
            queries: Mutex::new(Vec::new()),
        }
    }

    /// Same distance for every query
    pub fn constant(km: f64) -> Self {
        Self::new(move |_| Ok(km))
    }

    pub fn queries(&self) -> Vec<DirectionsQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl DirectionsOracle for ScriptedOracle {
    async fn route(&self, query: &DirectionsQuery) -> OracleResult<CandidateRoute> {
        self.queries.lock().unwrap().push(query.clone());
        let km = (self.script)(query)?;

        // Two legs out and back so instructions and elevation have data
        let origin = origin_point();
        let turn = origin.offset(0.01, 0.0).unwrap_or(origin);
        Ok(CandidateRoute::new(
            query.waypoints.clone(),
            vec![
                Leg {
                    distance_km: km / 2.0,
                    instruction_text: "Head north on Rua Sete de Setembro".to_string(),
                    start_point: origin,
                },
                Leg {
                    distance_km: km / 2.0,
                    instruction_text: "Turn right onto Av. São João".to_string(),
                    start_point: turn,
                },
            ],
        ))
    }

    async fn elevation(&self, point: GeoPoint) -> OracleResult<f64> {
        Ok(600.0 + (point.lat - ORIGIN_LAT) * 1000.0)
    }
}

#[allow(dead_code)]
pub fn geocoder() -> Arc<FixedGeocoder> {
    Arc::new(FixedGeocoder {
        address: ORIGIN_ADDRESS.to_string(),
        point: origin_point(),
    })
}

#[allow(dead_code)]
pub fn engine(oracle: Arc<ScriptedOracle>) -> RouteSearchEngine {
    RouteSearchEngine::new(
        geocoder(),
        oracle,
        PlannerConfig::default(),
        LandmarkCatalog::default(),
    )
}

#[allow(dead_code)]
pub fn planner(oracle: Arc<ScriptedOracle>) -> RoutePlanner {
    RoutePlanner::new(geocoder(), oracle, PlannerConfig::default())
}

#[allow(dead_code)]
pub fn request(target_km: f64) -> RoutePlanRequest {
    RoutePlanRequest::new(
        ORIGIN_ADDRESS,
        target_km,
        RiderProfile::Intermediate,
        RideStyle::Urban,
    )
}

/// Check if we should skip real API tests
#[allow(dead_code)]
pub fn should_skip_real_api_tests() -> bool {
    std::env::var("SKIP_REAL_API_TESTS").is_ok()
        || std::env::var("GOOGLE_MAPS_API_KEY")
            .map(|k| k.trim().is_empty())
            .unwrap_or(true)
}
