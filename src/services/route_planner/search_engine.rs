use super::candidate_generator::{Candidate, CandidateGenerator, ProbePattern};
use super::tolerance_policy::{self, BestTracker};
use crate::config::PlannerConfig;
use crate::constants::*;
use crate::models::{RoutePlanRequest, SearchResult, SearchStatus, SearchStrategy, WaypointSet};
use crate::services::landmarks::LandmarkCatalog;
use crate::services::oracle::{DirectionsOracle, DirectionsQuery, Geocoder, OracleError};
use std::sync::Arc;
use tokio::time::Instant;

/// Whether the search should keep issuing oracle calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    /// Near-perfect route found
    Converged,
    DeadlineExceeded,
    /// Provider credentials rejected; no further call can succeed
    Misconfigured,
}

impl Flow {
    fn should_stop(&self) -> bool {
        !matches!(self, Flow::Continue)
    }
}

/// Mutable state of one search run. Never shared between requests.
struct SearchRun<'a> {
    request: &'a RoutePlanRequest,
    best: BestTracker,
    attempts: u32,
    started: Instant,
    /// Waypoint sets already sent to the oracle
    issued: Vec<WaypointSet>,
}

/// Drives generate -> query -> score -> select for one request at a time.
///
/// Oracle calls are awaited one after another. Each call is an atomic
/// cancellation checkpoint for the search deadline.
pub struct RouteSearchEngine {
    geocoder: Arc<dyn Geocoder>,
    oracle: Arc<dyn DirectionsOracle>,
    config: PlannerConfig,
    catalog: LandmarkCatalog,
}

impl RouteSearchEngine {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        oracle: Arc<dyn DirectionsOracle>,
        config: PlannerConfig,
        catalog: LandmarkCatalog,
    ) -> Self {
        Self {
            geocoder,
            oracle,
            config,
            catalog,
        }
    }

    pub fn catalog(&self) -> &LandmarkCatalog {
        &self.catalog
    }

    /// Always produces a result: "no good route" is a status, not an error.
    pub async fn search(&self, request: &RoutePlanRequest, strict: bool) -> SearchResult {
        let target = request.target_distance_km;

        tracing::info!(
            origin = %request.origin,
            target_km = target,
            profile = %request.rider_profile,
            style = %request.style,
            strict,
            "Starting loop search"
        );

        let origin_point = match self.geocoder.geocode(&request.origin).await {
            Ok(point) => point,
            Err(OracleError::ConfigurationMissing(reason)) => {
                tracing::error!(reason = %reason, "Geocoder rejected provider configuration");
                return SearchResult::misconfigured(target, 0);
            }
            Err(e) => {
                tracing::warn!(origin = %request.origin, error = %e, "Origin could not be geocoded");
                return SearchResult::unresolvable(target);
            }
        };

        let generator = CandidateGenerator::new(
            origin_point,
            target,
            request.rider_profile,
            request.style,
        )
        .with_max_geometric(self.config.max_geometric_candidates)
        .with_landmark_probes(self.catalog.probes());

        let mut run = SearchRun {
            request,
            best: BestTracker::new(target),
            attempts: 0,
            started: Instant::now(),
            issued: Vec::new(),
        };

        let flow = self.run_ladder(&mut run, &generator, strict).await;
        self.finish(run, flow)
    }

    async fn run_ladder(
        &self,
        run: &mut SearchRun<'_>,
        generator: &CandidateGenerator,
        strict: bool,
    ) -> Flow {
        // Geometric sweep and landmark probes
        for candidate in generator.candidates() {
            let flow = self.attempt(run, &candidate).await;
            if flow.should_stop() {
                return flow;
            }
        }

        if run.best.has_acceptable() {
            return Flow::Continue;
        }

        if strict && run.request.target_distance_km <= SHRINK_PASS_MAX_TARGET_KM {
            tracing::info!(
                target_km = run.request.target_distance_km,
                best_error_km = ?run.best.best().map(|b| b.error_km),
                "No acceptable route, running shrink pass"
            );
            for candidate in generator.shrink_candidates() {
                let flow = self.attempt(run, &candidate).await;
                if flow.should_stop() {
                    return flow;
                }
            }

            if run.best.has_acceptable() {
                return Flow::Continue;
            }
        }

        // Fallback (a): named landmarks, no geometric search
        let landmarks = if run.request.landmarks.is_empty() {
            self.catalog
                .suggest(run.request.target_distance_km, run.request.rider_profile)
        } else {
            self.catalog.qualify_all(&run.request.landmarks)
        };

        if landmarks.is_empty() {
            tracing::debug!("No landmarks available, skipping landmark fallback");
        } else {
            tracing::info!(landmarks = ?landmarks, "Falling back to landmark waypoints");
            let candidate = Candidate {
                waypoints: WaypointSet::from_landmarks(&landmarks, LANDMARK_FALLBACK_MAX_WAYPOINTS),
                pattern: ProbePattern::Landmark,
                scale: None,
                strategy: SearchStrategy::Landmarks,
            };
            let flow = self.attempt(run, &candidate).await;
            if flow.should_stop() || run.best.has_acceptable() {
                return flow;
            }
        }

        // Fallback (b): origin-only round trip
        tracing::info!("Falling back to origin-only round trip");
        let candidate = Candidate {
            waypoints: WaypointSet::empty(),
            pattern: ProbePattern::OriginOnly,
            scale: None,
            strategy: SearchStrategy::OriginOnly,
        };
        self.attempt(run, &candidate).await
    }

    /// One oracle call. Failures are logged and skipped.
    async fn attempt(&self, run: &mut SearchRun<'_>, candidate: &Candidate) -> Flow {
        if let Some(deadline) = self.config.search_deadline {
            if run.started.elapsed() >= deadline {
                tracing::warn!(
                    attempts = run.attempts,
                    deadline_secs = deadline.as_secs(),
                    "Search deadline reached, abandoning remaining candidates"
                );
                return Flow::DeadlineExceeded;
            }
        }

        if run.issued.contains(&candidate.waypoints) {
            tracing::debug!(
                strategy = %candidate.strategy,
                waypoints = %candidate.waypoints,
                "Waypoint set already queried, skipping"
            );
            return Flow::Continue;
        }
        run.issued.push(candidate.waypoints.clone());

        let query = DirectionsQuery::round_trip(
            &run.request.origin,
            candidate.waypoints.clone(),
            run.request.mode,
        );
        run.attempts += 1;

        let route = match self.oracle.route(&query).await {
            Ok(route) => route,
            Err(OracleError::ConfigurationMissing(reason)) => {
                tracing::error!(
                    attempt = run.attempts,
                    reason = %reason,
                    "Oracle rejected provider configuration, abandoning search"
                );
                return Flow::Misconfigured;
            }
            Err(e) if e.is_transport() => {
                tracing::warn!(
                    attempt = run.attempts,
                    strategy = %candidate.strategy,
                    waypoints = %candidate.waypoints,
                    error = %e,
                    "Oracle unavailable, skipping candidate"
                );
                return Flow::Continue;
            }
            Err(e) => {
                tracing::debug!(
                    attempt = run.attempts,
                    strategy = %candidate.strategy,
                    waypoints = %candidate.waypoints,
                    error = %e,
                    "No route for candidate"
                );
                return Flow::Continue;
            }
        };

        let target = run.request.target_distance_km;
        let error_km = tolerance_policy::distance_error(route.total_distance_km, target);

        tracing::debug!(
            attempt = run.attempts,
            strategy = %candidate.strategy,
            pattern = ?candidate.pattern,
            scale = ?candidate.scale,
            achieved_km = %format!("{:.2}", route.total_distance_km),
            error_km = %format!("{:.2}", error_km),
            "Candidate evaluated"
        );

        run.best.offer(route, candidate.strategy);

        if tolerance_policy::is_near_perfect(error_km) {
            tracing::info!(
                attempt = run.attempts,
                error_km = %format!("{:.2}", error_km),
                "Near-perfect route found, stopping search"
            );
            return Flow::Converged;
        }

        Flow::Continue
    }

    fn finish(&self, run: SearchRun<'_>, flow: Flow) -> SearchResult {
        let target = run.request.target_distance_km;
        let attempts_made = run.attempts;

        if flow == Flow::Misconfigured {
            return SearchResult::misconfigured(target, attempts_made);
        }

        let result = match run.best.into_best() {
            Some(best) => {
                let within_tolerance = tolerance_policy::is_acceptable(best.error_km);
                SearchResult {
                    chosen_route: Some(best.route),
                    target_distance_km: target,
                    distance_error_km: best.error_km,
                    attempts_made,
                    within_tolerance,
                    status: if within_tolerance {
                        SearchStatus::Converged
                    } else {
                        SearchStatus::BestEffort
                    },
                    strategy: Some(best.strategy),
                }
            }
            None => SearchResult {
                chosen_route: None,
                target_distance_km: target,
                distance_error_km: target,
                attempts_made,
                within_tolerance: false,
                status: SearchStatus::NoRoute,
                strategy: None,
            },
        };

        match result.status {
            SearchStatus::NoRoute => tracing::warn!(
                attempts = attempts_made,
                ?flow,
                "Search finished without any route"
            ),
            _ => tracing::info!(
                attempts = attempts_made,
                status = ?result.status,
                strategy = ?result.strategy,
                achieved_km = ?result.total_distance_km(),
                error_km = %format!("{:.2}", result.distance_error_km),
                elapsed_ms = run.started.elapsed().as_millis() as u64,
                "Search finished"
            ),
        }

        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CandidateRoute, GeoPoint, Leg, RideStyle, RiderProfile, Waypoint};
    use crate::services::oracle::{OracleError, OracleResult};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    struct FixedGeocoder(Option<GeoPoint>);

    #[async_trait]
    impl Geocoder for FixedGeocoder {
        async fn geocode(&self, address: &str) -> OracleResult<GeoPoint> {
            self.0.ok_or_else(|| OracleError::NotFound(address.to_string()))
        }
    }

    /// Answers with `distance(query)`; `None` means no route
    struct ScriptedOracle {
        distance: Box<dyn Fn(&DirectionsQuery) -> Option<f64> + Send + Sync>,
        queries: Mutex<Vec<DirectionsQuery>>,
    }

    impl ScriptedOracle {
        fn new(distance: impl Fn(&DirectionsQuery) -> Option<f64> + Send + Sync + 'static) -> Self {
            Self {
                distance: Box::new(distance),
                queries: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.queries.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl DirectionsOracle for ScriptedOracle {
        async fn route(&self, query: &DirectionsQuery) -> OracleResult<CandidateRoute> {
            self.queries.lock().unwrap().push(query.clone());
            let km = (self.distance)(query).ok_or(OracleError::NoRouteFound)?;
            let start = GeoPoint::new(-23.18, -45.88).unwrap();
            Ok(CandidateRoute::new(
                query.waypoints.clone(),
                vec![Leg {
                    distance_km: km,
                    instruction_text: "Head north".to_string(),
                    start_point: start,
                }],
            ))
        }

        async fn elevation(&self, _point: GeoPoint) -> OracleResult<f64> {
            Ok(600.0)
        }
    }

    fn engine(oracle: Arc<ScriptedOracle>, config: PlannerConfig) -> RouteSearchEngine {
        let origin = GeoPoint::new(-23.1791, -45.8872).unwrap();
        RouteSearchEngine::new(
            Arc::new(FixedGeocoder(Some(origin))),
            oracle,
            config,
            LandmarkCatalog::default(),
        )
    }

    fn request(target: f64) -> RoutePlanRequest {
        RoutePlanRequest::new(
            "Rua Sete de Setembro, 100",
            target,
            RiderProfile::Intermediate,
            RideStyle::Urban,
        )
    }

    #[tokio::test]
    async fn test_unresolvable_origin_makes_no_oracle_calls() {
        let oracle = Arc::new(ScriptedOracle::new(|_| Some(10.0)));
        let engine = RouteSearchEngine::new(
            Arc::new(FixedGeocoder(None)),
            oracle.clone(),
            PlannerConfig::default(),
            LandmarkCatalog::default(),
        );

        let result = engine.search(&request(10.0), false).await;
        assert_eq!(result.status, SearchStatus::AddressUnresolvable);
        assert!(result.chosen_route.is_none());
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_all_failures_yield_no_route() {
        let oracle = Arc::new(ScriptedOracle::new(|_| None));
        let engine = engine(oracle.clone(), PlannerConfig::default());

        let result = engine.search(&request(12.0), false).await;
        assert_eq!(result.status, SearchStatus::NoRoute);
        assert!(result.chosen_route.is_none());
        assert!(!result.within_tolerance);
        assert_eq!(result.distance_error_km, 12.0);
        assert_eq!(result.attempts_made as usize, oracle.calls());
    }

    #[tokio::test]
    async fn test_origin_only_is_last_resort() {
        let oracle = Arc::new(ScriptedOracle::new(|q| {
            q.waypoints.is_empty().then_some(3.2)
        }));
        let engine = engine(oracle.clone(), PlannerConfig::default());

        let result = engine.search(&request(12.0), false).await;
        assert_eq!(result.strategy, Some(SearchStrategy::OriginOnly));
        assert_eq!(result.status, SearchStatus::BestEffort);
        assert_eq!(result.total_distance_km(), Some(3.2));

        let last = oracle.queries.lock().unwrap().last().cloned().unwrap();
        assert!(last.waypoints.is_empty());
        assert!(!last.optimize);
    }

    #[tokio::test]
    async fn test_suggested_landmarks_used_when_caller_gives_none() {
        let oracle = Arc::new(ScriptedOracle::new(|q| {
            (q.waypoints.len() == 2
                && q.waypoints
                    .waypoints()
                    .iter()
                    .all(|w| matches!(w, Waypoint::Landmark(_))))
            .then_some(13.0)
        }));
        let engine = engine(oracle, PlannerConfig::default());

        let result = engine.search(&request(12.0), false).await;
        assert_eq!(result.strategy, Some(SearchStrategy::Landmarks));
        assert!(result.within_tolerance);
        let route = result.chosen_route.unwrap();
        assert_eq!(
            route.waypoint_set.waypoints()[0],
            Waypoint::Landmark("Praça Afonso Pena, São José dos Campos, SP".to_string())
        );
    }

    #[tokio::test]
    async fn test_zero_deadline_stops_before_first_call() {
        let oracle = Arc::new(ScriptedOracle::new(|_| Some(10.0)));
        let config = PlannerConfig {
            search_deadline: Some(Duration::ZERO),
            ..PlannerConfig::default()
        };
        let engine = engine(oracle.clone(), config);

        let result = engine.search(&request(10.0), false).await;
        assert_eq!(result.attempts_made, 0);
        assert_eq!(result.status, SearchStatus::NoRoute);
        assert_eq!(oracle.calls(), 0);
    }

    #[tokio::test]
    async fn test_geometric_cap_is_honoured() {
        let oracle = Arc::new(ScriptedOracle::new(|_| Some(40.0)));
        let config = PlannerConfig {
            max_geometric_candidates: 5,
            ..PlannerConfig::default()
        };
        let engine = engine(oracle.clone(), config);

        // 35 km: no landmark probes, 5 geometric + landmark rung + origin-only
        let result = engine.search(&request(35.0), false).await;
        assert_eq!(result.attempts_made, 7);
        assert_eq!(result.status, SearchStatus::BestEffort);
    }
}
