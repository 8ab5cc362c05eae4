use crate::constants::{ELEVATION_MAX_SAMPLES, ELEVATION_SAMPLE_SPACING_KM};
use crate::models::{CandidateRoute, ElevationSample};
use crate::services::oracle::DirectionsOracle;
use std::sync::Arc;

/// Samples elevation at the start of the first few legs of a route
pub struct ElevationSampler {
    oracle: Arc<dyn DirectionsOracle>,
}

impl ElevationSampler {
    pub fn new(oracle: Arc<dyn DirectionsOracle>) -> Self {
        Self { oracle }
    }

    /// Failed lookups are dropped. `distance_km` is the sample index times
    /// a fixed spacing, not the distance along the route.
    pub async fn sample(&self, route: &CandidateRoute) -> Vec<ElevationSample> {
        let mut samples = Vec::new();

        for leg in route.legs.iter().take(ELEVATION_MAX_SAMPLES) {
            match self.oracle.elevation(leg.start_point).await {
                Ok(elevation_m) => samples.push(ElevationSample {
                    distance_km: samples.len() as f64 * ELEVATION_SAMPLE_SPACING_KM,
                    elevation_m,
                }),
                Err(e) => {
                    tracing::debug!(point = %leg.start_point, error = %e, "Elevation lookup failed");
                }
            }
        }

        samples
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{GeoPoint, Leg, WaypointSet};
    use crate::services::oracle::{DirectionsQuery, OracleError, OracleResult};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Fails every second lookup
    struct FlakyElevation {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl DirectionsOracle for FlakyElevation {
        async fn route(&self, _query: &DirectionsQuery) -> OracleResult<CandidateRoute> {
            Err(OracleError::NoRouteFound)
        }

        async fn elevation(&self, point: GeoPoint) -> OracleResult<f64> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call % 2 == 1 {
                return Err(OracleError::Transport("timeout".to_string()));
            }
            Ok(500.0 + point.lat.abs())
        }
    }

    fn route_with_legs(count: usize) -> CandidateRoute {
        let legs = (0..count)
            .map(|i| Leg {
                distance_km: 1.0,
                instruction_text: format!("Step {}", i),
                start_point: GeoPoint::new(-23.0 - i as f64 * 0.01, -45.9).unwrap(),
            })
            .collect();
        CandidateRoute::new(WaypointSet::empty(), legs)
    }

    #[tokio::test]
    async fn test_samples_first_legs_and_skips_failures() {
        let oracle = Arc::new(FlakyElevation {
            calls: AtomicUsize::new(0),
        });
        let sampler = ElevationSampler::new(oracle.clone());

        let samples = sampler.sample(&route_with_legs(9)).await;

        // Only the first five legs are looked up, two of them fail
        assert_eq!(oracle.calls.load(Ordering::SeqCst), ELEVATION_MAX_SAMPLES);
        assert_eq!(samples.len(), 3);
        let distances: Vec<f64> = samples.iter().map(|s| s.distance_km).collect();
        assert_eq!(distances, vec![0.0, 0.5, 1.0]);
    }

    #[tokio::test]
    async fn test_empty_route_has_no_samples() {
        let oracle = Arc::new(FlakyElevation {
            calls: AtomicUsize::new(0),
        });
        let sampler = ElevationSampler::new(oracle);
        assert!(sampler.sample(&route_with_legs(0)).await.is_empty());
    }
}
