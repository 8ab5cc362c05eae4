pub mod candidate_generator;
mod search_engine;
pub mod tolerance_policy;

use crate::config::PlannerConfig;
use crate::error::{AppError, Result};
use crate::models::{PlannedRoute, RoutePlanRequest, SearchResult, SearchStatus};
use crate::services::elevation::ElevationSampler;
use crate::services::itinerary;
use crate::services::landmarks::LandmarkCatalog;
use crate::services::localizer::{InstructionLocalizer, Language};
use crate::services::oracle::{DirectionsOracle, Geocoder};
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use uuid::Uuid;

pub use search_engine::RouteSearchEngine;

/// Entry point for loop planning: search, then decorate for display.
pub struct RoutePlanner {
    engine: RouteSearchEngine,
    elevation_sampler: ElevationSampler,
    default_language: Language,
}

impl RoutePlanner {
    pub fn new(
        geocoder: Arc<dyn Geocoder>,
        oracle: Arc<dyn DirectionsOracle>,
        config: PlannerConfig,
    ) -> Self {
        let catalog = match &config.landmarks {
            Some(names) => LandmarkCatalog::new(names.clone()).with_locality(config.locality.clone()),
            None => match &config.locality {
                Some(locality) => LandmarkCatalog::default().with_locality(Some(locality.clone())),
                None => LandmarkCatalog::default(),
            },
        };

        let default_language = config.language;
        let elevation_sampler = ElevationSampler::new(oracle.clone());

        RoutePlanner {
            engine: RouteSearchEngine::new(geocoder, oracle, config, catalog),
            elevation_sampler,
            default_language,
        }
    }

    pub fn catalog(&self) -> &LandmarkCatalog {
        self.engine.catalog()
    }

    /// Runs the loop search. Never fails: unresolvable origins and missing
    /// routes are reported through [`SearchResult::status`].
    pub async fn plan_route(&self, request: &RoutePlanRequest, strict: bool) -> SearchResult {
        if let Err(reason) = request.validate() {
            tracing::warn!(reason = %reason, "Rejecting invalid plan request");
            return SearchResult {
                chosen_route: None,
                target_distance_km: request.target_distance_km,
                distance_error_km: request.target_distance_km,
                attempts_made: 0,
                within_tolerance: false,
                status: SearchStatus::NoRoute,
                strategy: None,
            };
        }

        self.engine.search(request, strict).await
    }

    /// Search plus localized itinerary, highlights and elevation profile
    pub async fn plan_itinerary(
        &self,
        request: &RoutePlanRequest,
        strict: bool,
        language: Option<Language>,
    ) -> Result<PlannedRoute> {
        request.validate().map_err(AppError::InvalidRequest)?;

        let search = self.engine.search(request, strict).await;
        match search.status {
            SearchStatus::AddressUnresolvable => {
                return Err(AppError::AddressUnresolvable(request.origin.clone()))
            }
            SearchStatus::ConfigurationMissing => {
                return Err(AppError::ConfigurationMissing(
                    "routing provider rejected the configured credentials".to_string(),
                ))
            }
            _ => {}
        }

        let localizer = InstructionLocalizer::new(language.unwrap_or(self.default_language));

        let (itinerary, elevation) = match &search.chosen_route {
            Some(route) => (
                localizer.localize_all(&route.instructions()),
                self.elevation_sampler.sample(route).await,
            ),
            None => (Vec::new(), Vec::new()),
        };
        let highlights = itinerary::main_roads(&itinerary);

        let planned_at = OffsetDateTime::now_utc()
            .format(&Rfc3339)
            .map_err(|e| AppError::Internal(format!("Failed to format timestamp: {}", e)))?;

        Ok(PlannedRoute {
            id: Uuid::new_v4(),
            origin: request.origin.clone(),
            search,
            itinerary,
            highlights,
            elevation,
            planned_at,
        })
    }
}
