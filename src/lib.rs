// Library exports for testing and reusability

pub mod config;
pub mod constants;
pub mod error;
pub mod evaluation;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use error::{AppError, Result};

use config::Config;
use services::google_maps::GoogleMapsClient;
use services::route_planner::RoutePlanner;
use std::sync::Arc;
use std::time::Duration;

// App state for sharing across the application
pub struct AppState {
    pub planner: RoutePlanner,
}

/// Planner backed by the Google Maps adapter described by `config`
pub fn build_planner(config: &Config) -> Result<RoutePlanner> {
    let timeout = Duration::from_secs(config.oracle_timeout_secs);
    let client = match &config.google_maps_base_url {
        Some(base_url) => GoogleMapsClient::with_base_url(
            config.google_maps_api_key.clone(),
            base_url.clone(),
            timeout,
        )?,
        None => GoogleMapsClient::new(config.google_maps_api_key.clone(), timeout)?,
    };

    let client = Arc::new(client);
    Ok(RoutePlanner::new(
        client.clone(),
        client,
        config.planner.clone(),
    ))
}
