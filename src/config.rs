use crate::constants::*;
use crate::services::localizer::Language;
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub google_maps_api_key: String,
    /// Override for the provider base URL (proxies, local fakes)
    pub google_maps_base_url: Option<String>,
    pub oracle_timeout_secs: u64,
    pub planner: PlannerConfig,
}

#[derive(Debug, Clone)]
pub struct PlannerConfig {
    /// Cap on the geometric part of the candidate sequence
    pub max_geometric_candidates: usize,

    /// Whole-search deadline, checked between oracle calls. `None` disables it.
    pub search_deadline: Option<Duration>,

    /// Locality appended to landmark names that do not already mention it,
    /// e.g. "São José dos Campos, SP"
    pub locality: Option<String>,

    /// Landmark library used for probes and fallback suggestions.
    /// `None` keeps the built-in catalog.
    pub landmarks: Option<Vec<String>>,

    /// Default itinerary language
    pub language: Language,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            max_geometric_candidates: DEFAULT_MAX_GEOMETRIC_CANDIDATES,
            search_deadline: Some(Duration::from_secs(DEFAULT_SEARCH_DEADLINE_SECS)),
            locality: None,
            landmarks: None,
            language: Language::default(),
        }
    }
}

impl PlannerConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let max_geometric_candidates: usize = env::var("PLANNER_MAX_GEOMETRIC_CANDIDATES")
            .unwrap_or_else(|_| defaults.max_geometric_candidates.to_string())
            .parse()
            .map_err(|_| "Invalid PLANNER_MAX_GEOMETRIC_CANDIDATES")?;

        if max_geometric_candidates == 0 || max_geometric_candidates > 200 {
            return Err("PLANNER_MAX_GEOMETRIC_CANDIDATES must be between 1 and 200".to_string());
        }

        let deadline_secs: u64 = env::var("PLANNER_SEARCH_DEADLINE_SECS")
            .unwrap_or_else(|_| DEFAULT_SEARCH_DEADLINE_SECS.to_string())
            .parse()
            .map_err(|_| "Invalid PLANNER_SEARCH_DEADLINE_SECS")?;

        let landmarks = env::var("PLANNER_LANDMARKS").ok().map(|raw| {
            raw.split(';')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect::<Vec<_>>()
        });

        Ok(Self {
            max_geometric_candidates,
            search_deadline: (deadline_secs > 0).then(|| Duration::from_secs(deadline_secs)),
            locality: env::var("PLANNER_LOCALITY")
                .ok()
                .filter(|s| !s.trim().is_empty()),
            landmarks: landmarks.filter(|l| !l.is_empty()),
            language: env::var("PLANNER_LANGUAGE")
                .unwrap_or_else(|_| defaults.language.to_string())
                .parse()?,
        })
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        let google_maps_api_key = env::var("GOOGLE_MAPS_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or("GOOGLE_MAPS_API_KEY must be set")?;

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            google_maps_api_key,
            google_maps_base_url: env::var("GOOGLE_MAPS_BASE_URL").ok(),
            oracle_timeout_secs: env::var("ORACLE_REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_ORACLE_TIMEOUT_SECS.to_string())
                .parse()
                .map_err(|_| "Invalid ORACLE_REQUEST_TIMEOUT_SECS")?,
            planner: PlannerConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
