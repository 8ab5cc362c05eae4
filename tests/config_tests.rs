use pedala::config::{Config, PlannerConfig};
use pedala::constants::{DEFAULT_MAX_GEOMETRIC_CANDIDATES, DEFAULT_SEARCH_DEADLINE_SECS};
use pedala::services::localizer::Language;
use serial_test::serial;
use std::env;
use std::time::Duration;

const PLANNER_VARS: [&str; 5] = [
    "PLANNER_MAX_GEOMETRIC_CANDIDATES",
    "PLANNER_SEARCH_DEADLINE_SECS",
    "PLANNER_LOCALITY",
    "PLANNER_LANDMARKS",
    "PLANNER_LANGUAGE",
];

fn clear_planner_env() {
    for var in PLANNER_VARS {
        env::remove_var(var);
    }
}

#[test]
#[serial]
fn test_planner_defaults() {
    clear_planner_env();

    let config = PlannerConfig::from_env().unwrap();
    assert_eq!(config.max_geometric_candidates, DEFAULT_MAX_GEOMETRIC_CANDIDATES);
    assert_eq!(
        config.search_deadline,
        Some(Duration::from_secs(DEFAULT_SEARCH_DEADLINE_SECS))
    );
    assert_eq!(config.locality, None);
    assert_eq!(config.landmarks, None);
    assert_eq!(config.language, Language::PtBr);
}

#[test]
#[serial]
fn test_planner_overrides() {
    clear_planner_env();
    env::set_var("PLANNER_MAX_GEOMETRIC_CANDIDATES", "24");
    env::set_var("PLANNER_SEARCH_DEADLINE_SECS", "0");
    env::set_var("PLANNER_LOCALITY", "Jacareí, SP");
    env::set_var("PLANNER_LANDMARKS", "Parque da Cidade; ;Pátio Pinheiros");
    env::set_var("PLANNER_LANGUAGE", "en");

    let config = PlannerConfig::from_env().unwrap();
    clear_planner_env();

    assert_eq!(config.max_geometric_candidates, 24);
    assert_eq!(config.search_deadline, None);
    assert_eq!(config.locality.as_deref(), Some("Jacareí, SP"));
    assert_eq!(
        config.landmarks,
        Some(vec![
            "Parque da Cidade".to_string(),
            "Pátio Pinheiros".to_string()
        ])
    );
    assert_eq!(config.language, Language::En);
}

#[test]
#[serial]
fn test_planner_rejects_bad_values() {
    clear_planner_env();

    env::set_var("PLANNER_MAX_GEOMETRIC_CANDIDATES", "0");
    assert!(PlannerConfig::from_env().is_err());

    env::set_var("PLANNER_MAX_GEOMETRIC_CANDIDATES", "many");
    assert!(PlannerConfig::from_env().is_err());
    env::remove_var("PLANNER_MAX_GEOMETRIC_CANDIDATES");

    env::set_var("PLANNER_LANGUAGE", "fr");
    assert!(PlannerConfig::from_env().is_err());

    clear_planner_env();
}

#[test]
#[serial]
fn test_config_requires_api_key() {
    clear_planner_env();
    let saved = env::var("GOOGLE_MAPS_API_KEY").ok();

    env::set_var("GOOGLE_MAPS_API_KEY", "   ");
    assert!(Config::from_env().is_err());

    env::set_var("GOOGLE_MAPS_API_KEY", "test-key");
    env::set_var("PORT", "8081");
    let config = Config::from_env().unwrap();
    env::remove_var("PORT");

    assert_eq!(config.google_maps_api_key, "test-key");
    assert_eq!(config.port, 8081);
    assert!(config.server_address().ends_with(":8081"));

    match saved {
        Some(key) => env::set_var("GOOGLE_MAPS_API_KEY", key),
        None => env::remove_var("GOOGLE_MAPS_API_KEY"),
    }
}
