pub mod scenarios;

use serde::{Deserialize, Serialize};

use crate::models::{
    RideStyle, RiderProfile, RoutePlanRequest, SearchResult, SearchStatus, SearchStrategy,
};
use crate::services::route_planner::RoutePlanner;

pub use scenarios::default_scenarios;

/// A planning request run against the live provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvalScenario {
    pub name: String,
    pub origin: String,
    pub distance_km: f64,
    pub profile: RiderProfile,
    pub style: RideStyle,
}

impl EvalScenario {
    pub fn to_request(&self) -> RoutePlanRequest {
        RoutePlanRequest::new(self.origin.clone(), self.distance_km, self.profile, self.style)
    }
}

/// Outcome of one scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub scenario: EvalScenario,
    pub achieved_km: Option<f64>,
    pub error_km: f64,
    pub attempts: u32,
    pub within_tolerance: bool,
    pub status: SearchStatus,
    pub strategy: Option<SearchStrategy>,
}

impl ScenarioResult {
    pub fn from_search(scenario: EvalScenario, search: &SearchResult) -> Self {
        ScenarioResult {
            scenario,
            achieved_km: search.total_distance_km(),
            error_km: search.distance_error_km,
            attempts: search.attempts_made,
            within_tolerance: search.within_tolerance,
            status: search.status,
            strategy: search.strategy,
        }
    }
}

/// Aggregates over all scenarios that produced a route
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationSummary {
    pub scenarios: usize,
    pub mean_error_km: f64,
    pub mean_attempts: f64,
    /// Fraction of scenarios within tolerance
    pub convergence_rate: f64,
}

pub async fn run_scenario(
    planner: &RoutePlanner,
    scenario: &EvalScenario,
    strict: bool,
) -> ScenarioResult {
    let search = planner.plan_route(&scenario.to_request(), strict).await;
    ScenarioResult::from_search(scenario.clone(), &search)
}

pub fn summarize(results: &[ScenarioResult]) -> EvaluationSummary {
    if results.is_empty() {
        return EvaluationSummary {
            scenarios: 0,
            mean_error_km: 0.0,
            mean_attempts: 0.0,
            convergence_rate: 0.0,
        };
    }

    let n = results.len() as f64;
    EvaluationSummary {
        scenarios: results.len(),
        mean_error_km: results.iter().map(|r| r.error_km).sum::<f64>() / n,
        mean_attempts: results.iter().map(|r| r.attempts as f64).sum::<f64>() / n,
        convergence_rate: results.iter().filter(|r| r.within_tolerance).count() as f64 / n,
    }
}

/// Format a single scenario result for display
pub fn format_scenario_result(result: &ScenarioResult) -> String {
    let achieved = result
        .achieved_km
        .map(|km| format!("{:.1} km", km))
        .unwrap_or_else(|| "no route".to_string());
    let strategy = result
        .strategy
        .map(|s| s.to_string())
        .unwrap_or_else(|| "-".to_string());

    format!(
        "\n{} (target {:.1} km)\n  achieved:  {}\n  error:     {:.2} km\n  attempts:  {}\n  status:    {:?}\n  strategy:  {}\n",
        result.scenario.name,
        result.scenario.distance_km,
        achieved,
        result.error_km,
        result.attempts,
        result.status,
        strategy,
    )
}

/// Format the full evaluation report
pub fn format_report(results: &[ScenarioResult]) -> String {
    let mut report = String::from("=== Loop Distance Evaluation Report ===\n");

    for result in results {
        report.push_str(&format_scenario_result(result));
    }

    let summary = summarize(results);
    report.push_str(&format!(
        "\nmean error: {:.2} km | mean attempts: {:.1} | converged: {:.0}%\n",
        summary.mean_error_km,
        summary.mean_attempts,
        summary.convergence_rate * 100.0,
    ));

    report
}
