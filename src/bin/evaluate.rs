use pedala::config::Config;
use pedala::evaluation::{
    default_scenarios, format_report, run_scenario, summarize, EvalScenario, ScenarioResult,
};
use std::env;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn print_help() {
    eprintln!(
        "\
Usage: evaluate [OPTIONS]

Runs the loop planner against the live Google Maps API and reports
distance error per scenario.

Options:
  --scenario=FILTER     Only run scenarios whose name contains FILTER
  --strict              Enable the shrink pass for short targets
  --json                Output results as JSON
  --help                Show this help message"
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing (less verbose for eval)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pedala=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Parse CLI args
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help") {
        print_help();
        return Ok(());
    }

    let scenario_filter = args.iter().find_map(|a| a.strip_prefix("--scenario="));
    let strict = args.iter().any(|a| a == "--strict");
    let json_output = args.iter().any(|a| a == "--json");

    let config = Config::from_env().map_err(|e| format!("Config error: {}", e))?;
    let planner = pedala::build_planner(&config)?;

    // Select scenarios
    let all_scenarios = default_scenarios();
    let scenarios: Vec<&EvalScenario> = if let Some(filter) = scenario_filter {
        all_scenarios
            .iter()
            .filter(|s| s.name.contains(filter))
            .collect()
    } else {
        all_scenarios.iter().collect()
    };

    if scenarios.is_empty() {
        eprintln!("No scenarios matched filter. Available:");
        for s in &all_scenarios {
            eprintln!("  {}", s.name);
        }
        std::process::exit(1);
    }

    eprintln!(
        "Running {} scenarios (strict: {})...",
        scenarios.len(),
        strict
    );

    let mut results: Vec<ScenarioResult> = Vec::new();
    for scenario in &scenarios {
        eprintln!("  {}", scenario.name);
        results.push(run_scenario(&planner, scenario, strict).await);
    }

    if json_output {
        let output = serde_json::json!({
            "results": results,
            "summary": summarize(&results),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("{}", format_report(&results));
    }

    Ok(())
}
