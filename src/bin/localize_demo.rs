use anyhow::{bail, Context, Result};
use clap::Parser;
use grid_localization::{Belief, Scenario};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Run the histogram filter over the reference scenarios or a scenario file.
#[derive(Debug, Parser)]
#[command(name = "localize_demo", version, about = "Grid localization demo harness")]
struct Cli {
    /// JSON scenario to run instead of the built-in ones.
    #[arg(short, long, value_name = "FILE")]
    scenario: Option<PathBuf>,

    /// Largest allowed cell error against a scenario's expected grid.
    #[arg(long, default_value_t = 1e-6)]
    tolerance: f64,

    /// Print beliefs as JSON rows.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    let scenarios = match &cli.scenario {
        Some(path) => {
            let scenario = Scenario::from_path(path)
                .with_context(|| format!("loading scenario {}", path.display()))?;
            vec![(path.display().to_string(), scenario)]
        }
        None => Scenario::builtin()
            .into_iter()
            .map(|(name, scenario)| (name.to_string(), scenario))
            .collect(),
    };

    let mut failures = 0;
    for (name, scenario) in &scenarios {
        info!("Running scenario: {}", name);
        match scenario.run() {
            Ok(belief) => {
                show(&belief, cli.json)?;
                if !report(name, scenario, &belief, cli.tolerance)? {
                    failures += 1;
                }
            }
            Err(e) => {
                error!("Scenario {} failed: {}", name, e);
                failures += 1;
            }
        }
    }

    if failures > 0 {
        bail!("{} of {} scenarios failed", failures, scenarios.len());
    }
    info!("All {} scenarios passed", scenarios.len());
    Ok(())
}

fn show(belief: &Belief, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&belief.to_rows())?);
    } else {
        println!("{}", belief);
    }
    Ok(())
}

/// Compare against the expected grid, if any. Returns false on a miss.
fn report(name: &str, scenario: &Scenario, belief: &Belief, tolerance: f64) -> Result<bool> {
    let Some(expected) = &scenario.expected else {
        return Ok(true);
    };

    let expected = Belief::from_rows(expected)?;
    match belief.max_abs_diff(&expected) {
        Some(diff) if diff <= tolerance => {
            info!("Scenario {} matches expected grid (max error {:.2e})", name, diff);
            Ok(true)
        }
        Some(diff) => {
            println!("expected:\n{}", expected);
            error!("Scenario {} is off by {:.2e}", name, diff);
            Ok(false)
        }
        None => {
            error!(
                "Scenario {} expected a {}x{} grid",
                name,
                expected.rows(),
                expected.cols()
            );
            Ok(false)
        }
    }
}
