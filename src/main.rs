//! Asset Simulation CLI
//!
//! Command-line interface for projecting a saved plan

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use asset_simulation::inputs::snapshot::DEFAULT_SNAPSHOT_PATH;
use asset_simulation::inputs::{load_snapshot, save_snapshot, OnboardingProfile};
use asset_simulation::projection::{ProjectionResult, DEFAULT_SAFE_WITHDRAWAL_RATE};
use asset_simulation::{ProjectionEngine, SimulationConfig, Snapshot};
use clap::{Parser, Subcommand};
use log::{info, warn};

#[derive(Parser)]
#[command(name = "asset_simulation", version, about = "Project cash flow and balances year by year")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Project a plan and write the year table as CSV
    Run {
        /// Plan snapshot (JSON)
        #[arg(short, long, default_value = DEFAULT_SNAPSHOT_PATH)]
        snapshot: PathBuf,

        /// CSV output path (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Safe withdrawal rate for the FIRE check
        #[arg(long, default_value_t = DEFAULT_SAFE_WITHDRAWAL_RATE)]
        withdrawal_rate: f64,
    },

    /// Print headline figures for a plan
    Summary {
        #[arg(short, long, default_value = DEFAULT_SNAPSHOT_PATH)]
        snapshot: PathBuf,

        /// Age to report KPIs for (defaults to the last simulated age)
        #[arg(long)]
        age: Option<u32>,

        #[arg(long, default_value_t = DEFAULT_SAFE_WITHDRAWAL_RATE)]
        withdrawal_rate: f64,
    },

    /// Write a starting snapshot, optionally derived from onboarding answers
    Init {
        #[arg(short, long, default_value = DEFAULT_SNAPSHOT_PATH)]
        output: PathBuf,

        /// Current age
        #[arg(long, requires = "salary")]
        age: Option<u32>,

        /// Annual gross salary
        #[arg(long, requires = "age")]
        salary: Option<f64>,

        /// Current total assets
        #[arg(long, default_value_t = 0.0)]
        assets: f64,
    },
}

fn project(path: &Path) -> Result<ProjectionResult> {
    let snapshot = load_snapshot(path).with_context(|| format!("loading {}", path.display()))?;
    if let Err(e) = snapshot.config.validate() {
        warn!("{e}");
    }
    if let Some(house) = &snapshot.house_purchase {
        if let Err(e) = house.validate(&snapshot.config) {
            warn!("{e}");
        }
    }
    Ok(ProjectionEngine::default().project(&snapshot))
}

fn print_summary(result: &ProjectionResult, age: Option<u32>, withdrawal_rate: f64) {
    let summary = result.summary(withdrawal_rate);

    println!("Summary:");
    println!("  Years simulated:      {}", summary.total_years);
    println!("  Total net income:     {:.0}", summary.total_net_income);
    println!("  Total expense:        {:.0}", summary.total_expense);
    println!("  Deficit years:        {}", summary.negative_cash_flow_years);
    println!("  Final net worth:      {:.0}", summary.final_net_worth);
    println!("  Peak net worth:       {:.0}", summary.peak_net_worth);
    match summary.fire_age {
        Some(age) => println!("  FIRE ready at age:    {age}"),
        None => println!("  FIRE ready at age:    not reached"),
    }

    let Some(kpis) = result.kpis_at(age.or(summary.final_age).unwrap_or(0)) else {
        return;
    };
    let change = |pct: Option<f64>| pct.map_or("N/A".to_string(), |p| format!("{p:+.1}%"));

    println!("\nKPIs at age {}:", kpis.age);
    for (label, kpi) in [
        ("Total assets", kpis.total_assets),
        ("Net worth", kpis.net_worth),
        ("Financial assets", kpis.financial_assets),
        ("Investment", kpis.investment),
        ("Mortgage balance", kpis.mortgage_balance),
        ("Net income", kpis.net_income),
    ] {
        println!("  {label:<18} {:>14.0} ({})", kpi.value, change(kpi.change_pct));
    }
}

fn main() -> Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Run { snapshot, output, withdrawal_rate } => {
            let result = project(&snapshot)?;
            info!("projected {} years from {}", result.years.len(), snapshot.display());

            match &output {
                Some(path) => {
                    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
                    result.write_csv(file)?;
                    info!("year table written to {}", path.display());
                    print_summary(&result, None, withdrawal_rate);
                }
                None => result.write_csv(io::stdout().lock())?,
            }
        }
        Command::Summary { snapshot, age, withdrawal_rate } => {
            let result = project(&snapshot)?;
            print_summary(&result, age, withdrawal_rate);
        }
        Command::Init { output, age, salary, assets } => {
            let config = match (age, salary) {
                (Some(current_age), Some(annual_salary)) => SimulationConfig::from_onboarding(&OnboardingProfile {
                    current_age,
                    annual_salary,
                    current_assets: assets,
                }),
                _ => SimulationConfig::default(),
            };
            let snapshot = Snapshot {
                config,
                ..Default::default()
            };
            save_snapshot(&snapshot, &output)?;
            info!("wrote starting plan to {}", output.display());
        }
    }

    Ok(())
}
