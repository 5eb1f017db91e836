//! AWS Lambda handler for projecting a plan
//!
//! Accepts a plan snapshot (the same JSON the CLI reads) and returns the
//! year table together with summary figures.

use asset_simulation::inputs::Snapshot;
use asset_simulation::projection::{
    KpiSnapshot, ProjectionEngine, ProjectionSummary, YearData, DEFAULT_SAFE_WITHDRAWAL_RATE,
};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use log::{info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Input for one projection
///
/// The payload is a plan snapshot (the same document the CLI reads) with the
/// request options as extra top-level keys.
#[derive(Debug)]
pub struct SimulationRequest {
    pub snapshot: Snapshot,
    pub options: RequestOptions,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestOptions {
    /// Safe withdrawal rate for the FIRE check (default: 4%)
    #[serde(default = "default_withdrawal_rate")]
    pub withdrawal_rate: f64,

    /// Age to report KPIs for (default: last simulated age)
    #[serde(default)]
    pub kpi_age: Option<u32>,

    /// Omit the per-year table from the response
    #[serde(default)]
    pub summary_only: bool,
}

const OPTION_KEYS: [&str; 3] = ["withdrawalRate", "kpiAge", "summaryOnly"];

fn default_withdrawal_rate() -> f64 {
    DEFAULT_SAFE_WITHDRAWAL_RATE
}

impl SimulationRequest {
    /// Split the option keys off the payload and decode the rest as a snapshot
    pub fn from_value(mut payload: Value) -> Result<Self, serde_json::Error> {
        let mut options = Map::new();
        if let Some(fields) = payload.as_object_mut() {
            for key in OPTION_KEYS {
                if let Some(value) = fields.remove(key) {
                    options.insert(key.to_string(), value);
                }
            }
        }

        Ok(Self {
            options: serde_json::from_value(Value::Object(options))?,
            snapshot: serde_json::from_value(payload)?,
        })
    }
}

/// Output of one projection
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub summary: ProjectionSummary,
    pub kpis: Option<KpiSnapshot>,
    /// Validation problems found in the inputs; the projection still runs
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub years: Option<Vec<YearData>>,
}

async fn handler(event: LambdaEvent<Value>) -> Result<SimulationResponse, Error> {
    let (payload, _context) = event.into_parts();
    let request = SimulationRequest::from_value(payload)?;
    let snapshot = &request.snapshot;
    let options = &request.options;

    let mut warnings = Vec::new();
    if let Err(e) = snapshot.config.validate() {
        warnings.push(e.to_string());
    }
    if let Some(house) = &snapshot.house_purchase {
        if let Err(e) = house.validate(&snapshot.config) {
            warnings.push(e.to_string());
        }
    }
    for warning in &warnings {
        warn!("{warning}");
    }

    let result = ProjectionEngine::default().project(snapshot);
    info!(
        "projected ages {}..={} ({} years)",
        snapshot.config.start_age,
        snapshot.config.end_age,
        result.years.len()
    );

    let summary = result.summary(options.withdrawal_rate);
    let kpis = result.kpis_at(options.kpi_age.or(summary.final_age).unwrap_or(0));

    Ok(SimulationResponse {
        summary,
        kpis,
        warnings,
        years: (!options.summary_only).then_some(result.years),
    })
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    env_logger::init();
    run(service_fn(handler)).await
}
