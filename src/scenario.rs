//! Scenario runner for comparing plans
//!
//! Each plan owns its inputs and results, so independent plans can be
//! projected in parallel.

use rayon::prelude::*;

use crate::calculators::TaxCalculator;
use crate::inputs::Snapshot;
use crate::projection::{ProjectionEngine, ProjectionResult};

/// Shared engine for running many plans
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// let plans: Vec<Snapshot> = [0.03, 0.05, 0.07]
///     .iter()
///     .map(|&rate| { /* vary the investment return */ })
///     .collect();
/// let results = runner.run_batch(&plans);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the default tax tables
    pub fn new() -> Self {
        Self::default()
    }

    /// Create runner with custom tax tables
    pub fn with_tax(tax: TaxCalculator) -> Self {
        Self {
            engine: ProjectionEngine::new(tax),
        }
    }

    /// Project a single plan
    pub fn run(&self, plan: &Snapshot) -> ProjectionResult {
        self.engine.project(plan)
    }

    /// Project several plans in parallel, preserving input order
    pub fn run_batch(&self, plans: &[Snapshot]) -> Vec<ProjectionResult> {
        plans.par_iter().map(|plan| self.engine.project(plan)).collect()
    }

    pub fn engine(&self) -> &ProjectionEngine {
        &self.engine
    }
}
