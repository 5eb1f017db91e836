//! Asset Simulation - year-by-year personal finance projection
//!
//! This library provides:
//! - Payroll tax and social insurance calculation
//! - Fixed-rate mortgage amortization
//! - Salary and living-cost growth rules with life-event adjustments
//! - A projection engine producing income, expenses and balance sheet per age
//! - JSON snapshots of plan inputs and a session type that recomputes on edit

pub mod calculators;
pub mod error;
pub mod inputs;
pub mod projection;
pub mod scenario;
pub mod session;

// Re-export commonly used types
pub use calculators::{net_income_of, schedule_of, TaxBreakdown, TaxCalculator};
pub use error::{ConfigError, ReportError, SnapshotError};
pub use inputs::{
    HousePurchase, InvestmentStrategy, LifeEvent, LifeEventKind, SimulationConfig, Snapshot,
    YearDataOverride, YearOverrides,
};
pub use projection::{simulate, ProjectionEngine, ProjectionResult, YearData};
pub use scenario::ScenarioRunner;
pub use session::Session;
