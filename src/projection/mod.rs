//! Year-by-year projection of income, expenses and balances

mod cashflows;
mod engine;
mod events;
mod state;

pub use cashflows::{
    percent_change, Kpi, KpiSnapshot, ProjectionResult, ProjectionSummary, YearData,
    DEFAULT_SAFE_WITHDRAWAL_RATE,
};
pub use engine::{simulate, ProjectionEngine};
pub use events::{EventSchedule, LifeEventState};
pub use state::ProjectionState;
