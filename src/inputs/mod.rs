//! Plan inputs: settings, house purchase, life events, per-year overrides

mod data;
mod events;
mod overrides;
pub mod snapshot;

pub use data::{
    HousePurchase, InvestmentStrategy, OnboardingProfile, SimulationConfig, StrategyKind,
    DEFAULT_INVESTMENT_RATIO, DEFAULT_INVESTMENT_THRESHOLD,
};
pub use events::{LifeEvent, LifeEventKind, LifeEventUpdate};
pub use overrides::{YearDataOverride, YearOverrides};
pub use snapshot::{load_snapshot, save_snapshot, Snapshot};
