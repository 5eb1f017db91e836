//! Balances carried from one simulated year to the next

use super::events::LifeEventState;
use crate::inputs::SimulationConfig;

/// End-of-year balances of the previous age plus running event adjustments
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionState {
    /// Age currently being simulated
    pub age: u32,

    /// Cash at the end of the previous year
    pub cash: f64,

    /// Investment balance at the end of the previous year
    pub investment: f64,

    /// Property value at the end of the previous year
    pub property_value: f64,

    /// Cumulative life-event adjustments
    pub events: LifeEventState,
}

impl ProjectionState {
    /// Initial balances before the first simulated age
    pub fn from_config(config: &SimulationConfig) -> Self {
        Self {
            age: config.start_age,
            cash: config.initial_cash,
            investment: config.initial_investment,
            property_value: 0.0,
            events: LifeEventState::default(),
        }
    }

    /// Carry a finished year's closing balances forward
    pub fn roll_forward(&mut self, cash: f64, investment: f64, property_value: f64) {
        self.cash = cash;
        self.investment = investment;
        self.property_value = property_value;
        self.age = self.age.saturating_add(1);
    }
}
