//! Folding life events into cumulative salary and living-cost adjustments

use std::collections::BTreeMap;

use crate::inputs::LifeEvent;

/// Life events grouped by trigger age, list order preserved within an age
#[derive(Debug, Clone, Default)]
pub struct EventSchedule<'a> {
    by_age: BTreeMap<u32, Vec<&'a LifeEvent>>,
}

impl<'a> EventSchedule<'a> {
    pub fn new(events: &'a [LifeEvent]) -> Self {
        let mut by_age: BTreeMap<u32, Vec<&'a LifeEvent>> = BTreeMap::new();
        for event in events {
            by_age.entry(event.age).or_default().push(event);
        }
        Self { by_age }
    }

    /// Events triggered at `age`
    pub fn at(&self, age: u32) -> &[&'a LifeEvent] {
        self.by_age.get(&age).map(Vec::as_slice).unwrap_or(&[])
    }
}

/// Running adjustments carried from one age to the next
#[derive(Debug, Clone, PartialEq)]
pub struct LifeEventState {
    /// Last absolute salary set by an event; 0 means none
    pub salary_override: f64,
    /// Product of all living-cost multipliers seen so far
    pub living_cost_multiplier: f64,
    /// Sum of all living-cost deltas seen so far
    pub living_cost_change: f64,
}

impl Default for LifeEventState {
    fn default() -> Self {
        Self {
            salary_override: 0.0,
            living_cost_multiplier: 1.0,
            living_cost_change: 0.0,
        }
    }
}

impl LifeEventState {
    /// Fold this year's events into the running state.
    ///
    /// Returns the sum of one-time costs, which apply to the current year only.
    pub fn apply(&mut self, events: &[&LifeEvent]) -> f64 {
        let mut one_time_cost = 0.0;

        for event in events {
            if let Some(salary) = event.salary_change {
                self.salary_override = salary;
            }
            if let Some(multiplier) = event.living_cost_multiplier {
                self.living_cost_multiplier *= multiplier;
            }
            if let Some(delta) = event.living_cost_change {
                self.living_cost_change += delta;
            }
            if let Some(cost) = event.one_time_cost {
                one_time_cost += cost;
            }
        }

        one_time_cost
    }

    /// Salary replacing the computed one, if an event set a positive value.
    /// A change to zero is ignored and leaves the previous override in place.
    pub fn salary(&self) -> Option<f64> {
        (self.salary_override > 0.0).then_some(self.salary_override)
    }

    /// Multiplier first, then the additive delta
    pub fn adjust_living_cost(&self, living_cost: f64) -> f64 {
        living_cost * self.living_cost_multiplier + self.living_cost_change
    }
}
