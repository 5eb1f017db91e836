//! Age-tagged life events that adjust salary and living costs

use serde::{Deserialize, Serialize};

/// Category of a life event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifeEventKind {
    Marriage,
    Childbirth,
    JobChange,
    HousePurchase,
    Custom,
}

/// A discrete event triggered at a given age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LifeEvent {
    pub id: String,
    pub age: u32,
    #[serde(rename = "type")]
    pub kind: LifeEventKind,
    #[serde(default)]
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New absolute gross salary from this age on
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_change: Option<f64>,
    /// Factor applied to living cost from this age on (compounds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living_cost_multiplier: Option<f64>,
    /// Amount added to living cost from this age on (accumulates)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub living_cost_change: Option<f64>,
    /// Expense charged in the trigger year only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub one_time_cost: Option<f64>,
}

impl LifeEvent {
    /// Create an event with no effects
    pub fn new(id: impl Into<String>, age: u32, kind: LifeEventKind) -> Self {
        Self {
            id: id.into(),
            age,
            kind,
            label: String::new(),
            description: None,
            salary_change: None,
            living_cost_multiplier: None,
            living_cost_change: None,
            one_time_cost: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    pub fn with_salary(mut self, salary: f64) -> Self {
        self.salary_change = Some(salary);
        self
    }

    pub fn with_living_cost_multiplier(mut self, multiplier: f64) -> Self {
        self.living_cost_multiplier = Some(multiplier);
        self
    }

    pub fn with_living_cost_change(mut self, delta: f64) -> Self {
        self.living_cost_change = Some(delta);
        self
    }

    pub fn with_one_time_cost(mut self, cost: f64) -> Self {
        self.one_time_cost = Some(cost);
        self
    }
}

/// Partial edit of a [`LifeEvent`]; `None` keeps the current value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LifeEventUpdate {
    pub age: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<LifeEventKind>,
    pub label: Option<String>,
    pub description: Option<String>,
    pub salary_change: Option<f64>,
    pub living_cost_multiplier: Option<f64>,
    pub living_cost_change: Option<f64>,
    pub one_time_cost: Option<f64>,
}

impl LifeEvent {
    /// Apply a partial edit in place
    pub fn apply(&mut self, update: LifeEventUpdate) {
        if let Some(age) = update.age {
            self.age = age;
        }
        if let Some(kind) = update.kind {
            self.kind = kind;
        }
        if let Some(label) = update.label {
            self.label = label;
        }
        if update.description.is_some() {
            self.description = update.description;
        }
        if update.salary_change.is_some() {
            self.salary_change = update.salary_change;
        }
        if update.living_cost_multiplier.is_some() {
            self.living_cost_multiplier = update.living_cost_multiplier;
        }
        if update.living_cost_change.is_some() {
            self.living_cost_change = update.living_cost_change;
        }
        if update.one_time_cost.is_some() {
            self.one_time_cost = update.one_time_cost;
        }
    }
}
