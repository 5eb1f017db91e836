//! Sparse manual edits to individual years
//!
//! Every field is tri-state:
//! - absent (`None`): no opinion, an earlier edit (if any) stands
//! - explicit null (`Some(None)`): use the engine's computed default
//! - value (`Some(Some(v))`): use `v`
//!
//! The engine treats the first two the same; the difference matters when a
//! new edit is merged onto an existing one.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Override map keyed by age
pub type YearOverrides = BTreeMap<u32, YearDataOverride>;

/// Per-field manual edits for one age
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearDataOverride {
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub salary: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub living_cost: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub entertainment_cost: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub other_expenses: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub other_expenses_memo: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    pub investment_contribution: Option<Option<f64>>,
}

/// A field that appears in the input (even as `null`) is `Some`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

fn merge_field<T>(current: &mut Option<Option<T>>, edit: Option<Option<T>>) {
    if edit.is_some() {
        *current = edit;
    }
}

impl YearDataOverride {
    pub fn salary(&self) -> Option<f64> {
        self.salary.flatten()
    }

    pub fn living_cost(&self) -> Option<f64> {
        self.living_cost.flatten()
    }

    pub fn entertainment_cost(&self) -> Option<f64> {
        self.entertainment_cost.flatten()
    }

    pub fn other_expenses(&self) -> Option<f64> {
        self.other_expenses.flatten()
    }

    pub fn other_expenses_memo(&self) -> Option<&str> {
        self.other_expenses_memo.as_ref().and_then(|m| m.as_deref())
    }

    pub fn investment_contribution(&self) -> Option<f64> {
        self.investment_contribution.flatten()
    }

    /// Layer a newer partial edit on top of this one
    pub fn merge(&mut self, edit: YearDataOverride) {
        merge_field(&mut self.salary, edit.salary);
        merge_field(&mut self.living_cost, edit.living_cost);
        merge_field(&mut self.entertainment_cost, edit.entertainment_cost);
        merge_field(&mut self.other_expenses, edit.other_expenses);
        merge_field(&mut self.other_expenses_memo, edit.other_expenses_memo);
        merge_field(&mut self.investment_contribution, edit.investment_contribution);
    }

    /// True when no field carries an opinion
    pub fn is_empty(&self) -> bool {
        self.salary.is_none()
            && self.living_cost.is_none()
            && self.entertainment_cost.is_none()
            && self.other_expenses.is_none()
            && self.other_expenses_memo.is_none()
            && self.investment_contribution.is_none()
    }
}
