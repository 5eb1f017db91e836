//! Year records produced by the engine and summaries over them

use std::io;

use serde::{Deserialize, Serialize};

use crate::error::ReportError;

/// Share of investments that can be withdrawn each year indefinitely
pub const DEFAULT_SAFE_WITHDRAWAL_RATE: f64 = 0.04;

/// Income, expenses and end-of-year balance sheet for one age
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YearData {
    pub age: u32,

    // Income
    pub gross_income: f64,
    pub income_tax: f64,
    pub resident_tax: f64,
    pub social_insurance: f64,
    pub net_income: f64,

    // Expenses
    pub living_cost: f64,
    pub entertainment_cost: f64,
    pub other_expenses: f64,
    pub other_expenses_memo: String,
    pub one_time_cost: f64,
    pub investment_contribution: f64,
    pub mortgage_payment: f64,
    pub mortgage_interest: f64,
    pub mortgage_principal: f64,
    pub mortgage_balance: f64,
    pub property_tax: f64,
    pub maintenance_cost: f64,

    // Totals
    pub total_expense: f64,
    pub cash_flow: f64,

    // Balance sheet (end of year)
    pub cash: f64,
    pub investment: f64,
    pub property_value: f64,
    pub total_assets: f64,
    pub total_liabilities: f64,
    pub net_worth: f64,
}

impl YearData {
    /// Create an empty record for `age`
    pub fn new(age: u32) -> Self {
        Self {
            age,
            gross_income: 0.0,
            income_tax: 0.0,
            resident_tax: 0.0,
            social_insurance: 0.0,
            net_income: 0.0,
            living_cost: 0.0,
            entertainment_cost: 0.0,
            other_expenses: 0.0,
            other_expenses_memo: String::new(),
            one_time_cost: 0.0,
            investment_contribution: 0.0,
            mortgage_payment: 0.0,
            mortgage_interest: 0.0,
            mortgage_principal: 0.0,
            mortgage_balance: 0.0,
            property_tax: 0.0,
            maintenance_cost: 0.0,
            total_expense: 0.0,
            cash_flow: 0.0,
            cash: 0.0,
            investment: 0.0,
            property_value: 0.0,
            total_assets: 0.0,
            total_liabilities: 0.0,
            net_worth: 0.0,
        }
    }

    /// Cash plus investments
    pub fn financial_assets(&self) -> f64 {
        self.cash + self.investment
    }

    /// Whether withdrawing `withdrawal_rate` of investments covers living cost
    pub fn is_fire_ready(&self, withdrawal_rate: f64) -> bool {
        self.investment * withdrawal_rate >= self.living_cost
    }
}

/// Complete projection over the configured age range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    pub years: Vec<YearData>,
}

impl ProjectionResult {
    pub fn new(years: Vec<YearData>) -> Self {
        Self { years }
    }

    pub fn year(&self, age: u32) -> Option<&YearData> {
        self.years.iter().find(|y| y.age == age)
    }

    /// First age at which the investment balance sustains living costs
    pub fn fire_age(&self, withdrawal_rate: f64) -> Option<u32> {
        self.years
            .iter()
            .find(|y| y.is_fire_ready(withdrawal_rate))
            .map(|y| y.age)
    }

    /// Headline figures at `age` (or the last year when `age` is not simulated),
    /// each with its change from the preceding year
    pub fn kpis_at(&self, age: u32) -> Option<KpiSnapshot> {
        let idx = self
            .years
            .iter()
            .position(|y| y.age == age)
            .or_else(|| self.years.len().checked_sub(1))?;
        let latest = &self.years[idx];
        let previous = idx.checked_sub(1).map(|i| &self.years[i]);

        let kpi = |value: fn(&YearData) -> f64| Kpi {
            value: value(latest),
            change_pct: previous.and_then(|p| percent_change(value(latest), value(p))),
        };

        Some(KpiSnapshot {
            age: latest.age,
            total_assets: kpi(|y| y.total_assets),
            net_worth: kpi(|y| y.net_worth),
            financial_assets: kpi(YearData::financial_assets),
            investment: kpi(|y| y.investment),
            mortgage_balance: Kpi {
                value: latest.mortgage_balance,
                // a shrinking balance counts as a positive change
                change_pct: previous
                    .and_then(|p| percent_change(-latest.mortgage_balance, -p.mortgage_balance)),
            },
            net_income: kpi(|y| y.net_income),
        })
    }

    /// Aggregate statistics over all years
    pub fn summary(&self, withdrawal_rate: f64) -> ProjectionSummary {
        let total_net_income: f64 = self.years.iter().map(|y| y.net_income).sum();
        let total_expense: f64 = self.years.iter().map(|y| y.total_expense).sum();
        let total_cash_flow: f64 = self.years.iter().map(|y| y.cash_flow).sum();
        let negative_cash_flow_years = self.years.iter().filter(|y| y.cash_flow < 0.0).count() as u32;
        let peak_net_worth = self.years.iter().map(|y| y.net_worth).fold(None, |acc: Option<f64>, v| {
            Some(acc.map_or(v, |a| a.max(v)))
        });

        let last = self.years.last();

        ProjectionSummary {
            total_years: self.years.len() as u32,
            final_age: last.map(|y| y.age),
            total_net_income,
            total_expense,
            total_cash_flow,
            negative_cash_flow_years,
            final_cash: last.map(|y| y.cash).unwrap_or(0.0),
            final_investment: last.map(|y| y.investment).unwrap_or(0.0),
            final_total_assets: last.map(|y| y.total_assets).unwrap_or(0.0),
            final_net_worth: last.map(|y| y.net_worth).unwrap_or(0.0),
            peak_net_worth: peak_net_worth.unwrap_or(0.0),
            fire_age: self.fire_age(withdrawal_rate),
        }
    }

    /// Write the year table as CSV with camelCase headers
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<(), ReportError> {
        let mut csv_writer = csv::Writer::from_writer(writer);
        for year in &self.years {
            csv_writer.serialize(year)?;
        }
        csv_writer.flush()?;
        Ok(())
    }
}

/// Percentage change from `previous` to `current`; `None` when `previous` is 0
pub fn percent_change(current: f64, previous: f64) -> Option<f64> {
    if previous == 0.0 {
        None
    } else {
        Some((current - previous) / previous.abs() * 100.0)
    }
}

/// A headline figure with its year-over-year change in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Kpi {
    pub value: f64,
    pub change_pct: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiSnapshot {
    pub age: u32,
    pub total_assets: Kpi,
    pub net_worth: Kpi,
    pub financial_assets: Kpi,
    pub investment: Kpi,
    pub mortgage_balance: Kpi,
    pub net_income: Kpi,
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub final_age: Option<u32>,
    pub total_net_income: f64,
    pub total_expense: f64,
    pub total_cash_flow: f64,
    pub negative_cash_flow_years: u32,
    pub final_cash: f64,
    pub final_investment: f64,
    pub final_total_assets: f64,
    pub final_net_worth: f64,
    pub peak_net_worth: f64,
    pub fire_age: Option<u32>,
}
