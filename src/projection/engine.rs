//! Core year-by-year projection engine

use log::debug;

use super::cashflows::{ProjectionResult, YearData};
use super::events::EventSchedule;
use super::state::ProjectionState;
use crate::calculators::growth::{projected_living_cost, projected_salary};
use crate::calculators::mortgage::{schedule_of, MortgageYear};
use crate::calculators::tax::TaxCalculator;
use crate::inputs::{
    HousePurchase, InvestmentStrategy, LifeEvent, SimulationConfig, Snapshot, YearDataOverride,
    YearOverrides,
};

/// Read-only inputs of one simulation pass
struct RunContext<'a> {
    config: &'a SimulationConfig,
    house: Option<&'a HousePurchase>,
    mortgage: Vec<MortgageYear>,
    events: EventSchedule<'a>,
    overrides: &'a YearOverrides,
}

impl RunContext<'_> {
    fn mortgage_year(&self, age: u32) -> Option<&MortgageYear> {
        let house = self.house?;
        let offset = age.checked_sub(house.age)?;
        self.mortgage.get(offset as usize)
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    tax: TaxCalculator,
}

impl ProjectionEngine {
    /// Create an engine with custom tax tables
    pub fn new(tax: TaxCalculator) -> Self {
        Self { tax }
    }

    /// Project every age from `config.start_age` to `config.end_age` inclusive.
    ///
    /// An inverted age range produces an empty sequence.
    pub fn simulate(
        &self,
        config: &SimulationConfig,
        house: Option<&HousePurchase>,
        life_events: &[LifeEvent],
        overrides: &YearOverrides,
    ) -> Vec<YearData> {
        debug!(
            "simulating ages {}..={} ({} life events, {} overrides, house: {})",
            config.start_age,
            config.end_age,
            life_events.len(),
            overrides.len(),
            house.is_some()
        );

        let ctx = RunContext {
            config,
            house,
            mortgage: house.map(schedule_of).unwrap_or_default(),
            events: EventSchedule::new(life_events),
            overrides,
        };

        let mut state = ProjectionState::from_config(config);
        let mut years = Vec::with_capacity(config.num_years());

        for _age in config.start_age..=config.end_age {
            let row = self.calculate_year(&ctx, &mut state);
            state.roll_forward(row.cash, row.investment, row.property_value);
            years.push(row);
        }

        years
    }

    /// Project the inputs held in a snapshot
    pub fn project(&self, snapshot: &Snapshot) -> ProjectionResult {
        ProjectionResult::new(self.simulate(
            &snapshot.config,
            snapshot.house_purchase.as_ref(),
            &snapshot.life_events,
            &snapshot.year_data_overrides,
        ))
    }

    /// Calculate one year from the carried balances
    fn calculate_year(&self, ctx: &RunContext<'_>, state: &mut ProjectionState) -> YearData {
        let age = state.age;
        let mut row = YearData::new(age);
        let no_override = YearDataOverride::default();
        let edit = ctx.overrides.get(&age).unwrap_or(&no_override);

        let one_time_cost = state.events.apply(ctx.events.at(age));

        self.calculate_income(ctx, state, edit, &mut row);
        self.calculate_expenses(ctx, state, edit, one_time_cost, &mut row);
        self.settle_balances(ctx.config, state, &mut row);
        self.apply_property(ctx, &mut row);

        row.total_assets = row.cash + row.investment + row.property_value;
        row.total_liabilities = row.mortgage_balance;
        row.net_worth = row.total_assets - row.total_liabilities;

        row
    }

    /// Gross salary and payroll deductions
    fn calculate_income(
        &self,
        ctx: &RunContext<'_>,
        state: &ProjectionState,
        edit: &YearDataOverride,
        row: &mut YearData,
    ) {
        // an event salary beats both the manual edit and the projection
        let gross_income = state
            .events
            .salary()
            .or_else(|| edit.salary())
            .unwrap_or_else(|| projected_salary(ctx.config, row.age));

        let breakdown = self.tax.net_income_of(gross_income);
        row.gross_income = gross_income;
        row.income_tax = breakdown.income_tax;
        row.resident_tax = breakdown.resident_tax;
        row.social_insurance = breakdown.social_insurance;
        row.net_income = breakdown.net_income;
    }

    /// Living costs, housing costs and the year's cash flow
    fn calculate_expenses(
        &self,
        ctx: &RunContext<'_>,
        state: &ProjectionState,
        edit: &YearDataOverride,
        one_time_cost: f64,
        row: &mut YearData,
    ) {
        let living_cost = edit
            .living_cost()
            .unwrap_or_else(|| projected_living_cost(ctx.config, row.age));
        row.living_cost = state.events.adjust_living_cost(living_cost).round();
        row.entertainment_cost = edit.entertainment_cost().unwrap_or(0.0);
        row.other_expenses = edit.other_expenses().unwrap_or(0.0);
        row.other_expenses_memo = edit.other_expenses_memo().unwrap_or_default().to_string();
        row.investment_contribution = edit.investment_contribution().unwrap_or(0.0);
        row.one_time_cost = one_time_cost;

        if let Some(mortgage) = ctx.mortgage_year(row.age) {
            row.mortgage_payment = mortgage.payment;
            row.mortgage_interest = mortgage.interest;
            row.mortgage_principal = mortgage.principal;
            row.mortgage_balance = mortgage.balance;
        }

        if let Some(house) = ctx.house.filter(|h| h.is_owned_at(row.age)) {
            row.property_tax = (house.property_price * house.property_tax_rate).round();
            row.maintenance_cost = house.annual_maintenance_cost;
        }

        row.total_expense = row.living_cost
            + row.entertainment_cost
            + row.other_expenses
            + row.one_time_cost
            + row.investment_contribution
            + row.mortgage_payment
            + row.property_tax
            + row.maintenance_cost;

        row.cash_flow = row.net_income - row.total_expense;
    }

    /// Grow investments, then route the cash flow through the investment policy
    fn settle_balances(&self, config: &SimulationConfig, state: &ProjectionState, row: &mut YearData) {
        let mut cash = state.cash;
        // last year's balance earns the return; this year's contribution does not
        let mut investment =
            (state.investment * (1.0 + config.investment_return_rate)).round() + row.investment_contribution;

        if row.cash_flow >= 0.0 {
            cash += row.cash_flow;

            match config.strategy() {
                InvestmentStrategy::Threshold { threshold } => {
                    if cash > threshold {
                        investment += cash - threshold;
                        cash = threshold;
                    }
                }
                InvestmentStrategy::All => {
                    investment += row.cash_flow;
                    cash -= row.cash_flow;
                }
                InvestmentStrategy::Custom { ratio } => {
                    let to_invest = (row.cash_flow * ratio).round();
                    investment += to_invest;
                    cash -= to_invest;
                }
            }
        } else {
            (cash, investment) = draw_down(cash, investment, -row.cash_flow);
        }

        row.cash = cash.round();
        row.investment = investment.round();
    }

    /// Property valuation and the purchase-year outlay
    fn apply_property(&self, ctx: &RunContext<'_>, row: &mut YearData) {
        let Some(house) = ctx.house.filter(|h| h.is_owned_at(row.age)) else {
            row.property_value = 0.0;
            return;
        };

        let years_owned = (row.age - house.age) as i32;
        row.property_value =
            (house.property_price * (1.0 + house.property_appreciation_rate).powi(years_owned)).round();

        if row.age == house.age {
            (row.cash, row.investment) = draw_down(row.cash, row.investment, house.initial_cost());
        }
    }
}

/// Pay `amount` from cash first, then from investments, never below zero
fn draw_down(cash: f64, investment: f64, amount: f64) -> (f64, f64) {
    if cash >= amount {
        (cash - amount, investment)
    } else {
        let shortfall = amount - cash;
        (0.0, (investment - shortfall).max(0.0))
    }
}

/// Run a projection with the default tax tables
pub fn simulate(
    config: &SimulationConfig,
    house: Option<&HousePurchase>,
    life_events: &[LifeEvent],
    overrides: &YearOverrides,
) -> Vec<YearData> {
    ProjectionEngine::default().simulate(config, house, life_events, overrides)
}
