//! Rule-based salary and living-cost trajectories

use crate::inputs::SimulationConfig;

/// `base * (1 + rate)^(age - start_age)`, rounded to the nearest yen.
/// Ages before `start_age` extrapolate backwards.
pub fn compound(base: f64, rate: f64, start_age: u32, age: u32) -> f64 {
    let years = (i64::from(age) - i64::from(start_age)).clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32;
    (base * (1.0 + rate).powi(years)).round()
}

/// Gross salary at `age` from the base salary and growth rate
pub fn projected_salary(config: &SimulationConfig, age: u32) -> f64 {
    compound(config.base_salary, config.salary_growth_rate, config.start_age, age)
}

/// Living cost at `age` from the base cost and inflation rate
pub fn projected_living_cost(config: &SimulationConfig, age: u32) -> f64 {
    compound(
        config.base_living_cost,
        config.living_cost_inflation_rate,
        config.start_age,
        age,
    )
}
