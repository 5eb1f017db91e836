//! Pure calculators used by the projection engine

pub mod growth;
pub mod mortgage;
pub mod tax;

pub use growth::{projected_living_cost, projected_salary};
pub use mortgage::{monthly_payment, schedule_of, MortgageYear};
pub use tax::{net_income_of, TaxBreakdown, TaxCalculator, TaxTables};
