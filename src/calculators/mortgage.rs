//! Fixed-rate, equal-payment mortgage amortization
//!
//! Repayment is simulated month by month and reported per loan year.

use serde::{Deserialize, Serialize};

use crate::inputs::HousePurchase;

/// Loan figures for one year of the repayment period
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MortgageYear {
    pub age: u32,
    /// Interest plus principal paid during the year
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    /// Outstanding balance at year end
    pub balance: f64,
}

/// Level monthly payment that retires `loan_amount` over `num_payments` months
pub fn monthly_payment(loan_amount: f64, annual_rate: f64, num_payments: u32) -> f64 {
    if num_payments == 0 {
        return 0.0;
    }
    if annual_rate == 0.0 {
        return loan_amount / num_payments as f64;
    }

    let monthly_rate = annual_rate / 12.0;
    let growth = (1.0 + monthly_rate).powi(num_payments as i32);
    loan_amount * monthly_rate * growth / (growth - 1.0)
}

/// Year-by-year repayment schedule, one entry per year of the loan term
pub fn schedule_of(purchase: &HousePurchase) -> Vec<MortgageYear> {
    let monthly_rate = purchase.interest_rate / 12.0;
    let payment = monthly_payment(purchase.loan_amount, purchase.interest_rate, purchase.loan_term.saturating_mul(12));

    let mut remaining = purchase.loan_amount;
    let mut schedule = Vec::with_capacity(purchase.loan_term as usize);

    for year in 0..purchase.loan_term {
        let mut annual_interest = 0.0;
        let mut annual_principal = 0.0;

        for _month in 0..12 {
            if remaining <= 0.0 {
                break;
            }
            let interest = remaining * monthly_rate;
            let principal = (payment - interest).min(remaining);

            annual_interest += interest;
            annual_principal += principal;
            remaining -= principal;
        }

        remaining = remaining.max(0.0);

        schedule.push(MortgageYear {
            age: purchase.age.saturating_add(year),
            payment: (annual_interest + annual_principal).round(),
            interest: annual_interest.round(),
            principal: annual_principal.round(),
            balance: remaining.round(),
        });
    }

    schedule
}
