//! Income tax, resident tax and social insurance on employment income
//!
//! A simplified model of Japanese payroll deductions: a piecewise employment
//! income deduction, progressive national income tax, flat resident tax and
//! a flat social insurance rate with no cap.

use serde::{Deserialize, Serialize};

/// Linear segment of the employment income deduction: `gross * rate + offset`
/// for gross income up to `upper`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeductionBand {
    pub upper: f64,
    pub rate: f64,
    pub offset: f64,
}

/// Progressive bracket applying `rate` to taxable income up to `upper`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxBracket {
    pub upper: f64,
    pub rate: f64,
}

/// Deduction formulas and rate tables
#[derive(Debug, Clone, PartialEq)]
pub struct TaxTables {
    /// Ordered by `upper`; the last band must be unbounded
    pub employment_deduction: Vec<DeductionBand>,
    /// Basic deduction for national income tax
    pub basic_deduction: f64,
    /// Basic deduction for resident tax
    pub resident_basic_deduction: f64,
    /// Ordered by `upper`; the last bracket must be unbounded
    pub income_tax_brackets: Vec<TaxBracket>,
    pub resident_tax_rate: f64,
    pub social_insurance_rate: f64,
}

impl Default for TaxTables {
    fn default() -> Self {
        Self {
            employment_deduction: vec![
                DeductionBand { upper: 1_625_000.0, rate: 0.0, offset: 550_000.0 },
                DeductionBand { upper: 1_800_000.0, rate: 0.4, offset: -100_000.0 },
                DeductionBand { upper: 3_600_000.0, rate: 0.3, offset: 80_000.0 },
                DeductionBand { upper: 6_600_000.0, rate: 0.2, offset: 440_000.0 },
                DeductionBand { upper: 8_500_000.0, rate: 0.1, offset: 1_100_000.0 },
                DeductionBand { upper: f64::INFINITY, rate: 0.0, offset: 1_950_000.0 },
            ],
            basic_deduction: 480_000.0,
            resident_basic_deduction: 430_000.0,
            income_tax_brackets: vec![
                TaxBracket { upper: 1_950_000.0, rate: 0.05 },
                TaxBracket { upper: 3_300_000.0, rate: 0.10 },
                TaxBracket { upper: 6_950_000.0, rate: 0.20 },
                TaxBracket { upper: 9_000_000.0, rate: 0.23 },
                TaxBracket { upper: 18_000_000.0, rate: 0.33 },
                TaxBracket { upper: f64::INFINITY, rate: 0.40 },
            ],
            resident_tax_rate: 0.10,
            social_insurance_rate: 0.145,
        }
    }
}

/// Deductions withheld from one year's gross income
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    pub income_tax: f64,
    pub resident_tax: f64,
    pub social_insurance: f64,
    pub net_income: f64,
}

impl TaxBreakdown {
    pub fn total_deductions(&self) -> f64 {
        self.income_tax + self.resident_tax + self.social_insurance
    }
}

/// Converts gross income into net income
#[derive(Debug, Clone, Default)]
pub struct TaxCalculator {
    tables: TaxTables,
}

impl TaxCalculator {
    pub fn new(tables: TaxTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    /// Employment income deduction for a gross salary
    pub fn employment_income_deduction(&self, gross_income: f64) -> f64 {
        self.tables
            .employment_deduction
            .iter()
            .find(|band| gross_income <= band.upper)
            .map(|band| gross_income * band.rate + band.offset)
            .unwrap_or(0.0)
    }

    /// National income tax, rounded to the nearest yen
    pub fn income_tax(&self, gross_income: f64) -> f64 {
        let taxable = self.taxable_income(gross_income, self.tables.basic_deduction);

        let mut tax = 0.0;
        let mut lower = 0.0;
        for bracket in &self.tables.income_tax_brackets {
            if taxable <= lower {
                break;
            }
            tax += (taxable.min(bracket.upper) - lower) * bracket.rate;
            lower = bracket.upper;
        }

        tax.round()
    }

    /// Resident tax, rounded to the nearest yen
    pub fn resident_tax(&self, gross_income: f64) -> f64 {
        let taxable = self.taxable_income(gross_income, self.tables.resident_basic_deduction);
        (taxable * self.tables.resident_tax_rate).round()
    }

    /// Health insurance and pension contributions, rounded to the nearest yen
    pub fn social_insurance(&self, gross_income: f64) -> f64 {
        (gross_income * self.tables.social_insurance_rate).round()
    }

    /// Full breakdown of deductions and take-home pay
    pub fn net_income_of(&self, gross_income: f64) -> TaxBreakdown {
        let income_tax = self.income_tax(gross_income);
        let resident_tax = self.resident_tax(gross_income);
        let social_insurance = self.social_insurance(gross_income);

        TaxBreakdown {
            income_tax,
            resident_tax,
            social_insurance,
            net_income: gross_income - income_tax - resident_tax - social_insurance,
        }
    }

    fn taxable_income(&self, gross_income: f64, basic_deduction: f64) -> f64 {
        (gross_income - self.employment_income_deduction(gross_income) - basic_deduction).max(0.0)
    }
}

/// Net income breakdown under the default tables
pub fn net_income_of(gross_income: f64) -> TaxBreakdown {
    TaxCalculator::default().net_income_of(gross_income)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_employment_deduction_bands() {
        let calc = TaxCalculator::default();

        assert_eq!(calc.employment_income_deduction(0.0), 550_000.0);
        assert_eq!(calc.employment_income_deduction(1_625_000.0), 550_000.0);
        assert_abs_diff_eq!(calc.employment_income_deduction(1_700_000.0), 580_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(calc.employment_income_deduction(3_000_000.0), 980_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(calc.employment_income_deduction(5_000_000.0), 1_440_000.0, epsilon = 1e-6);
        assert_abs_diff_eq!(calc.employment_income_deduction(8_000_000.0), 1_900_000.0, epsilon = 1e-6);
        assert_eq!(calc.employment_income_deduction(20_000_000.0), 1_950_000.0);
    }

    #[test]
    fn test_deduction_is_continuous_at_band_edges() {
        let calc = TaxCalculator::default();
        for band in &calc.tables().employment_deduction[..5] {
            let below = calc.employment_income_deduction(band.upper);
            let above = calc.employment_income_deduction(band.upper + 1.0);
            assert!((above - below).abs() <= 1.0, "jump at {}", band.upper);
        }
    }

    #[test]
    fn test_five_million_salary() {
        let breakdown = net_income_of(5_000_000.0);

        // taxable 3,080,000: 97,500 + 113,000
        assert_eq!(breakdown.income_tax, 210_500.0);
        // taxable 3,130,000 at 10%
        assert_eq!(breakdown.resident_tax, 313_000.0);
        assert_eq!(breakdown.social_insurance, 725_000.0);
        assert_eq!(breakdown.net_income, 3_751_500.0);
    }

    #[test]
    fn test_top_bracket() {
        let calc = TaxCalculator::default();
        // taxable = 30M - 1.95M - 0.48M = 27,570,000
        let expected: f64 = 1_950_000.0 * 0.05
            + 1_350_000.0 * 0.10
            + 3_650_000.0 * 0.20
            + 2_050_000.0 * 0.23
            + 9_000_000.0 * 0.33
            + 9_570_000.0 * 0.40;
        assert_eq!(calc.income_tax(30_000_000.0), expected.round());
    }

    #[test]
    fn test_zero_income() {
        let breakdown = net_income_of(0.0);
        assert_eq!(breakdown.income_tax, 0.0);
        assert_eq!(breakdown.resident_tax, 0.0);
        assert_eq!(breakdown.social_insurance, 0.0);
        assert_eq!(breakdown.net_income, 0.0);
    }

    #[test]
    fn test_low_income_pays_only_social_insurance() {
        let breakdown = net_income_of(1_000_000.0);
        assert_eq!(breakdown.income_tax, 0.0);
        assert_eq!(breakdown.resident_tax, 2_000.0);
        assert_eq!(breakdown.social_insurance, 145_000.0);
    }

    #[test]
    fn test_net_bounded_by_gross() {
        let calc = TaxCalculator::default();
        let mut gross = 0.0;
        while gross <= 40_000_000.0 {
            let b = calc.net_income_of(gross);
            assert!(b.income_tax >= 0.0 && b.resident_tax >= 0.0 && b.social_insurance >= 0.0);
            assert!(b.net_income <= gross);
            assert_abs_diff_eq!(b.net_income + b.total_deductions(), gross, epsilon = 1e-6);
            gross += 37_500.0;
        }
    }

    #[test]
    fn test_no_bracket_cliff() {
        let calc = TaxCalculator::default();
        let step = 10_000.0;
        let mut gross = 0.0;
        let mut previous = calc.net_income_of(gross).net_income;
        while gross < 30_000_000.0 {
            gross += step;
            let net = calc.net_income_of(gross).net_income;
            // per-item rounding may cost at most a few yen
            assert!(net >= previous - 3.0, "net fell from {previous} to {net} at {gross}");
            assert!(net - previous <= step + 3.0);
            previous = net;
        }
    }
}
