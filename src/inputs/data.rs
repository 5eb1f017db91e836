//! Simulation settings and the optional house purchase

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Policy for moving a positive cash flow from cash into investments
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InvestmentStrategy {
    /// Keep cash at `threshold`, invest anything above it
    Threshold { threshold: f64 },
    /// Invest the entire surplus
    All,
    /// Invest `ratio` (0..=1) of the surplus, keep the rest as cash
    Custom { ratio: f64 },
}

impl InvestmentStrategy {
    pub fn kind(&self) -> StrategyKind {
        match self {
            InvestmentStrategy::Threshold { .. } => StrategyKind::Threshold,
            InvestmentStrategy::All => StrategyKind::All,
            InvestmentStrategy::Custom { .. } => StrategyKind::Custom,
        }
    }
}

/// Tag of an [`InvestmentStrategy`] as it appears in snapshots
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    Threshold,
    All,
    Custom,
}

pub const DEFAULT_INVESTMENT_THRESHOLD: f64 = 1_000_000.0;
pub const DEFAULT_INVESTMENT_RATIO: f64 = 0.7;

/// Process-wide inputs for one simulation run.
///
/// The strategy is stored as a tag next to both parameters, so switching
/// strategy keeps the other strategy's setting. [`SimulationConfig::strategy`]
/// resolves the active one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SimulationConfig {
    pub start_age: u32,
    pub end_age: u32,
    pub current_age: u32,

    /// Cash on hand at the start age
    pub initial_cash: f64,
    /// Investment balance at the start age
    pub initial_investment: f64,
    /// Annual return on the investment balance (0.05 = 5%)
    pub investment_return_rate: f64,
    pub investment_strategy: StrategyKind,
    /// Cash ceiling used by the threshold strategy
    pub investment_threshold: f64,
    /// Share of the surplus invested by the custom strategy
    pub investment_ratio: f64,

    /// Gross annual salary at the start age
    pub base_salary: f64,
    pub salary_growth_rate: f64,

    /// Annual living cost at the start age
    pub base_living_cost: f64,
    pub living_cost_inflation_rate: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start_age: 18,
            end_age: 60,
            current_age: 30,
            initial_cash: 3_000_000.0,
            initial_investment: 2_000_000.0,
            investment_return_rate: 0.05,
            investment_strategy: StrategyKind::Threshold,
            investment_threshold: DEFAULT_INVESTMENT_THRESHOLD,
            investment_ratio: DEFAULT_INVESTMENT_RATIO,
            base_salary: 4_000_000.0,
            salary_growth_rate: 0.02,
            base_living_cost: 3_000_000.0,
            living_cost_inflation_rate: 0.01,
        }
    }
}

/// Minimal answers collected when a new user starts planning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingProfile {
    pub current_age: u32,
    pub annual_salary: f64,
    pub current_assets: f64,
}

impl SimulationConfig {
    /// Derive a starting plan from an onboarding profile.
    ///
    /// The plan runs from the current age to 65, splits current assets
    /// 30/70 between cash and investments, and assumes living costs of 60%
    /// of salary.
    pub fn from_onboarding(profile: &OnboardingProfile) -> Self {
        Self {
            start_age: profile.current_age,
            end_age: 65,
            current_age: profile.current_age,
            initial_cash: (profile.current_assets * 0.3).round(),
            initial_investment: (profile.current_assets * 0.7).round(),
            investment_return_rate: 0.05,
            investment_strategy: StrategyKind::Threshold,
            investment_threshold: (profile.annual_salary * 0.5).round(),
            investment_ratio: DEFAULT_INVESTMENT_RATIO,
            base_salary: profile.annual_salary,
            salary_growth_rate: 0.02,
            base_living_cost: (profile.annual_salary * 0.6).round(),
            living_cost_inflation_rate: 0.01,
        }
    }

    /// The active strategy with its parameter
    pub fn strategy(&self) -> InvestmentStrategy {
        match self.investment_strategy {
            StrategyKind::Threshold => InvestmentStrategy::Threshold {
                threshold: self.investment_threshold,
            },
            StrategyKind::All => InvestmentStrategy::All,
            StrategyKind::Custom => InvestmentStrategy::Custom {
                ratio: self.investment_ratio,
            },
        }
    }

    /// Select `strategy`, keeping the stored parameter of the others
    pub fn set_strategy(&mut self, strategy: InvestmentStrategy) {
        self.investment_strategy = strategy.kind();
        match strategy {
            InvestmentStrategy::Threshold { threshold } => self.investment_threshold = threshold,
            InvestmentStrategy::All => {}
            InvestmentStrategy::Custom { ratio } => self.investment_ratio = ratio,
        }
    }

    /// Builder form of [`SimulationConfig::set_strategy`]
    pub fn with_strategy(mut self, strategy: InvestmentStrategy) -> Self {
        self.set_strategy(strategy);
        self
    }

    /// Number of ages the engine will emit
    pub fn num_years(&self) -> usize {
        if self.start_age > self.end_age {
            0
        } else {
            (self.end_age - self.start_age) as usize + 1
        }
    }

    /// Check the invariants the engine assumes but does not enforce
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.start_age <= self.current_age && self.current_age <= self.end_age) {
            return Err(ConfigError::AgeRange {
                start: self.start_age,
                current: self.current_age,
                end: self.end_age,
            });
        }

        let non_negative = [
            ("initialCash", self.initial_cash),
            ("initialInvestment", self.initial_investment),
            ("investmentReturnRate", self.investment_return_rate),
            ("baseSalary", self.base_salary),
            ("salaryGrowthRate", self.salary_growth_rate),
            ("baseLivingCost", self.base_living_cost),
            ("livingCostInflationRate", self.living_cost_inflation_rate),
        ];
        for (field, value) in non_negative {
            if value < 0.0 {
                return Err(ConfigError::Negative { field, value });
            }
        }

        match self.strategy() {
            InvestmentStrategy::Threshold { threshold } if threshold < 0.0 => {
                Err(ConfigError::Negative {
                    field: "investmentThreshold",
                    value: threshold,
                })
            }
            InvestmentStrategy::Custom { ratio } if !(0.0..=1.0).contains(&ratio) => {
                Err(ConfigError::RatioOutOfRange(ratio))
            }
            _ => Ok(()),
        }
    }
}

/// A one-time house purchase financed with a fixed-rate loan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HousePurchase {
    /// Age at which the house is bought
    pub age: u32,
    pub property_price: f64,
    pub down_payment: f64,
    /// Borrowed amount, normally `property_price - down_payment`
    pub loan_amount: f64,
    /// Annual loan rate (0.015 = 1.5%)
    pub interest_rate: f64,
    /// Repayment period in years
    pub loan_term: u32,

    /// Closing costs as a share of the price, paid in the purchase year
    pub acquisition_cost_rate: f64,
    /// Annual property tax as a share of the price
    pub property_tax_rate: f64,
    pub annual_maintenance_cost: f64,
    /// Annual change in property value
    pub property_appreciation_rate: f64,
}

impl HousePurchase {
    /// Create a purchase, deriving the loan amount from price and down payment.
    /// Cost rates start at zero; set them on the returned value.
    pub fn new(age: u32, property_price: f64, down_payment: f64, interest_rate: f64, loan_term: u32) -> Self {
        Self {
            age,
            property_price,
            down_payment,
            loan_amount: property_price - down_payment,
            interest_rate,
            loan_term,
            acquisition_cost_rate: 0.0,
            property_tax_rate: 0.0,
            annual_maintenance_cost: 0.0,
            property_appreciation_rate: 0.0,
        }
    }

    /// One-time cost due in the purchase year (down payment plus closing costs)
    pub fn initial_cost(&self) -> f64 {
        self.down_payment + (self.property_price * self.acquisition_cost_rate).round()
    }

    /// Whether the purchase has happened by `age`
    pub fn is_owned_at(&self, age: u32) -> bool {
        age >= self.age
    }

    pub fn validate(&self, config: &SimulationConfig) -> Result<(), ConfigError> {
        if self.down_payment > self.property_price {
            return Err(ConfigError::DownPaymentExceedsPrice {
                down_payment: self.down_payment,
                property_price: self.property_price,
            });
        }
        let expected = self.property_price - self.down_payment;
        if (self.loan_amount - expected).abs() > 0.5 {
            return Err(ConfigError::LoanAmountMismatch {
                loan_amount: self.loan_amount,
                expected,
            });
        }
        if self.loan_term == 0 && self.loan_amount > 0.0 {
            return Err(ConfigError::ZeroLoanTerm);
        }
        if self.age < config.start_age || self.age > config.end_age {
            return Err(ConfigError::PurchaseAgeOutOfRange {
                age: self.age,
                start: config.start_age,
                end: config.end_age,
            });
        }
        Ok(())
    }
}

impl Default for HousePurchase {
    fn default() -> Self {
        Self {
            acquisition_cost_rate: 0.07,
            property_tax_rate: 0.014,
            annual_maintenance_cost: 300_000.0,
            property_appreciation_rate: -0.01,
            ..Self::new(35, 40_000_000.0, 8_000_000.0, 0.015, 35)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(SimulationConfig::default().validate().is_ok());
        assert_eq!(SimulationConfig::default().num_years(), 43);
    }

    #[test]
    fn test_inverted_age_range_rejected() {
        let config = SimulationConfig {
            start_age: 40,
            end_age: 30,
            current_age: 35,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConfigError::AgeRange { .. })));
        assert_eq!(config.num_years(), 0);
    }

    #[test]
    fn test_custom_ratio_out_of_range() {
        let config = SimulationConfig::default().with_strategy(InvestmentStrategy::Custom { ratio: 1.5 });
        assert_eq!(config.validate(), Err(ConfigError::RatioOutOfRange(1.5)));
    }

    #[test]
    fn test_config_snapshot_layout() {
        let config = SimulationConfig::default().with_strategy(InvestmentStrategy::Custom { ratio: 0.4 });
        let json = serde_json::to_value(&config).unwrap();

        assert_eq!(json["investmentStrategy"], "custom");
        assert_eq!(json["investmentRatio"], 0.4);
        assert_eq!(json["investmentThreshold"], DEFAULT_INVESTMENT_THRESHOLD);
        assert_eq!(json["startAge"], 18);

        let back: SimulationConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"startAge": 25, "investmentStrategy": "all"}"#).unwrap();

        assert_eq!(config.start_age, 25);
        assert_eq!(config.strategy(), InvestmentStrategy::All);
        assert_eq!(config.base_salary, SimulationConfig::default().base_salary);
    }

    #[test]
    fn test_unknown_strategy_rejected() {
        let parsed: Result<SimulationConfig, _> =
            serde_json::from_str(r#"{"investmentStrategy": "everything"}"#);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_from_onboarding() {
        let profile = OnboardingProfile {
            current_age: 28,
            annual_salary: 5_000_000.0,
            current_assets: 4_000_000.0,
        };
        let config = SimulationConfig::from_onboarding(&profile);

        assert_eq!(config.start_age, 28);
        assert_eq!(config.end_age, 65);
        assert_eq!(config.initial_cash, 1_200_000.0);
        assert_eq!(config.initial_investment, 2_800_000.0);
        assert_eq!(config.base_living_cost, 3_000_000.0);
        assert_eq!(
            config.strategy(),
            InvestmentStrategy::Threshold { threshold: 2_500_000.0 }
        );
    }

    #[test]
    fn test_unselected_strategy_parameter_kept() {
        let config: SimulationConfig =
            serde_json::from_str(r#"{"investmentStrategy": "threshold", "investmentRatio": 0.5}"#).unwrap();
        assert_eq!(
            config.strategy(),
            InvestmentStrategy::Threshold { threshold: DEFAULT_INVESTMENT_THRESHOLD }
        );

        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["investmentRatio"], 0.5);

        // switching away and back restores each strategy's own setting
        let mut config = config.with_strategy(InvestmentStrategy::Threshold { threshold: 2_000_000.0 });
        config.set_strategy(InvestmentStrategy::Custom { ratio: 0.3 });
        config.set_strategy(InvestmentStrategy::All);
        assert_eq!(config.investment_threshold, 2_000_000.0);
        assert_eq!(config.investment_ratio, 0.3);

        config.investment_strategy = StrategyKind::Custom;
        assert_eq!(config.strategy(), InvestmentStrategy::Custom { ratio: 0.3 });
    }

    #[test]
    fn test_num_years_at_max_age() {
        let config = SimulationConfig {
            start_age: u32::MAX - 2,
            current_age: u32::MAX - 2,
            end_age: u32::MAX,
            ..Default::default()
        };
        assert_eq!(config.num_years(), 3);
    }

    #[test]
    fn test_house_purchase_derives_loan() {
        let house = HousePurchase::new(35, 40_000_000.0, 8_000_000.0, 0.0, 35);
        assert_eq!(house.loan_amount, 32_000_000.0);
        assert!(house.validate(&SimulationConfig::default()).is_ok());
        assert!(!house.is_owned_at(34));
        assert!(house.is_owned_at(35));
    }

    #[test]
    fn test_house_purchase_validation() {
        let config = SimulationConfig::default();

        let mut house = HousePurchase::new(35, 10_000_000.0, 12_000_000.0, 0.01, 30);
        assert!(matches!(
            house.validate(&config),
            Err(ConfigError::DownPaymentExceedsPrice { .. })
        ));

        house = HousePurchase::new(70, 40_000_000.0, 8_000_000.0, 0.01, 30);
        assert!(matches!(
            house.validate(&config),
            Err(ConfigError::PurchaseAgeOutOfRange { age: 70, .. })
        ));
    }

    #[test]
    fn test_initial_cost_rounds_acquisition() {
        let house = HousePurchase {
            acquisition_cost_rate: 0.07,
            ..HousePurchase::new(35, 40_000_000.0, 8_000_000.0, 0.01, 35)
        };
        assert_eq!(house.initial_cost(), 10_800_000.0);
    }
}
