//! A host-owned plan: inputs plus the year table computed from them
//!
//! Every mutation recomputes the projection immediately, so `years()` always
//! reflects the current inputs.

use chrono::Utc;
use log::debug;

use crate::error::SnapshotError;
use crate::inputs::{
    HousePurchase, LifeEvent, LifeEventUpdate, OnboardingProfile, SimulationConfig, Snapshot,
    YearDataOverride,
};
use crate::projection::{ProjectionEngine, ProjectionResult, YearData};

#[derive(Debug, Clone)]
pub struct Session {
    engine: ProjectionEngine,
    inputs: Snapshot,
    result: ProjectionResult,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(Snapshot::default())
    }
}

impl Session {
    pub fn new(inputs: Snapshot) -> Self {
        Self::with_engine(ProjectionEngine::default(), inputs)
    }

    pub fn with_engine(engine: ProjectionEngine, inputs: Snapshot) -> Self {
        let mut session = Self {
            engine,
            inputs,
            result: ProjectionResult::default(),
        };
        session.recalculate();
        session
    }

    pub fn inputs(&self) -> &Snapshot {
        &self.inputs
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.inputs.config
    }

    pub fn result(&self) -> &ProjectionResult {
        &self.result
    }

    pub fn years(&self) -> &[YearData] {
        &self.result.years
    }

    /// Re-run the projection from the current inputs
    pub fn recalculate(&mut self) {
        self.result = self.engine.project(&self.inputs);
        debug!("recalculated {} years", self.result.years.len());
    }

    /// Edit the settings in place, then recompute
    pub fn update_config(&mut self, edit: impl FnOnce(&mut SimulationConfig)) {
        edit(&mut self.inputs.config);
        self.recalculate();
    }

    pub fn set_house_purchase(&mut self, purchase: Option<HousePurchase>) {
        self.inputs.house_purchase = purchase;
        self.recalculate();
    }

    pub fn add_life_event(&mut self, event: LifeEvent) {
        debug!("adding life event {} at age {}", event.id, event.age);
        self.inputs.life_events.push(event);
        self.recalculate();
    }

    /// Apply a partial edit to the event with `id`; returns false if no such event
    pub fn update_life_event(&mut self, id: &str, update: LifeEventUpdate) -> bool {
        let Some(event) = self.inputs.life_events.iter_mut().find(|e| e.id == id) else {
            return false;
        };
        event.apply(update);
        self.recalculate();
        true
    }

    /// Remove the event with `id`; returns false if no such event
    pub fn delete_life_event(&mut self, id: &str) -> bool {
        let before = self.inputs.life_events.len();
        self.inputs.life_events.retain(|e| e.id != id);
        if self.inputs.life_events.len() == before {
            return false;
        }
        self.recalculate();
        true
    }

    /// Merge a manual edit into the override for `age`
    pub fn update_year_data(&mut self, age: u32, edit: YearDataOverride) {
        self.inputs.year_data_overrides.entry(age).or_default().merge(edit);
        self.recalculate();
    }

    pub fn reset_to_defaults(&mut self) {
        self.inputs = Snapshot::default();
        self.recalculate();
    }

    /// Start a fresh plan from onboarding answers
    pub fn initialize_from_onboarding(&mut self, profile: &OnboardingProfile) {
        self.inputs = Snapshot {
            config: SimulationConfig::from_onboarding(profile),
            ..Default::default()
        };
        self.recalculate();
    }

    /// Replace all inputs from a JSON snapshot. On malformed input the current
    /// plan is left untouched and the error returned.
    pub fn import_data(&mut self, json: &str) -> Result<(), SnapshotError> {
        self.inputs = Snapshot::from_json(json)?;
        self.recalculate();
        Ok(())
    }

    /// Serialize the inputs, stamped with the export time
    pub fn export_data(&self) -> Result<String, SnapshotError> {
        let snapshot = Snapshot {
            exported_at: Some(Utc::now()),
            ..self.inputs.clone()
        };
        snapshot.to_json()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{InvestmentStrategy, LifeEventKind, StrategyKind};

    #[test]
    fn test_default_session_is_computed() {
        let session = Session::default();
        assert_eq!(session.years().len(), 43);
        assert_eq!(session.years()[0].age, 18);
    }

    #[test]
    fn test_update_config_recomputes() {
        let mut session = Session::default();
        session.update_config(|c| {
            c.start_age = 30;
            c.end_age = 40;
        });
        assert_eq!(session.years().len(), 11);
        assert_eq!(session.years()[0].age, 30);
    }

    #[test]
    fn test_life_event_lifecycle() {
        let mut session = Session::default();
        let baseline = session.years()[12].gross_income;

        session.add_life_event(LifeEvent::new("job", 30, LifeEventKind::JobChange).with_salary(9_000_000.0));
        assert_eq!(session.years()[12].gross_income, 9_000_000.0);

        assert!(session.update_life_event(
            "job",
            LifeEventUpdate {
                salary_change: Some(8_000_000.0),
                ..Default::default()
            }
        ));
        assert_eq!(session.years()[12].gross_income, 8_000_000.0);

        assert!(session.delete_life_event("job"));
        assert_eq!(session.years()[12].gross_income, baseline);
        assert!(!session.delete_life_event("job"));
        assert!(!session.update_life_event("job", LifeEventUpdate::default()));
    }

    #[test]
    fn test_update_year_data_merges() {
        let mut session = Session::default();
        session.update_year_data(
            20,
            YearDataOverride {
                salary: Some(Some(1_000_000.0)),
                entertainment_cost: Some(Some(100_000.0)),
                ..Default::default()
            },
        );
        session.update_year_data(
            20,
            YearDataOverride {
                salary: Some(None),
                ..Default::default()
            },
        );

        let year = &session.years()[2];
        assert_eq!(year.age, 20);
        assert_eq!(year.entertainment_cost, 100_000.0);
        assert_ne!(year.gross_income, 1_000_000.0);
    }

    #[test]
    fn test_export_import_round_trip() {
        let mut session = Session::default();
        session.update_config(|c| c.set_strategy(InvestmentStrategy::Custom { ratio: 0.5 }));
        session.set_house_purchase(Some(HousePurchase::default()));

        let json = session.export_data().unwrap();
        let mut restored = Session::default();
        restored.import_data(&json).unwrap();

        assert_eq!(restored.config(), session.config());
        assert_eq!(restored.years(), session.years());
        assert!(restored.inputs().exported_at.is_some());
    }

    #[test]
    fn test_strategy_switch_keeps_parameters() {
        let mut session = Session::default();
        session.update_config(|c| c.set_strategy(InvestmentStrategy::Custom { ratio: 0.4 }));
        session.update_config(|c| c.set_strategy(InvestmentStrategy::All));

        let json = session.export_data().unwrap();
        let mut restored = Session::default();
        restored.import_data(&json).unwrap();
        restored.update_config(|c| c.investment_strategy = StrategyKind::Custom);

        assert_eq!(restored.config().strategy(), InvestmentStrategy::Custom { ratio: 0.4 });
    }

    #[test]
    fn test_bad_import_keeps_plan() {
        let mut session = Session::default();
        session.update_config(|c| c.end_age = 50);

        assert!(session.import_data("not json").is_err());
        assert_eq!(session.config().end_age, 50);
    }

    #[test]
    fn test_onboarding_and_reset() {
        let mut session = Session::default();
        session.initialize_from_onboarding(&OnboardingProfile {
            current_age: 35,
            annual_salary: 6_000_000.0,
            current_assets: 10_000_000.0,
        });
        assert_eq!(session.years().len(), 31);
        assert_eq!(session.years()[0].age, 35);

        session.reset_to_defaults();
        assert_eq!(session.inputs(), &Snapshot::default());
    }
}
