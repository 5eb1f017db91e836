//! JSON snapshot of a plan's inputs
//!
//! The persisted document holds the four engine inputs. Year results are
//! never stored; they are regenerated from the inputs after import.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use log::warn;
use serde::{Deserialize, Serialize};

use super::{HousePurchase, LifeEvent, SimulationConfig, YearOverrides};
use crate::error::SnapshotError;

/// Default snapshot location used by the CLI
pub const DEFAULT_SNAPSHOT_PATH: &str = "asset_simulation.json";

/// Serialized plan inputs
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Snapshot {
    pub config: SimulationConfig,
    pub house_purchase: Option<HousePurchase>,
    pub life_events: Vec<LifeEvent>,
    pub year_data_overrides: YearOverrides,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
}

impl Snapshot {
    /// Parse a snapshot, reporting malformed input
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a snapshot, falling back to the built-in defaults on malformed input
    pub fn from_json_or_default(json: &str) -> Self {
        Self::from_json(json).unwrap_or_else(|e| {
            warn!("{e}; using default plan");
            Self::default()
        })
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load a snapshot from a file
pub fn load_snapshot<P: AsRef<Path>>(path: P) -> Result<Snapshot, SnapshotError> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| SnapshotError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Snapshot::from_json(&json)
}

/// Write a snapshot to a file as pretty-printed JSON
pub fn save_snapshot<P: AsRef<Path>>(snapshot: &Snapshot, path: P) -> Result<(), SnapshotError> {
    let path = path.as_ref();
    fs::write(path, snapshot.to_json()?).map_err(|source| SnapshotError::Write {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inputs::{InvestmentStrategy, LifeEventKind, YearDataOverride};

    fn sample_snapshot() -> Snapshot {
        let mut snapshot = Snapshot {
            config: SimulationConfig::default().with_strategy(InvestmentStrategy::All),
            house_purchase: Some(HousePurchase::default()),
            life_events: vec![LifeEvent::new("m", 31, LifeEventKind::Marriage).with_one_time_cost(2_000_000.0)],
            ..Default::default()
        };
        snapshot.year_data_overrides.insert(
            40,
            YearDataOverride {
                salary: Some(Some(8_000_000.0)),
                living_cost: Some(None),
                ..Default::default()
            },
        );
        snapshot
    }

    #[test]
    fn test_round_trip() {
        let snapshot = sample_snapshot();
        let json = snapshot.to_json().unwrap();
        let back = Snapshot::from_json(&json).unwrap();
        assert_eq!(back, snapshot);
    }

    #[test]
    fn test_document_shape() {
        let value: serde_json::Value = serde_json::from_str(&sample_snapshot().to_json().unwrap()).unwrap();

        assert!(value.get("config").is_some());
        assert!(value.get("housePurchase").is_some());
        assert_eq!(value["lifeEvents"][0]["type"], "marriage");
        assert_eq!(value["yearDataOverrides"]["40"]["salary"], 8_000_000.0);
        assert!(value["yearDataOverrides"]["40"]["livingCost"].is_null());
        assert!(value.get("exportedAt").is_none());
    }

    #[test]
    fn test_missing_fields_default() {
        let snapshot = Snapshot::from_json(r#"{"housePurchase": null}"#).unwrap();
        assert_eq!(snapshot, Snapshot::default());
    }

    #[test]
    fn test_malformed_json_is_reported() {
        let err = Snapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Parse(_)));
        assert!(err.to_string().starts_with("could not parse imported data"));
    }

    #[test]
    fn test_malformed_json_falls_back() {
        assert_eq!(Snapshot::from_json_or_default("[1, 2"), Snapshot::default());
    }

    #[test]
    fn test_file_round_trip() {
        let path = std::env::temp_dir().join(format!("asset_simulation_{}.json", std::process::id()));
        let snapshot = sample_snapshot();

        save_snapshot(&snapshot, &path).unwrap();
        let loaded = load_snapshot(&path).unwrap();
        let _ = fs::remove_file(&path);

        assert_eq!(loaded, snapshot);
    }

    #[test]
    fn test_missing_file() {
        let err = load_snapshot("/nonexistent/plan.json").unwrap_err();
        assert!(matches!(err, SnapshotError::Read { .. }));
    }
}
