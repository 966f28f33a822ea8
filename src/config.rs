//! Simulation settings.
//!
//! The year bounds match the dotadle roster (Dota 2 heroes released from 2004
//! up to and including 2024). Retarget them for other datasets instead of
//! editing the feedback model.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

pub const DEFAULT_EARLIEST_YEAR: i32 = 2004;
pub const DEFAULT_LATEST_YEAR_EXCLUSIVE: i32 = 2025;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct YearBounds {
    /// First year a hidden answer can have been released in.
    #[serde(default = "default_earliest")]
    pub earliest: i32,
    /// One past the last possible release year.
    #[serde(default = "default_latest_exclusive")]
    pub latest_exclusive: i32,
}

fn default_earliest() -> i32 {
    DEFAULT_EARLIEST_YEAR
}

fn default_latest_exclusive() -> i32 {
    DEFAULT_LATEST_YEAR_EXCLUSIVE
}

impl YearBounds {
    pub fn new(earliest: i32, latest_exclusive: i32) -> Result<Self> {
        let bounds = Self {
            earliest,
            latest_exclusive,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    pub fn validate(&self) -> Result<()> {
        if self.earliest >= self.latest_exclusive {
            return Err(Error::Config(format!(
                "year bounds {}..{} are empty",
                self.earliest, self.latest_exclusive
            )));
        }
        Ok(())
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.earliest..self.latest_exclusive).contains(&year)
    }

    pub fn latest(&self) -> i32 {
        self.latest_exclusive - 1
    }
}

impl Default for YearBounds {
    fn default() -> Self {
        Self {
            earliest: DEFAULT_EARLIEST_YEAR,
            latest_exclusive: DEFAULT_LATEST_YEAR_EXCLUSIVE,
        }
    }
}

/// How a DISJOINT set clue constrains candidates.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisjointRule {
    /// A disjoint set clue rules nothing out. This is how dotadle has always
    /// been scored here.
    #[default]
    PassThrough,
    /// Candidates must share no tag with the guess either.
    RequireDisjoint,
}

#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    #[serde(default)]
    pub years: YearBounds,
    #[serde(default)]
    pub disjoint: DisjointRule,
}

impl SimulationConfig {
    /// Parses and validates a JSON config. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;

        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), ?config, "config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.years.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_cover_dotadle_years() {
        let bounds = YearBounds::default();
        assert!(bounds.contains(2004));
        assert!(bounds.contains(2024));
        assert!(!bounds.contains(2003));
        assert!(!bounds.contains(2025));
        assert_eq!(bounds.latest(), 2024);
    }

    #[test]
    fn rejects_empty_bounds() {
        assert!(YearBounds::new(2010, 2010).is_err());
        assert!(YearBounds::new(2011, 2010).is_err());
        assert!(YearBounds::new(2010, 2011).is_ok());
    }

    #[test]
    fn parses_partial_config() {
        let config =
            SimulationConfig::from_json_str(r#"{"years": {"latest_exclusive": 2030}}"#).unwrap();
        assert_eq!(config.years, YearBounds::new(2004, 2030).unwrap());
        assert_eq!(config.disjoint, DisjointRule::PassThrough);

        let config =
            SimulationConfig::from_json_str(r#"{"disjoint": "require_disjoint"}"#).unwrap();
        assert_eq!(config.years, YearBounds::default());
        assert_eq!(config.disjoint, DisjointRule::RequireDisjoint);

        assert_eq!(SimulationConfig::from_json_str("{}").unwrap(), SimulationConfig::default());
    }

    #[test]
    fn rejects_bad_config() {
        assert!(matches!(
            SimulationConfig::from_json_str(r#"{"years": {"earliest": 2030}}"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            SimulationConfig::from_json_str(r#"{"disjoint": "sometimes"}"#),
            Err(Error::ConfigJson(_))
        ));
        assert!(matches!(
            SimulationConfig::load("does/not/exist.json"),
            Err(Error::ConfigIo { .. })
        ));
    }

    #[test]
    fn loads_config_file() {
        let path = std::env::temp_dir().join(format!("dotadle-config-{}.json", std::process::id()));
        fs::write(&path, r#"{"years": {"earliest": 2000, "latest_exclusive": 2010}}"#).unwrap();

        let config = SimulationConfig::load(&path);
        fs::remove_file(&path).unwrap();

        assert_eq!(config.unwrap().years, YearBounds::new(2000, 2010).unwrap());
    }
}
