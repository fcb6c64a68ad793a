//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading attendance
//! rules from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};

use super::types::{BreakRules, LaborRules, StandardSchedule, SubmissionLimits};

/// Loads and provides access to the attendance rules.
///
/// # Directory Structure
///
/// ```text
/// config/kintai/
/// ├── breaks.yaml    # Statutory break tiers
/// ├── limits.yaml    # Span and request-period limits
/// └── schedule.yaml  # Standard working day and night window
/// ```
///
/// # Example
///
/// ```no_run
/// use kintai_core::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/kintai").unwrap();
/// println!("Break clause: {}", loader.rules().breaks.clause);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    rules: LaborRules,
}

impl ConfigLoader {
    /// Loads the rules from the specified directory.
    ///
    /// Returns an error if any of the three files is missing, contains
    /// invalid YAML, or declares break tiers out of ascending order.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();

        let breaks = Self::load_yaml::<BreakRules>(&path.join("breaks.yaml"))?;
        let limits = Self::load_yaml::<SubmissionLimits>(&path.join("limits.yaml"))?;
        let schedule = Self::load_yaml::<StandardSchedule>(&path.join("schedule.yaml"))?;

        Self::validate_tiers(&breaks)?;

        debug!(
            path = %path.display(),
            tiers = breaks.tiers.len(),
            max_span_hours = limits.max_span_hours,
            "Loaded attendance rules"
        );

        Ok(Self {
            rules: LaborRules {
                breaks,
                limits,
                schedule,
            },
        })
    }

    /// Wraps an already-built rule set.
    pub fn from_rules(rules: LaborRules) -> EngineResult<Self> {
        Self::validate_tiers(&rules.breaks)?;
        Ok(Self { rules })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    fn validate_tiers(breaks: &BreakRules) -> EngineResult<()> {
        let ascending = breaks
            .tiers
            .windows(2)
            .all(|pair| pair[0].threshold_minutes < pair[1].threshold_minutes);
        if !ascending {
            return Err(EngineError::InvalidConfig {
                message: "break tiers must be in strictly ascending threshold order".to_string(),
            });
        }
        Ok(())
    }

    /// Returns the loaded rules.
    pub fn rules(&self) -> &LaborRules {
        &self.rules
    }
}
