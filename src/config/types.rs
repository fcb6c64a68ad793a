//! Configuration types for the attendance rules.
//!
//! This module contains the strongly-typed structures deserialized from the
//! YAML files in a rules directory. Every struct has a `Default` carrying the
//! statutory values, so the files are optional for callers that only need the
//! standard rules.

use chrono::NaiveTime;
use serde::{Deserialize, Serialize};

/// A single break tier: from `threshold_minutes` of work, at least
/// `break_minutes` of break are required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakTier {
    /// Total minutes from which this tier applies (inclusive).
    pub threshold_minutes: u32,
    /// Minimum break minutes for this tier.
    pub break_minutes: u32,
}

impl BreakTier {
    /// The threshold expressed in whole hours, as shown to users.
    pub fn threshold_hours(&self) -> u32 {
        self.threshold_minutes / 60
    }
}

/// Statutory break rules (`breaks.yaml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakRules {
    /// Reference to the statute defining the tiers.
    pub clause: String,
    /// Tiers in ascending threshold order.
    pub tiers: Vec<BreakTier>,
}

impl Default for BreakRules {
    fn default() -> Self {
        Self {
            clause: "労働基準法第34条".to_string(),
            tiers: vec![
                BreakTier {
                    threshold_minutes: 360,
                    break_minutes: 45,
                },
                BreakTier {
                    threshold_minutes: 480,
                    break_minutes: 60,
                },
            ],
        }
    }
}

impl BreakRules {
    /// Returns the highest tier whose threshold has been reached, if any.
    pub fn tier_for(&self, total_work_minutes: i64) -> Option<&BreakTier> {
        self.tiers
            .iter()
            .rev()
            .find(|tier| total_work_minutes >= i64::from(tier.threshold_minutes))
    }
}

/// Submission limits (`limits.yaml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionLimits {
    /// Longest clock-in to clock-out span accepted, in hours.
    pub max_span_hours: u32,
    /// Longest date range a single request may cover, in days.
    pub max_request_days: u32,
}

impl Default for SubmissionLimits {
    fn default() -> Self {
        Self {
            max_span_hours: 36,
            max_request_days: 366,
        }
    }
}

impl SubmissionLimits {
    /// The span limit in minutes.
    pub fn max_span_minutes(&self) -> i64 {
        i64::from(self.max_span_hours) * 60
    }
}

/// The standard working day (`schedule.yaml`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandardSchedule {
    /// Scheduled start; clocking in later counts as late.
    pub start_time: NaiveTime,
    /// Scheduled end; clocking out earlier counts as leaving early.
    pub end_time: NaiveTime,
    /// Net working minutes of a standard day; anything above is overtime.
    pub standard_working_minutes: u32,
    /// Start of the nightly late-night window.
    pub night_start: NaiveTime,
    /// End of the late-night window on the following morning.
    pub night_end: NaiveTime,
}

impl Default for StandardSchedule {
    fn default() -> Self {
        Self {
            start_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or_default(),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default(),
            standard_working_minutes: 480,
            night_start: NaiveTime::from_hms_opt(22, 0, 0).unwrap_or_default(),
            night_end: NaiveTime::from_hms_opt(5, 0, 0).unwrap_or_default(),
        }
    }
}

/// The complete rule set used by calculations and submission checks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaborRules {
    /// Statutory break tiers.
    pub breaks: BreakRules,
    /// Submission limits.
    pub limits: SubmissionLimits,
    /// Standard working day.
    pub schedule: StandardSchedule,
}
