//! Statutory break calculation.
//!
//! Under article 34 of the Labour Standards Act an employer must give at
//! least 45 minutes of break when working time exceeds six hours and at least
//! 60 minutes when it exceeds eight. The engine applies the tiers to the total
//! clocked minutes, and reaching a threshold enters the higher tier: 360
//! minutes requires 45, 480 minutes requires 60.

use serde::{Deserialize, Serialize};

use crate::config::{BreakRules, BreakTier};
use crate::models::AuditStep;

/// The rule identifier recorded in audit steps.
pub const STATUTORY_BREAK_RULE_ID: &str = "statutory_break";

/// The result of determining the statutory break for a working span.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequiredBreakDetection {
    /// Minimum break minutes.
    pub required_minutes: u32,
    /// The tier that applied, if any.
    pub tier: Option<BreakTier>,
    /// The audit step recording this detection.
    pub audit_step: AuditStep,
}

/// Returns the statutory minimum break for `total_work_minutes`.
///
/// # Example
///
/// ```
/// use kintai_core::calculation::calculate_required_break_minutes;
///
/// assert_eq!(calculate_required_break_minutes(359), 0);
/// assert_eq!(calculate_required_break_minutes(360), 45);
/// assert_eq!(calculate_required_break_minutes(479), 45);
/// assert_eq!(calculate_required_break_minutes(480), 60);
/// ```
pub fn calculate_required_break_minutes(total_work_minutes: i64) -> u32 {
    if total_work_minutes < 360 {
        0
    } else if total_work_minutes < 480 {
        45
    } else {
        60
    }
}

/// Returns the minimum break for `total_work_minutes` under configured tiers.
pub fn required_break_minutes(total_work_minutes: i64, rules: &BreakRules) -> u32 {
    rules
        .tier_for(total_work_minutes)
        .map(|tier| tier.break_minutes)
        .unwrap_or(0)
}

/// Determines the statutory break and records the decision.
///
/// # Arguments
///
/// * `total_work_minutes` - Clocked minutes before any break is deducted
/// * `rules` - Break tiers to apply
/// * `step_number` - The step number for audit trail sequencing
///
/// # Example
///
/// ```
/// use kintai_core::calculation::determine_required_break;
/// use kintai_core::config::BreakRules;
///
/// let detection = determine_required_break(541, &BreakRules::default(), 1);
/// assert_eq!(detection.required_minutes, 60);
/// assert_eq!(detection.audit_step.clause_ref, "労働基準法第34条");
/// ```
pub fn determine_required_break(
    total_work_minutes: i64,
    rules: &BreakRules,
    step_number: u32,
) -> RequiredBreakDetection {
    let tier = rules.tier_for(total_work_minutes).copied();
    let required_minutes = tier.map(|t| t.break_minutes).unwrap_or(0);

    let reasoning = match tier {
        Some(t) => format!(
            "{} minutes reaches the {} minute tier, at least {} minutes of break required",
            total_work_minutes, t.threshold_minutes, t.break_minutes
        ),
        None => format!(
            "{} minutes is below every break tier, no break required",
            total_work_minutes
        ),
    };

    RequiredBreakDetection {
        required_minutes,
        tier,
        audit_step: AuditStep {
            step_number,
            rule_id: STATUTORY_BREAK_RULE_ID.to_string(),
            rule_name: "Statutory Break".to_string(),
            clause_ref: rules.clause.clone(),
            input: serde_json::json!({
                "total_work_minutes": total_work_minutes,
            }),
            output: serde_json::json!({
                "required_break_minutes": required_minutes,
                "threshold_minutes": tier.map(|t| t.threshold_minutes),
            }),
            reasoning,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Boundary values around both statutory tiers.
    #[test]
    fn test_statutory_boundaries() {
        let cases = [
            (0, 0),
            (359, 0),
            (360, 45),
            (361, 45),
            (479, 45),
            (480, 60),
            (481, 60),
            (2160, 60),
        ];
        for (total, expected) in cases {
            assert_eq!(
                calculate_required_break_minutes(total),
                expected,
                "total {}",
                total
            );
        }
    }

    #[test]
    fn test_negative_total_requires_no_break() {
        assert_eq!(calculate_required_break_minutes(-10), 0);
        assert_eq!(required_break_minutes(-10, &BreakRules::default()), 0);
    }

    #[test]
    fn test_configured_tiers() {
        let rules = BreakRules {
            clause: "社内規程".to_string(),
            tiers: vec![
                BreakTier {
                    threshold_minutes: 240,
                    break_minutes: 15,
                },
                BreakTier {
                    threshold_minutes: 600,
                    break_minutes: 90,
                },
            ],
        };
        assert_eq!(required_break_minutes(239, &rules), 0);
        assert_eq!(required_break_minutes(240, &rules), 15);
        assert_eq!(required_break_minutes(600, &rules), 90);
    }

    #[test]
    fn test_audit_step_below_tiers() {
        let detection = determine_required_break(300, &BreakRules::default(), 3);
        assert_eq!(detection.required_minutes, 0);
        assert_eq!(detection.tier, None);
        assert_eq!(detection.audit_step.step_number, 3);
        assert_eq!(detection.audit_step.rule_id, STATUTORY_BREAK_RULE_ID);
        assert!(detection.audit_step.reasoning.contains("below every break tier"));
    }

    #[test]
    fn test_audit_step_records_tier() {
        let detection = determine_required_break(360, &BreakRules::default(), 1);
        assert_eq!(detection.required_minutes, 45);
        assert_eq!(
            detection.audit_step.output["threshold_minutes"],
            serde_json::json!(360)
        );
    }

    proptest! {
        #[test]
        fn prop_default_rules_match_statutory_function(total in -1000_i64..5000) {
            prop_assert_eq!(
                required_break_minutes(total, &BreakRules::default()),
                calculate_required_break_minutes(total)
            );
        }
    }
}
