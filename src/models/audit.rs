//! Audit records for rule decisions.
//!
//! Calculations that apply a labor rule record an [`AuditStep`] so a preview
//! can show why a break or working time came out the way it did.

use serde::{Deserialize, Serialize};

/// A single step recording a rule decision.
///
/// # Example
///
/// ```
/// use kintai_core::models::AuditStep;
///
/// let step = AuditStep {
///     step_number: 1,
///     rule_id: "statutory_break".to_string(),
///     rule_name: "Statutory Break".to_string(),
///     clause_ref: "労働基準法第34条".to_string(),
///     input: serde_json::json!({"total_minutes": 540}),
///     output: serde_json::json!({"required_break_minutes": 60}),
///     reasoning: "540 minutes reaches the 480 minute tier".to_string(),
/// };
/// assert_eq!(step.rule_id, "statutory_break");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditStep {
    /// The sequential step number.
    pub step_number: u32,
    /// The unique identifier of the rule that was applied.
    pub rule_id: String,
    /// The human-readable name of the rule.
    pub rule_name: String,
    /// Reference to the statute or policy for this rule.
    pub clause_ref: String,
    /// The input data for this step.
    pub input: serde_json::Value,
    /// The output data from this step.
    pub output: serde_json::Value,
    /// Human-readable explanation of the decision.
    pub reasoning: String,
}
