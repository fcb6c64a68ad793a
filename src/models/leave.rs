//! Leave types, time units and balances.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The kind of leave requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveType {
    /// Annual paid leave (有休).
    PaidLeave,
    /// Summer leave (夏季).
    Summer,
    /// Winter leave (冬季).
    Winter,
    /// Special leave (特別).
    Special,
}

impl LeaveType {
    /// The label shown on screens and in messages.
    ///
    /// ```
    /// use kintai_core::models::LeaveType;
    ///
    /// assert_eq!(LeaveType::PaidLeave.label(), "有休");
    /// ```
    pub fn label(&self) -> &'static str {
        match self {
            LeaveType::PaidLeave => "有休",
            LeaveType::Summer => "夏季",
            LeaveType::Winter => "冬季",
            LeaveType::Special => "特別",
        }
    }

    /// Whether the leave can only be taken inside an active grant period.
    pub fn requires_grant(&self) -> bool {
        !matches!(self, LeaveType::PaidLeave)
    }
}

/// How much of a day a leave request covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LeaveTimeUnit {
    /// The whole day.
    #[default]
    FullDay,
    /// Morning half.
    HalfAm,
    /// Afternoon half.
    HalfPm,
}

impl LeaveTimeUnit {
    /// Case-insensitive parse of the upstream marker; unknown markers yield `None`.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "FULL_DAY" => Some(LeaveTimeUnit::FullDay),
            "HALF_AM" => Some(LeaveTimeUnit::HalfAm),
            "HALF_PM" => Some(LeaveTimeUnit::HalfPm),
            _ => None,
        }
    }

    /// True for `HALF_AM` and `HALF_PM`.
    pub fn is_half_day(&self) -> bool {
        matches!(self, LeaveTimeUnit::HalfAm | LeaveTimeUnit::HalfPm)
    }

    /// Short label appended to the leave type on screens.
    pub fn label(&self) -> &'static str {
        match self {
            LeaveTimeUnit::FullDay => "",
            LeaveTimeUnit::HalfAm => "AM",
            LeaveTimeUnit::HalfPm => "PM",
        }
    }
}

/// A period during which a leave type may be taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveGrant {
    /// First day of the grant. `None` means the grant is already in force.
    #[serde(default)]
    pub granted_at: Option<NaiveDate>,
    /// Last day of the grant. `None` means it does not expire.
    #[serde(default)]
    pub expires_at: Option<NaiveDate>,
}

impl LeaveGrant {
    /// Whether `date` falls inside the grant period.
    pub fn covers(&self, date: NaiveDate) -> bool {
        let starts_ok = self.granted_at.is_none_or(|start| start <= date);
        let ends_ok = self.expires_at.is_none_or(|end| date <= end);
        starts_ok && ends_ok
    }
}

/// Remaining balance and grants for one leave type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveEntitlement {
    /// Days still available.
    pub remaining_days: Decimal,
    /// Active grants for the leave type.
    #[serde(default)]
    pub grants: Vec<LeaveGrant>,
}
