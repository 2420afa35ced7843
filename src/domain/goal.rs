//! Goal type: a target figure tracked against aggregated performance.

use crate::domain::{CreatorId, Money, UserId};
use serde::{Deserialize, Serialize};

/// Metric a goal is measured against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoalType {
    Sales,
    Commission,
    Revenue,
}

impl GoalType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "SALES" => Some(GoalType::Sales),
            "COMMISSION" => Some(GoalType::Commission),
            "REVENUE" => Some(GoalType::Revenue),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GoalType::Sales => "SALES",
            GoalType::Commission => "COMMISSION",
            GoalType::Revenue => "REVENUE",
        }
    }

    /// Human wording used in bonus-unlock descriptions.
    pub fn metric_label(&self) -> &'static str {
        match self {
            GoalType::Sales => "sales",
            GoalType::Commission => "commission",
            GoalType::Revenue => "revenue",
        }
    }
}

/// Who a goal applies to: the whole agency, one chatter, or one creator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GoalScope {
    Global,
    User(UserId),
    Creator(CreatorId),
}

/// A goal definition.
///
/// `month = 0` means the goal covers the whole year; 1-12 pins it to a
/// specific month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub scope: GoalScope,
    pub goal_type: GoalType,
    /// Positive target amount (validated at creation).
    pub target: Money,
    pub year: i32,
    pub month: u32,
    /// Prize unlocked on achievement. Informational only: paying it out is
    /// a manual Payment entry, never automatic.
    pub bonus_amount: Option<Money>,
}

impl Goal {
    pub fn is_yearly(&self) -> bool {
        self.month == 0
    }
}
