//! Creator (talent) type and compensation model.

use crate::domain::{CreatorId, Money};
use serde::{Deserialize, Serialize};

/// How a creator is compensated by the agency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompensationType {
    /// Revenue share: a percentage of gross sales.
    Percentage,
    /// Flat monthly salary, independent of sales volume.
    Salary,
}

impl CompensationType {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "PERCENTAGE" => Some(CompensationType::Percentage),
            "SALARY" => Some(CompensationType::Salary),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CompensationType::Percentage => "PERCENTAGE",
            CompensationType::Salary => "SALARY",
        }
    }
}

/// A creator whose content the agency sells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creator {
    pub id: CreatorId,
    /// Unique display name.
    pub name: String,
    pub compensation_type: CompensationType,
    /// Share of gross sales in percent (0-100); required for PERCENTAGE.
    pub revenue_share_percent: Option<Money>,
    /// Flat monthly cost; required for SALARY.
    pub fixed_salary_cost: Option<Money>,
    /// Platform cut in percent, deducted upstream of agency figures.
    pub onlyfans_commission_percent: Money,
}

impl Creator {
    /// Default platform commission when none is supplied.
    pub fn default_platform_percent() -> Money {
        Money::from_u32(20)
    }
}
