//! Monthly financial record: admin-entered costs and reference revenue per
//! (creator, year, month).

use crate::domain::{CreatorId, Money};
use serde::{Deserialize, Serialize};

/// A named ad hoc cost line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomCost {
    pub label: String,
    pub amount: Money,
}

/// One row per (creator, year, month); upserted by admins, last writer wins.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyFinancial {
    pub creator_id: CreatorId,
    pub year: i32,
    pub month: u32,
    /// Manually entered reference figure; sales rows remain ground truth.
    pub gross_revenue: Money,
    pub marketing_costs: Money,
    pub tool_costs: Money,
    pub other_costs: Money,
    pub custom_costs: Vec<CustomCost>,
}

impl MonthlyFinancial {
    /// Sum of all cost lines, fixed and custom.
    pub fn total_costs(&self) -> Money {
        self.marketing_costs
            + self.tool_costs
            + self.other_costs
            + self.custom_costs.iter().map(|c| c.amount).sum()
    }

    /// An all-zero record for months with no admin entry.
    pub fn empty(creator_id: CreatorId, year: i32, month: u32) -> Self {
        MonthlyFinancial {
            creator_id,
            year,
            month,
            gross_revenue: Money::zero(),
            marketing_costs: Money::zero(),
            tool_costs: Money::zero(),
            other_costs: Money::zero(),
            custom_costs: Vec::new(),
        }
    }
}
