//! Creator-level roll-up: earnings, net revenue, agency profit.

use crate::domain::{CompensationType, Creator, Money, MonthlyFinancial, Sale};
use crate::engine::EngineError;

/// Computed financials for one creator over one period.
#[derive(Debug, Clone, PartialEq)]
pub struct CreatorFinancials {
    /// Ground-truth sum of sale amounts attributed to the creator.
    pub total_sales_amount: Money,
    /// What the creator is owed for the period.
    pub creator_earnings: Money,
    /// total sales minus creator earnings. Costs are NOT subtracted here;
    /// may be negative for salaried creators with thin sales.
    pub net_revenue: Money,
    /// net revenue minus every cost line of the month.
    pub agency_profit: Money,
}

/// Compute a creator's financials from their sales and the month's cost
/// record.
///
/// The manually entered `gross_revenue` on the financial record is advisory
/// and plays no part here. A salaried creator is owed their salary whether
/// or not anything sold, so `net_revenue` can go negative; it is never
/// clamped.
///
/// # Errors
/// `EngineError::InvalidCompensation` when the field required by the
/// creator's declared compensation type is missing.
pub fn compute_creator_financials(
    creator: &Creator,
    sales_in_period: &[Sale],
    monthly_financial: &MonthlyFinancial,
) -> Result<CreatorFinancials, EngineError> {
    let total_sales_amount: Money = sales_in_period.iter().map(|s| s.amount).sum();

    let creator_earnings = match creator.compensation_type {
        CompensationType::Percentage => {
            let share = creator.revenue_share_percent.ok_or_else(|| {
                EngineError::InvalidCompensation(format!(
                    "creator {} is PERCENTAGE but has no revenue share percent",
                    creator.name
                ))
            })?;
            total_sales_amount * share / Money::hundred()
        }
        CompensationType::Salary => creator.fixed_salary_cost.ok_or_else(|| {
            EngineError::InvalidCompensation(format!(
                "creator {} is SALARY but has no fixed salary cost",
                creator.name
            ))
        })?,
    };

    let net_revenue = total_sales_amount - creator_earnings;
    let agency_profit = net_revenue - monthly_financial.total_costs();

    Ok(CreatorFinancials {
        total_sales_amount,
        creator_earnings,
        net_revenue,
        agency_profit,
    })
}
