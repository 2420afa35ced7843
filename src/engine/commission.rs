//! Per-chatter earnings: commission, base line, salary, total retribution.

use crate::domain::{Money, Sale, SaleType, User};

/// Computed earnings for one user over one period.
#[derive(Debug, Clone, PartialEq)]
pub struct UserEarnings {
    /// Sum of all sale amounts owned by the user in the period.
    pub total_sales: Money,
    /// Percentage commission over total sales, zero when no rate is set.
    pub commission: Money,
    /// Sum of BASE-type sales, a separate compensation line.
    pub base_earnings: Money,
    /// The user's fixed monthly salary, zero when none is set.
    pub fixed_salary: Money,
    /// commission + base earnings + fixed salary.
    pub total_retribution: Money,
}

/// Compute a user's earnings from their sales in a period.
///
/// All three compensation lines are additive; a user configured with both a
/// commission rate and a fixed salary earns both, matching the admin
/// dashboard's Total Retribution column. No rounding happens here.
pub fn compute_user_earnings(user: &User, sales_in_period: &[Sale]) -> UserEarnings {
    let mut total_sales = Money::zero();
    let mut base_earnings = Money::zero();

    for sale in sales_in_period {
        total_sales = total_sales + sale.amount;
        if sale.sale_type == SaleType::Base {
            base_earnings = base_earnings + sale.amount;
        }
    }

    let commission = match user.commission_percent {
        Some(rate) => total_sales * rate / Money::hundred(),
        None => Money::zero(),
    };

    let fixed_salary = user.fixed_salary.unwrap_or_else(Money::zero);

    UserEarnings {
        total_sales,
        commission,
        base_earnings,
        fixed_salary,
        total_retribution: commission + base_earnings + fixed_salary,
    }
}

/// Even per-day share of a monthly salary, for daily dashboard rows.
///
/// Display convenience only: the period total is always the salary itself,
/// never the re-summed daily shares.
pub fn daily_salary_share(fixed_salary: Money, days_in_period: u32) -> Money {
    if days_in_period == 0 {
        return Money::zero();
    }
    fixed_salary / Money::from_u32(days_in_period)
}
