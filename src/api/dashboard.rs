use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::financials::CustomCostDto;
use crate::api::AppState;
use crate::db::repo::SaleFilter;
use crate::domain::{Money, MonthlyFinancial, Role, Sale};
use crate::engine;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardQuery {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorFinancialsDto {
    pub creator_id: String,
    pub name: String,
    /// Manually entered reference figure; advisory only.
    pub gross_revenue: String,
    pub total_sales_amount: String,
    pub creator_earnings: String,
    pub marketing_costs: String,
    pub tool_costs: String,
    pub other_costs: String,
    pub custom_costs: Vec<CustomCostDto>,
    pub net_revenue: String,
    pub agency_profit: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatterRevenueDto {
    pub user_id: String,
    pub name: String,
    pub revenue: String,
    pub commission: String,
    pub fixed_salary: String,
    /// Even per-day share of the salary over this month, for daily views.
    pub daily_salary_share: String,
    pub total_base: String,
    pub total_retribution: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardResponse {
    pub total_sales: String,
    pub total_commissions: String,
    pub creator_financials: Vec<CreatorFinancialsDto>,
    pub chatter_revenue: Vec<ChatterRevenueDto>,
}

pub async fn get_dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<DashboardQuery>,
) -> Result<Json<DashboardResponse>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    actor.require_team_view()?;

    let period = super::parse_period(params.month, params.year)?;
    let sales = state
        .repo
        .query_sales(&SaleFilter {
            user_id: None,
            creator_id: None,
            from_ms: Some(period.start_ms()),
            to_ms: Some(period.end_ms()),
        })
        .await?;

    let total_sales: Money = sales.iter().map(|s| s.amount).sum();

    let mut creator_financials = Vec::new();
    for creator in state.repo.list_creators().await? {
        let creator_sales: Vec<Sale> = sales
            .iter()
            .filter(|s| s.creator_id == creator.id)
            .cloned()
            .collect();
        let financial = state
            .repo
            .get_monthly_financial(&creator.id, period.year, period.month)
            .await?
            .unwrap_or_else(|| {
                MonthlyFinancial::empty(creator.id.clone(), period.year, period.month)
            });

        let computed = engine::compute_creator_financials(&creator, &creator_sales, &financial)?;

        creator_financials.push(CreatorFinancialsDto {
            creator_id: creator.id.to_string(),
            name: creator.name.clone(),
            gross_revenue: financial.gross_revenue.to_display_string(),
            total_sales_amount: computed.total_sales_amount.to_display_string(),
            creator_earnings: computed.creator_earnings.to_display_string(),
            marketing_costs: financial.marketing_costs.to_display_string(),
            tool_costs: financial.tool_costs.to_display_string(),
            other_costs: financial.other_costs.to_display_string(),
            custom_costs: financial
                .custom_costs
                .iter()
                .map(|c| CustomCostDto {
                    label: c.label.clone(),
                    amount: c.amount.to_display_string(),
                })
                .collect(),
            net_revenue: computed.net_revenue.to_display_string(),
            agency_profit: computed.agency_profit.to_display_string(),
        });
    }

    let mut total_commissions = Money::zero();
    let mut chatter_revenue = Vec::new();
    for user in state.repo.list_users().await? {
        if user.role != Role::Chatter {
            continue;
        }
        let user_sales: Vec<Sale> = sales
            .iter()
            .filter(|s| s.user_id == user.id)
            .cloned()
            .collect();
        let earnings = engine::compute_user_earnings(&user, &user_sales);
        total_commissions = total_commissions + earnings.commission;

        let daily_share = engine::daily_salary_share(earnings.fixed_salary, period.days_in_month());
        chatter_revenue.push(ChatterRevenueDto {
            user_id: user.id.to_string(),
            name: user.name.clone(),
            revenue: earnings.total_sales.to_display_string(),
            commission: earnings.commission.to_display_string(),
            fixed_salary: earnings.fixed_salary.to_display_string(),
            daily_salary_share: daily_share.to_display_string(),
            total_base: earnings.base_earnings.to_display_string(),
            total_retribution: earnings.total_retribution.to_display_string(),
        });
    }

    Ok(Json(DashboardResponse {
        total_sales: total_sales.to_display_string(),
        total_commissions: total_commissions.to_display_string(),
        creator_financials,
        chatter_revenue,
    }))
}
