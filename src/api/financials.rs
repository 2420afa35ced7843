use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::users::parse_money_field;
use crate::api::AppState;
use crate::domain::{CreatorId, CustomCost, Money, MonthlyFinancial};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCostInput {
    pub label: String,
    pub amount: f64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertFinancialsRequest {
    pub year: i32,
    pub month: u32,
    pub gross_revenue: Option<f64>,
    pub marketing_costs: Option<f64>,
    pub tool_costs: Option<f64>,
    pub other_costs: Option<f64>,
    #[serde(default)]
    pub custom_costs: Vec<CustomCostInput>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialsQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCostDto {
    pub label: String,
    pub amount: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialsDto {
    pub creator_id: String,
    pub year: i32,
    pub month: u32,
    pub gross_revenue: String,
    pub marketing_costs: String,
    pub tool_costs: String,
    pub other_costs: String,
    pub custom_costs: Vec<CustomCostDto>,
}

impl FinancialsDto {
    pub fn from_financial(fin: &MonthlyFinancial) -> Self {
        FinancialsDto {
            creator_id: fin.creator_id.to_string(),
            year: fin.year,
            month: fin.month,
            gross_revenue: fin.gross_revenue.to_display_string(),
            marketing_costs: fin.marketing_costs.to_display_string(),
            tool_costs: fin.tool_costs.to_display_string(),
            other_costs: fin.other_costs.to_display_string(),
            custom_costs: fin
                .custom_costs
                .iter()
                .map(|c| CustomCostDto {
                    label: c.label.clone(),
                    amount: c.amount.to_display_string(),
                })
                .collect(),
        }
    }
}

fn non_negative_cost(name: &str, value: Option<f64>) -> Result<Money, AppError> {
    let money = value
        .map(|v| parse_money_field(name, v))
        .transpose()?
        .unwrap_or_else(Money::zero);
    if money.is_negative() {
        return Err(AppError::Validation(format!(
            "{} must be non-negative",
            name
        )));
    }
    Ok(money)
}

pub async fn upsert_financials(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(creator_id): Path<String>,
    Json(body): Json<UpsertFinancialsRequest>,
) -> Result<Json<FinancialsDto>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    actor.require_admin()?;

    let creator_id = CreatorId::new(creator_id);
    state
        .repo
        .get_creator(&creator_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("creator {} not found", creator_id)))?;

    let period = super::parse_period(Some(body.month), Some(body.year))?;

    let mut custom_costs = Vec::with_capacity(body.custom_costs.len());
    for input in &body.custom_costs {
        if input.label.trim().is_empty() {
            return Err(AppError::Validation(
                "custom cost label must not be empty".to_string(),
            ));
        }
        let amount = parse_money_field("customCosts.amount", input.amount)?;
        if amount.is_negative() {
            return Err(AppError::Validation(
                "customCosts.amount must be non-negative".to_string(),
            ));
        }
        custom_costs.push(CustomCost {
            label: input.label.trim().to_string(),
            amount,
        });
    }

    let financial = MonthlyFinancial {
        creator_id,
        year: period.year,
        month: period.month,
        gross_revenue: non_negative_cost("grossRevenue", body.gross_revenue)?,
        marketing_costs: non_negative_cost("marketingCosts", body.marketing_costs)?,
        tool_costs: non_negative_cost("toolCosts", body.tool_costs)?,
        other_costs: non_negative_cost("otherCosts", body.other_costs)?,
        custom_costs,
    };

    state.repo.upsert_monthly_financial(&financial).await?;

    tracing::info!(
        creator_id = %financial.creator_id,
        year = financial.year,
        month = financial.month,
        "monthly financials upserted"
    );
    Ok(Json(FinancialsDto::from_financial(&financial)))
}

pub async fn get_financials(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(creator_id): Path<String>,
    Query(params): Query<FinancialsQuery>,
) -> Result<Json<FinancialsDto>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    actor.require_team_view()?;

    let creator_id = CreatorId::new(creator_id);
    let period = super::parse_period(params.month, params.year)?;

    let financial = state
        .repo
        .get_monthly_financial(&creator_id, period.year, period.month)
        .await?
        .unwrap_or_else(|| MonthlyFinancial::empty(creator_id, period.year, period.month));

    Ok(Json(FinancialsDto::from_financial(&financial)))
}
