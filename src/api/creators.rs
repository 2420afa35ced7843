use axum::extract::State;
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::users::parse_money_field;
use crate::api::AppState;
use crate::domain::{CompensationType, Creator, CreatorId, Money};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCreatorRequest {
    pub name: String,
    pub compensation_type: String,
    pub revenue_share_percent: Option<f64>,
    pub fixed_salary_cost: Option<f64>,
    pub onlyfans_commission_percent: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorDto {
    pub id: String,
    pub name: String,
    pub compensation_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue_share_percent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_salary_cost: Option<String>,
    pub onlyfans_commission_percent: String,
}

impl CreatorDto {
    pub fn from_creator(creator: &Creator) -> Self {
        CreatorDto {
            id: creator.id.to_string(),
            name: creator.name.clone(),
            compensation_type: creator.compensation_type.as_str().to_string(),
            revenue_share_percent: creator
                .revenue_share_percent
                .map(|m| m.to_display_string()),
            fixed_salary_cost: creator.fixed_salary_cost.map(|m| m.to_display_string()),
            onlyfans_commission_percent: creator.onlyfans_commission_percent.to_display_string(),
        }
    }
}

pub async fn create_creator(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateCreatorRequest>,
) -> Result<Json<CreatorDto>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    actor.require_admin()?;

    let name = body.name.trim().to_string();
    if name.is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    if state.repo.get_creator_by_name(&name).await?.is_some() {
        return Err(AppError::Validation(format!(
            "creator name {} is already taken",
            name
        )));
    }

    let compensation_type = CompensationType::parse(&body.compensation_type).ok_or_else(|| {
        AppError::Validation(format!(
            "unknown compensation type {}",
            body.compensation_type
        ))
    })?;

    let revenue_share_percent = body
        .revenue_share_percent
        .map(|v| parse_money_field("revenueSharePercent", v))
        .transpose()?;
    let fixed_salary_cost = body
        .fixed_salary_cost
        .map(|v| parse_money_field("fixedSalaryCost", v))
        .transpose()?;

    // The field the declared model depends on must be present up front;
    // the computation core re-checks this invariant on every read.
    match compensation_type {
        CompensationType::Percentage => {
            let pct = revenue_share_percent.ok_or_else(|| {
                AppError::Validation(
                    "revenueSharePercent is required for PERCENTAGE".to_string(),
                )
            })?;
            if pct.is_negative() || pct > Money::hundred() {
                return Err(AppError::Validation(
                    "revenueSharePercent must be between 0 and 100".to_string(),
                ));
            }
        }
        CompensationType::Salary => {
            let cost = fixed_salary_cost.ok_or_else(|| {
                AppError::Validation("fixedSalaryCost is required for SALARY".to_string())
            })?;
            if cost.is_negative() {
                return Err(AppError::Validation(
                    "fixedSalaryCost must be non-negative".to_string(),
                ));
            }
        }
    }

    let onlyfans_commission_percent = body
        .onlyfans_commission_percent
        .map(|v| parse_money_field("onlyfansCommissionPercent", v))
        .transpose()?
        .unwrap_or_else(Creator::default_platform_percent);

    let creator = Creator {
        id: CreatorId::generate(),
        name,
        compensation_type,
        revenue_share_percent,
        fixed_salary_cost,
        onlyfans_commission_percent,
    };
    state.repo.insert_creator(&creator).await?;

    tracing::info!(creator_id = %creator.id, "creator created");
    Ok(Json(CreatorDto::from_creator(&creator)))
}

pub async fn list_creators(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<CreatorDto>>, AppError> {
    state.resolve_actor(&headers).await?;
    let creators = state.repo.list_creators().await?;
    Ok(Json(creators.iter().map(CreatorDto::from_creator).collect()))
}
