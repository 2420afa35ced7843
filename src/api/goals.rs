use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::api::users::parse_money_field;
use crate::api::AppState;
use crate::db::repo::SaleFilter;
use crate::domain::{
    CreatorId, Goal, GoalScope, GoalType, Money, Period, Sale, TimeMs, UserId,
};
use crate::engine;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateGoalRequest {
    pub user_id: Option<String>,
    pub creator_id: Option<String>,
    pub goal_type: String,
    pub target: f64,
    pub year: i32,
    /// 0 for a yearly goal, 1-12 for a monthly one.
    pub month: u32,
    pub bonus_amount: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalsQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalDto {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
    pub goal_type: String,
    pub target: String,
    pub year: i32,
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_amount: Option<String>,
    pub current: String,
    pub progress_percent: String,
    pub remaining: String,
    pub achieved: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bonus_description: Option<String>,
}

pub async fn create_goal(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateGoalRequest>,
) -> Result<Json<GoalDto>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    actor.require_admin()?;

    let scope = match (body.user_id, body.creator_id) {
        (Some(_), Some(_)) => {
            return Err(AppError::Validation(
                "a goal is scoped to a user or a creator, not both".to_string(),
            ))
        }
        (Some(uid), None) => {
            let uid = UserId::new(uid);
            state
                .repo
                .get_user(&uid)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("user {} not found", uid)))?;
            GoalScope::User(uid)
        }
        (None, Some(cid)) => {
            let cid = CreatorId::new(cid);
            state
                .repo
                .get_creator(&cid)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("creator {} not found", cid)))?;
            GoalScope::Creator(cid)
        }
        (None, None) => GoalScope::Global,
    };

    let goal_type = GoalType::parse(&body.goal_type)
        .ok_or_else(|| AppError::Validation(format!("unknown goal type {}", body.goal_type)))?;

    let target = parse_money_field("target", body.target)?;
    if !target.is_positive() {
        return Err(AppError::Validation("target must be positive".to_string()));
    }
    if body.month > 12 {
        return Err(AppError::Validation(
            "month must be 0 (yearly) or 1-12".to_string(),
        ));
    }
    // A stored out-of-range year would poison every later listing.
    if Period::new(body.year, body.month.max(1)).is_none() {
        return Err(AppError::Validation(format!(
            "year must be between {} and {}",
            Period::MIN_YEAR,
            Period::MAX_YEAR
        )));
    }
    let bonus_amount = body
        .bonus_amount
        .map(|v| parse_money_field("bonusAmount", v))
        .transpose()?;

    let goal = Goal {
        id: uuid::Uuid::new_v4().to_string(),
        scope,
        goal_type,
        target,
        year: body.year,
        month: body.month,
        bonus_amount,
    };
    state.repo.insert_goal(&goal).await?;

    tracing::info!(goal_id = %goal.id, goal_type = goal.goal_type.as_str(), "goal created");
    let dto = build_goal_dto(&state, &goal).await?;
    Ok(Json(dto))
}

pub async fn list_goals(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<GoalsQuery>,
) -> Result<Json<Vec<GoalDto>>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    actor.require_team_view()?;

    let period = super::parse_period(params.month, params.year)?;
    let goals = state.repo.list_goals(period.year, period.month).await?;

    let mut dtos = Vec::with_capacity(goals.len());
    for goal in &goals {
        dtos.push(build_goal_dto(&state, goal).await?);
    }
    Ok(Json(dtos))
}

/// Time window a goal covers: one month, or the whole year for `month = 0`.
fn goal_window(goal: &Goal) -> Result<(TimeMs, TimeMs), AppError> {
    if goal.is_yearly() {
        let jan = Period::new(goal.year, 1)
            .ok_or_else(|| AppError::Internal("invalid goal period".to_string()))?;
        let dec = Period::new(goal.year, 12)
            .ok_or_else(|| AppError::Internal("invalid goal period".to_string()))?;
        Ok((jan.start_ms(), dec.end_ms()))
    } else {
        let period = Period::new(goal.year, goal.month)
            .ok_or_else(|| AppError::Internal("invalid goal period".to_string()))?;
        Ok((period.start_ms(), period.end_ms()))
    }
}

/// Aggregate the goal's current value from the sales in its window.
///
/// SALES sums amounts within the scope. COMMISSION sums what chatters earn
/// on those sales (or, creator-scoped, what the creator earns). REVENUE is
/// the agency's net: sales minus creator earnings, per creator.
async fn aggregate_current(state: &AppState, goal: &Goal) -> Result<Money, AppError> {
    let (from_ms, to_ms) = goal_window(goal)?;
    let filter = SaleFilter {
        user_id: match &goal.scope {
            GoalScope::User(uid) => Some(uid.clone()),
            _ => None,
        },
        creator_id: match &goal.scope {
            GoalScope::Creator(cid) => Some(cid.clone()),
            _ => None,
        },
        from_ms: Some(from_ms),
        to_ms: Some(to_ms),
    };
    let sales = state.repo.query_sales(&filter).await?;

    match (goal.goal_type, &goal.scope) {
        (GoalType::Sales, _) => Ok(sales.iter().map(|s| s.amount).sum()),
        (GoalType::Commission, GoalScope::Creator(cid)) => {
            creator_earnings_over(state, cid, &sales).await
        }
        (GoalType::Commission, _) => chatter_commission_over(state, &sales).await,
        (GoalType::Revenue, GoalScope::User(_)) => Ok(sales.iter().map(|s| s.amount).sum()),
        (GoalType::Revenue, _) => net_revenue_over(state, &sales).await,
    }
}

/// What one creator earns on the given sales.
async fn creator_earnings_over(
    state: &AppState,
    creator_id: &CreatorId,
    sales: &[Sale],
) -> Result<Money, AppError> {
    let creator = state
        .repo
        .get_creator(creator_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("creator {} not found", creator_id)))?;
    let empty = crate::domain::MonthlyFinancial::empty(creator_id.clone(), 0, 1);
    let financials = engine::compute_creator_financials(&creator, sales, &empty)?;
    Ok(financials.creator_earnings)
}

/// Commission earned by chatters across the given sales.
async fn chatter_commission_over(state: &AppState, sales: &[Sale]) -> Result<Money, AppError> {
    let mut by_user: HashMap<&UserId, Vec<Sale>> = HashMap::new();
    for sale in sales {
        by_user.entry(&sale.user_id).or_default().push(sale.clone());
    }

    let mut total = Money::zero();
    for (user_id, user_sales) in by_user {
        let user = state
            .repo
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("user {} not found", user_id)))?;
        total = total + engine::compute_user_earnings(&user, &user_sales).commission;
    }
    Ok(total)
}

/// Net revenue (sales minus creator earnings) across the given sales.
async fn net_revenue_over(state: &AppState, sales: &[Sale]) -> Result<Money, AppError> {
    let mut by_creator: HashMap<&CreatorId, Vec<Sale>> = HashMap::new();
    for sale in sales {
        by_creator
            .entry(&sale.creator_id)
            .or_default()
            .push(sale.clone());
    }

    let mut total = Money::zero();
    for (creator_id, creator_sales) in by_creator {
        let creator = state
            .repo
            .get_creator(creator_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("creator {} not found", creator_id)))?;
        let empty = crate::domain::MonthlyFinancial::empty(creator_id.clone(), 0, 1);
        let financials = engine::compute_creator_financials(&creator, &creator_sales, &empty)?;
        total = total + financials.net_revenue;
    }
    Ok(total)
}

async fn build_goal_dto(state: &AppState, goal: &Goal) -> Result<GoalDto, AppError> {
    let current = aggregate_current(state, goal).await?;
    let progress = engine::compute_progress(goal, current);

    let creator_name = match &goal.scope {
        GoalScope::Creator(cid) => state.repo.get_creator(cid).await?.map(|c| c.name),
        _ => None,
    };
    let bonus_description = engine::bonus_description(goal, &progress, creator_name.as_deref());

    let (user_id, creator_id) = match &goal.scope {
        GoalScope::Global => (None, None),
        GoalScope::User(uid) => (Some(uid.to_string()), None),
        GoalScope::Creator(cid) => (None, Some(cid.to_string())),
    };

    Ok(GoalDto {
        id: goal.id.clone(),
        user_id,
        creator_id,
        goal_type: goal.goal_type.as_str().to_string(),
        target: goal.target.to_display_string(),
        year: goal.year,
        month: goal.month,
        bonus_amount: goal.bonus_amount.map(|m| m.to_display_string()),
        current: progress.current.to_display_string(),
        progress_percent: progress.progress_percent.to_display_string(),
        remaining: progress.remaining.to_display_string(),
        achieved: progress.achieved,
        bonus_description,
    })
}
