use axum::extract::{Path, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::api::AppState;
use crate::domain::{Money, Role, User, UserId};
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUserRequest {
    pub name: String,
    pub role: String,
    pub commission_percent: Option<f64>,
    pub fixed_salary: Option<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission_percent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixed_salary: Option<String>,
}

impl UserDto {
    pub fn from_user(user: &User) -> Self {
        UserDto {
            id: user.id.to_string(),
            name: user.name.clone(),
            role: user.role.to_string(),
            commission_percent: user.commission_percent.map(|m| m.to_display_string()),
            fixed_salary: user.fixed_salary.map(|m| m.to_display_string()),
        }
    }
}

pub(crate) fn parse_money_field(name: &str, value: f64) -> Result<Money, AppError> {
    Money::from_str(&value.to_string())
        .map_err(|_| AppError::BadRequest(format!("Invalid {}", name)))
}

pub async fn create_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateUserRequest>,
) -> Result<Json<UserDto>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    actor.require_admin()?;

    if body.name.trim().is_empty() {
        return Err(AppError::Validation("name must not be empty".to_string()));
    }
    let role = Role::parse(&body.role)
        .ok_or_else(|| AppError::Validation(format!("unknown role {}", body.role)))?;

    let commission_percent = body
        .commission_percent
        .map(|v| parse_money_field("commissionPercent", v))
        .transpose()?;
    if let Some(pct) = commission_percent {
        if pct.is_negative() || pct > Money::hundred() {
            return Err(AppError::Validation(
                "commissionPercent must be between 0 and 100".to_string(),
            ));
        }
    }

    let fixed_salary = body
        .fixed_salary
        .map(|v| parse_money_field("fixedSalary", v))
        .transpose()?;
    if let Some(salary) = fixed_salary {
        if salary.is_negative() {
            return Err(AppError::Validation(
                "fixedSalary must be non-negative".to_string(),
            ));
        }
    }

    let user = User {
        id: UserId::generate(),
        name: body.name.trim().to_string(),
        role,
        commission_percent,
        fixed_salary,
    };
    state.repo.insert_user(&user).await?;

    tracing::info!(user_id = %user.id, role = %user.role, "user created");
    Ok(Json(UserDto::from_user(&user)))
}

pub async fn list_users(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<UserDto>>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    actor.require_team_view()?;

    let users = state.repo.list_users().await?;
    Ok(Json(users.iter().map(UserDto::from_user).collect()))
}

pub async fn get_user(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<Json<UserDto>, AppError> {
    let actor = state.resolve_actor(&headers).await?;
    let target = UserId::new(id);

    // Chatters may only look at themselves.
    if !actor.capabilities.can_view_team() && actor.id() != &target {
        return Err(AppError::Forbidden(
            "cannot view another user's record".to_string(),
        ));
    }

    let user = state
        .repo
        .get_user(&target)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("user {} not found", target)))?;

    Ok(Json(UserDto::from_user(&user)))
}
