use axum::extract::{Path, Query, State};
use axum::http::HeaderMap;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::api::users::parse_money_field;
use crate::api::AppState;
use crate::db::repo::SaleFilter;
use crate::domain::{CreatorId, Sale, SaleType, TimeMs, UserId};
use crate::engine;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSaleRequest {
    /// Chatter the sale belongs to; defaults to the actor. Only managers and
    /// admins may log for someone else.
    pub user_id: Option<String>,
    pub creator_id: String,
    pub amount: f64,
    pub sale_type: String,
    /// Business timestamp; defaults to now.
    pub sale_date: Option<i64>,
    /// The "Backdate Sale" toggle. Can force OFFLINE, never ONLINE.
    pub backdated: Option<bool>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSaleRequest {
    pub amount: f64,
    pub sale_type: String,
    pub sale_date: i64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesQuery {
    pub user_id: Option<String>,
    pub creator_id: Option<String>,
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleDto {
    pub id: String,
    pub user_id: String,
    pub creator_id: String,
    pub amount: String,
    pub sale_type: String,
    pub status: String,
    pub sale_date: i64,
    pub created_at: i64,
    /// Whether the acting user may still edit this sale.
    pub editable: bool,
}

impl SaleDto {
    fn from_sale(sale: &Sale, actor: &crate::auth::Actor, now: TimeMs, window_hours: i64) -> Self {
        SaleDto {
            id: sale.id.clone(),
            user_id: sale.user_id.to_string(),
            creator_id: sale.creator_id.to_string(),
            amount: sale.amount.to_display_string(),
            sale_type: sale.sale_type.as_str().to_string(),
            status: sale.status.as_str().to_string(),
            sale_date: sale.sale_date.as_i64(),
            created_at: sale.created_at.as_i64(),
            editable: engine::can_edit(
                actor.role(),
                &sale.user_id,
                actor.id(),
                sale.sale_date,
                now,
                window_hours,
            ),
        }
    }
}

pub async fn create_sale(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(body): Json<CreateSaleRequest>,
) -> Result<Json<SaleDto>, AppError> {
    let actor = state.resolve_actor(&headers).await?;

    let owner_id = match body.user_id {
        Some(id) if UserId::new(id.clone()) != *actor.id() => {
            if !actor.capabilities.can_log_for_others() {
                return Err(AppError::Forbidden(
                    "cannot log a sale for another chatter".to_string(),
                ));
            }
            let owner = UserId::new(id);
            state
                .repo
                .get_user(&owner)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("user {} not found", owner)))?;
            owner
        }
        _ => actor.id().clone(),
    };

    let creator_id = CreatorId::new(body.creator_id);
    state
        .repo
        .get_creator(&creator_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("creator {} not found", creator_id)))?;

    let amount = parse_money_field("amount", body.amount)?;
    if !amount.is_positive() {
        return Err(AppError::Validation("amount must be positive".to_string()));
    }
    let sale_type = SaleType::parse(&body.sale_type)
        .ok_or_else(|| AppError::Validation(format!("unknown sale type {}", body.sale_type)))?;

    let now = TimeMs::now();
    let sale_date = body.sale_date.map(TimeMs::new).unwrap_or(now);
    let status = engine::classify_status(
        sale_date,
        now,
        body.backdated.unwrap_or(false),
        state.config.backdate_tolerance_secs,
    );

    let sale = Sale::new(owner_id, creator_id, amount, sale_type, status, sale_date, now);
    state.repo.insert_sale(&sale).await?;

    tracing::info!(sale_id = %sale.id, status = sale.status.as_str(), "sale logged");
    Ok(Json(SaleDto::from_sale(
        &sale,
        &actor,
        now,
        state.config.edit_window_hours,
    )))
}

pub async fn list_sales(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<SalesQuery>,
) -> Result<Json<Vec<SaleDto>>, AppError> {
    let actor = state.resolve_actor(&headers).await?;

    // Chatters see only their own sales regardless of the filter asked for.
    let user_id = if actor.capabilities.can_view_team() {
        params.user_id.map(UserId::new)
    } else {
        Some(actor.id().clone())
    };

    let (from_ms, to_ms) = match (params.month, params.year) {
        (None, None) => (None, None),
        (month, year) => {
            let period = super::parse_period(month, year)?;
            (Some(period.start_ms()), Some(period.end_ms()))
        }
    };

    let sales = state
        .repo
        .query_sales(&SaleFilter {
            user_id,
            creator_id: params.creator_id.map(CreatorId::new),
            from_ms,
            to_ms,
        })
        .await?;

    let now = TimeMs::now();
    Ok(Json(
        sales
            .iter()
            .map(|s| SaleDto::from_sale(s, &actor, now, state.config.edit_window_hours))
            .collect(),
    ))
}

pub async fn update_sale(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<UpdateSaleRequest>,
) -> Result<Json<SaleDto>, AppError> {
    let actor = state.resolve_actor(&headers).await?;

    let sale = state
        .repo
        .get_sale(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("sale {} not found", id)))?;

    let now = TimeMs::now();
    if !engine::can_edit(
        actor.role(),
        &sale.user_id,
        actor.id(),
        sale.sale_date,
        now,
        state.config.edit_window_hours,
    ) {
        return Err(AppError::Forbidden(
            "the edit window for this sale has closed".to_string(),
        ));
    }

    let amount = parse_money_field("amount", body.amount)?;
    if !amount.is_positive() {
        return Err(AppError::Validation("amount must be positive".to_string()));
    }
    let sale_type = SaleType::parse(&body.sale_type)
        .ok_or_else(|| AppError::Validation(format!("unknown sale type {}", body.sale_type)))?;

    state
        .repo
        .update_sale(&id, amount, sale_type, TimeMs::new(body.sale_date))
        .await?;

    let updated = state
        .repo
        .get_sale(&id)
        .await?
        .ok_or_else(|| AppError::Internal("sale vanished during update".to_string()))?;

    Ok(Json(SaleDto::from_sale(
        &updated,
        &actor,
        now,
        state.config.edit_window_hours,
    )))
}
